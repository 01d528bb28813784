//! Scraping of Drive's virus-scan / consent interstitial pages.

use regex::Regex;
use std::sync::LazyLock;

static CONFIRM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"confirm=([0-9A-Za-z_\-]+)").unwrap());
static DOWNLOAD_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="(/uc\?export=download[^"]+)""#).unwrap());
static CONFIRM_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name="confirm"\s+value="([0-9A-Za-z_\-]+)""#).unwrap()
});

/// `confirm=<token>` from a query string in the page, or from a hidden
/// `confirm` form field.
pub(super) fn find_confirm_token(html: &str) -> Option<String> {
    CONFIRM_TOKEN
        .captures(html)
        .or_else(|| CONFIRM_INPUT.captures(html))
        .map(|c| c[1].to_string())
}

/// Site-relative `/uc?export=download...` link with `&amp;` decoded.
pub(super) fn find_download_link(html: &str) -> Option<String> {
    DOWNLOAD_HREF
        .captures(html)
        .map(|c| c[1].replace("&amp;", "&"))
}
