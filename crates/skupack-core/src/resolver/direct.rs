//! Non-Drive links: one GET, reject HTML.

use super::{into_result, DownloadResult, DriveResolver, ResolveError};
use crate::catalog::sanitize_filename;
use crate::http::{parse_content_disposition_filename, HttpResponse, Transport};

impl<T: Transport> DriveResolver<T> {
    pub(super) fn fetch_direct(&self, url: &str) -> Result<Vec<DownloadResult>, ResolveError> {
        let exhausted = || ResolveError::Exhausted(url.to_string());
        let response = self.fetch(url, None).ok_or_else(exhausted)?;
        if let Err(rejection) = self.check_payload(&response, 1, false) {
            tracing::warn!(status = response.status, ?rejection, "direct link rejected");
            return Err(exhausted());
        }
        let name = response_filename(&response, url);
        Ok(vec![into_result(response, name)])
    }
}

/// Content-Disposition filename, else the last path segment of the final URL.
fn response_filename(response: &HttpResponse, requested: &str) -> Option<String> {
    let from_header = response
        .header("content-disposition")
        .and_then(parse_content_disposition_filename);
    let from_path = || {
        let final_url = response.effective_url.as_deref().unwrap_or(requested);
        url::Url::parse(final_url).ok().and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
    };
    from_header
        .or_else(from_path)
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(headers: &[(&str, &str)], effective: Option<&str>) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: vec![1, 2, 3],
            effective_url: effective.map(str::to_string),
        }
    }

    #[test]
    fn disposition_wins_over_path() {
        let r = response(
            &[("Content-Disposition", "attachment; filename=\"front view.jpg\"")],
            None,
        );
        assert_eq!(
            response_filename(&r, "https://cdn.example.com/x/y.png").as_deref(),
            Some("front view.jpg")
        );
    }

    #[test]
    fn final_path_segment_after_redirect() {
        let r = response(&[], Some("https://img.example.com/a/b/final.webp?sig=1"));
        assert_eq!(
            response_filename(&r, "https://cdn.example.com/short").as_deref(),
            Some("final.webp")
        );
    }

    #[test]
    fn empty_path_yields_no_name() {
        let r = response(&[], None);
        assert_eq!(response_filename(&r, "https://cdn.example.com/"), None);
    }
}
