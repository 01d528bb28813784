//! Public scraping chain for a single Drive file.

use super::confirm::{find_confirm_token, find_download_link};
use super::{DownloadResult, DriveResolver};
use crate::http::{CookieJar, Transport};

impl<T: Transport> DriveResolver<T> {
    /// Thumbnail host, export URL, export with `confirm=t`, usercontent host,
    /// then a cookie-less `authuser=0` fallback. Cookies from every attempt
    /// are carried into the following ones.
    pub(super) fn scrape_file(&self, id: &str) -> Option<DownloadResult> {
        let endpoints = &self.settings.endpoints;
        let mut jar = CookieJar::new();
        let steps = [
            endpoints.thumbnail_url(id),
            endpoints.export_url(id),
            endpoints.export_confirm_url(id, "t"),
            endpoints.usercontent_url(id),
        ];
        for (step, url) in steps.iter().enumerate() {
            tracing::debug!(file_id = id, step, cookies = jar.len(), "scrape attempt");
            if let Some(result) = self.scrape_step(url, id, &mut jar) {
                return Some(result);
            }
        }

        tracing::debug!(file_id = id, "scrape fallback");
        let response = self.fetch(&endpoints.fallback_url(id), None)?;
        self.accept_drive_payload(response, None)
    }

    fn scrape_step(&self, url: &str, id: &str, jar: &mut CookieJar) -> Option<DownloadResult> {
        let response = self.fetch(url, Some(&mut *jar))?;
        if response.is_html() {
            return self.follow_interstitial(&response.text(), id, jar);
        }
        self.accept_drive_payload(response, None)
    }

    /// An HTML answer is a virus-scan warning or consent page: retry with the
    /// page's confirm token, else follow its relative download link.
    fn follow_interstitial(
        &self,
        html: &str,
        id: &str,
        jar: &mut CookieJar,
    ) -> Option<DownloadResult> {
        let endpoints = &self.settings.endpoints;
        if let Some(token) = find_confirm_token(html) {
            tracing::debug!(file_id = id, "confirm token found");
            let url = endpoints.export_confirm_url(id, &token);
            if let Some(result) = self
                .fetch(&url, Some(&mut *jar))
                .and_then(|r| self.accept_drive_payload(r, None))
            {
                return Some(result);
            }
        }
        if let Some(link) = find_download_link(html) {
            tracing::debug!(file_id = id, "following scraped download link");
            let url = endpoints.drive_relative(&link);
            return self
                .fetch(&url, Some(&mut *jar))
                .and_then(|r| self.accept_drive_payload(r, None));
        }
        None
    }
}
