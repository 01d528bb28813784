//! Drive-aware resolver: turns one catalog URL into image bytes.
//!
//! URLs are classified (folder / share / direct) and walked through an
//! ordered list of [`Strategy`] values. Every network or parse failure inside
//! a strategy only means "try the next one"; the caller sees a
//! [`ResolveError`] once the whole chain is exhausted.

mod api;
mod confirm;
mod direct;
mod endpoints;
mod folder;
mod share;
mod sniff;

pub use api::{ApiError, DriveEntry, FileList, FOLDER_MIME, NATIVE_MIME_PREFIX};
pub use endpoints::DriveEndpoints;
pub use sniff::{effective_mime, sniff_image_mime};

use thiserror::Error;

use crate::config::SkupackConfig;
use crate::drive_url::{self, UrlKind};
use crate::http::{loggable_url, CookieJar, CurlTransport, HttpRequest, HttpResponse, Transport};

/// Binary content obtained for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Path-qualified name inside the catalog folder (folder expansions only).
    /// Single-file results leave naming to the catalog.
    pub filename: Option<String>,
    /// Name reported by the server (Content-Disposition or Drive metadata).
    pub source_name: Option<String>,
}

/// Request-level outcome when a URL yields no content.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("folder links need a Drive API key (set drive_api_key or SKUPACK_DRIVE_API_KEY)")]
    FolderUnsupported,
    #[error("folder {0} has no downloadable files")]
    FolderEmpty(String),
    #[error("could not list folder {folder_id}: {source}")]
    Listing {
        folder_id: String,
        #[source]
        source: ApiError,
    },
    #[error("no Drive file id in {0}")]
    InvalidDriveUrl(String),
    #[error("could not download {0}; the file may require Google account access or is not publicly shared")]
    Exhausted(String),
}

impl ResolveError {
    /// Folder-level failures that say nothing about individual files.
    pub fn is_request_level(&self) -> bool {
        matches!(
            self,
            ResolveError::FolderUnsupported
                | ResolveError::FolderEmpty(_)
                | ResolveError::Listing { .. }
        )
    }
}

/// Turns a catalog URL into one or more downloaded files.
pub trait Resolver {
    fn resolve(&self, url: &str) -> Result<Vec<DownloadResult>, ResolveError>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, url: &str) -> Result<Vec<DownloadResult>, ResolveError> {
        (**self).resolve(url)
    }
}

/// One way of getting Drive file content, tried in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Drive API metadata + `alt=media` with a key.
    AuthenticatedApi,
    /// Thumbnail host, export URLs, consent-page scraping.
    PublicScrape,
}

/// Request headers and heuristics applied by [`DriveResolver`].
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// Drive bodies shorter than this are treated as error pages.
    pub min_payload_bytes: usize,
    pub api_key: Option<String>,
    pub endpoints: DriveEndpoints,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&SkupackConfig::default())
    }
}

impl ResolverSettings {
    pub fn from_config(cfg: &SkupackConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            accept: cfg.accept.clone(),
            accept_language: cfg.accept_language.clone(),
            min_payload_bytes: cfg.min_payload_bytes,
            api_key: cfg
                .drive_api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            endpoints: cfg.endpoints(),
        }
    }
}

/// Why a response was not taken as file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Status(u32),
    Html,
    TooSmall(usize),
    NotImage,
}

#[derive(Debug, Clone)]
pub struct DriveResolver<T: Transport = CurlTransport> {
    transport: T,
    settings: ResolverSettings,
}

impl DriveResolver<CurlTransport> {
    pub fn from_config(cfg: &SkupackConfig) -> Self {
        Self::new(CurlTransport::from_config(cfg), ResolverSettings::from_config(cfg))
    }
}

impl<T: Transport> DriveResolver<T> {
    pub fn new(transport: T, settings: ResolverSettings) -> Self {
        Self { transport, settings }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Strategies for a single Drive file, most reliable first.
    pub fn strategies(&self) -> Vec<Strategy> {
        let mut out = Vec::with_capacity(2);
        if self.settings.api_key.is_some() {
            out.push(Strategy::AuthenticatedApi);
        }
        out.push(Strategy::PublicScrape);
        out
    }

    /// Resolve one Drive file id through the strategy chain.
    pub(crate) fn download_file(&self, id: &str) -> Option<DownloadResult> {
        for strategy in self.strategies() {
            let result = match strategy {
                Strategy::AuthenticatedApi => self
                    .settings
                    .api_key
                    .as_deref()
                    .and_then(|key| self.api_download(key, id)),
                Strategy::PublicScrape => self.scrape_file(id),
            };
            if result.is_some() {
                return result;
            }
            tracing::debug!(file_id = id, ?strategy, "strategy failed");
        }
        None
    }

    fn request(&self, url: &str) -> HttpRequest {
        HttpRequest::get(url)
            .header("User-Agent", self.settings.user_agent.as_str())
            .header("Accept", self.settings.accept.as_str())
            .header("Accept-Language", self.settings.accept_language.as_str())
    }

    /// One GET. Cookies from `jar` are sent and the response's `Set-Cookie`
    /// headers are absorbed back into it. Transport errors become `None`.
    fn fetch(&self, url: &str, jar: Option<&mut CookieJar>) -> Option<HttpResponse> {
        let mut request = self.request(url);
        if let Some(cookie) = jar.as_ref().and_then(|j| j.header_value()) {
            request = request.header("Cookie", cookie);
        }
        match self.transport.get(&request) {
            Ok(response) => {
                if let Some(jar) = jar {
                    jar.absorb(&response);
                }
                Some(response)
            }
            Err(e) => {
                tracing::debug!(url = loggable_url(url), error = %e, "request failed");
                None
            }
        }
    }

    /// Accept a response as image content: success, not HTML, at least
    /// `min_len` bytes, and (when `require_image`) an image, octet-stream or
    /// sniffable body.
    fn check_payload(
        &self,
        response: &HttpResponse,
        min_len: usize,
        require_image: bool,
    ) -> Result<(), Rejection> {
        if !response.is_success() {
            return Err(Rejection::Status(response.status));
        }
        if response.is_html() {
            return Err(Rejection::Html);
        }
        if response.body.is_empty() || response.body.len() < min_len {
            return Err(Rejection::TooSmall(response.body.len()));
        }
        if require_image {
            let declared = response.content_type();
            let declared_ok =
                declared.starts_with("image/") || declared == "application/octet-stream";
            if !declared_ok && sniff_image_mime(&response.body).is_none() {
                return Err(Rejection::NotImage);
            }
        }
        Ok(())
    }

    /// Drive payload check using the configured minimum size.
    fn accept_drive_payload(
        &self,
        response: HttpResponse,
        source_name: Option<String>,
    ) -> Option<DownloadResult> {
        match self.check_payload(&response, self.settings.min_payload_bytes, true) {
            Ok(()) => Some(into_result(response, source_name)),
            Err(rejection) => {
                tracing::debug!(
                    url = response.effective_url.as_deref().map(loggable_url).unwrap_or_default(),
                    ?rejection,
                    "response rejected"
                );
                None
            }
        }
    }
}

impl<T: Transport> Resolver for DriveResolver<T> {
    fn resolve(&self, url: &str) -> Result<Vec<DownloadResult>, ResolveError> {
        let url = url.trim();
        match drive_url::classify(url) {
            UrlKind::Direct => self.fetch_direct(url),
            UrlKind::Folder => self.resolve_folder(url),
            UrlKind::Share => {
                let id = drive_url::extract_file_id(url)
                    .ok_or_else(|| ResolveError::InvalidDriveUrl(url.to_string()))?;
                match self.download_file(&id) {
                    Some(result) => Ok(vec![result]),
                    None => {
                        tracing::warn!(file_id = %id, "all strategies failed");
                        Err(ResolveError::Exhausted(url.to_string()))
                    }
                }
            }
        }
    }
}

fn into_result(response: HttpResponse, source_name: Option<String>) -> DownloadResult {
    let mime_type = effective_mime(&response.body, &response.content_type());
    DownloadResult {
        bytes: response.body,
        mime_type,
        filename: None,
        source_name,
    }
}
