//! Minimal HTTP GET layer used by the resolver.
//!
//! [`Transport`] is the seam between resolution logic and the network: the
//! production implementation is [`CurlTransport`] (libcurl `Easy`), tests plug
//! in scripted transports.

mod content_disposition;
mod cookies;
mod curl_transport;
mod headers;

pub use self::content_disposition::parse_content_disposition_filename;
pub use self::cookies::CookieJar;
pub use self::curl_transport::{CurlTransport, TransportOptions};
pub use self::headers::parse_final_headers;

use crate::retry::FetchError;

/// One GET request: URL plus extra headers in send order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Value of the first header named `name` (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Completed response after redirects: final status, final headers, full body.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// URL of the last hop when redirects were followed.
    pub effective_url: Option<String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values of a repeatable header (e.g. `Set-Cookie`).
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Declared content type, lowercased, without parameters. Empty when absent.
    pub fn content_type(&self) -> String {
        self.header("content-type")
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// True when the server declared an HTML body (login, consent, or warning page).
    pub fn is_html(&self) -> bool {
        self.content_type().contains("text/html")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A blocking HTTP GET. Implementations apply their own timeouts and
/// transient-error retries; a returned `HttpResponse` may still carry a
/// non-2xx status.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        (**self).get(request)
    }
}

/// URL with its query string and fragment dropped, so API keys and confirm
/// tokens stay out of logs.
pub fn loggable_url(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}
