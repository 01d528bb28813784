//! libcurl-backed [`Transport`].

use std::str;
use std::time::Duration;

use super::headers::parse_final_headers;
use super::{loggable_url, HttpRequest, HttpResponse, Transport};
use crate::config::SkupackConfig;
use crate::retry::{classify_http_status, run_with_retry, ErrorKind, FetchError, RetryPolicy};

/// Per-attempt limits for [`CurlTransport`].
#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: u32,
    pub retry: RetryPolicy,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(120),
            max_redirects: 10,
            retry: RetryPolicy::default(),
        }
    }
}

impl TransportOptions {
    pub fn from_config(cfg: &SkupackConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_redirects: cfg.max_redirects,
            retry: cfg.retry_policy(),
        }
    }
}

/// Blocking GET over a fresh curl `Easy` handle per attempt. Follows
/// redirects and buffers the whole body in memory (one image at a time).
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: TransportOptions,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    pub fn from_config(cfg: &SkupackConfig) -> Self {
        Self::new(TransportOptions::from_config(cfg))
    }

    fn perform_once(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirects)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.timeout)?;
        // Let libcurl negotiate and transparently decode gzip/deflate.
        easy.accept_encoding("")?;

        let mut list = curl::easy::List::new();
        for (name, value) in &request.headers {
            list.append(&format!("{}: {}", name.trim(), value.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let effective_url = easy.effective_url()?.map(str::to_string);

        Ok(HttpResponse {
            status,
            headers: parse_final_headers(&header_lines),
            body,
            effective_url,
        })
    }
}

impl Transport for CurlTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        run_with_retry(&self.options.retry, || {
            let response = self.perform_once(request)?;
            if classify_http_status(response.status) != ErrorKind::Other {
                return Err(FetchError::Http(response.status));
            }
            tracing::debug!(
                url = loggable_url(&request.url),
                status = response.status,
                bytes = response.body.len(),
                "GET done"
            );
            Ok(response)
        })
    }
}
