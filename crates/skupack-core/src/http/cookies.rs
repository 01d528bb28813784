//! Cookie accumulator threaded through one resolution.
//!
//! Drive hands out `download_warning`/`NID` style cookies on the first attempt
//! and expects them back on the confirmation request. The jar is owned by the
//! caller and passed explicitly to each attempt; nothing is shared between
//! resolutions.

use super::HttpResponse;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Store one `Set-Cookie` value. Attributes (`Path`, `Expires`, ...) are
    /// ignored; a later cookie with the same name replaces the earlier one and
    /// an empty value deletes it.
    pub fn store(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };
        let name = name.trim();
        let value = value.trim().trim_matches('"');
        if name.is_empty() {
            return;
        }
        self.cookies.retain(|(n, _)| n != name);
        if !value.is_empty() {
            self.cookies.push((name.to_string(), value.to_string()));
        }
    }

    /// Absorb every `Set-Cookie` header of a response.
    pub fn absorb(&mut self, response: &HttpResponse) {
        for value in response.header_values("set-cookie") {
            self.store(value);
        }
    }

    /// Value for a `Cookie` request header, or `None` when the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(n, v)| format!("{}={}", n, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
