//! Parse raw header lines collected by curl's header callback.

/// Parse header lines into (name, value) pairs for the final response.
///
/// When redirects are followed curl reports every hop's block; each `HTTP/`
/// status line starts a new block. Earlier blocks are dropped except for their
/// `Set-Cookie` headers, which the server expects to see on later requests.
pub fn parse_final_headers(lines: &[String]) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for line in lines {
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            headers.retain(|(name, _)| name.eq_ignore_ascii_case("set-cookie"));
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}
