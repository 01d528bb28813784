//! Filename hint from a `Content-Disposition` header.

/// Extracts the filename from a raw Content-Disposition value.
///
/// `filename*=UTF-8''percent%20encoded` (RFC 5987) wins over `filename=`,
/// which may be quoted (with backslash escapes) or a bare token.
pub fn parse_content_disposition_filename(header_value: &str) -> Option<String> {
    let mut plain: Option<String> = None;

    for (name, value) in params(header_value) {
        if name.eq_ignore_ascii_case("filename*") {
            let encoded = value
                .split_once("''")
                .filter(|(charset, _)| charset.eq_ignore_ascii_case("utf-8"))
                .map(|(_, rest)| rest);
            if let Some(decoded) = encoded.map(percent_decode).filter(|s| !s.is_empty()) {
                return Some(decoded);
            }
        } else if name.eq_ignore_ascii_case("filename") && plain.is_none() {
            let unquoted = unquote(value);
            if !unquoted.is_empty() {
                plain = Some(unquoted);
            }
        }
    }

    plain
}

fn params(header_value: &str) -> impl Iterator<Item = (&str, &str)> {
    header_value
        .split(';')
        .filter_map(|param| param.split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
}

fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    out
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_filename() {
        let r = parse_content_disposition_filename("attachment; filename=\"front view.jpg\"");
        assert_eq!(r.as_deref(), Some("front view.jpg"));
    }

    #[test]
    fn token_filename() {
        let r = parse_content_disposition_filename("inline; filename=IMG_0001.JPG");
        assert_eq!(r.as_deref(), Some("IMG_0001.JPG"));
    }

    #[test]
    fn escaped_quote_inside_quoted_value() {
        let r = parse_content_disposition_filename(r#"attachment; filename="a\"b.png""#);
        assert_eq!(r.as_deref(), Some("a\"b.png"));
    }

    #[test]
    fn encoded_filename_takes_precedence() {
        let r = parse_content_disposition_filename(
            "attachment; filename=\"fallback.jpg\"; filename*=UTF-8''kaos%20merah.jpg",
        );
        assert_eq!(r.as_deref(), Some("kaos merah.jpg"));
    }

    #[test]
    fn truncated_escape_is_kept_literally() {
        let r = parse_content_disposition_filename("attachment; filename*=utf-8''50%");
        assert_eq!(r.as_deref(), Some("50%"));
    }

    #[test]
    fn no_filename_param() {
        assert_eq!(parse_content_disposition_filename("inline"), None);
    }
}
