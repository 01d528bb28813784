//! Magic-byte image type detection.

/// Image MIME type from the first bytes of a body, if recognizable.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, ..] => Some("image/jpeg"),
        [0x89, 0x50, ..] => Some("image/png"),
        [0x47, 0x49, ..] => Some("image/gif"),
        [0x52, 0x49, ..] => Some("image/webp"),
        _ => None,
    }
}

/// MIME type recorded for a payload: sniffed type first, then a declared
/// `image/*` type, else `image/jpeg`.
pub fn effective_mime(bytes: &[u8], declared: &str) -> String {
    if let Some(sniffed) = sniff_image_mime(bytes) {
        return sniffed.to_string();
    }
    let declared = declared.split(';').next().unwrap_or_default().trim();
    if declared.to_ascii_lowercase().starts_with("image/") {
        return declared.to_ascii_lowercase();
    }
    "image/jpeg".to_string()
}
