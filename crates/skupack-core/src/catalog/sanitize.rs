//! Folder-path and filename sanitization for catalog entries and archive paths.

/// Characters never allowed in a folder segment.
const FORBIDDEN_PATH_CHARS: [char; 8] = ['?', '%', '*', ':', '|', '"', '<', '>'];

fn is_forbidden_in_name(c: char) -> bool {
    c == '/' || c == '\\' || FORBIDDEN_PATH_CHARS.contains(&c)
}

/// Collapse whitespace (tabs and control characters included) into single spaces.
fn squash_whitespace(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sanitizes a relative folder path.
///
/// - Backslashes become `/`; repeated slashes collapse
/// - Leading `./`, empty segments, and `.`/`..` segments are dropped, so the
///   result never escapes its root and never starts with `/`
/// - `? % * : | " < >` and control characters are removed
pub fn sanitize_folder_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .map(|segment| {
            let kept: String = segment
                .chars()
                .filter(|c| !FORBIDDEN_PATH_CHARS.contains(c))
                .collect();
            squash_whitespace(&kept)
        })
        .filter(|segment| !segment.is_empty() && !segment.chars().all(|c| c == '.'))
        .collect::<Vec<_>>()
        .join("/")
}

/// Sanitizes a single filename: strips path separators and the characters
/// forbidden in folder paths, squashes whitespace. Names made only of dots
/// collapse to the empty string.
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name.chars().filter(|c| !is_forbidden_in_name(*c)).collect();
    let squashed = squash_whitespace(&kept);
    if squashed.chars().all(|c| c == '.') {
        return String::new();
    }
    squashed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators() {
        assert_eq!(sanitize_folder_path("katalog\\produk//raw/"), "katalog/produk/raw");
    }

    #[test]
    fn strips_leading_dot_slash_and_root() {
        assert_eq!(sanitize_folder_path("./katalog/a"), "katalog/a");
        assert_eq!(sanitize_folder_path("/abs/path"), "abs/path");
        assert_eq!(sanitize_folder_path("//x"), "x");
    }

    #[test]
    fn drops_traversal_segments() {
        assert_eq!(sanitize_folder_path("../../etc/passwd"), "etc/passwd");
        assert_eq!(sanitize_folder_path("a/../b/./c/..."), "a/b/c");
    }

    #[test]
    fn removes_forbidden_characters() {
        assert_eq!(
            sanitize_folder_path("kat?al%og/pro*d:u|k\"<1>"),
            "katalog/produk1"
        );
    }

    #[test]
    fn squashes_whitespace_inside_segments() {
        assert_eq!(sanitize_folder_path("  baju \t anak / merah  "), "baju anak/merah");
    }

    #[test]
    fn folder_path_never_has_traversal_or_leading_slash() {
        for input in ["/..", "..\\..\\x", "a/%2e%2e/b", "/ / /", "?:*", "./.././x/"] {
            let out = sanitize_folder_path(input);
            assert!(!out.starts_with('/'), "{input:?} -> {out:?}");
            assert!(!out.split('/').any(|s| s == ".."), "{input:?} -> {out:?}");
            assert!(!out.contains(FORBIDDEN_PATH_CHARS), "{input:?} -> {out:?}");
        }
    }

    #[test]
    fn filename_loses_separators() {
        assert_eq!(sanitize_filename("a/b\\c?.png"), "abc.png");
        assert_eq!(sanitize_filename("  front   view.jpg "), "front view.jpg");
    }

    #[test]
    fn dot_only_filenames_are_empty() {
        assert_eq!(sanitize_filename(".."), "");
        assert_eq!(sanitize_filename("../"), "");
    }
}
