//! Download filename derivation
//!
//! Turns arbitrary user input into a base name that is safe both on disk and
//! inside a quoted `Content-Disposition` value.

use url::{ParseError, Url};

/// Used when nothing safe survives sanitization
pub const FALLBACK_FILENAME: &str = "qrcode";

const fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Derive a filename base (no extension) from the raw `data` value.
///
/// URLs yield their last path segment, or their host when the path has no
/// segments. Relative paths such as `example.com/docs/page.html` yield their
/// last segment too. Anything else is used as-is. Characters outside
/// `[A-Za-z0-9._-]` are then removed; non-ASCII letters are dropped rather
/// than transliterated.
pub fn derive_filename_base(raw: &str) -> String {
    let trimmed = raw.trim();

    let candidate = match Url::parse(trimmed) {
        Ok(url) if !url.path().is_empty() => url_candidate(&url),
        Ok(_) => None,
        Err(ParseError::RelativeUrlWithoutBase) => last_segment(trimmed).map(str::to_string),
        Err(_) => None,
    };

    sanitize(candidate.as_deref().unwrap_or(trimmed))
}

/// Last non-empty path segment, else the host
fn url_candidate(url: &Url) -> Option<String> {
    last_segment(url.path())
        .or_else(|| url.host_str().filter(|host| !host.is_empty()))
        .map(str::to_string)
}

fn last_segment(path: &str) -> Option<&str> {
    path.split('/').rfind(|segment| !segment.is_empty())
}

fn sanitize(candidate: &str) -> String {
    let cleaned: String = candidate.chars().filter(|&c| is_safe_char(c)).collect();
    match cleaned.as_str() {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_safe(name: &str) {
        assert!(
            !name.is_empty() && name.chars().all(is_safe_char),
            "unsafe filename: {name:?}"
        );
        assert_ne!(name, ".");
        assert_ne!(name, "..");
    }

    #[test]
    fn test_url_last_segment() {
        assert_eq!(
            derive_filename_base("https://example.com/path/to/page.html"),
            "page.html"
        );
        assert_eq!(
            derive_filename_base("https://example.com/docs/guide/"),
            "guide"
        );
    }

    #[test]
    fn test_url_without_segments_uses_host() {
        assert_eq!(derive_filename_base("https://example.com/"), "example.com");
        assert_eq!(derive_filename_base("  https://example.com/  "), "example.com");
    }

    #[test]
    fn test_url_without_trailing_slash_uses_host() {
        // Special schemes normalize an empty path to "/"
        assert_eq!(derive_filename_base("https://example.com"), "example.com");
        assert_eq!(derive_filename_base("http://example.com?q=1"), "example.com");
    }

    #[test]
    fn test_relative_paths_use_last_segment() {
        assert_eq!(
            derive_filename_base("example.com/path/page.html"),
            "page.html"
        );
        assert_eq!(derive_filename_base("a/b/c.txt"), "c.txt");
        assert_eq!(derive_filename_base("www.example.com/docs/"), "docs");
        assert_eq!(derive_filename_base("/just/one"), "one");
        assert_eq!(derive_filename_base("///"), FALLBACK_FILENAME);
        assert_eq!(derive_filename_base("../.."), FALLBACK_FILENAME);
    }

    #[test]
    fn test_plain_text_is_stripped() {
        assert_eq!(derive_filename_base("hello world!!"), "helloworld");
        assert_eq!(derive_filename_base("report_2024-01.pdf"), "report_2024-01.pdf");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(derive_filename_base(""), FALLBACK_FILENAME);
        assert_eq!(derive_filename_base("   "), FALLBACK_FILENAME);
        assert_eq!(derive_filename_base("###"), FALLBACK_FILENAME);
        assert_eq!(derive_filename_base("!!!"), FALLBACK_FILENAME);
        assert_eq!(derive_filename_base("."), FALLBACK_FILENAME);
        assert_eq!(derive_filename_base(".."), FALLBACK_FILENAME);
    }

    #[test]
    fn test_non_ascii_is_removed() {
        assert_eq!(derive_filename_base("résumé"), "rsum");
        assert_eq!(derive_filename_base("café"), "caf");
    }

    #[test]
    fn test_header_injection_and_traversal() {
        let name = derive_filename_base("evil\r\nSet-Cookie: a=b");
        assert_safe(&name);
        assert!(!name.contains(['\r', '\n', ':', ' ']));

        let name = derive_filename_base("../../etc/passwd");
        assert_safe(&name);
        assert_eq!(name, "passwd");

        let name = derive_filename_base("file:///../..");
        assert_safe(&name);
    }

    #[test]
    fn test_always_safe() {
        let inputs = [
            "",
            "a",
            "\"quoted\"",
            "https://例え.jp/",
            "https://example.com/%2e%2e/",
            "mailto:someone@example.com",
            "http://[::1]/",
            "ftp://host/..",
            "\u{0}\u{1}\u{7f}",
            "data:text/plain,hello",
        ];
        for input in inputs {
            assert_safe(&derive_filename_base(input));
        }
    }
}
