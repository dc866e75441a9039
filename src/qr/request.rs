//! Query parameters of a generator request

use url::form_urlencoded;

/// Download encoding selected by the `format` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Png,
    #[default]
    Jpeg,
    Svg,
}

impl OutputFormat {
    /// Parse a `format` value, case-insensitively.
    ///
    /// Anything unrecognized falls back to JPEG.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("png") {
            Self::Png
        } else if value.eq_ignore_ascii_case("svg") {
            Self::Svg
        } else {
            Self::Jpeg
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// A single generator request, built from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrRequest {
    /// Payload to encode; `None` renders the empty form
    pub data: Option<String>,
    /// `download` was present (any value, even empty)
    pub download: bool,
    pub format: OutputFormat,
}

impl QrRequest {
    /// Build a request from a raw (still percent-encoded) query string.
    ///
    /// Repeated keys keep their last value.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut request = Self::default();
        let Some(query) = query else {
            return request;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "data" => request.data = Some(value.into_owned()),
                "download" => request.download = true,
                "format" => request.format = OutputFormat::from_param(&value),
                _ => {}
            }
        }
        request
    }

    /// Whether an attachment should be streamed instead of the page
    pub const fn wants_download(&self) -> bool {
        self.download && self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_param("png"), OutputFormat::Png);
        assert_eq!(OutputFormat::from_param("PNG"), OutputFormat::Png);
        assert_eq!(OutputFormat::from_param("Svg"), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_param("jpeg"), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_param("xyz"), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_param(""), OutputFormat::Jpeg);
    }

    #[test]
    fn test_format_metadata_is_distinct() {
        let formats = [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::Svg];
        for (i, a) in formats.iter().enumerate() {
            for b in &formats[i + 1..] {
                assert_ne!(a.extension(), b.extension());
                assert_ne!(a.content_type(), b.content_type());
            }
        }
    }

    #[test]
    fn test_no_query() {
        let request = QrRequest::from_query(None);
        assert_eq!(request.data, None);
        assert!(!request.download);
        assert_eq!(request.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_query_decoding() {
        let request = QrRequest::from_query(Some("data=hello+world%21&download&format=SVG"));
        assert_eq!(request.data.as_deref(), Some("hello world!"));
        assert!(request.download);
        assert_eq!(request.format, OutputFormat::Svg);
        assert!(request.wants_download());
    }

    #[test]
    fn test_empty_values_still_present() {
        let request = QrRequest::from_query(Some("data=&download="));
        assert_eq!(request.data.as_deref(), Some(""));
        assert!(request.download);
    }

    #[test]
    fn test_last_value_wins() {
        let request = QrRequest::from_query(Some("data=a&data=b&format=svg&format=png"));
        assert_eq!(request.data.as_deref(), Some("b"));
        assert_eq!(request.format, OutputFormat::Png);
    }

    #[test]
    fn test_download_without_data_is_form_only() {
        let request = QrRequest::from_query(Some("download=1&format=png"));
        assert!(request.download);
        assert!(!request.wants_download());
    }
}
