//! MIME type helpers for the delivery server.

use std::borrow::Cow;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
}

/// `Content-Type` header value for a bundle mimetype.
///
/// Text types without an explicit charset get `; charset=utf-8`, since bundle
/// content is always UTF-8.
pub fn content_type(mimetype: &str) -> Cow<'_, str> {
    let is_text = mimetype.starts_with("text/")
        || mimetype == "application/javascript"
        || mimetype == "application/json";
    if is_text && !mimetype.contains("charset=") {
        Cow::Owned(format!("{mimetype}; charset=utf-8"))
    } else {
        Cow::Borrowed(mimetype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("text/css"), "text/css; charset=utf-8");
        assert_eq!(
            content_type("text/javascript"),
            "text/javascript; charset=utf-8"
        );
        assert_eq!(
            content_type("application/json"),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn test_content_type_unchanged() {
        assert_eq!(
            content_type("text/css; charset=latin1"),
            "text/css; charset=latin1"
        );
        assert_eq!(content_type("image/svg+xml"), "image/svg+xml");
        assert!(matches!(content_type("font/woff2"), Cow::Borrowed(_)));
    }
}
