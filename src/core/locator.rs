//! Maps a (unit, topic, kind) triple to the remote asset URL.
//!
//! URL scheme:
//!
//! ```text
//! {base}/{enc(unit_title)}/{Videos|Tutes|Questions}/{enc(topic)}{.mp4|.pdf}
//! ```
//!
//! Unit and topic titles are encoded as single path segments, so characters
//! like `/`, `?`, `&`, spaces and non-ASCII text never change the path shape.

use crate::domain::ResourceKind;

/// Computes resource URLs under a fixed base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    base_url: String,
}

impl ResourceLocator {
    /// Create a locator rooted at `base_url` (trailing slashes are dropped)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/').to_string();
        Self { base_url: trimmed }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL of one topic resource
    pub fn locate(&self, unit_title: &str, topic: &str, kind: ResourceKind) -> String {
        format!(
            "{}/{}/{}/{}{}",
            self.base_url,
            encode_segment(unit_title),
            kind.folder(),
            encode_segment(topic),
            kind.extension()
        )
    }
}

/// Percent-encode a string for use as one URL path segment
///
/// Keeps the URI-component unreserved set (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`)
/// and escapes every other UTF-8 byte as `%XX`.
///
/// `"."` and `".."` pass through unchanged, matching the stored asset keys, and
/// a URL parser will treat them as dot-segments.
pub fn encode_segment(input: &str) -> String {
    let mut result = String::with_capacity(input.len());

    for c in input.chars() {
        if c.is_ascii_alphanumeric()
            || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
        {
            result.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).as_bytes() {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://assets.test/discussions";

    #[test]
    fn test_locate_tutorial() {
        let locator = ResourceLocator::new(BASE);
        assert_eq!(
            locator.locate("Intro to Databases", "ER Modeling", ResourceKind::Tutorial),
            "https://assets.test/discussions/Intro%20to%20Databases/Tutes/ER%20Modeling.pdf"
        );
    }

    #[test]
    fn test_locate_video_and_questions() {
        let locator = ResourceLocator::new(BASE);
        assert!(locator
            .locate("Unit", "Topic", ResourceKind::Video)
            .ends_with("/Unit/Videos/Topic.mp4"));
        assert!(locator
            .locate("Unit", "Topic", ResourceKind::Questions)
            .ends_with("/Unit/Questions/Topic.pdf"));
    }

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("Q&A?"), "Q%26A%3F");
        assert_eq!(encode_segment("50% off#1"), "50%25%20off%231");
        assert_eq!(encode_segment("keep-_.!~*'()"), "keep-_.!~*'()");
    }

    #[test]
    fn test_encode_non_ascii() {
        assert_eq!(encode_segment("é"), "%C3%A9");
        assert_eq!(encode_segment("数据"), "%E6%95%B0%E6%8D%AE");
    }

    #[test]
    fn test_empty_segments() {
        let locator = ResourceLocator::new(BASE);
        assert_eq!(
            locator.locate("", "", ResourceKind::Video),
            "https://assets.test/discussions//Videos/.mp4"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_trimmed() {
        let locator = ResourceLocator::new("https://assets.test/root/");
        assert_eq!(locator.base_url(), "https://assets.test/root");
        assert_eq!(
            locator.locate("U", "T", ResourceKind::Tutorial),
            "https://assets.test/root/U/Tutes/T.pdf"
        );
    }

    #[test]
    fn test_dot_titles_are_not_escaped() {
        let locator = ResourceLocator::new(BASE);
        assert_eq!(encode_segment(".."), "..");
        assert_eq!(
            locator.locate(".", "..", ResourceKind::Tutorial),
            "https://assets.test/discussions/./Tutes/...pdf"
        );
    }
}
