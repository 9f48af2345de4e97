//! Rich-text markup scanning
//!
//! Compiled patterns for the two node categories the resolver rewrites:
//! anchors referencing an item by id (`data-item-id`), and inline-item
//! placeholder objects carrying the embedded-item MIME marker plus a
//! `data-codename` attribute. Everything outside the rewritten spans is
//! preserved byte for byte.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Opening anchor tag carrying an item-id reference; capture 1 is the id
pub(crate) static ITEM_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\b[^>]*\bdata-item-id="([^"]*)"[^>]*>"#).unwrap());

/// An `<object>` tag, optionally with an immediately following closing tag
/// (the placeholder form is self-closing or empty-bodied)
pub(crate) static OBJECT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<object\b[^>]*>(?:\s*</object>)?"#).unwrap());

static HREF_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bhref="[^"]*""#).unwrap());

static MIME_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btype="application/kenticocloud""#).unwrap());

static DATA_TYPE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdata-type="item""#).unwrap());

static DATA_CODENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdata-codename="([^"]*)""#).unwrap());

/// Extract the embedded-item codename from an object tag.
///
/// Returns `None` unless the tag carries both the placeholder MIME marker
/// and `data-type="item"` — other `<object>` markup is not ours to touch.
pub(crate) fn inline_item_codename(tag: &str) -> Option<&str> {
    if !MIME_MARKER.is_match(tag) || !DATA_TYPE_ITEM.is_match(tag) {
        return None;
    }
    DATA_CODENAME
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Replace the `href` value of an opening anchor tag, inserting the
/// attribute when the tag has none. All other attributes stay untouched.
pub(crate) fn set_anchor_href(tag: &str, href: &str) -> String {
    let attribute = format!(r#"href="{}""#, href);
    if HREF_ATTR.is_match(tag) {
        HREF_ATTR.replace(tag, NoExpand(&attribute)).into_owned()
    } else {
        format!("<a {}{}", attribute, &tag[2..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_pattern_captures_item_id() {
        let markup = r#"<p><a data-item-id="abc-123" href="">roasts</a></p>"#;
        let caps = ITEM_ANCHOR.captures(markup).unwrap();
        assert_eq!(&caps[1], "abc-123");
    }

    #[test]
    fn test_anchor_pattern_ignores_plain_links() {
        let markup = r#"<a href="https://example.com">external</a>"#;
        assert!(ITEM_ANCHOR.captures(markup).is_none());
    }

    #[test]
    fn test_set_anchor_href_replaces_existing_value() {
        let tag = r#"<a data-item-id="abc" href="">"#;
        assert_eq!(
            set_anchor_href(tag, "/articles/on-roasts"),
            r#"<a data-item-id="abc" href="/articles/on-roasts">"#
        );
    }

    #[test]
    fn test_set_anchor_href_inserts_when_absent() {
        let tag = r#"<a data-item-id="abc">"#;
        assert_eq!(
            set_anchor_href(tag, "/404"),
            r#"<a href="/404" data-item-id="abc">"#
        );
    }

    #[test]
    fn test_set_anchor_href_is_literal() {
        // resolver output must land in the href verbatim, even with $
        let tag = r#"<a data-item-id="abc" href="old">"#;
        assert_eq!(
            set_anchor_href(tag, "/x?a=$1"),
            r#"<a data-item-id="abc" href="/x?a=$1">"#
        );
    }

    #[test]
    fn test_inline_item_codename_extraction() {
        let tag = r#"<object type="application/kenticocloud" data-type="item" data-codename="donate_with_us"></object>"#;
        assert_eq!(inline_item_codename(tag), Some("donate_with_us"));
    }

    #[test]
    fn test_inline_item_codename_self_closing() {
        let tag = r#"<object type="application/kenticocloud" data-type="item" data-codename="donate_with_us"/>"#;
        assert_eq!(inline_item_codename(tag), Some("donate_with_us"));
    }

    #[test]
    fn test_foreign_object_tags_are_not_placeholders() {
        assert_eq!(
            inline_item_codename(r#"<object data="movie.swf" type="application/x-shockwave-flash">"#),
            None
        );
        // marker without data-type="item" is not an item placeholder either
        assert_eq!(
            inline_item_codename(r#"<object type="application/kenticocloud" data-type="component" data-codename="x">"#),
            None
        );
    }

    #[test]
    fn test_object_pattern_swallows_empty_body() {
        let markup = r#"before<object type="application/kenticocloud" data-type="item" data-codename="x"></object>after"#;
        let m = OBJECT_TAG.find(markup).unwrap();
        assert_eq!(&markup[..m.start()], "before");
        assert_eq!(&markup[m.end()..], "after");
    }
}
