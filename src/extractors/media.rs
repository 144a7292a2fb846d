//! Image resolution on an isolated media fragment
//!
//! The image sits under a site-specific stack of wrappers. The media element
//! is serialized and re-parsed on its own, then searched for the image tag,
//! so adding or removing a wrapper level does not change the result.

use scraper::Selector;

use crate::document::{attr_of, Document};

/// Re-parse `markup` as a fragment and read `attr` from the first `inner` match
pub fn resolve_in_fragment(markup: &str, inner: &Selector, attr: &str) -> Option<String> {
    let fragment = Document::parse_fragment(markup);
    let element = fragment.first(inner)?;
    attr_of(&element, attr).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_depth_does_not_matter() {
        let img = Selector::parse("img").unwrap();

        let shallow = r#"<div class="ipc-media"><img src="https://m.media/a.jpg"></div>"#;
        let deep = r#"
        <div class="ipc-media">
            <div><div><picture><img class="ipc-image" src="https://m.media/a.jpg" alt="A"></picture></div></div>
        </div>
        "#;

        assert_eq!(
            resolve_in_fragment(shallow, &img, "src").as_deref(),
            Some("https://m.media/a.jpg")
        );
        assert_eq!(
            resolve_in_fragment(deep, &img, "src").as_deref(),
            Some("https://m.media/a.jpg")
        );
    }

    #[test]
    fn test_missing_image_or_attr() {
        let img = Selector::parse("img").unwrap();
        assert_eq!(resolve_in_fragment(r#"<div class="ipc-media"></div>"#, &img, "src"), None);
        assert_eq!(resolve_in_fragment(r#"<div><img alt="x"></div>"#, &img, "src"), None);
    }
}
