//! Parsed markup tree
//!
//! Thin wrapper over `scraper::Html` exposing the handful of operations the
//! extraction pipeline needs: selection, attribute lookup, text content, and
//! subtree serialization with re-parsing of an isolated fragment.

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

/// A parsed listing page (or an isolated fragment of one)
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a raw payload as an HTML document.
    ///
    /// The HTML5 parser recovers from any malformed markup, so the only
    /// failure is a payload that is not text at all.
    pub fn parse(markup: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(markup)?;
        Ok(Self::parse_str(text))
    }

    pub fn parse_str(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Parse markup in isolation, without the implied `<html>/<body>` document
    pub fn parse_fragment(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    /// All elements matching the selector, in document order
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(selector)
    }

    /// First element matching the selector
    pub fn first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }
}

/// Concatenated descendant text, whitespace as-is
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn attr_of<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Nearest ancestor that is an element
pub fn parent_of<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Serialize an element and its subtree back to markup
pub fn outer_html(element: &ElementRef<'_>) -> String {
    element.html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_read() {
        let html = r#"
        <div class="card"><a href="/title/tt1/"><span class="t">  One </span></a></div>
        <div class="card"><a href="/title/tt2/"><span class="t">Two</span></a></div>
        "#;

        let doc = Document::parse(html.as_bytes()).unwrap();
        let card = Selector::parse(".card").unwrap();
        let title = Selector::parse(".t").unwrap();

        assert_eq!(doc.select(&card).count(), 2);

        let first = doc.first(&title).unwrap();
        assert_eq!(text_of(&first), "  One ");

        let link = parent_of(&first).unwrap();
        assert_eq!(attr_of(&link, "href"), Some("/title/tt1/"));
        assert_eq!(attr_of(&link, "rel"), None);
    }

    #[test]
    fn test_fragment_reparse() {
        let html = r#"<div class="media"><div><div><img src="/a.jpg"></div></div></div>"#;
        let doc = Document::parse_str(html);
        let media = Selector::parse(".media").unwrap();
        let img = Selector::parse("img").unwrap();

        let serialized = outer_html(&doc.first(&media).unwrap());
        let fragment = Document::parse_fragment(&serialized);

        let image = fragment.first(&img).unwrap();
        assert_eq!(attr_of(&image, "src"), Some("/a.jpg"));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let bytes = [0x3c, 0x70, 0x3e, 0xff, 0xfe];
        assert!(matches!(
            Document::parse(&bytes),
            Err(ParseError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_empty_payload_parses() {
        let doc = Document::parse(b"").unwrap();
        let any = Selector::parse(".card").unwrap();
        assert_eq!(doc.select(&any).count(), 0);
    }
}
