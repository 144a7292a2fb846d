//! Declarative lookup rules scoped to a record container

use scraper::{ElementRef, Selector};

use super::media::resolve_in_fragment;
use super::Field;
use crate::document::{attr_of, outer_html, parent_of, text_of};
use crate::error::{Miss, MissKind};

/// What to read from the first element a rule's selector matches
#[derive(Debug)]
pub enum Lookup {
    /// Concatenated text content
    Text,
    /// A named attribute
    Attr(String),
    /// A named attribute of the element's parent
    ParentAttr(String),
    /// Serialize the element, re-parse it alone, and read `attr` from `inner`
    FragmentAttr { inner: Selector, attr: String },
}

#[derive(Debug)]
pub struct FieldRule {
    field: Field,
    selector: Selector,
    lookup: Lookup,
}

impl FieldRule {
    pub fn new(field: Field, selector: Selector, lookup: Lookup) -> Self {
        Self {
            field,
            selector,
            lookup,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Raw (un-normalized) value for this field inside `container`
    pub fn apply(&self, container: &ElementRef<'_>) -> Result<String, Miss> {
        let element = container
            .select(&self.selector)
            .next()
            .ok_or_else(|| self.miss(MissKind::NoMatch))?;

        match &self.lookup {
            Lookup::Text => Ok(text_of(&element)),
            Lookup::Attr(name) => attr_of(&element, name)
                .map(String::from)
                .ok_or_else(|| self.miss(MissKind::MissingAttribute(name.clone()))),
            Lookup::ParentAttr(name) => {
                let parent = parent_of(&element).ok_or_else(|| self.miss(MissKind::NoParent))?;
                attr_of(&parent, name)
                    .map(String::from)
                    .ok_or_else(|| self.miss(MissKind::MissingAttribute(name.clone())))
            }
            // First match whose fragment resolves wins
            Lookup::FragmentAttr { inner, attr } => container
                .select(&self.selector)
                .find_map(|candidate| resolve_in_fragment(&outer_html(&candidate), inner, attr))
                .ok_or_else(|| self.miss(MissKind::MissingAttribute(attr.clone()))),
        }
    }

    fn miss(&self, kind: MissKind) -> Miss {
        Miss::new(self.field, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    const CARD: &str = r#"
    <li class="card">
        <h3 class="title">The Shawshank Redemption</h3>
        <span class="rating" aria-label="IMDb rating: 9.3">9.3</span>
        <a href="/title/tt0111161/"><div class="overlay"></div></a>
        <div class="media"><div><img src="https://m.media/s.jpg"></div></div>
    </li>
    "#;

    fn with_card<F: FnOnce(&ElementRef<'_>)>(f: F) {
        let doc = Document::parse_str(CARD);
        let card = doc.first(&sel(".card")).unwrap();
        f(&card);
    }

    #[test]
    fn test_text_and_attr_lookups() {
        with_card(|card| {
            let title = FieldRule::new(Field::Name, sel(".title"), Lookup::Text);
            assert_eq!(title.apply(card).unwrap(), "The Shawshank Redemption");

            let rating = FieldRule::new(
                Field::Rating,
                sel(".rating"),
                Lookup::Attr("aria-label".to_string()),
            );
            assert_eq!(rating.apply(card).unwrap(), "IMDb rating: 9.3");
        });
    }

    #[test]
    fn test_parent_attr_lookup() {
        with_card(|card| {
            let url = FieldRule::new(
                Field::Url,
                sel(".overlay"),
                Lookup::ParentAttr("href".to_string()),
            );
            assert_eq!(url.apply(card).unwrap(), "/title/tt0111161/");
        });
    }

    #[test]
    fn test_fragment_lookup() {
        with_card(|card| {
            let image = FieldRule::new(
                Field::Image,
                sel(".media"),
                Lookup::FragmentAttr {
                    inner: sel("img"),
                    attr: "src".to_string(),
                },
            );
            assert_eq!(image.apply(card).unwrap(), "https://m.media/s.jpg");
        });
    }

    #[test]
    fn test_fragment_lookup_skips_media_without_image() {
        let html = r#"
        <li class="card">
            <div class="media media--badge"><svg viewBox="0 0 24 24"></svg></div>
            <div class="media"><div><img src="https://m.media/poster.jpg"></div></div>
        </li>
        "#;
        let doc = Document::parse_str(html);
        let card = doc.first(&sel(".card")).unwrap();
        let image = FieldRule::new(
            Field::Image,
            sel(".media"),
            Lookup::FragmentAttr {
                inner: sel("img"),
                attr: "src".to_string(),
            },
        );

        assert_eq!(image.apply(&card).unwrap(), "https://m.media/poster.jpg");

        let badge_only = Document::parse_str(
            r#"<li class="card"><div class="media"><svg></svg></div></li>"#,
        );
        let card = badge_only.first(&sel(".card")).unwrap();
        assert_eq!(
            image.apply(&card),
            Err(Miss::new(Field::Image, MissKind::MissingAttribute("src".to_string())))
        );
    }

    #[test]
    fn test_misses_name_the_field() {
        with_card(|card| {
            let metric = FieldRule::new(Field::SecondaryMetric, sel(".votes"), Lookup::Text);
            assert_eq!(
                metric.apply(card),
                Err(Miss::new(Field::SecondaryMetric, MissKind::NoMatch))
            );

            let rating = FieldRule::new(
                Field::Rating,
                sel(".rating"),
                Lookup::Attr("data-rating".to_string()),
            );
            assert_eq!(
                rating.apply(card),
                Err(Miss::new(
                    Field::Rating,
                    MissKind::MissingAttribute("data-rating".to_string())
                ))
            );
        });
    }
}
