//! Per-field extraction rules for one record container
//!
//! Each field is looked up independently through a `FieldRule`; a lookup
//! that finds nothing yields a `Miss` instead of aborting the record.

mod media;
mod normalize;
mod rules;

pub use media::resolve_in_fragment;
pub use normalize::{absolute_url, strip_label_prefix, trim};
pub use rules::{FieldRule, Lookup};

use std::fmt;

use scraper::Selector;

use crate::config::SiteConfig;
use crate::error::ConfigError;

/// The fixed set of record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Rating,
    Date,
    Snippet,
    Url,
    SecondaryMetric,
    Image,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Rating,
        Field::Date,
        Field::Snippet,
        Field::Url,
        Field::SecondaryMetric,
        Field::Image,
    ];

    /// Name of the field in serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Rating => "stars",
            Field::Date => "date",
            Field::Snippet => "reviewText",
            Field::Url => "url",
            Field::SecondaryMetric => "usefulness",
            Field::Image => "imageUrl",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiled selectors and rules for a site layout
#[derive(Debug)]
pub struct Schema {
    pub container: Selector,
    pub host: String,
    pub rating_delimiter: String,
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn compile(config: &SiteConfig) -> Result<Self, ConfigError> {
        let s = &config.selectors;
        let rules = vec![
            FieldRule::new(Field::Name, compile("title", &s.title)?, Lookup::Text),
            FieldRule::new(
                Field::Rating,
                compile("rating", &s.rating)?,
                Lookup::Attr(s.rating_attr.clone()),
            ),
            FieldRule::new(Field::Date, compile("date", &s.date)?, Lookup::Text),
            FieldRule::new(Field::Snippet, compile("snippet", &s.snippet)?, Lookup::Text),
            FieldRule::new(
                Field::Url,
                compile("link_overlay", &s.link_overlay)?,
                Lookup::ParentAttr("href".to_string()),
            ),
            FieldRule::new(
                Field::SecondaryMetric,
                compile("secondary_metric", &s.secondary_metric)?,
                Lookup::Text,
            ),
            FieldRule::new(
                Field::Image,
                compile("media", &s.media)?,
                Lookup::FragmentAttr {
                    inner: compile("media_image", &s.media_image)?,
                    attr: "src".to_string(),
                },
            ),
        ];

        Ok(Self {
            container: compile("container", &s.container)?,
            host: config.host.clone(),
            rating_delimiter: config.rating_delimiter.clone(),
            rules,
        })
    }

    /// Rules in extraction order, one per `Field`
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::Selector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
