//! Record extraction and result assembly
//!
//! `Extractor` owns a compiled `Schema`. For a parsed document it yields one
//! record per matched container, lazily and in document order; `assemble`
//! then bounds (and optionally orders) that sequence.

use std::cmp::Ordering;

use scraper::ElementRef;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::document::Document;
use crate::error::{ConfigError, ParseError};
use crate::extractors::{absolute_url, strip_label_prefix, trim, Field, Schema};
use crate::query::{QuerySpec, RecordOrder, DEFAULT_LIMIT};
use crate::record::Record;

/// What to do with a container whose rating label cannot be found.
///
/// Misses on every other field leave that field empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissPolicy {
    /// Drop the whole record; unrated entries are not listing results
    #[default]
    DropUnrated,
    /// Keep the record with an empty rating, like any other field
    KeepRecord,
}

#[derive(Debug)]
pub struct Extractor {
    schema: Schema,
    policy: MissPolicy,
}

impl Extractor {
    pub fn new(config: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            schema: Schema::compile(config)?,
            policy: MissPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: MissPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MissPolicy {
        self.policy
    }

    /// Parse `markup` and return the bounded, ordered records it contains
    pub fn extract(&self, markup: &[u8], query: &QuerySpec) -> Result<Vec<Record>, ParseError> {
        let document = Document::parse(markup)?;
        let records = assemble(self.records(&document), query);
        debug!(count = records.len(), limit = query.limit, "assembled records");
        Ok(records)
    }

    /// One record per container, skipping those the policy rejects
    pub fn records<'a>(&'a self, document: &'a Document) -> RecordIter<'a> {
        RecordIter {
            containers: document.select(&self.schema.container).enumerate(),
            extractor: self,
        }
    }

    fn build(&self, index: usize, container: &ElementRef<'_>) -> Option<Record> {
        let mut record = Record::default();

        for rule in self.schema.rules() {
            let field = rule.field();
            let value = match rule.apply(container) {
                Ok(raw) => self.normalize(field, &raw),
                Err(miss) if field == Field::Rating && self.policy == MissPolicy::DropUnrated => {
                    warn!(index, name = %record.name, "record rejected: {miss}");
                    return None;
                }
                Err(miss) => {
                    debug!(index, "field missing: {miss}");
                    String::new()
                }
            };
            *record.field_mut(field) = value;
        }

        if record.name.is_empty() {
            warn!(index, url = %record.url, "record has an empty name");
        }
        Some(record)
    }

    fn normalize(&self, field: Field, raw: &str) -> String {
        match field {
            Field::Name => trim(raw),
            Field::Rating => strip_label_prefix(raw, &self.schema.rating_delimiter),
            Field::Url => absolute_url(&self.schema.host, raw),
            Field::Date | Field::Snippet | Field::SecondaryMetric | Field::Image => raw.to_string(),
        }
    }
}

/// Single pass over the containers of one document
pub struct RecordIter<'a> {
    containers: std::iter::Enumerate<scraper::html::Select<'a, 'a>>,
    extractor: &'a Extractor,
}

impl Iterator for RecordIter<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        for (index, container) in self.containers.by_ref() {
            if let Some(record) = self.extractor.build(index, &container) {
                return Some(record);
            }
        }
        None
    }
}

/// Bound the candidate records to `query.limit`, ordering them first if asked
pub fn assemble<I>(records: I, query: &QuerySpec) -> Vec<Record>
where
    I: IntoIterator<Item = Record>,
{
    let limit = if query.limit == 0 { DEFAULT_LIMIT } else { query.limit };

    match query.order {
        RecordOrder::Extraction => records.into_iter().take(limit).collect(),
        RecordOrder::RatingDesc => {
            let mut all: Vec<Record> = records.into_iter().collect();
            sort_by_rating_desc(&mut all);
            all.truncate(limit);
            all
        }
    }
}

/// Stable numeric sort; labels that are not numbers go last
fn sort_by_rating_desc(records: &mut [Record]) {
    records.sort_by(|a, b| match (a.rating_value(), b.rating_value()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
