//! IMDb listing extraction
//!
//! Turns one fetched listing page into a bounded list of records:
//! - `document`: markup parsing and subtree access
//! - `extractors`: per-field lookup rules and label normalizers
//! - `pipeline`: record iteration and result assembly
//! - `query` / `fetch` / `server`: endpoint table, outbound fetch, HTTP surface

pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod server;

pub use config::SiteConfig;
pub use error::{AppError, ConfigError, FetchError, Miss, MissKind, ParseError};
pub use pipeline::{assemble, Extractor, MissPolicy};
pub use query::{QuerySpec, RecordOrder, SortOrder};
pub use record::Record;
