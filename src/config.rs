//! Site and server configuration
//!
//! `SiteConfig` describes where records live in the listing markup. It
//! defaults to the IMDb advanced-search layout and can be overridden from a
//! JSON file, so the same pipeline can target another host or schema.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "https://www.imdb.com";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Where to find each record field in the listing markup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefixed to relative links to form absolute record URLs
    pub host: String,
    /// Separates the leading phrase from the value in rating labels
    pub rating_delimiter: String,
    pub selectors: SelectorSet,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            rating_delimiter: ": ".to_string(),
            selectors: SelectorSet::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// CSS selectors, one per field. All but `container` are scoped to a container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorSet {
    pub container: String,
    pub title: String,
    pub rating: String,
    pub rating_attr: String,
    pub date: String,
    pub snippet: String,
    /// Element whose parent carries the record link
    pub link_overlay: String,
    pub secondary_metric: String,
    pub media: String,
    /// Image selector inside the re-parsed media fragment
    pub media_image: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            container: ".ipc-metadata-list-summary-item".to_string(),
            title: ".ipc-title__text".to_string(),
            rating: ".ipc-rating-star.ipc-rating-star--imdb.ratingGroup--imdb-rating".to_string(),
            rating_attr: "aria-label".to_string(),
            date: ".dli-title-metadata-item".to_string(),
            snippet: ".ipc-html-content-inner-div".to_string(),
            link_overlay: ".ipc-lockup-overlay__screen".to_string(),
            secondary_metric: ".sc-f24f1c5c-7.oCwmv".to_string(),
            media: ".ipc-media".to_string(),
            media_image: "img".to_string(),
        }
    }
}

/// Command-line and environment configuration for the HTTP server
#[derive(Debug, Clone, Parser)]
#[command(name = "imdb-listing-server", version, about = "Serves IMDb listing pages as JSON")]
pub struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "IMDB_LISTING_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// User-Agent sent with outbound fetches
    #[arg(long, env = "IMDB_LISTING_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Deadline for one outbound fetch, in seconds
    #[arg(long, env = "IMDB_LISTING_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// JSON file overriding the site host and selectors
    #[arg(long, env = "IMDB_LISTING_SITE_CONFIG")]
    pub site_config: Option<PathBuf>,

    /// Site host, overriding the one in the site config
    #[arg(long, env = "IMDB_LISTING_HOST")]
    pub host: Option<String>,
}

impl ServerArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the effective site config: file (or defaults), then host override
    pub fn site_config(&self) -> Result<SiteConfig, ConfigError> {
        let mut site = match &self.site_config {
            Some(path) => SiteConfig::from_json_file(path)?,
            None => SiteConfig::default(),
        };
        if let Some(host) = &self.host {
            site.host = host.trim_end_matches('/').to_string();
        }
        Ok(site)
    }
}
