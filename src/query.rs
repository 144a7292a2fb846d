//! Query parameters, the endpoint table, and outbound search URLs
//!
//! Sorting by a `SortOrder` happens upstream: the token is placed in the
//! search URL and the site returns records already ordered. `RecordOrder`
//! is the local ordering the assembler applies after extraction.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use url::Url;

pub const DEFAULT_LIMIT: usize = 10;

const COMPANY_TITLE_TYPES: &str =
    "feature,tv_series,short,tv_movie,tv_miniseries,tv_short,tv_special,tv_episode";
const GAME_RELEASE_WINDOW: &str = "1900-01-01,2012-01-01";

/// Bound for a request: positive values are kept, anything else becomes 10
pub fn effective_limit(raw: Option<i64>) -> usize {
    raw.filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(DEFAULT_LIMIT)
}

/// Parse a `limit` query value; unparsable input falls back to the default
pub fn parse_limit(raw: Option<&str>) -> usize {
    effective_limit(raw.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Upstream sort vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    RatingDesc,
    PopularityDesc,
    DateDesc,
    VotesDesc,
    MoviemeterAsc,
}

impl SortOrder {
    pub fn as_token(self) -> &'static str {
        match self {
            SortOrder::RatingDesc => "rating-desc",
            SortOrder::PopularityDesc => "popularity-desc",
            SortOrder::DateDesc => "date-desc",
            SortOrder::VotesDesc => "votes-desc",
            SortOrder::MoviemeterAsc => "moviemeter-asc",
        }
    }

    /// The value of the site's `sort` search parameter
    pub fn upstream(self) -> &'static str {
        match self {
            SortOrder::RatingDesc => "user_rating,desc",
            SortOrder::PopularityDesc => "popularity,desc",
            SortOrder::DateDesc => "release_date,desc",
            SortOrder::VotesDesc => "num_votes,desc",
            SortOrder::MoviemeterAsc => "moviemeter,asc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}'")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating-desc" => Ok(SortOrder::RatingDesc),
            "popularity-desc" => Ok(SortOrder::PopularityDesc),
            "date-desc" => Ok(SortOrder::DateDesc),
            "votes-desc" => Ok(SortOrder::VotesDesc),
            "moviemeter-asc" => Ok(SortOrder::MoviemeterAsc),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Local ordering applied by the assembler before bounding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordOrder {
    /// Document order, as extracted
    #[default]
    Extraction,
    /// Numeric rating, highest first; unrated records last
    RatingDesc,
}

impl RecordOrder {
    /// `rating-desc` selects the rating sort; anything else keeps document order
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<SortOrder>) {
            Some(Ok(SortOrder::RatingDesc)) => RecordOrder::RatingDesc,
            _ => RecordOrder::Extraction,
        }
    }
}

/// What the core needs from a request: the bound and the local ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec {
    pub limit: usize,
    pub order: RecordOrder,
}

impl QuerySpec {
    pub fn new(limit: Option<i64>) -> Self {
        Self {
            limit: effective_limit(limit),
            order: RecordOrder::Extraction,
        }
    }

    pub fn with_order(mut self, order: RecordOrder) -> Self {
        self.order = order;
        self
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    Movies,
    /// Movies filtered to one production company
    CompanyMovies,
    VideoGames,
}

/// The named listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    MoviesTop,
    MoviesFavorites,
    MoviesReleases,
    MoviesCompany,
    GamesTitle,
    GamesTop,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::MoviesTop,
        Endpoint::MoviesFavorites,
        Endpoint::MoviesReleases,
        Endpoint::MoviesCompany,
        Endpoint::GamesTitle,
        Endpoint::GamesTop,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::MoviesTop => "/imdb/movies/top",
            Endpoint::MoviesFavorites => "/imdb/movies/favorites",
            Endpoint::MoviesReleases => "/imdb/movies/releases",
            Endpoint::MoviesCompany => "/imdb/movies/company",
            Endpoint::GamesTitle => "/imdb/games/title",
            Endpoint::GamesTop => "/imdb/games/top",
        }
    }

    pub fn sort(self) -> SortOrder {
        match self {
            Endpoint::MoviesTop | Endpoint::GamesTop => SortOrder::RatingDesc,
            Endpoint::MoviesFavorites => SortOrder::PopularityDesc,
            Endpoint::MoviesReleases => SortOrder::DateDesc,
            Endpoint::MoviesCompany => SortOrder::VotesDesc,
            Endpoint::GamesTitle => SortOrder::MoviemeterAsc,
        }
    }

    pub fn media(self) -> Media {
        match self {
            Endpoint::MoviesTop | Endpoint::MoviesFavorites | Endpoint::MoviesReleases => {
                Media::Movies
            }
            Endpoint::MoviesCompany => Media::CompanyMovies,
            Endpoint::GamesTitle | Endpoint::GamesTop => Media::VideoGames,
        }
    }
}

/// Raw query string of an endpoint request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub limit: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    /// Local ordering token, e.g. `rating-desc`
    pub order: Option<String>,
}

impl SearchParams {
    pub fn limit(&self) -> usize {
        parse_limit(self.limit.as_deref())
    }

    pub fn query_spec(&self) -> QuerySpec {
        QuerySpec {
            limit: self.limit(),
            order: RecordOrder::from_param(self.order.as_deref()),
        }
    }

    pub fn language(&self) -> Option<&str> {
        non_empty(self.language.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(self.company.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Build the outbound advanced-search URL for an endpoint request
pub fn search_url(host: &str, endpoint: Endpoint, params: &SearchParams) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}/search/title/", host.trim_end_matches('/')))?;
    let sort = endpoint.sort().upstream();
    let limit = params.limit().to_string();

    {
        let mut query = url.query_pairs_mut();
        match endpoint.media() {
            Media::Movies => {
                query
                    .append_pair("groups", "top_1000")
                    .append_pair("view", "simple")
                    .append_pair("sort", sort)
                    .append_pair("limit", &limit);
            }
            Media::CompanyMovies => {
                query
                    .append_pair("sort", sort)
                    .append_pair("title_type", COMPANY_TITLE_TYPES);
                if let Some(company) = params.company() {
                    query.append_pair("companies", company);
                }
                query.append_pair("limit", &limit);
            }
            Media::VideoGames => {
                query
                    .append_pair("title_type", "video_game")
                    .append_pair("release_date", GAME_RELEASE_WINDOW)
                    .append_pair("sort", sort);
                if let Some(title) = params.title() {
                    query.append_pair("title", title);
                }
            }
        }
    }

    Ok(url)
}
