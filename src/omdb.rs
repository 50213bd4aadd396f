use crate::{
    transport::{Transport, TransportError},
    types::{
        ExternalRating, ImdbId, ItemType, MovieDetail, RatingTier, SearchQuery, SearchResultItem,
        SearchResultSet,
    },
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{num::ParseIntError, sync::Arc};

/// The provider's marker for "field not available"
const UNAVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbStatus {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchResult {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type")]
    item_type: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OmdbMovie {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Rated")]
    rated: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Writer")]
    writer: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "Awards")]
    awards: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    imdb_votes: Option<String>,
    #[serde(rename = "Type")]
    item_type: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Production")]
    production: Option<String>,
}

/// Drops the "N/A" sentinel and blank strings so they never leave this module.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != UNAVAILABLE
    })
}

fn parse_total(total: Option<String>) -> Result<u64, ParseIntError> {
    match total {
        Some(v) => v.trim().parse(),
        None => Ok(0),
    }
}

impl From<OmdbSearchItem> for SearchResultItem {
    fn from(value: OmdbSearchItem) -> Self {
        SearchResultItem {
            id: ImdbId(value.imdb_id),
            title: value.title,
            year: value.year,
            poster_url: available(value.poster),
            item_type: ItemType::from(value.item_type.as_str()),
        }
    }
}

impl From<OmdbMovie> for MovieDetail {
    fn from(value: OmdbMovie) -> Self {
        let rating = available(value.imdb_rating).and_then(|r| r.trim().parse::<f32>().ok());
        let released = available(value.released)
            .and_then(|d| NaiveDate::parse_from_str(&d, "%d %b %Y").ok());
        let genres = available(value.genre)
            .map(|g| {
                g.split(", ")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        MovieDetail {
            id: ImdbId(value.imdb_id),
            title: value.title,
            plot: available(value.plot),
            year: available(value.year),
            runtime: available(value.runtime),
            rated: available(value.rated),
            released,
            rating,
            rating_tier: rating.map(RatingTier::for_rating),
            votes: available(value.imdb_votes),
            genres,
            director: available(value.director),
            writer: available(value.writer),
            actors: available(value.actors),
            country: available(value.country),
            language: available(value.language),
            awards: available(value.awards),
            poster_url: available(value.poster),
            item_type: available(value.item_type).map(|t| ItemType::from(t.as_str())),
            box_office: available(value.box_office),
            production: available(value.production),
            external_ratings: value
                .ratings
                .into_iter()
                .map(|r| ExternalRating {
                    source: r.source,
                    value: r.value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum OmdbError {
    #[error("failed to talk to provider")]
    Transport(#[source] TransportError),
    #[error("failed to parse json data")]
    Parse(#[source] serde_json::Error),
    #[error("failed to parse total result count")]
    TotalCount(#[source] ParseIntError),
    #[error("provider reported an error: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Matches(SearchResultSet),
    NoMatches,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", content = "movie", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(MovieDetail),
    NotFound,
}

/// Body of a response the provider marked as `"Response": "False"`
enum Negative {
    NotFound,
    Failed(String),
}

fn classify(status: OmdbStatus) -> Option<Negative> {
    if !status.response.eq_ignore_ascii_case("false") {
        return None;
    }

    let message = status.error.unwrap_or_default();
    if message.is_empty() || message.to_ascii_lowercase().contains("not found") {
        Some(Negative::NotFound)
    } else {
        Some(Negative::Failed(message))
    }
}

fn decode_search(body: &str) -> Result<SearchOutcome, OmdbError> {
    use OmdbError::*;

    let status: OmdbStatus = serde_json::from_str(body).map_err(Parse)?;
    match classify(status) {
        Some(Negative::NotFound) => return Ok(SearchOutcome::NoMatches),
        Some(Negative::Failed(message)) => return Err(Provider(message)),
        None => (),
    }

    let result: OmdbSearchResult = serde_json::from_str(body).map_err(Parse)?;
    let total_count = parse_total(result.total_results).map_err(TotalCount)?;
    let items = result
        .search
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(SearchOutcome::Matches(SearchResultSet { items, total_count }))
}

fn decode_movie(body: &str) -> Result<LookupOutcome, OmdbError> {
    use OmdbError::*;

    let status: OmdbStatus = serde_json::from_str(body).map_err(Parse)?;
    match classify(status) {
        Some(Negative::NotFound) => return Ok(LookupOutcome::NotFound),
        Some(Negative::Failed(message)) => return Err(Provider(message)),
        None => (),
    }

    let movie: OmdbMovie = serde_json::from_str(body).map_err(Parse)?;
    Ok(LookupOutcome::Found(movie.into()))
}

#[derive(Clone)]
pub struct OmdbClient {
    transport: Arc<dyn Transport>,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, transport: Arc<dyn Transport>) -> OmdbClient {
        OmdbClient { transport, api_key }
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, OmdbError> {
        let mut params = format!("s={}", urlencoding::encode(&query.term));
        if let Some(result_type) = query.result_type.provider_param() {
            params.push_str(&format!("&type={result_type}"));
        }
        params.push_str(&format!("&page={}", query.page));

        let body = self.request(params).await?;
        decode_search(&body)
    }

    pub async fn get_by_id(&self, imdb_id: &ImdbId) -> Result<LookupOutcome, OmdbError> {
        let body = self
            .request(format!("i={}", urlencoding::encode(&imdb_id.0)))
            .await?;
        decode_movie(&body)
    }

    async fn request(&self, mut params: String) -> Result<String, OmdbError> {
        params.push_str("&apikey=");
        params.push_str(&urlencoding::encode(&self.api_key));
        self.transport
            .get(params)
            .await
            .map_err(OmdbError::Transport)
    }
}
