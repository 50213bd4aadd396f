use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, Hash)]
pub struct ImdbId(pub String);

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filter applied to a search. `All` is never sent to the provider.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    #[default]
    All,
    Movie,
    Series,
    Episode,
}

impl ResultType {
    pub const VARIANTS: [ResultType; 4] = [
        ResultType::All,
        ResultType::Movie,
        ResultType::Series,
        ResultType::Episode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::All => "all",
            ResultType::Movie => "movie",
            ResultType::Series => "series",
            ResultType::Episode => "episode",
        }
    }

    /// Value of the provider's `type` parameter, if any
    pub fn provider_param(&self) -> Option<&'static str> {
        match self {
            ResultType::All => None,
            other => Some(other.as_str()),
        }
    }
}

/// Kind of a single result. The provider also knows "game", which is kept
/// as `Other` rather than failing the whole page.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Movie,
    Series,
    Episode,
    #[serde(untagged)]
    Other(String),
}

impl From<&str> for ItemType {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "movie" => ItemType::Movie,
            "series" => ItemType::Series,
            "episode" => ItemType::Episode,
            other => ItemType::Other(other.to_string()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct SearchQuery {
    pub term: String,
    pub result_type: ResultType,
    pub page: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct SearchResultItem {
    pub id: ImdbId,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub item_type: ItemType,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct SearchResultSet {
    pub items: Vec<SearchResultItem>,
    /// Server reported total across all pages, not `items.len()`
    pub total_count: u64,
}

impl SearchResultSet {
    pub fn empty() -> SearchResultSet {
        SearchResultSet::default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExternalRating {
    pub source: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    High,
    Medium,
    Low,
}

impl RatingTier {
    pub fn for_rating(rating: f32) -> RatingTier {
        if rating >= 8.0 {
            RatingTier::High
        } else if rating >= 6.0 {
            RatingTier::Medium
        } else {
            RatingTier::Low
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: ImdbId,
    pub title: String,
    pub plot: Option<String>,
    pub year: Option<String>,
    pub runtime: Option<String>,
    pub rated: Option<String>,
    pub released: Option<chrono::NaiveDate>,
    pub rating: Option<f32>,
    pub rating_tier: Option<RatingTier>,
    pub votes: Option<String>,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub awards: Option<String>,
    pub poster_url: Option<String>,
    pub item_type: Option<ItemType>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub external_ratings: Vec<ExternalRating>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct FeaturedCategory {
    pub title: String,
    pub term: String,
}

impl FeaturedCategory {
    pub fn new(title: &str, term: &str) -> FeaturedCategory {
        FeaturedCategory {
            title: title.to_string(),
            term: term.to_string(),
        }
    }
}

pub fn default_featured_categories() -> Vec<FeaturedCategory> {
    vec![
        FeaturedCategory::new("Popular movies", "avengers"),
        FeaturedCategory::new("Series to discover", "stranger"),
        FeaturedCategory::new("Science fiction", "star wars"),
        FeaturedCategory::new("Animation", "pixar"),
    ]
}
