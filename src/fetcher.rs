use crate::{
    omdb::{LookupOutcome, OmdbClient, SearchOutcome},
    types::{ImdbId, SearchQuery, SearchResultSet},
};

use serde::Serialize;
use tracing::{error, info};

#[derive(Serialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Ok,
    NoMatches,
    /// The request failed; the results are empty but that is not a real answer
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedResults {
    pub results: SearchResultSet,
    pub status: FetchStatus,
}

impl FetchedResults {
    fn empty(status: FetchStatus) -> FetchedResults {
        FetchedResults {
            results: SearchResultSet::empty(),
            status,
        }
    }
}

/// Runs one search. Never fails: any problem ends up as an empty result set,
/// with `status` recording what happened.
pub async fn fetch_results(client: &OmdbClient, query: &SearchQuery) -> FetchedResults {
    match client.search(query).await {
        Ok(SearchOutcome::Matches(results)) => FetchedResults {
            results,
            status: FetchStatus::Ok,
        },
        Ok(SearchOutcome::NoMatches) => {
            info!("No matches for \"{}\" page {}", query.term, query.page);
            FetchedResults::empty(FetchStatus::NoMatches)
        }
        Err(e) => {
            error!("Failed to fetch results for \"{}\": {e}", query.term);
            FetchedResults::empty(FetchStatus::Failed)
        }
    }
}

/// Looks up a single title. Provider errors collapse into `NotFound`.
pub async fn fetch_detail(client: &OmdbClient, id: &ImdbId) -> LookupOutcome {
    match client.get_by_id(id).await {
        Ok(LookupOutcome::NotFound) => {
            info!("No title with id {id}");
            LookupOutcome::NotFound
        }
        Ok(found) => found,
        Err(e) => {
            error!("Failed to fetch details for {id}: {e}");
            LookupOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{transport::fake::FakeTransport, types::ResultType};

    use futures::executor::block_on;

    use std::sync::Arc;

    fn client(fake: &Arc<FakeTransport>) -> OmdbClient {
        OmdbClient::new("key".to_string(), fake.clone())
    }

    fn avengers() -> SearchQuery {
        SearchQuery {
            term: "avengers".to_string(),
            result_type: ResultType::All,
            page: 1,
        }
    }

    #[test]
    fn test_fetch_results() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_body(include_str!("../res/omdb/avengers_search_result.json"));

        let fetched = block_on(fetch_results(&client(&fake), &avengers()));
        assert_eq!(fetched.status, FetchStatus::Ok);
        assert_eq!(fetched.results.items.len(), 3);
        assert_eq!(fetched.results.total_count, 27);
    }

    #[test]
    fn test_failures_become_empty() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_failure();
        fake.push_body("not json");
        fake.push_body(include_str!("../res/omdb/invalid_key_result.json"));
        let client = client(&fake);

        for _ in 0..3 {
            let fetched = block_on(fetch_results(&client, &avengers()));
            assert_eq!(fetched.status, FetchStatus::Failed);
            assert_eq!(fetched.results, SearchResultSet::empty());
        }
    }

    #[test]
    fn test_no_matches() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_body(include_str!("../res/omdb/not_found_result.json"));

        let fetched = block_on(fetch_results(&client(&fake), &avengers()));
        assert_eq!(fetched.status, FetchStatus::NoMatches);
        assert_eq!(fetched.results, SearchResultSet::empty());
    }

    #[test]
    fn test_fetch_detail() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_body(include_str!("../res/omdb/matrix_id_result.json"));
        fake.push_body(include_str!("../res/omdb/incorrect_id_result.json"));
        fake.push_failure();
        let client = client(&fake);
        let id = ImdbId("tt0133093".to_string());

        let LookupOutcome::Found(movie) = block_on(fetch_detail(&client, &id)) else {
            panic!("expected movie");
        };
        assert_eq!(movie.id, id);

        assert_eq!(
            block_on(fetch_detail(&client, &ImdbId("tt0".to_string()))),
            LookupOutcome::NotFound
        );
        assert_eq!(block_on(fetch_detail(&client, &id)), LookupOutcome::NotFound);
    }

    #[test]
    fn test_detail_is_refetched() {
        let fake = Arc::new(FakeTransport::new());
        fake.push_body(include_str!("../res/omdb/matrix_id_result.json"));
        fake.push_body(include_str!("../res/omdb/matrix_id_result.json"));
        let client = client(&fake);
        let id = ImdbId("tt0133093".to_string());

        block_on(fetch_detail(&client, &id));
        block_on(fetch_detail(&client, &id));
        assert_eq!(fake.requests().len(), 2);
    }
}
