use thiserror::Error;
use tracing::info;

use std::sync::{Arc, Mutex};

use crate::{
    fetcher,
    listing::{Listing, ListingSnapshot, Ticket},
    omdb::{LookupOutcome, OmdbClient},
    query::ResolveError,
    types::{FeaturedCategory, ImdbId, ResultType},
};

#[derive(Debug, Error)]
pub enum AppCreationError {
    #[error("invalid featured categories")]
    Categories(#[source] ResolveError),
}

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("failed to resolve search term")]
    Resolve(#[from] ResolveError),
}

pub struct Inner {
    listing: Listing,
}

type SharedInner = Arc<Mutex<Inner>>;

#[derive(Clone)]
pub struct App {
    inner: SharedInner,
    client: OmdbClient,
}

impl App {
    pub fn new(
        categories: Vec<FeaturedCategory>,
        client: OmdbClient,
    ) -> Result<App, AppCreationError> {
        let listing = Listing::new(categories).map_err(AppCreationError::Categories)?;
        let inner = Arc::new(Mutex::new(Inner { listing }));
        Ok(App { inner, client })
    }

    pub fn categories(&self) -> Vec<FeaturedCategory> {
        let inner = self.inner.lock().expect("Poisoned lock");
        inner.listing.categories().to_vec()
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let inner = self.inner.lock().expect("Poisoned lock");
        inner.listing.snapshot()
    }

    pub async fn navigate(&self, search: Option<&str>) -> Result<ListingSnapshot, NavigateError> {
        let ticket = {
            let mut inner = self.inner.lock().expect("Poisoned lock");
            inner.listing.navigate(search)?
        };
        Ok(self.run(ticket).await)
    }

    pub async fn select_category(&self, index: usize) -> ListingSnapshot {
        let ticket = {
            let mut inner = self.inner.lock().expect("Poisoned lock");
            inner.listing.select_category(index)
        };
        self.run_if_issued(ticket).await
    }

    pub async fn select_type(&self, result_type: ResultType) -> ListingSnapshot {
        let ticket = {
            let mut inner = self.inner.lock().expect("Poisoned lock");
            inner.listing.select_type(result_type)
        };
        self.run(ticket).await
    }

    pub async fn go_to_page(&self, page: u64) -> ListingSnapshot {
        let ticket = {
            let mut inner = self.inner.lock().expect("Poisoned lock");
            inner.listing.go_to_page(page)
        };
        self.run_if_issued(ticket).await
    }

    pub async fn movie(&self, id: &ImdbId) -> LookupOutcome {
        fetcher::fetch_detail(&self.client, id).await
    }

    async fn run_if_issued(&self, ticket: Option<Ticket>) -> ListingSnapshot {
        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => self.snapshot(),
        }
    }

    async fn run(&self, ticket: Ticket) -> ListingSnapshot {
        info!(
            "Fetching \"{}\" ({}) page {}",
            ticket.query.term,
            ticket.query.result_type.as_str(),
            ticket.query.page
        );
        let fetched = fetcher::fetch_results(&self.client, &ticket.query).await;

        let mut inner = self.inner.lock().expect("Poisoned lock");
        inner.listing.apply(ticket.seq, fetched);
        inner.listing.snapshot()
    }
}
