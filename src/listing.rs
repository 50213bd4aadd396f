//! State behind the result grid. Every change that needs new data hands out
//! a [`Ticket`]; only the most recently issued ticket may write results back.

use crate::{
    fetcher::{FetchStatus, FetchedResults},
    pagination::{self, PaginationWindow, PAGE_SIZE, WINDOW_SIZE},
    query::{self, ResolveError},
    types::{FeaturedCategory, ResultType, SearchQuery, SearchResultSet},
};

use serde::Serialize;
use tracing::debug;

#[derive(Serialize, Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct RequestSeq(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: RequestSeq,
    pub query: SearchQuery,
}

#[derive(Debug, Clone)]
struct ListingState {
    term: String,
    active_category: usize,
    result_type: ResultType,
    page: u64,
    results: SearchResultSet,
    status: FetchStatus,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub seq: RequestSeq,
    pub loading: bool,
    pub query: SearchQuery,
    pub active_category: usize,
    pub title: String,
    pub results: SearchResultSet,
    pub status: FetchStatus,
    pub pagination: Option<PaginationWindow>,
}

pub struct Listing {
    categories: Vec<FeaturedCategory>,
    state: ListingState,
    issued: RequestSeq,
    applied: RequestSeq,
}

impl Listing {
    pub fn new(categories: Vec<FeaturedCategory>) -> Result<Listing, ResolveError> {
        if let Some(i) = categories.iter().position(|c| c.term.trim().is_empty()) {
            return Err(ResolveError::EmptyCategoryTerm(i));
        }
        let resolution = query::resolve(None, &categories, 0)?;

        Ok(Listing {
            categories,
            state: ListingState {
                term: resolution.term,
                active_category: resolution.active_category,
                result_type: ResultType::All,
                page: 1,
                results: SearchResultSet::empty(),
                status: FetchStatus::Ok,
            },
            issued: RequestSeq(0),
            applied: RequestSeq(0),
        })
    }

    pub fn categories(&self) -> &[FeaturedCategory] {
        &self.categories
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            term: self.state.term.clone(),
            result_type: self.state.result_type,
            page: self.state.page,
        }
    }

    /// The `search` location parameter changed (or the page was loaded)
    pub fn navigate(&mut self, search: Option<&str>) -> Result<Ticket, ResolveError> {
        let resolution = query::resolve(search, &self.categories, self.state.active_category)?;
        if resolution.reset_page {
            self.state.page = 1;
        }
        self.state.term = resolution.term;
        self.state.active_category = resolution.active_category;
        Ok(self.issue())
    }

    /// Out of range indices are ignored
    pub fn select_category(&mut self, index: usize) -> Option<Ticket> {
        let term = self.categories.get(index)?.term.clone();
        self.state.active_category = index;
        self.state.term = term;
        self.state.page = 1;
        Some(self.issue())
    }

    pub fn select_type(&mut self, result_type: ResultType) -> Ticket {
        self.state.result_type = result_type;
        self.state.page = 1;
        self.issue()
    }

    /// Pages outside `1..=total_pages` are ignored
    pub fn go_to_page(&mut self, page: u64) -> Option<Ticket> {
        if !pagination::accepts(page, self.state.results.total_count, PAGE_SIZE) {
            debug!("Ignoring request for page {page}");
            return None;
        }
        self.state.page = page;
        Some(self.issue())
    }

    /// Stores results for `seq` if it is still the latest request. Returns
    /// whether the results were used.
    pub fn apply(&mut self, seq: RequestSeq, fetched: FetchedResults) -> bool {
        if seq != self.issued {
            debug!("Discarding stale response {} (latest {})", seq.0, self.issued.0);
            return false;
        }
        self.state.results = fetched.results;
        self.state.status = fetched.status;
        self.applied = seq;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.applied < self.issued
    }

    pub fn pagination(&self) -> Option<PaginationWindow> {
        let total_count = self.state.results.total_count;
        if !pagination::is_shown(total_count, PAGE_SIZE) {
            return None;
        }
        Some(pagination::compute(
            total_count,
            PAGE_SIZE,
            self.state.page,
            WINDOW_SIZE,
        ))
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            seq: self.applied,
            loading: self.is_loading(),
            query: self.query(),
            active_category: self.state.active_category,
            title: query::page_title(&self.state.term, &self.categories),
            results: self.state.results.clone(),
            status: self.state.status,
            pagination: self.pagination(),
        }
    }

    fn issue(&mut self) -> Ticket {
        self.issued = RequestSeq(self.issued.0 + 1);
        Ticket {
            seq: self.issued,
            query: self.query(),
        }
    }
}
