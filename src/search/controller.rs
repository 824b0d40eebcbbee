//! Search form state and request lifecycle.
//!
//! [`SearchController`] owns the criteria being edited and the visible
//! [`SearchState`]. A submission goes through three steps:
//!
//! 1. [`SearchController::submit`] validates the criteria, builds the query URL,
//!    switches to `Loading` and hands back a [`PendingSearch`].
//! 2. The caller awaits [`PendingSearch::send`] whenever it likes; the controller
//!    is not borrowed while the request is in flight.
//! 3. [`SearchController::settle`] applies the result, unless a newer
//!    submission has been issued since, in which case it is dropped.
//!
//! [`SearchController::search`] runs all three in one go.

use crate::error::Result;
use crate::models::ResponseEnvelope;
use crate::search::query::{QueryRequest, API_BASE_URL};
use crate::search::traits::ListingSource;
use crate::search::types::{
    CriteriaField, ResponseClass, SearchCriteria, SearchOutcome, SearchState,
};
use tracing::{debug, info, warn};

/// Prefix of the message shown when the request itself fails
pub const TRANSPORT_FAILURE_PREFIX: &str = "Something bad happened ";

/// Message shown when the API does not accept the location
pub const LOCATION_NOT_RECOGNISED: &str = "Location not recognised; please try again.";

/// Searches always fetch the first page; later pages belong to the results view
const FIRST_PAGE: u32 = 1;

/// Sole owner and mutator of the search criteria and search state
#[derive(Debug)]
pub struct SearchController {
    criteria: SearchCriteria,
    state: SearchState,
    base_url: String,
    latest_sequence: u64,
}

/// A submitted search that has not been sent yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    sequence: u64,
    url: String,
}

/// A search whose request has completed, successfully or not
#[derive(Debug)]
pub struct SettledSearch {
    sequence: u64,
    result: anyhow::Result<ResponseEnvelope>,
}

impl PendingSearch {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform the request against `source`
    pub async fn send(self, source: &dyn ListingSource) -> SettledSearch {
        debug!("Sending search #{} to {}", self.sequence, source.source_name());
        let result = source.fetch(&self.url).await;
        SettledSearch {
            sequence: self.sequence,
            result,
        }
    }
}

impl SettledSearch {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl SearchController {
    /// Create a controller with empty criteria querying `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_criteria(base_url, SearchCriteria::default())
    }

    pub fn with_criteria(base_url: impl Into<String>, criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            state: SearchState::Idle,
            base_url: base_url.into(),
            latest_sequence: 0,
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Store user input for one criteria field
    pub fn update_field(&mut self, field: CriteriaField, value: &str) -> Result<()> {
        self.criteria.set_field(field, value)
    }

    /// Start a search with the current criteria
    ///
    /// Invalid criteria put the controller in the error state and no request
    /// is produced. Otherwise any earlier pending search is superseded.
    pub fn submit(&mut self) -> Result<PendingSearch> {
        // Bumped even on rejection so nothing already in flight can still apply
        self.latest_sequence += 1;

        if let Err(err) = self.criteria.validate() {
            warn!("Rejected search criteria: {}", err);
            self.state = SearchState::Error(err.to_string());
            return Err(err);
        }

        let url = QueryRequest::from_criteria(&self.criteria, FIRST_PAGE).to_url(&self.base_url);
        self.state = SearchState::Loading;
        debug!("Search #{}: {}", self.latest_sequence, url);

        Ok(PendingSearch {
            sequence: self.latest_sequence,
            url,
        })
    }

    /// Apply a completed request, ignoring it if a newer one was submitted
    pub fn settle(&mut self, settled: SettledSearch) -> SearchOutcome {
        if settled.sequence != self.latest_sequence {
            warn!(
                "Dropping search #{} superseded by #{}",
                settled.sequence, self.latest_sequence
            );
            return SearchOutcome::Superseded;
        }

        match settled.result {
            Ok(envelope) => self.handle_response(envelope),
            Err(err) => {
                warn!("Search #{} failed: {:#}", settled.sequence, err);
                let message = format!("{}{:#}", TRANSPORT_FAILURE_PREFIX, err);
                self.state = SearchState::Error(message.clone());
                SearchOutcome::Failure(message)
            }
        }
    }

    /// Interpret an API envelope
    ///
    /// A success carries the listings for the results view.
    pub fn handle_response(&mut self, envelope: ResponseEnvelope) -> SearchOutcome {
        self.state = SearchState::Idle;

        match ResponseClass::classify(&envelope.application_response_code) {
            ResponseClass::Success => {
                info!(
                    "Search succeeded ({}) with {} listings",
                    envelope.application_response_code,
                    envelope.listings.len()
                );
                SearchOutcome::Success(envelope.listings)
            }
            ResponseClass::Failure => {
                info!(
                    "Search rejected with code {}",
                    envelope.application_response_code
                );
                self.state = SearchState::Error(LOCATION_NOT_RECOGNISED.to_string());
                SearchOutcome::Failure(LOCATION_NOT_RECOGNISED.to_string())
            }
        }
    }

    /// Submit, send and settle in one step
    pub async fn search(&mut self, source: &dyn ListingSource) -> SearchOutcome {
        match self.submit() {
            Ok(pending) => {
                let settled = pending.send(source).await;
                self.settle(settled)
            }
            Err(err) => SearchOutcome::Failure(err.to_string()),
        }
    }
}
