pub mod client;
pub mod controller;
pub mod query;
pub mod traits;
pub mod types;

pub use client::NestoriaClient;
pub use controller::{PendingSearch, SearchController, SettledSearch};
pub use query::{build_url, QueryRequest};
pub use traits::ListingSource;
pub use types::{CriteriaField, SearchCriteria, SearchOutcome, SearchState};
