//! Property search: criteria editing, API query construction and the
//! request lifecycle that routes listings to a results view.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod search;
