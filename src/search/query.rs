use crate::search::types::SearchCriteria;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Base URL of the Nestoria search API
pub const API_BASE_URL: &str = "https://api.nestoria.co.uk/api";

/// Parameter carrying the free text location
pub const PLACE_NAME: &str = "place_name";

/// Characters left literal in query values, same as `encodeURIComponent`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Ordered set of query parameters for one search request
///
/// Keeps insertion order; setting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    params: Vec<(String, String)>,
}

impl QueryRequest {
    /// Fixed parameters for a `search_listings` call on `page` (1-based)
    pub fn new(page: u32) -> Self {
        let params = [
            ("country", "uk".to_string()),
            ("pretty", "1".to_string()),
            ("encoding", "json".to_string()),
            ("listing_type", "buy".to_string()),
            ("action", "search_listings".to_string()),
            ("page", page.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        Self { params }
    }

    /// Query for `criteria`: the location plus any criteria that differ from
    /// the defaults
    pub fn from_criteria(criteria: &SearchCriteria, page: u32) -> Self {
        let mut query = Self::new(page);
        query.set(PLACE_NAME, &criteria.location_text);
        query.set("listing_type", criteria.listing_type.as_str());

        let bounds = [
            ("price_min", criteria.price_min.map(|p| p.to_string())),
            ("price_max", criteria.price_max.map(|p| p.to_string())),
            ("bedroom_min", criteria.bedroom_min.map(|r| r.to_string())),
            ("bedroom_max", criteria.bedroom_max.map(|r| r.to_string())),
            ("bathroom_min", criteria.bathroom_min.map(|r| r.to_string())),
            ("bathroom_max", criteria.bathroom_max.map(|r| r.to_string())),
        ];
        for (key, value) in bounds {
            if let Some(value) = value {
                query.set(key, &value);
            }
        }
        query
    }

    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key=value` pairs joined with `&`, values percent-encoded
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}?{}", base_url, self.query_string())
    }
}

/// URL for a search on `page` with `key` set to `value`
pub fn build_url(key: &str, value: &str, page: u32) -> String {
    let mut query = QueryRequest::new(page);
    query.set(key, value);
    query.to_url(API_BASE_URL)
}
