use crate::search::types::SearchCriteria;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single property listing as returned by the search API
///
/// Kept as raw JSON; the search flow never interprets listing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingRecord(pub serde_json::Value);

impl ListingRecord {
    /// Look up a top-level field and render it as text, for display only
    pub fn field(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// The `response` object of a search API reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub application_response_code: String,
    #[serde(default)]
    pub listings: Vec<ListingRecord>,
}

/// Top level body of a search API reply
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub response: ResponseEnvelope,
}

/// A completed search as saved by the results view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub criteria: SearchCriteria,
    pub searched_at: DateTime<Utc>,
    pub listings: Vec<ListingRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_parses_from_api_body() {
        let body = json!({
            "request": { "location": "london" },
            "response": {
                "application_response_code": "100",
                "application_response_text": "one unambiguous location",
                "listings": [
                    { "title": "Flat A", "price": 250000 },
                    { "title": "Flat B", "price": 310000 }
                ]
            }
        });

        let parsed: ApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.response.application_response_code, "100");
        assert_eq!(parsed.response.listings.len(), 2);
        assert_eq!(parsed.response.listings[0].field("title").as_deref(), Some("Flat A"));
        assert_eq!(parsed.response.listings[1].field("price").as_deref(), Some("310000"));
    }

    #[test]
    fn missing_listings_default_to_empty() {
        let parsed: ApiResponse =
            serde_json::from_value(json!({ "response": { "application_response_code": "200" } }))
                .unwrap();
        assert!(parsed.response.listings.is_empty());
    }

    #[test]
    fn listing_round_trips_unknown_fields() {
        let raw = json!({ "title": "Cottage", "lister_url": "https://example.com/1", "extra": [1, 2] });
        let listing: ListingRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&listing).unwrap(), raw);
        assert_eq!(listing.field("missing"), None);
    }
}
