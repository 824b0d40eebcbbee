use crate::error::{Result, ValidationError};
use crate::models::ListingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of listing to search for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Buy,
    Rent,
    Share,
}

impl ListingType {
    /// Value sent as the `listing_type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Buy => "buy",
            ListingType::Rent => "rent",
            ListingType::Share => "share",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(ListingType::Buy),
            "rent" => Ok(ListingType::Rent),
            "share" => Ok(ListingType::Share),
            other => Err(format!("unknown listing type {other:?}")),
        }
    }
}

/// Bedroom or bathroom count as offered by the room pickers: 0 to 5, or "max"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RoomCount {
    Count(u8),
    Max,
}

impl RoomCount {
    pub const MAX_COUNT: u8 = 5;
}

impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoomCount::Count(n) => write!(f, "{n}"),
            RoomCount::Max => f.write_str("max"),
        }
    }
}

impl FromStr for RoomCount {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(RoomCount::Max);
        }
        match s.parse::<u8>() {
            Ok(n) if n <= Self::MAX_COUNT => Ok(RoomCount::Count(n)),
            _ => Err(format!("room count must be 0-{} or max, got {s:?}", Self::MAX_COUNT)),
        }
    }
}

impl From<RoomCount> for String {
    fn from(count: RoomCount) -> Self {
        count.to_string()
    }
}

impl TryFrom<String> for RoomCount {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Name of an editable criteria field, as used by input handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriteriaField {
    Location,
    ListingType,
    PriceMin,
    PriceMax,
    BedroomMin,
    BedroomMax,
    BathroomMin,
    BathroomMax,
}

impl CriteriaField {
    pub const ALL: [CriteriaField; 8] = [
        CriteriaField::Location,
        CriteriaField::ListingType,
        CriteriaField::PriceMin,
        CriteriaField::PriceMax,
        CriteriaField::BedroomMin,
        CriteriaField::BedroomMax,
        CriteriaField::BathroomMin,
        CriteriaField::BathroomMax,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CriteriaField::Location => "location",
            CriteriaField::ListingType => "listing_type",
            CriteriaField::PriceMin => "price_min",
            CriteriaField::PriceMax => "price_max",
            CriteriaField::BedroomMin => "bedroom_min",
            CriteriaField::BedroomMax => "bedroom_max",
            CriteriaField::BathroomMin => "bathroom_min",
            CriteriaField::BathroomMax => "bathroom_max",
        }
    }
}

impl fmt::Display for CriteriaField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CriteriaField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown criteria field {s:?}"))
    }
}

/// User-editable search parameters
///
/// Optional bounds that are unset are left out of the API query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free text location, sent as `place_name`
    pub location_text: String,
    pub listing_type: ListingType,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub bedroom_min: Option<RoomCount>,
    pub bedroom_max: Option<RoomCount>,
    pub bathroom_min: Option<RoomCount>,
    pub bathroom_max: Option<RoomCount>,
}

impl SearchCriteria {
    pub fn new(location_text: impl Into<String>) -> Self {
        Self {
            location_text: location_text.into(),
            ..Self::default()
        }
    }

    /// Parse `value` into `field`. An empty value clears optional fields.
    ///
    /// Ranges are not checked here; an inverted min/max is only rejected by
    /// [`SearchCriteria::validate`].
    pub fn set_field(&mut self, field: CriteriaField, value: &str) -> Result<()> {
        let invalid = || ValidationError::InvalidValue {
            field,
            value: value.to_string(),
        };

        match field {
            CriteriaField::Location => self.location_text = value.to_string(),
            CriteriaField::ListingType => {
                self.listing_type = value.parse().map_err(|_| invalid())?;
            }
            CriteriaField::PriceMin => self.price_min = parse_optional(value).ok_or_else(invalid)?,
            CriteriaField::PriceMax => self.price_max = parse_optional(value).ok_or_else(invalid)?,
            CriteriaField::BedroomMin => {
                self.bedroom_min = parse_optional(value).ok_or_else(invalid)?
            }
            CriteriaField::BedroomMax => {
                self.bedroom_max = parse_optional(value).ok_or_else(invalid)?
            }
            CriteriaField::BathroomMin => {
                self.bathroom_min = parse_optional(value).ok_or_else(invalid)?
            }
            CriteriaField::BathroomMax => {
                self.bathroom_max = parse_optional(value).ok_or_else(invalid)?
            }
        }
        Ok(())
    }

    /// Check that every min/max pair is ordered
    pub fn validate(&self) -> Result<()> {
        check_range("price", self.price_min, self.price_max)?;
        check_range("bedroom", self.bedroom_min, self.bedroom_max)?;
        check_range("bathroom", self.bathroom_min, self.bathroom_max)?;
        Ok(())
    }
}

/// `Some(None)` for blank input, `Some(Some(v))` when parsable, `None` otherwise
fn parse_optional<T: FromStr>(value: &str) -> Option<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(None);
    }
    value.parse().ok().map(Some)
}

fn check_range<T: PartialOrd>(field: &'static str, min: Option<T>, max: Option<T>) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::InvertedRange { field }),
        _ => Ok(()),
    }
}

/// Visible controller state: drives the spinner and the message line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// Message shown under the search form, empty unless in error
    pub fn message(&self) -> &str {
        match self {
            SearchState::Error(message) => message,
            _ => "",
        }
    }
}

/// Result of settling a submitted search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Navigate to the results view with these listings
    Success(Vec<ListingRecord>),
    /// Stay on the search form showing this message
    Failure(String),
    /// A newer submission was issued after this one; nothing was applied
    Superseded,
}

/// Success/failure family of an `application_response_code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Failure,
}

impl ResponseClass {
    /// Codes in the 1xx family are successful; anything else, including an
    /// empty code, is a failure.
    pub fn classify(code: &str) -> Self {
        if code.starts_with('1') {
            ResponseClass::Success
        } else {
            ResponseClass::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_leading_digit() {
        assert_eq!(ResponseClass::classify("100"), ResponseClass::Success);
        assert_eq!(ResponseClass::classify("101"), ResponseClass::Success);
        assert_eq!(ResponseClass::classify("110"), ResponseClass::Success);
        assert_eq!(ResponseClass::classify("200"), ResponseClass::Failure);
        assert_eq!(ResponseClass::classify("900"), ResponseClass::Failure);
        assert_eq!(ResponseClass::classify(""), ResponseClass::Failure);
    }

    #[test]
    fn room_count_parses_picker_values() {
        assert_eq!("0".parse::<RoomCount>(), Ok(RoomCount::Count(0)));
        assert_eq!("5".parse::<RoomCount>(), Ok(RoomCount::Count(5)));
        assert_eq!("MAX".parse::<RoomCount>(), Ok(RoomCount::Max));
        assert!("6".parse::<RoomCount>().is_err());
        assert!("-1".parse::<RoomCount>().is_err());
        assert!(RoomCount::Count(5) < RoomCount::Max);
    }

    #[test]
    fn room_count_serializes_as_text() {
        let json = serde_json::to_string(&vec![RoomCount::Count(2), RoomCount::Max]).unwrap();
        assert_eq!(json, r#"["2","max"]"#);
        let back: Vec<RoomCount> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![RoomCount::Count(2), RoomCount::Max]);
    }

    #[test]
    fn criteria_field_names_round_trip() {
        for field in CriteriaField::ALL {
            assert_eq!(field.name().parse::<CriteriaField>(), Ok(field));
        }
        assert!("bedrooms".parse::<CriteriaField>().is_err());
    }

    #[test]
    fn set_field_parses_typed_values() {
        let mut criteria = SearchCriteria::default();
        criteria.set_field(CriteriaField::Location, "Leeds").unwrap();
        criteria.set_field(CriteriaField::ListingType, "Rent").unwrap();
        criteria.set_field(CriteriaField::PriceMax, "250000").unwrap();
        criteria.set_field(CriteriaField::BedroomMin, "2").unwrap();
        criteria.set_field(CriteriaField::BathroomMax, "max").unwrap();

        assert_eq!(criteria.location_text, "Leeds");
        assert_eq!(criteria.listing_type, ListingType::Rent);
        assert_eq!(criteria.price_max, Some(250_000));
        assert_eq!(criteria.bedroom_min, Some(RoomCount::Count(2)));
        assert_eq!(criteria.bathroom_max, Some(RoomCount::Max));

        criteria.set_field(CriteriaField::PriceMax, "").unwrap();
        assert_eq!(criteria.price_max, None);
    }

    #[test]
    fn set_field_rejects_unparsable_text_and_keeps_old_value() {
        let mut criteria = SearchCriteria::default();
        criteria.set_field(CriteriaField::PriceMin, "1000").unwrap();

        let err = criteria.set_field(CriteriaField::PriceMin, "-5").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: CriteriaField::PriceMin,
                value: "-5".to_string(),
            }
        );
        assert_eq!(criteria.price_min, Some(1000));
        assert!(criteria.set_field(CriteriaField::ListingType, "lease").is_err());
    }

    #[test]
    fn inverted_ranges_are_accepted_then_rejected_by_validate() {
        let mut criteria = SearchCriteria::new("york");
        criteria.set_field(CriteriaField::BedroomMin, "max").unwrap();
        criteria.set_field(CriteriaField::BedroomMax, "3").unwrap();

        assert_eq!(
            criteria.validate(),
            Err(ValidationError::InvertedRange { field: "bedroom" })
        );

        criteria.set_field(CriteriaField::BedroomMax, "max").unwrap();
        assert_eq!(criteria.validate(), Ok(()));
    }

    #[test]
    fn state_reports_spinner_and_message() {
        assert!(SearchState::Loading.is_loading());
        assert!(!SearchState::Idle.is_loading());
        assert_eq!(SearchState::Idle.message(), "");
        assert_eq!(SearchState::Error("oops".into()).message(), "oops");
    }
}
