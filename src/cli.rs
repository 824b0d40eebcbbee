use crate::logging::LogLevel;
use crate::search::types::CriteriaField;
use clap::{Args, Parser};
use serde::Serialize;
use std::path::PathBuf;

/// Search UK property listings
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Town, postcode or area to search
    pub location: String,

    /// buy, rent or share [default: buy]
    #[arg(short = 't', long, value_name = "TYPE")]
    pub listing_type: Option<String>,

    #[arg(long, value_name = "PRICE")]
    pub price_min: Option<String>,

    #[arg(long, value_name = "PRICE")]
    pub price_max: Option<String>,

    /// 0-5 or max
    #[arg(long, value_name = "ROOMS")]
    pub bedroom_min: Option<String>,

    /// 0-5 or max
    #[arg(long, value_name = "ROOMS")]
    pub bedroom_max: Option<String>,

    /// 0-5 or max
    #[arg(long, value_name = "ROOMS")]
    pub bathroom_min: Option<String>,

    /// 0-5 or max
    #[arg(long, value_name = "ROOMS")]
    pub bathroom_max: Option<String>,

    #[command(flatten)]
    pub settings: Settings,
}

/// Options that override the configuration file and environment
#[derive(Args, Debug, Default, Serialize)]
pub struct Settings {
    #[arg(short, long = "config", value_name = "FILE")]
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// [default: info]
    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,

    /// File to save the listings to [default: search_results.json]
    #[arg(short, long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

impl Cli {
    /// Field edits to replay into the search form, location first
    pub fn criteria_inputs(&self) -> Vec<(CriteriaField, &str)> {
        let optional = [
            (CriteriaField::ListingType, &self.listing_type),
            (CriteriaField::PriceMin, &self.price_min),
            (CriteriaField::PriceMax, &self.price_max),
            (CriteriaField::BedroomMin, &self.bedroom_min),
            (CriteriaField::BedroomMax, &self.bedroom_max),
            (CriteriaField::BathroomMin, &self.bathroom_min),
            (CriteriaField::BathroomMax, &self.bathroom_max),
        ];

        std::iter::once((CriteriaField::Location, self.location.as_str()))
            .chain(
                optional
                    .into_iter()
                    .filter_map(|(field, value)| value.as_deref().map(|v| (field, v))),
            )
            .collect()
    }
}
