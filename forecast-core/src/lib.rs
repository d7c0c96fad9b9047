//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Pure presentation transforms (unit conversion, condition classification,
//!   synthetic hourly curves)
//! - Request/response models for a single forecast lookup
//! - Clients for the forecast backend and the address validation API
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod series;
pub mod units;

pub use condition::{Condition, ConditionThresholds, classify_condition};
pub use config::{BackendConfig, Config, GeocodingConfig};
pub use error::ForecastError;
pub use geocode::{AddressValidator, GoogleAddressValidator, validator_from_config};
pub use model::{ForecastReading, ForecastReport, ForecastRequest, Location, ValidatedRequest};
pub use presentation::{
    ForecastPresentation, Observation, TransformSettings, build_presentation, simulate_presentation,
};
pub use provider::{ForecastSource, SourceId};
pub use series::{HourlyPoint, SeriesProfile, generate_hourly_series};
pub use units::{DisplayUnit, convert_temperature, unit_symbol};
