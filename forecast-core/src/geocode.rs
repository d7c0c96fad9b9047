//! Free-text address validation.
//!
//! Turns a line typed by the user into a [`Location`] via the Google Address
//! Validation API. One request per call, no retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, instrument, warn};

use crate::{
    config::{Config, GeocodingConfig},
    error::{ForecastError, Result},
    model::Location,
    provider::truncate_body,
};

const SERVICE: &str = "address validation";

#[async_trait]
pub trait AddressValidator: Send + Sync + Debug {
    async fn validate(&self, address_line: &str) -> Result<Location>;
}

#[derive(Debug, Clone)]
pub struct GoogleAddressValidator {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GoogleAddressValidator {
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateBody<'a> {
    address: AddressInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressInput<'a> {
    address_lines: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    result: Option<GvResult>,
    error: Option<GvError>,
}

#[derive(Debug, Deserialize)]
struct GvResult {
    geocode: Option<GvGeocode>,
    address: Option<GvAddress>,
}

#[derive(Debug, Deserialize)]
struct GvGeocode {
    location: Option<GvLatLng>,
}

#[derive(Debug, Deserialize)]
struct GvLatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GvAddress {
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvError {
    message: String,
}

#[async_trait]
impl AddressValidator for GoogleAddressValidator {
    #[instrument(skip(self))]
    async fn validate(&self, address_line: &str) -> Result<Location> {
        let address_line = address_line.trim();
        if address_line.is_empty() {
            return Err(ForecastError::MissingAddress);
        }

        let url = format!("{}/v1:validateAddress", self.base_url);
        let body = ValidateBody {
            address: AddressInput {
                address_lines: [address_line],
            },
        };

        debug!(%url, "validating address");

        let res = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ForecastError::Connection {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ForecastError::Connection {
                service: SERVICE,
                message: e.to_string(),
            })?;

        let parsed: ValidateResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                warn!(%status, body = %truncate_body(&text), "address validation request failed");
                return Err(ForecastError::Geocoding(reason_phrase(status)));
            }
            Err(e) => {
                warn!(body = %truncate_body(&text), "unreadable address validation response");
                return Err(ForecastError::Parse {
                    service: SERVICE,
                    message: e.to_string(),
                });
            }
        };

        let result = parsed.result.unwrap_or(GvResult {
            geocode: None,
            address: None,
        });

        if let Some(loc) = result.geocode.and_then(|g| g.location) {
            let label = result
                .address
                .and_then(|a| a.formatted_address)
                .unwrap_or_else(|| address_line.to_string());
            return Location::new(loc.latitude, loc.longitude, label);
        }

        if let Some(err) = parsed.error {
            warn!(%status, message = %err.message, "address validation rejected the request");
            return Err(ForecastError::Geocoding(err.message));
        }

        if !status.is_success() {
            warn!(%status, "address validation request failed");
            return Err(ForecastError::Geocoding(reason_phrase(status)));
        }

        Err(ForecastError::AddressNotFound)
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Server error").to_string()
}

/// Construct the address validator from config.
pub fn validator_from_config(config: &Config) -> anyhow::Result<GoogleAddressValidator> {
    let geocoding = config.geocoding.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "No address validation API key configured.\n\
             Hint: run `forecast configure` and enter your API key, or pass `--lat`/`--lon`."
        )
    })?;

    Ok(GoogleAddressValidator::new(geocoding))
}
