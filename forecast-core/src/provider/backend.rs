use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    config::BackendConfig,
    error::{ForecastError, Result},
    model::{ForecastReading, ForecastReport, ValidatedRequest},
    presentation::{TransformSettings, build_presentation},
    provider::{SourceId, truncate_body},
};

use super::ForecastSource;

const SERVICE: &str = "forecast server";

/// Client for the `POST /api/forecast` endpoint.
#[derive(Debug, Clone)]
pub struct BackendSource {
    base_url: String,
    settings: TransformSettings,
    http: Client,
}

#[derive(Debug, Serialize)]
struct ForecastBody {
    latitude: f64,
    longitude: f64,
    datetime: String,
}

impl BackendSource {
    pub fn new(config: &BackendConfig, settings: TransformSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().map_err(|e| ForecastError::Client {
            service: SERVICE,
            message: e.to_string(),
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            settings,
            http,
        })
    }

    /// Fetch the raw reading for one location and time.
    #[instrument(
        skip(self, request),
        fields(lat = request.location.latitude, lon = request.location.longitude)
    )]
    pub async fn fetch_reading(&self, request: &ValidatedRequest) -> Result<ForecastReading> {
        let url = format!("{}/api/forecast", self.base_url);
        let body = ForecastBody {
            latitude: request.location.latitude,
            longitude: request.location.longitude,
            datetime: request.formatted_datetime(),
        };

        debug!(%url, datetime = %body.datetime, "requesting forecast");

        let res = self
            .http
            .post(&url)
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

        let value: Option<serde_json::Value> = serde_json::from_str(&text).ok();

        if let Some(message) = value.as_ref().and_then(error_field) {
            warn!(%status, %message, "forecast server reported an error");
            return Err(ForecastError::Backend(message));
        }

        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or("Server error").to_string();
            warn!(%status, body = %truncate_body(&text), "forecast request failed");
            return Err(ForecastError::Backend(message));
        }

        let value = value.ok_or_else(|| ForecastError::Parse {
            service: SERVICE,
            message: format!("body is not JSON: {}", truncate_body(&text)),
        })?;

        serde_json::from_value(value).map_err(|e| ForecastError::Parse {
            service: SERVICE,
            message: e.to_string(),
        })
    }
}

/// Message from a set `error` field, verbatim when it is a string.
///
/// `null`, `false`, `0` and `""` count as unset.
fn error_field(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl ForecastSource for BackendSource {
    async fn forecast(&self, request: &ValidatedRequest) -> Result<ForecastReport> {
        let reading = self.fetch_reading(request).await?;

        let presentation = build_presentation(
            &reading.observation(),
            request.unit,
            request.hour_of_day(),
            &self.settings,
        );

        Ok(ForecastReport {
            source: SourceId::Backend.to_string(),
            location: request.location.clone(),
            requested_at: request.datetime,
            presentation,
            reading: Some(reading),
        })
    }
}
