use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ForecastError, Result},
    presentation::{ForecastPresentation, Observation},
    units::DisplayUnit,
};

/// Datetime layout the forecast backend expects.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const MAP_CLICK_LABEL: &str = "Location selected on map";

/// A picked point, from a map click or a validated address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ForecastError::InvalidCoordinates);
        }

        Ok(Self {
            latitude,
            longitude,
            label: label.into(),
        })
    }

    pub fn from_map_click(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, MAP_CLICK_LABEL)
    }

    /// Multi-line summary shown after a location is picked.
    pub fn summary(&self) -> String {
        format!(
            "Location: {}\nLatitude: {:.6}\nLongitude: {:.6}",
            self.label, self.latitude, self.longitude
        )
    }
}

/// What the user has picked so far. Any field may still be missing.
#[derive(Debug, Clone, Default)]
pub struct ForecastRequest {
    pub location: Option<Location>,
    pub datetime: Option<NaiveDateTime>,
    pub unit: DisplayUnit,
}

impl ForecastRequest {
    /// Check required input before anything goes over the network.
    pub fn validate(self) -> Result<ValidatedRequest> {
        let location = self.location.ok_or(ForecastError::MissingLocation)?;
        let datetime = self.datetime.ok_or(ForecastError::MissingDateTime)?;

        Ok(ValidatedRequest {
            location,
            datetime,
            unit: self.unit,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub location: Location,
    pub datetime: NaiveDateTime,
    pub unit: DisplayUnit,
}

impl ValidatedRequest {
    pub fn hour_of_day(&self) -> u32 {
        self.datetime.hour()
    }

    pub fn formatted_datetime(&self) -> String {
        self.datetime.format(DATETIME_FORMAT).to_string()
    }
}

/// Success payload of the forecast backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReading {
    #[serde(rename = "Temperatura_C")]
    pub temperature_c: f64,
    #[serde(rename = "Chance_Chuva")]
    pub rain_chance_pct: f64,
    #[serde(rename = "Umidade_Relativa")]
    pub relative_humidity_pct: f64,
    #[serde(rename = "Velocidade_Vento")]
    pub wind_speed_mps: f64,
    #[serde(rename = "Precipitacao_chuva")]
    pub rain_mm: f64,
    #[serde(rename = "Precipitacao_neve")]
    pub snow_mm: f64,
    #[serde(rename = "Pressao_Atmosferica")]
    pub pressure_hpa: f64,
}

impl ForecastReading {
    pub fn observation(&self) -> Observation {
        Observation {
            temperature_celsius: self.temperature_c,
            rain_chance_percent: self.rain_chance_pct,
        }
    }
}

/// Result of one forecast lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub source: String,
    pub location: Location,
    pub requested_at: NaiveDateTime,
    pub presentation: ForecastPresentation,
    /// Extra backend values; absent for simulated forecasts.
    pub reading: Option<ForecastReading>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 4)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .expect("valid datetime")
    }

    #[test]
    fn missing_location_is_reported_first() {
        let err = ForecastRequest::default().validate().unwrap_err();
        assert!(matches!(err, ForecastError::MissingLocation));
        assert!(err.is_input_error());
    }

    #[test]
    fn missing_datetime_is_reported() {
        let req = ForecastRequest {
            location: Some(Location::from_map_click(-23.55, -46.63).expect("valid")),
            ..Default::default()
        };
        let err = req.validate().unwrap_err();
        assert!(matches!(err, ForecastError::MissingDateTime));
    }

    #[test]
    fn validated_request_exposes_hour_and_wire_datetime() {
        let req = ForecastRequest {
            location: Some(Location::from_map_click(-23.55, -46.63).expect("valid")),
            datetime: Some(at(21, 30)),
            unit: DisplayUnit::Kelvin,
        }
        .validate()
        .expect("complete request");

        assert_eq!(req.hour_of_day(), 21);
        assert_eq!(req.formatted_datetime(), "2025-10-04T21:30");
        assert_eq!(req.unit, DisplayUnit::Kelvin);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            Location::from_map_click(91.0, 0.0),
            Err(ForecastError::InvalidCoordinates)
        ));
        assert!(Location::new(0.0, -181.0, "x").is_err());
    }

    #[test]
    fn summary_uses_six_decimals() {
        let loc = Location::from_map_click(-14.235, -51.925).expect("valid");
        assert_eq!(
            loc.summary(),
            "Location: Location selected on map\nLatitude: -14.235000\nLongitude: -51.925000"
        );
    }

    #[test]
    fn reading_parses_backend_field_names() {
        let json = r#"{
            "Temperatura_C": 24.5, "Temperatura_F": 76.1, "Temperatura_K": 297.65,
            "Chance_Chuva": 42.1, "Umidade_Relativa": 71.3, "Velocidade_Vento": 3.2,
            "Precipitacao_chuva": 0.4, "Precipitacao_neve": 0.0, "Pressao_Atmosferica": 1009.8
        }"#;
        let reading: ForecastReading = serde_json::from_str(json).expect("valid payload");

        assert_eq!(reading.temperature_c, 24.5);
        assert_eq!(reading.pressure_hpa, 1009.8);
        let obs = reading.observation();
        assert_eq!(obs.rain_chance_percent, 42.1);
    }
}
