use serde::{Deserialize, Serialize};

use crate::{
    condition::{Condition, ConditionThresholds, classify_condition},
    series::{
        HourlyPoint, SLOT_COUNT, SLOT_HOURS, SeriesProfile, generate_hourly_series, slot_anchor,
    },
    units::{DisplayUnit, convert_temperature, round_tenths, unit_symbol},
};

/// Base temperature of the standalone simulation.
pub const SIMULATED_BASE_CELSIUS: f64 = 22.0;

/// A single reading, real or synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub temperature_celsius: f64,
    /// 0–100.
    pub rain_chance_percent: f64,
}

/// Everything the front end needs to render one forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPresentation {
    pub temperature: f64,
    pub unit_symbol: String,
    pub condition: Condition,
    pub icon_key: String,
    pub description: String,
    pub hourly: Vec<HourlyPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformSettings {
    pub thresholds: ConditionThresholds,
    /// When set, an hourly curve is seeded from the observation.
    pub series: Option<SeriesProfile>,
}

impl TransformSettings {
    pub fn new(thresholds: ConditionThresholds) -> Self {
        Self {
            thresholds,
            series: None,
        }
    }

    pub fn with_series(mut self, profile: SeriesProfile) -> Self {
        self.series = Some(profile);
        self
    }
}

pub fn build_presentation(
    observation: &Observation,
    unit: DisplayUnit,
    hour_of_day: u32,
    settings: &TransformSettings,
) -> ForecastPresentation {
    let condition = classify_condition(
        observation.temperature_celsius,
        observation.rain_chance_percent,
        hour_of_day,
        &settings.thresholds,
    );

    let hourly = settings
        .series
        .map(|profile| {
            generate_hourly_series(
                observation.temperature_celsius,
                unit,
                slot_anchor(hour_of_day),
                &profile,
                &settings.thresholds,
            )
        })
        .unwrap_or_default();

    ForecastPresentation {
        temperature: convert_temperature(observation.temperature_celsius, unit),
        unit_symbol: unit_symbol(unit).to_string(),
        condition,
        icon_key: condition.icon_key().to_string(),
        description: condition.description().to_string(),
        hourly,
    }
}

/// Forecast without any backend: a fixed curve anchored at midnight, reporting
/// the slot that contains `request_hour` as the current reading.
pub fn simulate_presentation(
    request_hour: u32,
    unit: DisplayUnit,
    thresholds: &ConditionThresholds,
) -> ForecastPresentation {
    let profile = SeriesProfile::SIMULATED;
    let hourly = generate_hourly_series(SIMULATED_BASE_CELSIUS, unit, 0, &profile, thresholds);

    let index = (request_hour / SLOT_HOURS) as usize % SLOT_COUNT;
    let condition = hourly[index].condition;
    let celsius = round_tenths(profile.celsius_at(SIMULATED_BASE_CELSIUS, index));

    ForecastPresentation {
        temperature: convert_temperature(celsius, unit),
        unit_symbol: unit_symbol(unit).to_string(),
        condition,
        icon_key: condition.icon_key().to_string(),
        description: condition.description().to_string(),
        hourly,
    }
}
