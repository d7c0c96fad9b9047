//! Synthetic 3-hourly temperature curve.
//!
//! Used to fill the hourly strip when no real hourly data exists. The curve is
//! a pure function of its inputs.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::{
    condition::{Condition, ConditionThresholds, classify_condition},
    units::{DisplayUnit, convert_temperature, round_tenths},
};

pub const SLOT_COUNT: usize = 8;
pub const SLOT_HOURS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour_of_day: u32,
    /// Temperature in the requested display unit.
    pub temperature: f64,
    pub condition: Condition,
}

/// Shape of the sine curve laid over the base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesProfile {
    pub amplitude: f64,
    pub bias: f64,
}

impl SeriesProfile {
    /// Standalone simulation around a fixed base.
    pub const SIMULATED: SeriesProfile = SeriesProfile {
        amplitude: 8.0,
        bias: 0.0,
    };

    /// Curve seeded from a real backend reading.
    pub const BACKEND_SEEDED: SeriesProfile = SeriesProfile {
        amplitude: 5.0,
        bias: -3.0,
    };

    /// Unrounded Celsius temperature for slot `index`.
    pub fn celsius_at(&self, base_celsius: f64, index: usize) -> f64 {
        let phase = index as f64 * PI / 4.0;
        base_celsius + phase.sin() * self.amplitude + self.bias
    }
}

impl Default for SeriesProfile {
    fn default() -> Self {
        Self::SIMULATED
    }
}

/// Snap an hour down to the start of its 3-hour slot.
pub fn slot_anchor(hour_of_day: u32) -> u32 {
    (hour_of_day % 24) / SLOT_HOURS * SLOT_HOURS
}

/// Hour of day for slot `index` of a series starting at `anchor_hour`.
pub fn slot_hour(anchor_hour: u32, index: usize) -> u32 {
    ((anchor_hour % 24) + SLOT_HOURS * (index % SLOT_COUNT) as u32) % 24
}

/// Build the 8-point curve. Each point is classified with no rain and its own hour.
pub fn generate_hourly_series(
    base_celsius: f64,
    unit: DisplayUnit,
    anchor_hour: u32,
    profile: &SeriesProfile,
    thresholds: &ConditionThresholds,
) -> Vec<HourlyPoint> {
    (0..SLOT_COUNT)
        .map(|i| {
            let hour_of_day = slot_hour(anchor_hour, i);
            let celsius = profile.celsius_at(base_celsius, i);

            HourlyPoint {
                hour_of_day,
                temperature: convert_temperature(round_tenths(celsius), unit),
                condition: classify_condition(celsius, 0.0, hour_of_day, thresholds),
            }
        })
        .collect()
}
