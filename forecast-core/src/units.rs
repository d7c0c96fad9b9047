use serde::{Deserialize, Serialize};

/// Temperature scale chosen for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl DisplayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayUnit::Celsius => "celsius",
            DisplayUnit::Fahrenheit => "fahrenheit",
            DisplayUnit::Kelvin => "kelvin",
        }
    }

    pub const fn all() -> &'static [DisplayUnit] {
        &[DisplayUnit::Celsius, DisplayUnit::Fahrenheit, DisplayUnit::Kelvin]
    }

    /// Parse a unit name, falling back to Celsius for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "fahrenheit" | "f" | "°f" => DisplayUnit::Fahrenheit,
            "kelvin" | "k" => DisplayUnit::Kelvin,
            _ => DisplayUnit::Celsius,
        }
    }

    pub fn symbol(&self) -> &'static str {
        unit_symbol(*self)
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DisplayUnit {
    fn from(value: &str) -> Self {
        DisplayUnit::parse_lenient(value)
    }
}

/// Convert a Celsius reading into `unit`, rounded to one decimal place.
pub fn convert_temperature(celsius: f64, unit: DisplayUnit) -> f64 {
    let converted = match unit {
        DisplayUnit::Celsius => celsius,
        DisplayUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        DisplayUnit::Kelvin => celsius + 273.15,
    };

    round_tenths(converted)
}

pub fn unit_symbol(unit: DisplayUnit) -> &'static str {
    match unit {
        DisplayUnit::Celsius => "°C",
        DisplayUnit::Fahrenheit => "°F",
        DisplayUnit::Kelvin => "K",
    }
}

/// Round half away from zero at the tenths digit.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
