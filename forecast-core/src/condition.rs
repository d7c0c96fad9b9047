use serde::{Deserialize, Serialize};

/// Qualitative weather classification shown next to a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    ClearNight,
}

impl Condition {
    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Sunny,
            Condition::PartlyCloudy,
            Condition::Cloudy,
            Condition::Rainy,
            Condition::Snowy,
            Condition::Stormy,
            Condition::ClearNight,
        ]
    }

    /// Stable key used to pick an icon.
    pub fn icon_key(&self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::PartlyCloudy => "partly-cloudy",
            Condition::Cloudy => "cloudy",
            Condition::Rainy => "rainy",
            Condition::Snowy => "snowy",
            Condition::Stormy => "stormy",
            Condition::ClearNight => "clear-night",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Condition::Sunny => "☀️",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁️",
            Condition::Rainy => "🌧️",
            Condition::Snowy => "❄️",
            Condition::Stormy => "⛈️",
            Condition::ClearNight => "🌙",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rainy",
            Condition::Snowy => "Snowy",
            Condition::Stormy => "Stormy",
            Condition::ClearNight => "Clear Night",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Condition::all()
            .iter()
            .copied()
            .find(|c| c.icon_key() == key)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Description for a condition key coming from outside the type system.
pub fn describe_key(key: &str) -> &'static str {
    Condition::from_key(key)
        .map(|c| c.description())
        .unwrap_or("Unknown")
}

pub fn icon_for_key(key: &str) -> Option<&'static str> {
    Condition::from_key(key).map(|c| c.emoji())
}

/// Cutoffs for [`classify_condition`]. Temperatures are Celsius, rain chances percent.
///
/// Example TOML:
/// [thresholds]
/// rain_stormy = 60.0
/// rain_rainy = 30.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionThresholds {
    pub rain_stormy: f64,
    pub rain_rainy: f64,
    pub hot: f64,
    pub warm: f64,
    pub mild: f64,
    pub cool: f64,
    pub freezing: f64,
    /// Daytime readings above `mild` count as partly cloudy instead of falling through.
    pub mild_day_partly_cloudy: bool,
}

impl ConditionThresholds {
    /// Cutoffs used by the backend-seeded widget.
    pub const fn backend() -> Self {
        Self {
            rain_stormy: 60.0,
            rain_rainy: 30.0,
            hot: 30.0,
            warm: 25.0,
            mild: 15.0,
            cool: 10.0,
            freezing: 0.0,
            mild_day_partly_cloudy: false,
        }
    }

    /// Cutoffs used by the full-stack widget.
    pub const fn full_stack() -> Self {
        Self {
            rain_stormy: 90.0,
            rain_rainy: 70.0,
            hot: 25.0,
            warm: 15.0,
            mild: 20.0,
            cool: 10.0,
            freezing: 0.0,
            mild_day_partly_cloudy: false,
        }
    }

    pub fn preset(name: &str) -> anyhow::Result<Self> {
        match name.to_lowercase().as_str() {
            "default" => Ok(Self::default()),
            "backend" => Ok(Self::backend()),
            "full-stack" | "full_stack" | "fullstack" => Ok(Self::full_stack()),
            _ => Err(anyhow::anyhow!(
                "Unknown threshold preset '{name}'. \
                 Supported presets: default, backend, full-stack."
            )),
        }
    }

    pub const fn preset_names() -> &'static [&'static str] {
        &["default", "backend", "full-stack"]
    }
}

impl Default for ConditionThresholds {
    fn default() -> Self {
        Self {
            rain_stormy: 60.0,
            rain_rainy: 30.0,
            hot: 30.0,
            warm: 25.0,
            mild: 18.0,
            cool: 10.0,
            freezing: 0.0,
            mild_day_partly_cloudy: true,
        }
    }
}

/// Hours past 23 wrap onto the next day.
pub fn is_night(hour_of_day: u32) -> bool {
    let hour = hour_of_day % 24;
    hour >= 18 || hour < 6
}

/// Classify a reading. The tests run in order and the first match wins.
pub fn classify_condition(
    temp_celsius: f64,
    rain_chance_percent: f64,
    hour_of_day: u32,
    thresholds: &ConditionThresholds,
) -> Condition {
    if rain_chance_percent > thresholds.rain_stormy {
        return Condition::Stormy;
    }
    if rain_chance_percent > thresholds.rain_rainy {
        return Condition::Rainy;
    }
    if temp_celsius > thresholds.hot {
        return Condition::Sunny;
    }
    if temp_celsius > thresholds.warm {
        return Condition::PartlyCloudy;
    }
    if temp_celsius > thresholds.mild {
        if is_night(hour_of_day) {
            return Condition::ClearNight;
        }
        if thresholds.mild_day_partly_cloudy {
            return Condition::PartlyCloudy;
        }
    }
    if temp_celsius > thresholds.cool {
        return Condition::Cloudy;
    }
    if temp_celsius <= thresholds.freezing {
        return Condition::Snowy;
    }

    Condition::PartlyCloudy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(t: f64, rain: f64, hour: u32) -> Condition {
        classify_condition(t, rain, hour, &ConditionThresholds::default())
    }

    #[test]
    fn documented_examples() {
        assert_eq!(classify(32.0, 0.0, 12), Condition::Sunny);
        assert_eq!(classify(20.0, 0.0, 2), Condition::ClearNight);
        assert_eq!(classify(20.0, 0.0, 12), Condition::PartlyCloudy);
        assert_eq!(classify(5.0, 65.0, 12), Condition::Stormy);
    }

    #[test]
    fn rain_overrides_temperature() {
        assert_eq!(classify(35.0, 61.0, 12), Condition::Stormy);
        assert_eq!(classify(35.0, 31.0, 12), Condition::Rainy);
        assert_eq!(classify(-5.0, 45.0, 3), Condition::Rainy);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(classify(30.0, 0.0, 12), Condition::PartlyCloudy);
        assert_eq!(classify(25.0, 0.0, 12), Condition::PartlyCloudy);
        assert_eq!(classify(18.0, 0.0, 12), Condition::Cloudy);
        assert_eq!(classify(10.0, 0.0, 12), Condition::PartlyCloudy);
        assert_eq!(classify(5.0, 60.0, 12), Condition::Rainy);
        assert_eq!(classify(5.0, 30.0, 12), Condition::PartlyCloudy);
    }

    #[test]
    fn freezing_is_inclusive() {
        assert_eq!(classify(0.0, 0.0, 12), Condition::Snowy);
        assert_eq!(classify(-8.0, 0.0, 22), Condition::Snowy);
        assert_eq!(classify(0.1, 0.0, 12), Condition::PartlyCloudy);
    }

    #[test]
    fn night_window_edges() {
        assert!(is_night(18));
        assert!(is_night(23));
        assert!(is_night(0));
        assert!(is_night(5));
        assert!(!is_night(6));
        assert!(!is_night(17));

        assert_eq!(classify(19.0, 0.0, 18), Condition::ClearNight);
        assert_eq!(classify(19.0, 0.0, 6), Condition::PartlyCloudy);
        assert_eq!(classify(18.0, 0.0, 23), Condition::Cloudy);
    }

    #[test]
    fn hours_past_midnight_wrap() {
        assert!(!is_night(30));
        assert!(is_night(42));
        assert!(is_night(u32::MAX));
        assert_eq!(classify(19.0, 0.0, 36), Condition::PartlyCloudy);
        assert_eq!(classify(19.0, 0.0, 24 + 20), Condition::ClearNight);
    }

    #[test]
    fn mild_daytime_falls_through_without_flag() {
        let backend = ConditionThresholds::backend();
        assert_eq!(classify_condition(16.0, 0.0, 12, &backend), Condition::Cloudy);
        assert_eq!(classify_condition(16.0, 0.0, 21, &backend), Condition::ClearNight);
        assert_eq!(classify_condition(8.0, 0.0, 12, &backend), Condition::PartlyCloudy);
    }

    #[test]
    fn presets_disagree_on_same_reading() {
        let backend = ConditionThresholds::backend();
        let full = ConditionThresholds::full_stack();

        assert_eq!(classify_condition(27.0, 0.0, 12, &backend), Condition::PartlyCloudy);
        assert_eq!(classify_condition(27.0, 0.0, 12, &full), Condition::Sunny);

        assert_eq!(classify_condition(20.0, 75.0, 12, &backend), Condition::Stormy);
        assert_eq!(classify_condition(20.0, 75.0, 12, &full), Condition::Rainy);
    }

    #[test]
    fn preset_lookup() {
        for name in ConditionThresholds::preset_names() {
            assert!(ConditionThresholds::preset(name).is_ok());
        }
        let err = ConditionThresholds::preset("tropical").unwrap_err();
        assert!(err.to_string().contains("Unknown threshold preset"));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let parsed: ConditionThresholds = toml::from_str("hot = 35.0").expect("valid toml");
        assert_eq!(parsed.hot, 35.0);
        assert_eq!(parsed.rain_stormy, ConditionThresholds::default().rain_stormy);
    }

    #[test]
    fn lookup_tables_are_total() {
        for c in Condition::all() {
            assert_eq!(Condition::from_key(c.icon_key()), Some(*c));
            assert_ne!(describe_key(c.icon_key()), "Unknown");
            assert!(icon_for_key(c.icon_key()).is_some());
        }
        assert_eq!(Condition::ClearNight.description(), "Clear Night");
        assert_eq!(Condition::PartlyCloudy.emoji(), "⛅");
    }

    #[test]
    fn unknown_key_falls_back() {
        assert_eq!(describe_key("hail"), "Unknown");
        assert_eq!(icon_for_key("hail"), None);
        assert_eq!(Condition::from_key(""), None);
    }
}
