use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use forecast_core::{
    AddressValidator, Config, ConditionThresholds, DisplayUnit, ForecastError, ForecastRequest,
    ForecastSource, Location, SourceId, model::DATETIME_FORMAT, provider::source_from_config,
    validator_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};

use crate::output::render_report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the default source, backend URL, API key and display preferences.
    Configure,

    /// Validate a free-text address and print its coordinates.
    Locate {
        /// Address line, e.g. "Av. Paulista, 1578, São Paulo".
        address: String,
    },

    /// Show the forecast for a location and time.
    Show {
        /// Address to validate and use as the location.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        address: Option<String>,

        /// Latitude of a picked point.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of a picked point.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Date and time, e.g. "2025-10-04T15:00", or "now".
        #[arg(long)]
        datetime: Option<String>,

        /// celsius, fahrenheit or kelvin. Unknown values fall back to celsius.
        #[arg(long)]
        unit: Option<String>,

        /// backend or simulated; defaults to the configured source.
        #[arg(long)]
        source: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Locate { address } => {
                let config = Config::load()?;
                let location = validator_from_config(&config)?.validate(&address).await?;
                println!("{}", location.summary());
            }
            Command::Show {
                address,
                lat,
                lon,
                datetime,
                unit,
                source,
                json,
            } => {
                let config = Config::load()?;

                let source_id = match source {
                    Some(s) => SourceId::try_from(s.as_str())?,
                    None => config.default_source_id()?,
                };

                let mut request = ForecastRequest {
                    location: match (lat, lon) {
                        (Some(lat), Some(lon)) => Some(Location::from_map_click(lat, lon)?),
                        _ => None,
                    },
                    datetime: datetime.as_deref().map(parse_datetime).transpose()?,
                    unit: unit
                        .as_deref()
                        .map(DisplayUnit::parse_lenient)
                        .unwrap_or_else(|| config.display_unit()),
                };

                if let Some(address) = address {
                    // Don't spend a geocoding call on a request that can't go through.
                    if request.datetime.is_none() {
                        return Err(ForecastError::MissingDateTime.into());
                    }
                    let validator = validator_from_config(&config)?;
                    request.location = Some(validator.validate(&address).await?);
                }

                let request = request.validate()?;
                tracing::debug!(source = %source_id, unit = %request.unit, "requesting forecast");
                let report = source_from_config(source_id, &config)?.forecast(&request).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print!("{}", render_report(&report));
                }
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let sources: Vec<&str> = SourceId::all().iter().map(|s| s.as_str()).collect();
    let source = Select::new("Default forecast source:", sources).prompt()?;
    config.set_default_source(SourceId::try_from(source)?);

    let base_url = Text::new("Forecast backend URL:")
        .with_default(&config.backend.base_url)
        .prompt()?;
    config.backend.base_url = base_url.trim().to_string();

    let api_key = Password::new("Address validation API key (leave empty to keep current):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.upsert_geocoding_api_key(api_key.trim().to_string());
    }

    let presets = ConditionThresholds::preset_names().to_vec();
    let preset = Select::new("Condition thresholds:", presets).prompt()?;
    config.threshold_preset = Some(preset.to_string());

    let units: Vec<&str> = DisplayUnit::all().iter().map(|u| u.as_str()).collect();
    let unit = Select::new("Default temperature unit:", units).prompt()?;
    config.set_default_unit(DisplayUnit::parse_lenient(unit));

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Accepts the backend's own layout, a space-separated variant, or "now".
fn parse_datetime(value: &str) -> anyhow::Result<NaiveDateTime> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("now") {
        return Ok(Local::now().naive_local());
    }

    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("Invalid date/time '{value}'"))
        .map_err(|e| anyhow!("{e:#}\nHint: use the form 2025-10-04T15:00."))
}
