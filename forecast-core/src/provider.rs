use crate::{
    Config, ForecastReport, ValidatedRequest,
    error::Result,
    provider::{backend::BackendSource, simulated::SimulatedSource},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod backend;
pub mod simulated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Backend,
    Simulated,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Backend => "backend",
            SourceId::Simulated => "simulated",
        }
    }

    pub const fn all() -> &'static [SourceId] {
        &[SourceId::Backend, SourceId::Simulated]
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "backend" => Ok(SourceId::Backend),
            "simulated" => Ok(SourceId::Simulated),
            _ => Err(anyhow::anyhow!(
                "Unknown forecast source '{value}'. Supported sources: backend, simulated."
            )),
        }
    }
}

/// Something that turns a complete request into a forecast. One call per user
/// action; no retries.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, request: &ValidatedRequest) -> Result<ForecastReport>;
}

/// Construct a source from config and explicit SourceId.
pub fn source_from_config(
    id: SourceId,
    config: &Config,
) -> anyhow::Result<Box<dyn ForecastSource>> {
    let boxed: Box<dyn ForecastSource> = match id {
        SourceId::Backend => {
            Box::new(BackendSource::new(&config.backend, config.backend_settings()?)?)
        }
        SourceId::Simulated => Box::new(SimulatedSource::new(config.condition_thresholds()?)),
    };

    Ok(boxed)
}

/// Construct the default source from config, using `default_source` field.
pub fn default_source_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    let id = config.default_source_id()?;
    source_from_config(id, config)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
