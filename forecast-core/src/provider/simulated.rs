use async_trait::async_trait;

use crate::{
    condition::ConditionThresholds,
    error::Result,
    model::{ForecastReport, ValidatedRequest},
    presentation::simulate_presentation,
    provider::SourceId,
};

use super::ForecastSource;

/// Offline source: a fixed sine curve, no network.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSource {
    thresholds: ConditionThresholds,
}

impl SimulatedSource {
    pub fn new(thresholds: ConditionThresholds) -> Self {
        Self { thresholds }
    }
}

#[async_trait]
impl ForecastSource for SimulatedSource {
    async fn forecast(&self, request: &ValidatedRequest) -> Result<ForecastReport> {
        tracing::debug!(hour = request.hour_of_day(), "simulating forecast");

        Ok(ForecastReport {
            source: SourceId::Simulated.to_string(),
            location: request.location.clone(),
            requested_at: request.datetime,
            presentation: simulate_presentation(
                request.hour_of_day(),
                request.unit,
                &self.thresholds,
            ),
            reading: None,
        })
    }
}
