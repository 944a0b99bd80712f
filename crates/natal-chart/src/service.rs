//! Request-level entry point: validate, convert to Julian Day, dispatch.

use crate::aspects::{AspectCalculator, AspectKind};
use crate::chart::assembly::ChartAssembler;
use crate::chart::birth::BirthData;
use crate::chart::house_systems::{
    resolve_systems_strict, resolve_systems_with_fallback, HouseSystem, DEFAULT_HOUSE_SYSTEM,
};
use crate::chart::types::NatalChartResponse;
use crate::ephemeris::julian::fractional_hour;
use crate::ephemeris::provider::EphemerisProvider;
use crate::error::ChartError;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    /// System used when a request names no valid system
    pub fallback_house_system: HouseSystem,
    /// Reject unknown house system names instead of dropping them
    pub strict_house_systems: bool,
    /// Per-aspect orb overrides
    pub aspect_orbs: HashMap<AspectKind, f64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            fallback_house_system: DEFAULT_HOUSE_SYSTEM,
            strict_house_systems: false,
            aspect_orbs: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub message: String,
    pub provider: String,
    pub version: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub license: String,
}

fn source_url() -> Option<String> {
    let repo = env!("CARGO_PKG_REPOSITORY");
    (!repo.is_empty()).then(|| repo.to_string())
}

pub struct NatalChartService<P: EphemerisProvider> {
    provider: P,
    settings: ServiceSettings,
}

impl<P: EphemerisProvider> NatalChartService<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, ServiceSettings::default())
    }

    pub fn with_settings(provider: P, settings: ServiceSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn resolve_systems<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<HouseSystem>, ChartError> {
        let fallback = self.settings.fallback_house_system;
        if self.settings.strict_house_systems {
            resolve_systems_strict(requested, fallback)
        } else {
            Ok(resolve_systems_with_fallback(requested, fallback))
        }
    }

    /// Natal chart for every requested house system.
    ///
    /// Input problems are reported before the ephemeris is queried.
    pub fn calculate<S: AsRef<str>>(
        &self,
        birth: &BirthData,
        house_systems: &[S],
    ) -> Result<NatalChartResponse, ChartError> {
        let moment = birth.validate()?;
        let systems = self.resolve_systems(house_systems)?;

        let dt = moment.instant;
        let julian_day = self
            .provider
            .julian_day(dt.year(), dt.month(), dt.day(), fractional_hour(&dt));

        log::info!(
            "natal chart for {} at ({}, {}), JD {:.6}, systems {:?}",
            dt.to_rfc3339(),
            moment.location.lat,
            moment.location.lon,
            julian_day,
            systems.iter().map(|s| s.name()).collect::<Vec<_>>()
        );

        ChartAssembler::new(&self.provider)
            .with_aspect_calculator(AspectCalculator::with_orbs(&self.settings.aspect_orbs))
            .assemble(julian_day, moment.location, &systems)
    }

    /// Check that Julian Day conversion works and ephemeris data is reachable.
    pub fn health(&self) -> HealthReport {
        let sample_jd = self.provider.julian_day(2025, 5, 15, 13.9);

        let outcome = if !(sample_jd.is_finite() && sample_jd > 0.0) {
            Err(format!("Julian Day calculation failed (got {sample_jd})"))
        } else {
            self.provider.check().map_err(|e| e.to_string())
        };

        let (status, message) = match outcome {
            Ok(()) => ("healthy", "API is operational".to_string()),
            Err(reason) => {
                log::error!("health check failed: {reason}");
                ("unhealthy", format!("Health check failed: {reason}"))
            }
        };

        HealthReport {
            status: status.to_string(),
            message,
            provider: self.provider.describe(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            source: source_url(),
        }
    }

    pub fn about(&self) -> ServiceInfo {
        ServiceInfo {
            message: format!("Natal chart engine using {}", self.provider.describe()),
            source: source_url(),
            license: env!("CARGO_PKG_LICENSE").to_string(),
        }
    }
}
