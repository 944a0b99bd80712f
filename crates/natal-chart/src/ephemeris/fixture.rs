//! Deterministic ephemeris backed by fixed positions.
//!
//! Every query answers from the loaded table regardless of Julian Day or
//! location, which makes chart assembly reproducible in tests and lets the
//! CLI run without the Swiss Ephemeris data files.

use crate::chart::house_systems::HouseSystem;
use crate::ephemeris::adapter::EphemerisError;
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{AnglePoints, Body, BodyPosition, HouseFrame};
use crate::western::houses::HouseCuspSet;
use crate::western::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureHouses {
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureEphemeris {
    #[serde(default)]
    pub description: Option<String>,
    /// Body id ("sun", "moon", ...) -> position
    #[serde(default)]
    pub bodies: BTreeMap<String, BodyPosition>,
    /// House system name ("placidus", ...) -> cusps and angles
    #[serde(default)]
    pub houses: BTreeMap<String, FixtureHouses>,
}

impl FixtureEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Body, position: BodyPosition) -> Self {
        self.bodies.insert(body.id().to_string(), position);
        self
    }

    pub fn with_houses(
        mut self,
        system: HouseSystem,
        cusps: Vec<f64>,
        ascendant: f64,
        midheaven: f64,
    ) -> Self {
        self.houses.insert(
            system.name().to_string(),
            FixtureHouses { cusps, ascendant, midheaven },
        );
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, EphemerisError> {
        let raw: FixtureEphemeris =
            serde_json::from_str(json).map_err(|e| EphemerisError::InvalidFixture {
                message: e.to_string(),
            })?;
        raw.normalized()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EphemerisError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Lowercase keys and reject bodies or systems this crate does not know.
    fn normalized(self) -> Result<Self, EphemerisError> {
        let mut bodies = BTreeMap::new();
        for (key, position) in self.bodies {
            let body = Body::from_id(&key).ok_or_else(|| EphemerisError::InvalidFixture {
                message: format!("unknown body '{key}'"),
            })?;
            bodies.insert(body.id().to_string(), position);
        }

        let mut houses = BTreeMap::new();
        for (key, frame) in self.houses {
            let system = HouseSystem::from_name(&key).ok_or_else(|| EphemerisError::InvalidFixture {
                message: format!("unknown house system '{key}'"),
            })?;
            houses.insert(system.name().to_string(), frame);
        }

        Ok(Self {
            description: self.description,
            bodies,
            houses,
        })
    }
}

impl EphemerisProvider for FixtureEphemeris {
    fn house_cusps(
        &self,
        julian_day: f64,
        _latitude: f64,
        _longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        let entry = self
            .houses
            .get(system.name())
            .ok_or_else(|| EphemerisError::HouseCalculationFailed {
                system: system.name().to_string(),
                julian_day,
                message: "house system not present in fixture".to_string(),
            })?;

        let failed = |message: String| EphemerisError::HouseCalculationFailed {
            system: system.name().to_string(),
            julian_day,
            message,
        };

        if let Some(bad) = entry.cusps.iter().find(|c| !c.is_finite()) {
            return Err(failed(format!("non-finite cusp {bad}")));
        }
        let normalized: Vec<f64> = entry.cusps.iter().copied().map(normalize_degrees).collect();
        let cusps = HouseCuspSet::from_slice(&normalized).map_err(|e| failed(e.to_string()))?;

        Ok(HouseFrame {
            system,
            cusps,
            angles: AnglePoints::from_asc_mc(entry.ascendant, entry.midheaven),
        })
    }

    fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        self.bodies
            .get(body.id())
            .copied()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body: body.id().to_string(),
                julian_day,
                message: "body not present in fixture".to_string(),
            })
    }

    fn describe(&self) -> String {
        match &self.description {
            Some(d) => format!("fixture ephemeris ({d})"),
            None => "fixture ephemeris".to_string(),
        }
    }
}
