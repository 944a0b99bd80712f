use crate::aspects::types::Aspect;
use crate::ephemeris::types::{AnglePoints, Body};
use crate::western::houses::HouseCusp;
use crate::western::zodiac::{SignPosition, ZodiacSign};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A body placed in a chart: sign, degree within the sign, and house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPlacement {
    pub planet: Body,
    pub sign: ZodiacSign,
    /// Position within the sign (0-30)
    pub degree: f64,
    /// House number (1-12)
    pub house: u8,
    /// Degrees per day, negative means retrograde
    pub speed: f64,
    pub retrograde: bool,
}

impl PlanetPlacement {
    pub fn position(&self) -> SignPosition {
        SignPosition {
            sign: self.sign,
            degree: self.degree,
        }
    }

    pub fn longitude(&self) -> f64 {
        self.position().longitude()
    }
}

/// Chart angles expressed as sign positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: SignPosition,
    pub midheaven: SignPosition,
    pub descendant: SignPosition,
    pub imum_coeli: SignPosition,
}

impl From<&AnglePoints> for ChartAngles {
    fn from(angles: &AnglePoints) -> Self {
        Self {
            ascendant: SignPosition::from_longitude(angles.ascendant),
            midheaven: SignPosition::from_longitude(angles.midheaven),
            descendant: SignPosition::from_longitude(angles.descendant),
            imum_coeli: SignPosition::from_longitude(angles.imum_coeli),
        }
    }
}

/// Houses, planets and aspects for one house system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub houses: Vec<HouseCusp>,
    pub planets: Vec<PlanetPlacement>,
    pub aspects: Vec<Aspect>,
    pub angles: ChartAngles,
}

impl ChartResult {
    pub fn planet(&self, body: Body) -> Option<&PlanetPlacement> {
        self.planets.iter().find(|p| p.planet == body)
    }
}

/// Charts keyed by house system name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NatalChartResponse {
    pub systems: BTreeMap<String, ChartResult>,
    /// Systems that failed while others succeeded: name -> error message
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<String, String>,
}
