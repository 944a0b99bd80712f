use crate::chart::house_systems::HouseSystem;
use crate::western::houses::HouseCuspSet;
use crate::western::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// The ten classical bodies of a natal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Chart order; also the order planets are reported in.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Lowercase identifier used in fixtures and config.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// Swiss Ephemeris body number (SE_SUN = 0 .. SE_PLUTO = 9).
    pub const fn swe_id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: &str) -> Option<Body> {
        let id = id.trim().to_lowercase();
        Self::ALL.iter().copied().find(|b| b.id() == id)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw body position as returned by an ephemeris engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees (0-360)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    #[serde(default)]
    pub latitude: f64,
    /// Distance in AU
    #[serde(default)]
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

impl BodyPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// The four chart angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnglePoints {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

impl AnglePoints {
    /// Descendant and IC sit opposite the ascendant and MC.
    pub fn from_asc_mc(ascendant: f64, midheaven: f64) -> Self {
        let asc = normalize_degrees(ascendant);
        let mc = normalize_degrees(midheaven);
        Self {
            ascendant: asc,
            midheaven: mc,
            descendant: normalize_degrees(asc + 180.0),
            imum_coeli: normalize_degrees(mc + 180.0),
        }
    }
}

/// House cusps and angles for one house system evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseFrame {
    pub system: HouseSystem,
    pub cusps: HouseCuspSet,
    pub angles: AnglePoints,
}
