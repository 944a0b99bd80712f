use crate::ephemeris::types::Body;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Aspect types, in the order they are tested against a separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quintile,
    BiQuintile,
}

impl AspectKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Opposition => "opposition",
            Self::Trine => "trine",
            Self::Square => "square",
            Self::Sextile => "sextile",
            Self::Quincunx => "quincunx",
            Self::SemiSextile => "semi-sextile",
            Self::SemiSquare => "semi-square",
            Self::Sesquiquadrate => "sesquiquadrate",
            Self::Quintile => "quintile",
            Self::BiQuintile => "bi-quintile",
        }
    }

    /// Major (Ptolemaic) aspects
    pub const fn is_major(self) -> bool {
        matches!(
            self,
            Self::Conjunction | Self::Opposition | Self::Trine | Self::Square | Self::Sextile
        )
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown aspect type: {0}")]
pub struct UnknownAspectKind(pub String);

impl FromStr for AspectKind {
    type Err = UnknownAspectKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        ASPECT_TABLE
            .iter()
            .map(|d| d.kind)
            .find(|k| k.label() == wanted)
            .ok_or_else(|| UnknownAspectKind(s.to_string()))
    }
}

/// Canonical angle and allowed orb for one aspect type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    pub orb: f64,
}

const fn def(kind: AspectKind, angle: f64, orb: f64) -> AspectDefinition {
    AspectDefinition { kind, angle, orb }
}

/// Aspect table in evaluation order. The first definition whose orb
/// contains a separation wins, so this order is the tie-break between
/// overlapping orb windows.
pub const ASPECT_TABLE: [AspectDefinition; 11] = [
    def(AspectKind::Conjunction, 0.0, 8.0),
    def(AspectKind::Opposition, 180.0, 8.0),
    def(AspectKind::Trine, 120.0, 7.0),
    def(AspectKind::Square, 90.0, 7.0),
    def(AspectKind::Sextile, 60.0, 6.0),
    def(AspectKind::Quincunx, 150.0, 5.0),
    def(AspectKind::SemiSextile, 30.0, 3.0),
    def(AspectKind::SemiSquare, 45.0, 3.0),
    def(AspectKind::Sesquiquadrate, 135.0, 3.0),
    def(AspectKind::Quintile, 72.0, 2.0),
    def(AspectKind::BiQuintile, 144.0, 2.0),
];

/// Unrounded classification of one separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub kind: AspectKind,
    /// Smallest angle between the two longitudes, 0..=180
    pub separation: f64,
    /// Deviation from the exact aspect angle
    pub orb: f64,
}

/// An aspect between two planets of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    #[serde(rename = "type")]
    pub kind: AspectKind,
    pub planets: [Body; 2],
    /// Measured separation, rounded to 2 places
    pub angle: f64,
    /// Deviation from exact, rounded to 2 places
    pub orb: f64,
}
