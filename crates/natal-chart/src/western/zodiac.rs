//! Tropical zodiac signs.
//!
//! The ecliptic is divided into 12 signs of 30 degrees each, starting from
//! 0° Aries at the vernal equinox point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a single sign in degrees.
pub const SIGN_WIDTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in zodiac order (0 = Aries, 11 = Pisces).
pub const SIGN_ORDER: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Position of the sign in zodiac order, 0..=11.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sign for an index; wraps modulo 12.
    pub const fn from_index(index: usize) -> Self {
        SIGN_ORDER[index % 12]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Longitude at which the sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reduce any finite angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Zodiac sign containing an ecliptic longitude.
pub fn sign_of(longitude: f64) -> ZodiacSign {
    let lon = normalize_degrees(longitude);
    ZodiacSign::from_index((lon / SIGN_WIDTH).floor() as usize)
}

/// Offset of a longitude within its sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_degrees(longitude) % SIGN_WIDTH
}

/// A point expressed as sign plus offset within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    pub degree: f64,
}

impl SignPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        Self {
            sign: sign_of(longitude),
            degree: degree_in_sign(longitude),
        }
    }

    /// Absolute ecliptic longitude rebuilt from sign and degree.
    pub fn longitude(&self) -> f64 {
        self.sign.start_longitude() + self.degree
    }
}
