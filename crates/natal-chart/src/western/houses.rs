//! House assignment from ephemeris cusp longitudes.
//!
//! Cusp `i` is the start of house `i + 1`. Cusps come from the house system
//! in ecliptic order, so the sequence is only monotonic when no house
//! straddles 0° Aries. A house whose next cusp is numerically smaller wraps
//! across the 360°→0° boundary and claims longitudes on both sides of it.

use crate::util::round2;
use crate::western::zodiac::{SignPosition, ZodiacSign};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOUSE_COUNT: usize = 12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseResolutionError {
    #[error("Invalid house cusps array: expected 12 values, got {count}")]
    InvalidCuspCount { count: usize },
    #[error("Failed to determine house for planet at {longitude}°. House cusps: {cusps:?}")]
    Unresolved { longitude: f64, cusps: Vec<f64> },
}

/// The twelve cusp longitudes of one house system evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct HouseCuspSet([f64; HOUSE_COUNT]);

impl HouseCuspSet {
    pub fn new(cusps: [f64; HOUSE_COUNT]) -> Self {
        Self(cusps)
    }

    pub fn from_slice(cusps: &[f64]) -> Result<Self, HouseResolutionError> {
        let array: [f64; HOUSE_COUNT] = cusps
            .try_into()
            .map_err(|_| HouseResolutionError::InvalidCuspCount { count: cusps.len() })?;
        Ok(Self(array))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Start longitude of a house, 1..=12.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.0[house as usize - 1]),
            _ => None,
        }
    }

    pub fn house_of(&self, longitude: f64) -> Result<u8, HouseResolutionError> {
        house_of(longitude, &self.0)
    }

    /// Sign and degree of every cusp, in house order.
    pub fn summary(&self) -> Vec<HouseCusp> {
        houses_summary(self)
    }
}

impl TryFrom<Vec<f64>> for HouseCuspSet {
    type Error = HouseResolutionError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&value)
    }
}

impl From<HouseCuspSet> for Vec<f64> {
    fn from(value: HouseCuspSet) -> Self {
        value.0.to_vec()
    }
}

/// One house cusp as reported in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub sign: ZodiacSign,
    pub degree: f64,
    pub house: u8,
}

/// Whether the half-open cusp interval [start, end) contains a longitude.
/// An interval with `end < start` wraps through 0°.
pub fn interval_claims(start: f64, end: f64, longitude: f64) -> bool {
    if end < start {
        longitude >= start || longitude < end
    } else {
        longitude >= start && longitude < end
    }
}

/// House (1-12) that claims a longitude.
///
/// Houses are checked in cusp order and the first claiming interval wins.
pub fn house_of(longitude: f64, cusps: &[f64]) -> Result<u8, HouseResolutionError> {
    if cusps.len() != HOUSE_COUNT {
        return Err(HouseResolutionError::InvalidCuspCount { count: cusps.len() });
    }

    for i in 0..HOUSE_COUNT {
        if interval_claims(cusps[i], cusps[(i + 1) % HOUSE_COUNT], longitude) {
            return Ok(i as u8 + 1);
        }
    }

    Err(HouseResolutionError::Unresolved {
        longitude,
        cusps: cusps.iter().copied().map(round2).collect(),
    })
}

pub fn houses_summary(cusps: &HouseCuspSet) -> Vec<HouseCusp> {
    cusps
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &lon)| {
            let pos = SignPosition::from_longitude(lon);
            HouseCusp {
                sign: pos.sign,
                degree: pos.degree,
                house: i as u8 + 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIFTED: [f64; 12] = [
        10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 190.0, 220.0, 250.0, 280.0, 310.0, 340.0,
    ];

    #[test]
    fn test_house_of_plain_interval() {
        assert_eq!(house_of(25.0, &SHIFTED), Ok(1));
        assert_eq!(house_of(40.0, &SHIFTED), Ok(2));
        assert_eq!(house_of(339.99, &SHIFTED), Ok(11));
    }

    #[test]
    fn test_house_of_last_house_wraps() {
        assert_eq!(house_of(5.0, &SHIFTED), Ok(12));
        assert_eq!(house_of(355.0, &SHIFTED), Ok(12));
        assert_eq!(house_of(0.0, &SHIFTED), Ok(12));
    }

    #[test]
    fn test_house_of_wrap_in_middle_of_sequence() {
        // Ascendant in late Libra puts the wrap inside house 6
        let cusps = [
            200.0, 228.0, 258.0, 290.0, 322.0, 352.0, 20.0, 48.0, 78.0, 110.0, 142.0, 172.0,
        ];
        assert_eq!(house_of(355.0, &cusps), Ok(6));
        assert_eq!(house_of(3.0, &cusps), Ok(6));
        assert_eq!(house_of(20.0, &cusps), Ok(7));
        assert_eq!(house_of(199.0, &cusps), Ok(12));
        assert_eq!(house_of(200.0, &cusps), Ok(1));
    }

    #[test]
    fn test_interval_claims_half_open() {
        assert!(interval_claims(10.0, 40.0, 10.0));
        assert!(!interval_claims(10.0, 40.0, 40.0));
        assert!(interval_claims(340.0, 10.0, 359.9));
        assert!(interval_claims(340.0, 10.0, 0.0));
        assert!(!interval_claims(340.0, 10.0, 10.0));
        assert!(!interval_claims(42.0, 42.0, 42.0));
    }

    #[test]
    fn test_house_of_rejects_short_cusp_list() {
        let err = house_of(10.0, &SHIFTED[..11]).unwrap_err();
        assert_eq!(err, HouseResolutionError::InvalidCuspCount { count: 11 });
    }

    #[test]
    fn test_house_of_unresolved_on_degenerate_cusps() {
        // All cusps equal: every interval is empty
        let cusps = [42.0; 12];
        let err = house_of(10.0, &cusps).unwrap_err();
        assert!(matches!(err, HouseResolutionError::Unresolved { .. }));
    }

    #[test]
    fn test_cusp_set_summary() {
        let set = HouseCuspSet::new(SHIFTED);
        let summary = set.summary();
        assert_eq!(summary.len(), 12);
        assert_eq!(summary[0].house, 1);
        assert_eq!(summary[0].sign, ZodiacSign::Aries);
        assert!((summary[0].degree - 10.0).abs() < 1e-9);
        assert_eq!(summary[11].sign, ZodiacSign::Pisces);
        assert_eq!(set.cusp(12), Some(340.0));
        assert_eq!(set.cusp(13), None);
    }

    #[test]
    fn test_cusp_set_from_slice() {
        assert!(HouseCuspSet::from_slice(&SHIFTED).is_ok());
        assert!(HouseCuspSet::from_slice(&[1.0, 2.0]).is_err());
    }
}
