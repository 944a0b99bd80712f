//! Birth input: instant and location, validated before any ephemeris call.

use crate::ephemeris::types::GeoLocation;
use crate::error::ChartError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Birth data required for a natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// ISO 8601 instant, e.g. `2025-05-15T04:06:36Z`
    pub utc_birth_datetime: String,
    /// Decimal degrees, positive north
    pub birth_lat: f64,
    /// Decimal degrees, positive east
    pub birth_lon: f64,
}

/// Birth data that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthMoment {
    pub instant: DateTime<Utc>,
    pub location: GeoLocation,
}

impl BirthData {
    pub fn new(utc_birth_datetime: impl Into<String>, birth_lat: f64, birth_lon: f64) -> Self {
        Self {
            utc_birth_datetime: utc_birth_datetime.into(),
            birth_lat,
            birth_lon,
        }
    }

    pub fn validate(&self) -> Result<BirthMoment, ChartError> {
        let instant = parse_utc_datetime(&self.utc_birth_datetime)?;
        let location = validate_location(self.birth_lat, self.birth_lon)?;
        Ok(BirthMoment { instant, location })
    }
}

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO 8601 instant into UTC.
///
/// Accepts a full date-time with or without seconds, a space in place of
/// `T`, and a bare date (midnight). Offsets are converted to UTC; a string
/// without offset is taken as UTC.
pub fn parse_utc_datetime(input: &str) -> Result<DateTime<Utc>, ChartError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let text = canonical_iso(trimmed);
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&text, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&text, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| ChartError::InvalidDatetime {
            input: input.to_string(),
            message: format!("expected an ISO 8601 date or date-time ({e})"),
        })
}

/// `T` as the date/time separator and `+00:00` in place of `Z`.
fn canonical_iso(text: &str) -> String {
    let mut out = match text.split_once(' ') {
        Some((date, time)) => format!("{date}T{time}"),
        None => text.to_string(),
    };
    if out.ends_with(['Z', 'z']) {
        out.pop();
        out.push_str("+00:00");
    }
    out
}

pub fn validate_location(latitude: f64, longitude: f64) -> Result<GeoLocation, ChartError> {
    let problem = if !latitude.is_finite() || !longitude.is_finite() {
        Some("coordinates must be finite numbers")
    } else if !(-90.0..=90.0).contains(&latitude) {
        Some("latitude must be within [-90, 90]")
    } else if !(-180.0..=180.0).contains(&longitude) {
        Some("longitude must be within [-180, 180]")
    } else {
        None
    };

    match problem {
        Some(message) => Err(ChartError::InvalidCoordinates {
            latitude,
            longitude,
            message: message.to_string(),
        }),
        None => Ok(GeoLocation {
            lat: latitude,
            lon: longitude,
        }),
    }
}
