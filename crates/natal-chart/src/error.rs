use crate::ephemeris::adapter::EphemerisError;
use crate::western::houses::HouseResolutionError;
use serde::Serialize;
use thiserror::Error;

/// Who is at fault for a failed chart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fault {
    /// Bad caller input (HTTP 400 class)
    Client,
    /// Ephemeris or data-integrity failure (HTTP 500 class)
    Server,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("malformed datetime '{input}': {message}")]
    InvalidDatetime { input: String, message: String },
    #[error("invalid coordinates ({latitude}, {longitude}): {message}")]
    InvalidCoordinates {
        latitude: f64,
        longitude: f64,
        message: String,
    },
    #[error("unknown house systems {unknown:?}. Valid systems: {valid:?}")]
    UnknownHouseSystems { unknown: Vec<String>, valid: Vec<String> },
    #[error(transparent)]
    HouseResolution(#[from] HouseResolutionError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl ChartError {
    pub fn fault(&self) -> Fault {
        match self {
            Self::InvalidDatetime { .. }
            | Self::InvalidCoordinates { .. }
            | Self::UnknownHouseSystems { .. } => Fault::Client,
            Self::HouseResolution(_) | Self::Ephemeris(_) => Fault::Server,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.fault() {
            Fault::Client => 400,
            Fault::Server => 500,
        }
    }

    /// Message for the caller, prefixed by fault class.
    pub fn detail(&self) -> String {
        match self.fault() {
            Fault::Client => format!("Invalid input: {self}"),
            Fault::Server => format!("Calculation error: {self}"),
        }
    }
}
