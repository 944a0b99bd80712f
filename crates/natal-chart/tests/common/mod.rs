#![allow(dead_code)]

use natal_chart::chart::HouseSystem;
use natal_chart::ephemeris::{Body, BodyPosition, EphemerisError, EphemerisProvider, FixtureEphemeris, HouseFrame};
use std::cell::Cell;

pub const SAMPLE_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_chart.json");

pub const SAMPLE_DATETIME: &str = "2025-05-15T04:06:36Z";
pub const SAMPLE_LAT: f64 = 40.7128;
pub const SAMPLE_LON: f64 = -74.006;

pub fn sample_fixture() -> FixtureEphemeris {
    FixtureEphemeris::from_path(SAMPLE_FIXTURE).unwrap()
}

pub fn position(longitude: f64, speed: f64) -> BodyPosition {
    BodyPosition {
        longitude,
        latitude: 0.0,
        distance: 1.0,
        speed,
    }
}

/// Counts every query before delegating.
pub struct CountingProvider<P> {
    pub inner: P,
    pub body_calls: Cell<usize>,
    pub house_calls: Cell<usize>,
    pub jd_calls: Cell<usize>,
}

impl<P: EphemerisProvider> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            body_calls: Cell::new(0),
            house_calls: Cell::new(0),
            jd_calls: Cell::new(0),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.body_calls.get() + self.house_calls.get() + self.jd_calls.get()
    }
}

impl<P: EphemerisProvider> EphemerisProvider for CountingProvider<P> {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        self.jd_calls.set(self.jd_calls.get() + 1);
        self.inner.julian_day(year, month, day, hour)
    }

    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        self.house_calls.set(self.house_calls.get() + 1);
        self.inner.house_cusps(julian_day, latitude, longitude, system)
    }

    fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        self.body_calls.set(self.body_calls.get() + 1);
        self.inner.body_position(julian_day, body)
    }

    fn check(&self) -> Result<(), EphemerisError> {
        self.inner.check()
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

/// Provider whose data files are unreachable.
pub struct UnreachableProvider;

impl EphemerisProvider for UnreachableProvider {
    fn house_cusps(
        &self,
        julian_day: f64,
        _latitude: f64,
        _longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        Err(EphemerisError::HouseCalculationFailed {
            system: system.name().to_string(),
            julian_day,
            message: "no data".to_string(),
        })
    }

    fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        Err(EphemerisError::CalculationFailed {
            body: body.id().to_string(),
            julian_day,
            message: "no data".to_string(),
        })
    }

    fn check(&self) -> Result<(), EphemerisError> {
        Err(EphemerisError::FileNotFound {
            path: "/nonexistent/ephe".to_string(),
            message: "No such file or directory".to_string(),
        })
    }

    fn describe(&self) -> String {
        "unreachable ephemeris".to_string()
    }
}
