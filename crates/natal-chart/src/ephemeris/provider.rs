use crate::chart::house_systems::HouseSystem;
use crate::ephemeris::adapter::EphemerisError;
use crate::ephemeris::julian::calendar_to_jd;
use crate::ephemeris::types::{Body, BodyPosition, HouseFrame};

/// Read-only queries a chart needs from an ephemeris engine.
///
/// Implementations must be side-effect free: the same inputs always give
/// the same answer, so charts can be assembled against fixed fixtures.
pub trait EphemerisProvider {
    /// Julian Day for a Gregorian UTC date and fractional hour.
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        calendar_to_jd(year, month, day, hour)
    }

    /// Twelve house cusps plus the chart angles.
    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;

    /// Ecliptic position and daily speed of a body.
    fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError>;

    /// Health check: is the backing data reachable?
    fn check(&self) -> Result<(), EphemerisError> {
        Ok(())
    }

    fn describe(&self) -> String;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        (**self).julian_day(year, month, day, hour)
    }

    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).house_cusps(julian_day, latitude, longitude, system)
    }

    fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        (**self).body_position(julian_day, body)
    }

    fn check(&self) -> Result<(), EphemerisError> {
        (**self).check()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Box<P> {
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        (**self).julian_day(year, month, day, hour)
    }

    fn house_cusps(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).house_cusps(julian_day, latitude, longitude, system)
    }

    fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
        (**self).body_position(julian_day, body)
    }

    fn check(&self) -> Result<(), EphemerisError> {
        (**self).check()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
