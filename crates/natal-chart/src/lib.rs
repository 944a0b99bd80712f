//! Natal chart computation on top of an injected ephemeris.
//!
//! Raw longitudes and house cusps come from an [`EphemerisProvider`]; this
//! crate classifies them into signs, houses and aspects, one chart per
//! requested house system.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod service;
pub mod util;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectKind};
pub use chart::{
    resolve_systems, BirthData, ChartAssembler, ChartResult, HouseSystem, NatalChartResponse,
    PlanetPlacement,
};
pub use ephemeris::{Body, BodyPosition, EphemerisError, EphemerisProvider, FixtureEphemeris, GeoLocation};
#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
pub use error::{ChartError, Fault};
pub use service::{HealthReport, NatalChartService, ServiceInfo, ServiceSettings};
pub use western::{house_of, sign_of, HouseCuspSet, HouseResolutionError, SignPosition, ZodiacSign};
