pub mod adapter;
pub mod fixture;
pub mod julian;
pub mod provider;
pub mod types;

pub use adapter::EphemerisError;
#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use fixture::{FixtureEphemeris, FixtureHouses};
pub use provider::EphemerisProvider;
pub use types::{AnglePoints, Body, BodyPosition, GeoLocation, HouseFrame};
