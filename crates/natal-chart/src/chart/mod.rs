pub mod assembly;
pub mod birth;
pub mod house_systems;
pub mod types;

pub use assembly::{place_planet, ChartAssembler};
pub use birth::{parse_utc_datetime, validate_location, BirthData, BirthMoment};
pub use house_systems::{
    resolve_systems, resolve_systems_strict, resolve_systems_with_fallback, HouseSystem,
    DEFAULT_HOUSE_SYSTEM,
};
pub use types::{ChartAngles, ChartResult, NatalChartResponse, PlanetPlacement};
