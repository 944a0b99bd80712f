use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: String,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed for {system} at JD {julian_day}: {message}")]
    HouseCalculationFailed {
        system: String,
        julian_day: f64,
        message: String,
    },
    #[error("Invalid ephemeris fixture: {message}")]
    InvalidFixture { message: String },
}

#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemerisAdapter;

#[cfg(feature = "swisseph")]
mod swiss {
    use super::EphemerisError;
    use crate::chart::house_systems::HouseSystem;
    use crate::ephemeris::provider::EphemerisProvider;
    use crate::ephemeris::types::{AnglePoints, Body, BodyPosition, HouseFrame};
    use crate::western::houses::HouseCuspSet;
    use crate::western::zodiac::normalize_degrees;
    use std::env;
    use std::path::{Path, PathBuf};
    use swisseph::swe::{calc_ut, houses_ex, julday};
    use swisseph::{AscMc, Cusp};

    const FLG_SWIEPH: i32 = 2;
    const FLG_SPEED: i32 = 256;
    const GREG_CAL: i32 = 1;

    /// Swiss Ephemeris adapter implementation
    pub struct SwissEphemerisAdapter {
        ephemeris_path: PathBuf,
    }

    impl SwissEphemerisAdapter {
        /// Create a new adapter with optional ephemeris path.
        ///
        /// Falls back to `SWISS_EPHEMERIS_PATH`, then `/usr/local/share/swisseph`.
        pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
            let path = ephemeris_path.unwrap_or_else(|| {
                env::var("SWISS_EPHEMERIS_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
            });

            let adapter = Self { ephemeris_path: path };
            adapter.check()?;
            Ok(adapter)
        }

        pub fn ephemeris_path(&self) -> &Path {
            &self.ephemeris_path
        }
    }

    impl EphemerisProvider for SwissEphemerisAdapter {
        fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
            julday(year, month as i32, day as i32, hour, GREG_CAL)
        }

        fn house_cusps(
            &self,
            julian_day: f64,
            latitude: f64,
            longitude: f64,
            system: HouseSystem,
        ) -> Result<HouseFrame, EphemerisError> {
            let (c, a) = houses_ex(
                julian_day,
                FLG_SWIEPH,
                latitude,
                longitude,
                system.code() as i32,
            );
            let cusps = Cusp::from_array(c);
            let ascmc = AscMc::from_array(a);

            let values = [
                cusps.first, cusps.second, cusps.third, cusps.fourth,
                cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
                cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
            ];
            if values.iter().any(|v| !v.is_finite()) {
                return Err(EphemerisError::HouseCalculationFailed {
                    system: system.name().to_string(),
                    julian_day,
                    message: format!("non-finite cusp at latitude {latitude}"),
                });
            }

            Ok(HouseFrame {
                system,
                cusps: HouseCuspSet::new(values.map(normalize_degrees)),
                angles: AnglePoints::from_asc_mc(ascmc.ascendant, ascmc.mc),
            })
        }

        fn body_position(&self, julian_day: f64, body: Body) -> Result<BodyPosition, EphemerisError> {
            let result = calc_ut(julian_day, body.swe_id() as u32, (FLG_SWIEPH | FLG_SPEED) as u32)
                .map_err(|e| EphemerisError::CalculationFailed {
                    body: body.id().to_string(),
                    julian_day,
                    message: format!("Swiss Ephemeris error: {}", e),
                })?;

            let out = result.out;
            Ok(BodyPosition {
                longitude: normalize_degrees(out[0]),
                latitude: out[1],
                distance: out[2],
                speed: out[3],
            })
        }

        fn check(&self) -> Result<(), EphemerisError> {
            if !self.ephemeris_path.exists() {
                return Err(EphemerisError::FileNotFound {
                    path: self.ephemeris_path.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            Ok(())
        }

        fn describe(&self) -> String {
            format!("swiss ephemeris ({})", self.ephemeris_path.display())
        }
    }
}
