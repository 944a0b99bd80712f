use crate::aspects::AspectCalculator;
use crate::chart::house_systems::HouseSystem;
use crate::chart::types::{ChartAngles, ChartResult, NatalChartResponse, PlanetPlacement};
use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{Body, BodyPosition, GeoLocation};
use crate::ephemeris::EphemerisError;
use crate::error::ChartError;
use crate::western::houses::{HouseCuspSet, HouseResolutionError};
use crate::western::zodiac::{normalize_degrees, SignPosition};
use std::time::Instant;

/// Builds charts for one or more house systems from an ephemeris provider.
pub struct ChartAssembler<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
    aspects: AspectCalculator,
}

impl<'a, P: EphemerisProvider + ?Sized> ChartAssembler<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            aspects: AspectCalculator::new(),
        }
    }

    pub fn with_aspect_calculator(mut self, aspects: AspectCalculator) -> Self {
        self.aspects = aspects;
        self
    }

    /// Positions of all chart bodies. Independent of the house system, so a
    /// request fetches them once.
    pub fn body_positions(&self, julian_day: f64) -> Result<Vec<(Body, BodyPosition)>, EphemerisError> {
        Body::ALL
            .iter()
            .map(|&body| {
                self.provider
                    .body_position(julian_day, body)
                    .map(|position| (body, position))
            })
            .collect()
    }

    /// Chart for a single house system.
    pub fn assemble_system(
        &self,
        julian_day: f64,
        location: GeoLocation,
        system: HouseSystem,
        bodies: &[(Body, BodyPosition)],
    ) -> Result<ChartResult, ChartError> {
        let frame = self
            .provider
            .house_cusps(julian_day, location.lat, location.lon, system)?;

        let planets = bodies
            .iter()
            .map(|(body, position)| place_planet(*body, position, &frame.cusps))
            .collect::<Result<Vec<_>, _>>()?;

        let aspects = self.aspects.detect(&planets);

        Ok(ChartResult {
            houses: frame.cusps.summary(),
            planets,
            aspects,
            angles: ChartAngles::from(&frame.angles),
        })
    }

    /// Charts for every system, keyed by system name.
    ///
    /// A failing system is recorded in `failures` and does not affect the
    /// others. If no system succeeds the first error is returned.
    pub fn assemble(
        &self,
        julian_day: f64,
        location: GeoLocation,
        systems: &[HouseSystem],
    ) -> Result<NatalChartResponse, ChartError> {
        let bodies = self.body_positions(julian_day)?;

        let mut response = NatalChartResponse::default();
        let mut first_error = None;

        for &system in systems {
            let started = Instant::now();
            match self.assemble_system(julian_day, location, system, &bodies) {
                Ok(chart) => {
                    log::debug!(
                        "{system}: {} planets, {} aspects in {:?}",
                        chart.planets.len(),
                        chart.aspects.len(),
                        started.elapsed()
                    );
                    response.systems.insert(system.name().to_string(), chart);
                }
                Err(e) => {
                    log::warn!("{system} chart failed at JD {julian_day}: {e}");
                    response.failures.insert(system.name().to_string(), e.to_string());
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) if response.systems.is_empty() => Err(e),
            _ => Ok(response),
        }
    }
}

/// Classify one body against a cusp set.
pub fn place_planet(
    body: Body,
    position: &BodyPosition,
    cusps: &HouseCuspSet,
) -> Result<PlanetPlacement, HouseResolutionError> {
    let longitude = normalize_degrees(position.longitude);
    let sign_position = SignPosition::from_longitude(longitude);
    let house = cusps.house_of(longitude)?;

    Ok(PlanetPlacement {
        planet: body,
        sign: sign_position.sign,
        degree: sign_position.degree,
        house,
        speed: position.speed,
        retrograde: position.is_retrograde(),
    })
}
