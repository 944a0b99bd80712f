use crate::aspects::types::{Aspect, AspectDefinition, AspectKind, AspectMatch, ASPECT_TABLE};
use crate::chart::types::PlanetPlacement;
use crate::util::round2;
use std::collections::HashMap;

/// Aspect calculator
#[derive(Debug, Clone)]
pub struct AspectCalculator {
    definitions: Vec<AspectDefinition>,
}

impl AspectCalculator {
    /// Calculator using the standard aspect table.
    pub fn new() -> Self {
        Self {
            definitions: ASPECT_TABLE.to_vec(),
        }
    }

    /// Standard table with the orb of some aspect types replaced.
    /// Evaluation order is unchanged.
    pub fn with_orbs(overrides: &HashMap<AspectKind, f64>) -> Self {
        let definitions = ASPECT_TABLE
            .iter()
            .map(|d| AspectDefinition {
                orb: overrides.get(&d.kind).copied().unwrap_or(d.orb),
                ..*d
            })
            .collect();
        Self { definitions }
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    /// Classify the separation between two longitudes.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<AspectMatch> {
        let separation = angular_separation(lon1, lon2);

        self.definitions.iter().find_map(|d| {
            let orb = (separation - d.angle).abs();
            (orb <= d.orb).then_some(AspectMatch {
                kind: d.kind,
                separation,
                orb,
            })
        })
    }

    /// Aspects between every unordered pair of planets.
    ///
    /// Longitudes are rebuilt from each planet's sign and degree, so the
    /// result only depends on what a chart reports.
    pub fn detect(&self, planets: &[PlanetPlacement]) -> Vec<Aspect> {
        let mut aspects = Vec::new();

        for (i, p1) in planets.iter().enumerate() {
            for p2 in &planets[i + 1..] {
                if p1.planet == p2.planet {
                    continue;
                }

                let lon1 = p1.position().longitude();
                let lon2 = p2.position().longitude();

                if let Some(found) = self.calculate_aspect(lon1, lon2) {
                    aspects.push(Aspect {
                        kind: found.kind,
                        planets: [p1.planet, p2.planet],
                        angle: round2(found.separation),
                        orb: round2(found.orb),
                    });
                }
            }
        }

        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest angle between two longitudes, in [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}
