//! House system names and their Swiss Ephemeris codes.
//!
//! Requests name house systems loosely (any case, comma-joined lists).
//! Resolution turns them into a de-duplicated list of systems, each of which
//! is computed independently.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Porphyry,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// System used when a request names nothing usable.
pub const DEFAULT_HOUSE_SYSTEM: HouseSystem = HouseSystem::Placidus;

impl HouseSystem {
    pub const ALL: [HouseSystem; 9] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
        HouseSystem::Porphyry,
        HouseSystem::Regiomontanus,
        HouseSystem::Campanus,
        HouseSystem::Alcabitius,
        HouseSystem::Morinus,
    ];

    /// Canonical lowercase name; also the key of the system's chart.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "placidus",
            Self::Koch => "koch",
            Self::Equal => "equal",
            Self::WholeSign => "whole_sign",
            Self::Porphyry => "porphyry",
            Self::Regiomontanus => "regiomontanus",
            Self::Campanus => "campanus",
            Self::Alcabitius => "alcabitius",
            Self::Morinus => "morinus",
        }
    }

    /// Character code expected by `swe_houses`.
    pub const fn code(self) -> u8 {
        match self {
            Self::Placidus => b'P',
            Self::Koch => b'K',
            Self::Equal => b'E',
            Self::WholeSign => b'W',
            Self::Porphyry => b'O',
            Self::Regiomontanus => b'R',
            Self::Campanus => b'C',
            Self::Alcabitius => b'A',
            Self::Morinus => b'M',
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<HouseSystem> {
        HOUSE_SYSTEM_LOOKUP
            .get(name.trim().to_lowercase().as_str())
            .copied()
    }

    pub fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.name().to_string()).collect()
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static::lazy_static! {
    static ref HOUSE_SYSTEM_LOOKUP: HashMap<&'static str, HouseSystem> = {
        let mut lookup: HashMap<&'static str, HouseSystem> =
            HouseSystem::ALL.iter().map(|s| (s.name(), *s)).collect();
        lookup.insert("whole-sign", HouseSystem::WholeSign);
        lookup
    };
}

/// Individual names from a request; entries may be comma-joined lists.
fn requested_names<S: AsRef<str>>(requested: &[S]) -> impl Iterator<Item = &str> {
    requested
        .iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn push_unique(systems: &mut Vec<HouseSystem>, system: HouseSystem) {
    if !systems.contains(&system) {
        systems.push(system);
    }
}

/// Resolve requested names, dropping unknown ones.
///
/// Falls back to placidus when nothing usable remains.
pub fn resolve_systems<S: AsRef<str>>(requested: &[S]) -> Vec<HouseSystem> {
    resolve_systems_with_fallback(requested, DEFAULT_HOUSE_SYSTEM)
}

pub fn resolve_systems_with_fallback<S: AsRef<str>>(
    requested: &[S],
    fallback: HouseSystem,
) -> Vec<HouseSystem> {
    let mut systems = Vec::new();
    for name in requested_names(requested) {
        match HouseSystem::from_name(name) {
            Some(system) => push_unique(&mut systems, system),
            None => log::debug!("ignoring unknown house system '{name}'"),
        }
    }

    if systems.is_empty() {
        log::debug!("no valid house system requested, using {fallback}");
        systems.push(fallback);
    }
    systems
}

/// Like [`resolve_systems_with_fallback`], but unknown names are an error.
///
/// The fallback only applies when the request names nothing at all.
pub fn resolve_systems_strict<S: AsRef<str>>(
    requested: &[S],
    fallback: HouseSystem,
) -> Result<Vec<HouseSystem>, ChartError> {
    let mut systems = Vec::new();
    let mut unknown = Vec::new();
    for name in requested_names(requested) {
        match HouseSystem::from_name(name) {
            Some(system) => push_unique(&mut systems, system),
            None => unknown.push(name.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(ChartError::UnknownHouseSystems {
            unknown,
            valid: HouseSystem::valid_names(),
        });
    }
    if systems.is_empty() {
        systems.push(fallback);
    }
    Ok(systems)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(HouseSystem::from_name("Placidus"), Some(HouseSystem::Placidus));
        assert_eq!(HouseSystem::from_name(" KOCH "), Some(HouseSystem::Koch));
        assert_eq!(HouseSystem::from_name("whole-sign"), Some(HouseSystem::WholeSign));
        assert_eq!(HouseSystem::from_name("ptolemy"), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(HouseSystem::Placidus.code(), b'P');
        assert_eq!(HouseSystem::WholeSign.code(), b'W');
        assert_eq!(HouseSystem::Porphyry.code(), b'O');
    }

    #[test]
    fn test_resolve_drops_unknown_and_duplicates() {
        let systems = resolve_systems(&["koch", "ptolemy", "KOCH", "equal"]);
        assert_eq!(systems, vec![HouseSystem::Koch, HouseSystem::Equal]);
    }

    #[test]
    fn test_resolve_splits_comma_lists() {
        let systems = resolve_systems(&["placidus, whole_sign", ""]);
        assert_eq!(systems, vec![HouseSystem::Placidus, HouseSystem::WholeSign]);
    }

    #[test]
    fn test_resolve_falls_back_to_placidus() {
        assert_eq!(resolve_systems(&["ptolemy"]), vec![HouseSystem::Placidus]);
        let empty: [&str; 0] = [];
        assert_eq!(resolve_systems(&empty), vec![HouseSystem::Placidus]);
    }

    #[test]
    fn test_resolve_custom_fallback() {
        assert_eq!(
            resolve_systems_with_fallback(&["nope"], HouseSystem::Equal),
            vec![HouseSystem::Equal]
        );
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let err = resolve_systems_strict(&["placidus", "ptolemy"], DEFAULT_HOUSE_SYSTEM).unwrap_err();
        match err {
            ChartError::UnknownHouseSystems { unknown, valid } => {
                assert_eq!(unknown, vec!["ptolemy".to_string()]);
                assert!(valid.contains(&"placidus".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
