use natal_chart::aspects::AspectKind;
use natal_chart::chart::HouseSystem;
use natal_chart::service::ServiceSettings;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Common relative locations of `configs/natal.toml`, tried in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/natal.toml", "../../configs/natal.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct NatalSettings {
    /// Swiss Ephemeris data directory
    pub ephemeris_path: Option<PathBuf>,
    /// Fixture JSON used instead of the Swiss Ephemeris
    pub fixture: Option<PathBuf>,
    pub default_house_systems: Vec<String>,
    pub fallback_house_system: HouseSystem,
    pub strict_house_systems: bool,
    pub aspect_orbs: HashMap<AspectKind, f64>,
    pub log_level: String,
    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for NatalSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            fixture: None,
            default_house_systems: default_house_systems(),
            fallback_house_system: HouseSystem::Placidus,
            strict_house_systems: false,
            aspect_orbs: HashMap::new(),
            log_level: default_log_level(),
            source: None,
        }
    }
}

impl NatalSettings {
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            fallback_house_system: self.fallback_house_system,
            strict_house_systems: self.strict_house_systems,
            aspect_orbs: self.aspect_orbs.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    aspects: AspectsToml,
    #[serde(default)]
    logging: LoggingToml,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    fixture: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_house_systems")]
    default_house_systems: Vec<String>,
    #[serde(default = "default_fallback")]
    fallback_house_system: String,
    #[serde(default)]
    strict_house_systems: bool,
}

impl Default for ChartToml {
    fn default() -> Self {
        Self {
            default_house_systems: default_house_systems(),
            fallback_house_system: default_fallback(),
            strict_house_systems: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AspectsToml {
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingToml {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for LoggingToml {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_house_systems() -> Vec<String> {
    vec![HouseSystem::Placidus.name().to_string()]
}

fn default_fallback() -> String {
    HouseSystem::Placidus.name().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Try the common relative paths for `configs/natal.toml`.
/// Returns the text and the path it came from.
pub fn read_natal_toml_text() -> Option<(String, PathBuf)> {
    DEFAULT_CONFIG_PATHS.iter().find_map(|p| {
        fs::read_to_string(p)
            .ok()
            .map(|text| (text, PathBuf::from(p)))
    })
}

/// Settings from the first default config path that exists, or the
/// defaults when none does.
pub fn load_settings() -> anyhow::Result<NatalSettings> {
    match read_natal_toml_text() {
        Some((text, path)) => parse_settings(&text, Some(&path)),
        None => Ok(NatalSettings::default()),
    }
}

/// Settings from an explicit file, which must exist.
pub fn load_settings_from(path: impl AsRef<Path>) -> anyhow::Result<NatalSettings> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not load {}: {e}", path.display()))?;
    parse_settings(&text, Some(path))
}

/// Parse and validate config text. Relative ephemeris paths are resolved
/// against the directory of `source`.
pub fn parse_settings(text: &str, source: Option<&Path>) -> anyhow::Result<NatalSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;
    let RootConfigToml {
        ephemeris,
        chart,
        aspects,
        logging,
    } = root;

    let fallback_house_system =
        HouseSystem::from_name(&chart.fallback_house_system).ok_or_else(|| {
            anyhow::anyhow!(
                "chart.fallback_house_system '{}' is not a known house system (valid: {})",
                chart.fallback_house_system,
                HouseSystem::valid_names().join(", ")
            )
        })?;

    let mut aspect_orbs = HashMap::new();
    for (label, orb) in aspects.orbs {
        let kind: AspectKind = label
            .parse()
            .map_err(|e| anyhow::anyhow!("aspects.orbs: {e}"))?;
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("aspects.orbs.{label} must be a non-negative number, got {orb}");
        }
        aspect_orbs.insert(kind, orb);
    }

    let base_dir = source.and_then(Path::parent);
    let resolve = |p: PathBuf| match base_dir {
        Some(dir) if p.is_relative() => dir.join(p),
        _ => p,
    };

    Ok(NatalSettings {
        ephemeris_path: ephemeris.path.map(&resolve),
        fixture: ephemeris.fixture.map(&resolve),
        default_house_systems: chart.default_house_systems,
        fallback_house_system,
        strict_house_systems: chart.strict_house_systems,
        aspect_orbs,
        log_level: logging.level,
        source: source.map(Path::to_path_buf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        let settings = parse_settings("", None).unwrap();
        assert_eq!(settings, NatalSettings::default());
        assert_eq!(settings.default_house_systems, vec!["placidus".to_string()]);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn full_config_parses() {
        let text = r#"
            [ephemeris]
            path = "/opt/ephe"

            [chart]
            default_house_systems = ["placidus", "whole_sign"]
            fallback_house_system = "Equal"
            strict_house_systems = true

            [aspects.orbs]
            conjunction = 6.0
            semi_square = 1.5

            [logging]
            level = "debug"
        "#;
        let settings = parse_settings(text, None).unwrap();
        assert_eq!(settings.ephemeris_path, Some(PathBuf::from("/opt/ephe")));
        assert_eq!(settings.fallback_house_system, HouseSystem::Equal);
        assert!(settings.strict_house_systems);
        assert_eq!(settings.aspect_orbs.get(&AspectKind::Conjunction), Some(&6.0));
        assert_eq!(settings.aspect_orbs.get(&AspectKind::SemiSquare), Some(&1.5));
        assert_eq!(settings.log_level, "debug");

        let service = settings.service_settings();
        assert!(service.strict_house_systems);
        assert_eq!(service.fallback_house_system, HouseSystem::Equal);
    }

    #[test]
    fn unknown_fallback_rejected() {
        let err = parse_settings("[chart]\nfallback_house_system = \"ptolemy\"\n", None).unwrap_err();
        assert!(err.to_string().contains("ptolemy"));
    }

    #[test]
    fn unknown_aspect_label_rejected() {
        let err = parse_settings("[aspects.orbs]\nnovile = 1.0\n", None).unwrap_err();
        assert!(err.to_string().contains("novile"));
    }

    #[test]
    fn negative_orb_rejected() {
        let err = parse_settings("[aspects.orbs]\ntrine = -1.0\n", None).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn unknown_section_rejected() {
        assert!(parse_settings("[parakeet_stt]\nmodel_dir = \"x\"\n", None).is_err());
    }

    #[test]
    fn relative_fixture_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("natal.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[ephemeris]\nfixture = \"fixtures/sample.json\"").unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.fixture, Some(dir.path().join("fixtures/sample.json")));
        assert_eq!(settings.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}
