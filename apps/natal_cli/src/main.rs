use anyhow::Context;
use clap::{Parser, Subcommand};
use natal_chart::chart::BirthData;
use natal_chart::ephemeris::{EphemerisProvider, FixtureEphemeris};
use natal_chart::error::{ChartError, Fault};
use natal_chart::service::NatalChartService;
use natal_config::NatalSettings;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (default: configs/natal.toml, then ../../configs/natal.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixture JSON to answer ephemeris queries from (overrides ephemeris.fixture).
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a natal chart for one or more house systems.
    Chart {
        /// ISO 8601 birth instant, e.g. 2025-05-15T04:06:36Z.
        #[arg(long)]
        datetime: String,

        /// Birth latitude in decimal degrees (north positive).
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Birth longitude in decimal degrees (east positive).
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Comma-separated house systems (default from config).
        #[arg(long, value_delimiter = ',')]
        house_systems: Vec<String>,
    },
    /// Check that the ephemeris is usable.
    Health,
    /// Describe the engine and its license.
    About,
}

/// Body printed for a failed chart request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    detail: String,
}

impl From<&ChartError> for ErrorBody {
    fn from(err: &ChartError) -> Self {
        Self {
            status: err.status_code(),
            detail: err.detail(),
        }
    }
}

fn exit_status(err: &ChartError) -> u8 {
    match err.fault() {
        Fault::Client => 2,
        Fault::Server => 1,
    }
}

fn load_settings(config: Option<&Path>) -> anyhow::Result<NatalSettings> {
    match config {
        Some(path) => natal_config::load_settings_from(path),
        None => natal_config::load_settings(),
    }
}

fn init_logging(level: &str) {
    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn open_provider(
    settings: &NatalSettings,
    fixture_override: Option<&Path>,
) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    if let Some(path) = fixture_override.or(settings.fixture.as_deref()) {
        let fixture = FixtureEphemeris::from_path(path)
            .with_context(|| format!("Failed to load ephemeris fixture {}", path.display()))?;
        log::info!("using {}", fixture.describe());
        return Ok(Box::new(fixture));
    }
    open_swiss_ephemeris(settings)
}

#[cfg(feature = "swisseph")]
fn open_swiss_ephemeris(settings: &NatalSettings) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    let adapter = natal_chart::ephemeris::SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
        .context("Failed to open Swiss Ephemeris")?;
    log::info!("using {}", adapter.describe());
    Ok(Box::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn open_swiss_ephemeris(_settings: &NatalSettings) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    anyhow::bail!(
        "No ephemeris available: pass --fixture, set ephemeris.fixture in natal.toml, or build with --features swisseph"
    )
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("Failed to serialize output")
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let settings = load_settings(args.config.as_deref())?;
    init_logging(&settings.log_level);
    if let Some(source) = &settings.source {
        log::debug!("settings loaded from {}", source.display());
    }

    let provider = open_provider(&settings, args.fixture.as_deref())?;
    let service = NatalChartService::with_settings(provider, settings.service_settings());

    match args.command {
        Command::Chart {
            datetime,
            lat,
            lon,
            house_systems,
        } => {
            let systems = if house_systems.is_empty() {
                settings.default_house_systems.clone()
            } else {
                house_systems
            };
            let birth = BirthData::new(datetime, lat, lon);

            match service.calculate(&birth, systems.as_slice()) {
                Ok(response) => {
                    println!("{}", to_json(&response, args.pretty)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    log::error!("chart request failed: {err}");
                    println!("{}", to_json(&ErrorBody::from(&err), args.pretty)?);
                    Ok(ExitCode::from(exit_status(&err)))
                }
            }
        }
        Command::Health => {
            let report = service.health();
            println!("{}", to_json(&report, args.pretty)?);
            Ok(if report.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::About => {
            println!("{}", to_json(&service.about(), args.pretty)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[natal] error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    const SAMPLE_FIXTURE: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/fixtures/sample_chart.json");

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_chart_with_negative_longitude() {
        let args = Args::try_parse_from([
            "natal",
            "chart",
            "--datetime",
            "2025-05-15T04:06:36Z",
            "--lat",
            "40.7128",
            "--lon",
            "-74.006",
            "--house-systems",
            "placidus,whole_sign",
            "--pretty",
        ])
        .unwrap();

        assert!(args.pretty);
        match args.command {
            Command::Chart {
                lon, house_systems, ..
            } => {
                assert_eq!(lon, -74.006);
                assert_eq!(house_systems, vec!["placidus", "whole_sign"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn error_body_and_exit_code_follow_fault() {
        let err = ChartError::InvalidCoordinates {
            latitude: 95.0,
            longitude: 0.0,
            message: "latitude must be within [-90, 90]".into(),
        };
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body["status"], 400);
        assert!(body["detail"].as_str().unwrap().starts_with("Invalid input: "));
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn fixture_override_beats_config() {
        let settings = NatalSettings {
            fixture: Some(PathBuf::from("/nonexistent/fixture.json")),
            ..NatalSettings::default()
        };
        let provider = open_provider(&settings, Some(Path::new(SAMPLE_FIXTURE))).unwrap();
        assert!(provider.describe().contains("fixture"));

        assert!(open_provider(&settings, None).is_err());
    }

    #[test]
    fn config_fixture_is_resolved_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(SAMPLE_FIXTURE, dir.path().join("sample.json")).unwrap();
        let path = dir.path().join("natal.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[ephemeris]\nfixture = \"sample.json\"").unwrap();

        let settings = load_settings(Some(path.as_path())).unwrap();
        let provider = open_provider(&settings, None).unwrap();
        let service = NatalChartService::with_settings(provider, settings.service_settings());

        let response = service
            .calculate(&BirthData::new("2025-05-15T04:06:36Z", 40.7128, -74.006), &["whole_sign"])
            .unwrap();
        assert!(response.systems.contains_key("whole_sign"));
    }
}
