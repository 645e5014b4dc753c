//! Run configuration: access token, club location and API settings.
//!
//! Each value is taken from the first source that has it: explicit
//! overrides (command-line flags), then the environment, then an
//! interactive [`Prompter`]. The classifier only ever sees the resolved
//! [`ClubLocation`].

use std::io::{self, BufRead, Write};

use secrecy::SecretString;
use strava_client::DEFAULT_PER_PAGE;
use strava_client::config::{ClientConfig, parse_per_page};
use strava_client::http_client::DEFAULT_BASE_URL;

use crate::classifier::{ClubLocation, DEFAULT_MAX_DISTANCE_KM};
use crate::error::{RunClubError, RunClubResult};

pub const TOKEN_ENV: &str = "STRAVA_ACCESS_TOKEN";
pub const LAT_ENV: &str = "RUN_CLUB_LAT";
pub const LON_ENV: &str = "RUN_CLUB_LON";
pub const MAX_DISTANCE_ENV: &str = "RUN_CLUB_MAX_DISTANCE_KM";
pub const BASE_URL_ENV: &str = "STRAVA_BASE_URL";
pub const PER_PAGE_ENV: &str = "STRAVA_PER_PAGE";

/// Source of interactive answers.
pub trait Prompter {
    /// Ask `message` and return the trimmed answer, or `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;

    /// Show an informational line before a group of prompts.
    fn note(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Prompts on stderr and reads answers from stdin.
pub struct StdinPrompter<R> {
    input: R,
}

impl StdinPrompter<io::StdinLock<'static>> {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl Default for StdinPrompter<io::StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinPrompter<R> {
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{message}")?;
        stderr.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn note(&mut self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "{message}")
    }
}

/// Values given explicitly, usually from command-line flags.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub max_distance_km: Option<String>,
    pub base_url: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub access_token: SecretString,
    pub club: ClubLocation,
    pub base_url: String,
    pub per_page: u32,
}

impl RunConfig {
    /// Resolve from overrides, then the process environment, then `prompter`.
    pub fn resolve<P: Prompter + ?Sized>(
        overrides: Overrides,
        prompter: &mut P,
    ) -> RunClubResult<Self> {
        Self::resolve_with(overrides, |k| std::env::var(k).ok(), prompter)
    }

    /// Testable helper that reads the environment through `env`.
    pub fn resolve_with<F, P>(
        overrides: Overrides,
        mut env: F,
        prompter: &mut P,
    ) -> RunClubResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
        P: Prompter + ?Sized,
    {
        let token = match first_present(overrides.token, env(TOKEN_ENV)) {
            Some(t) => t,
            None => prompter
                .prompt("Enter your Strava API Access Token: ")?
                .unwrap_or_default(),
        };
        if token.is_empty() {
            return Err(RunClubError::Config("Access token is required".into()));
        }

        let mut lat = first_present(overrides.latitude, env(LAT_ENV));
        let mut lon = first_present(overrides.longitude, env(LON_ENV));
        if lat.is_none() || lon.is_none() {
            prompter.note("Enter Run Club starting location coordinates:")?;
        }
        if lat.is_none() {
            lat = prompter.prompt("  Latitude: ")?;
        }
        let latitude = parse_coordinate(lat.as_deref())?;
        if lon.is_none() {
            lon = prompter.prompt("  Longitude: ")?;
        }
        let longitude = parse_coordinate(lon.as_deref())?;

        let max_distance = match first_present(overrides.max_distance_km, env(MAX_DISTANCE_ENV)) {
            Some(v) => Some(v),
            None => prompter.prompt(&format!(
                "Maximum distance from start location in km (default {DEFAULT_MAX_DISTANCE_KM}): "
            ))?,
        };
        let max_distance_km = parse_max_distance(max_distance.as_deref())?;

        let base_url = first_present(overrides.base_url, env(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let per_page = match first_present(overrides.per_page, env(PER_PAGE_ENV)) {
            Some(raw) => parse_per_page(&raw).map_err(|e| RunClubError::Config(e.to_string()))?,
            None => DEFAULT_PER_PAGE,
        };

        tracing::debug!(
            latitude,
            longitude,
            max_distance_km,
            base_url = %base_url,
            per_page,
            "resolved configuration"
        );

        Ok(Self {
            access_token: SecretString::new(token.into()),
            club: ClubLocation::new(latitude, longitude).with_max_distance_km(max_distance_km),
            base_url,
            per_page,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            access_token: self.access_token.clone(),
            base_url: self.base_url.clone(),
            per_page: self.per_page,
        }
    }
}

/// First value that is present and not blank, trimmed.
fn first_present(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .into_iter()
        .chain(fallback)
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn parse_coordinate(raw: Option<&str>) -> RunClubResult<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| RunClubError::Config("Invalid coordinates".into()))
}

/// Blank or missing means the default radius.
fn parse_max_distance(raw: Option<&str>) -> RunClubResult<f64> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(DEFAULT_MAX_DISTANCE_KM);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(RunClubError::Config(format!(
            "Invalid maximum distance: {raw}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::VecDeque;

    /// Answers prompts from a fixed script and records what was asked.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for Scripted {
        fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
            self.asked.push(message.to_string());
            Ok(self.answers.pop_front().map(|a| a.trim().to_string()))
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn prompts_for_everything_when_nothing_given() {
        let mut p = Scripted::new(&["tok", "51.5", "-0.12", ""]);
        let cfg = RunConfig::resolve_with(Overrides::default(), no_env, &mut p).expect("cfg");
        assert_eq!(cfg.access_token.expose_secret(), "tok");
        assert_eq!(cfg.club.latitude, 51.5);
        assert_eq!(cfg.club.longitude, -0.12);
        assert_eq!(cfg.club.max_distance_km, DEFAULT_MAX_DISTANCE_KM);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.per_page, DEFAULT_PER_PAGE);
        assert_eq!(p.asked.len(), 4);
    }

    #[test]
    fn overrides_beat_env_and_skip_prompts() {
        let overrides = Overrides {
            token: Some("flag-token".into()),
            latitude: Some("40.0".into()),
            longitude: Some("-74.0".into()),
            max_distance_km: Some("1.25".into()),
            base_url: Some("http://localhost:9000".into()),
            per_page: Some("50".into()),
        };
        let env = |k: &str| match k {
            TOKEN_ENV => Some("env-token".into()),
            LAT_ENV => Some("1.0".into()),
            _ => None,
        };
        let mut p = Scripted::default();
        let cfg = RunConfig::resolve_with(overrides, env, &mut p).expect("cfg");
        assert_eq!(cfg.access_token.expose_secret(), "flag-token");
        assert_eq!(cfg.club.latitude, 40.0);
        assert_eq!(cfg.club.max_distance_km, 1.25);
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.per_page, 50);
        assert!(p.asked.is_empty());
    }

    #[test]
    fn env_fills_gaps_before_prompting() {
        let env = |k: &str| match k {
            TOKEN_ENV => Some("env-token".into()),
            LAT_ENV => Some("51.5".into()),
            LON_ENV => Some("-0.12".into()),
            MAX_DISTANCE_ENV => Some("0.75".into()),
            _ => None,
        };
        let mut p = Scripted::default();
        let cfg = RunConfig::resolve_with(Overrides::default(), env, &mut p).expect("cfg");
        assert_eq!(cfg.access_token.expose_secret(), "env-token");
        assert_eq!(cfg.club.max_distance_km, 0.75);
        assert!(p.asked.is_empty());
    }

    #[test]
    fn empty_token_is_rejected_before_coordinates() {
        let mut p = Scripted::new(&["   "]);
        let err = RunConfig::resolve_with(Overrides::default(), no_env, &mut p).unwrap_err();
        assert!(matches!(err, RunClubError::Config(ref m) if m == "Access token is required"));
        assert_eq!(p.asked.len(), 1);
    }

    #[test]
    fn end_of_input_means_missing_token() {
        let mut p = Scripted::new(&[]);
        let err = RunConfig::resolve_with(Overrides::default(), no_env, &mut p).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn invalid_latitude_stops_before_longitude_prompt() {
        let mut p = Scripted::new(&["tok", "north-ish", "-0.12"]);
        let err = RunConfig::resolve_with(Overrides::default(), no_env, &mut p).unwrap_err();
        assert!(matches!(err, RunClubError::Config(ref m) if m == "Invalid coordinates"));
        assert_eq!(p.asked.len(), 2);
    }

    #[test]
    fn non_finite_coordinates_are_invalid() {
        let overrides = Overrides {
            token: Some("tok".into()),
            latitude: Some("NaN".into()),
            longitude: Some("0".into()),
            ..Default::default()
        };
        let mut p = Scripted::default();
        assert!(RunConfig::resolve_with(overrides, no_env, &mut p).is_err());
    }

    #[test]
    fn negative_or_garbage_max_distance_is_invalid() {
        for bad in ["-1", "far", "inf"] {
            let overrides = Overrides {
                token: Some("tok".into()),
                latitude: Some("0".into()),
                longitude: Some("0".into()),
                max_distance_km: Some(bad.into()),
                ..Default::default()
            };
            let mut p = Scripted::default();
            assert!(RunConfig::resolve_with(overrides, no_env, &mut p).is_err(), "{bad}");
        }
    }

    #[test]
    fn invalid_per_page_is_a_config_error() {
        let overrides = Overrides {
            token: Some("tok".into()),
            latitude: Some("0".into()),
            longitude: Some("0".into()),
            max_distance_km: Some("0.5".into()),
            per_page: Some("0".into()),
            ..Default::default()
        };
        let mut p = Scripted::default();
        let err = RunConfig::resolve_with(overrides, no_env, &mut p).unwrap_err();
        assert!(matches!(err, RunClubError::Config(_)));
    }

    #[test]
    fn client_config_carries_settings() {
        let mut p = Scripted::new(&["tok", "1", "2", "3"]);
        let cfg = RunConfig::resolve_with(Overrides::default(), no_env, &mut p).expect("cfg");
        let client = cfg.client_config();
        assert_eq!(client.access_token.expose_secret(), "tok");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn stdin_prompter_reads_lines_and_detects_eof() {
        let mut p = StdinPrompter::from_reader(io::Cursor::new("  abc \n"));
        assert_eq!(p.prompt("? ").unwrap().as_deref(), Some("abc"));
        assert_eq!(p.prompt("? ").unwrap(), None);
    }
}
