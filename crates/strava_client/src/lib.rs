//! Strava activity-listing client: the activity wire model, the
//! [`ActivitySource`] seam and a reqwest-based paginated fetch.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod pages;
pub mod utils;

pub use pages::{DEFAULT_PER_PAGE, activity_pages, fetch_all_activities};

/// Activity type label for runs.
pub const RUN_TYPE: &str = "Run";

#[derive(Debug, Error)]
pub enum StravaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication rejected ({status}): {body}")]
    Auth { status: u16, body: String },
    #[error("error fetching activities: {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decoding error: {0}")]
    Decode(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl StravaError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => StravaError::Auth { status, body },
            _ => StravaError::Status { status, body },
        }
    }

    /// HTTP status code carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            StravaError::Auth { status, .. } | StravaError::Status { status, .. } => Some(*status),
            StravaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// One activity as returned by `GET /athlete/activities`.
///
/// Only the fields the run-club pipeline reads are kept. Every field is
/// decoded leniently: wrongly typed text fields and coordinates become
/// `None` and non-numeric distances or times become zero, so a single odd
/// record never fails the whole page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ActivityRecord {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_lenient_string")]
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub start_date_local: Option<String>,
    #[serde(default, deserialize_with = "deserialize_latlng")]
    pub start_latlng: Option<Vec<f64>>,
    /// Meters.
    #[serde(default, deserialize_with = "deserialize_f64_or_zero")]
    pub distance: f64,
    /// Seconds.
    #[serde(default, deserialize_with = "deserialize_f64_or_zero")]
    pub moving_time: f64,
}

impl ActivityRecord {
    pub fn is_run(&self) -> bool {
        self.activity_type.as_deref() == Some(RUN_TYPE)
    }

    /// `(latitude, longitude)` when the record carries exactly two coordinates.
    pub fn start_coordinates(&self) -> Option<(f64, f64)> {
        match self.start_latlng.as_deref() {
            Some([lat, lon]) => Some((*lat, *lon)),
            _ => None,
        }
    }
}

/// Strings and numbers become text; anything else is treated as absent.
fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        _ => Ok(None),
    }
}

/// Only JSON strings are kept; `20240507` or `7` in a text field reads as absent.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn deserialize_latlng<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    let Some(serde_json::Value::Array(items)) = value else {
        return Ok(None);
    };
    // A single non-numeric component invalidates the whole pair.
    Ok(items.iter().map(serde_json::Value::as_f64).collect())
}

fn deserialize_f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(serde_json::Value::as_f64).unwrap_or(0.0))
}

/// Anything that can list activities one page at a time.
#[async_trait]
pub trait ActivitySource: Send + Sync + 'static {
    /// Fetch page `page` (1-based) holding at most `per_page` activities.
    /// An empty page means there is nothing further to read.
    async fn list_activities_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ActivityRecord>, StravaError>;
}
