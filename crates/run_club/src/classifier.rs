//! Decides whether a single activity was a Run Club run.
//!
//! An activity qualifies when it is a run, started within the configured
//! radius of the club meeting point, and started on a Tuesday between
//! 18:45 and 19:15 local time (both ends inclusive). Gates are checked in
//! that order and the first failure is reported as a [`Rejection`].

use chrono::{Datelike, NaiveTime, Weekday};
use strava_client::ActivityRecord;
use strava_client::utils::parse_start_local;
use thiserror::Error;
use tracing::debug;

use crate::geo::distance_km;

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 0.5;

/// The club meeting point and how far from it a run may start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClubLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance_km: f64,
}

impl ClubLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }

    pub fn with_max_distance_km(mut self, max_distance_km: f64) -> Self {
        self.max_distance_km = max_distance_km;
        self
    }

    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        distance_km(self.latitude, self.longitude, latitude, longitude)
    }
}

/// Weekly slot the club meets in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchWindow {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

const WINDOW_START: NaiveTime = match NaiveTime::from_hms_opt(18, 45, 0) {
    Some(t) => t,
    None => panic!("invalid window start"),
};

const WINDOW_END: NaiveTime = match NaiveTime::from_hms_opt(19, 15, 0) {
    Some(t) => t,
    None => panic!("invalid window end"),
};

impl MatchWindow {
    /// Tuesday, 18:45 to 19:15.
    pub const RUN_CLUB: MatchWindow = MatchWindow {
        weekday: Weekday::Tue,
        start: WINDOW_START,
        end: WINDOW_END,
    };

    pub const fn run_club() -> Self {
        Self::RUN_CLUB
    }

    pub fn contains_time(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// First gate an activity failed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Rejection {
    #[error("not a run (type: {0:?})")]
    NotARun(Option<String>),
    #[error("no start location")]
    NoStartLocation,
    #[error("too far from club location: {distance_km:.2} km (max: {max_distance_km} km)")]
    TooFar {
        distance_km: f64,
        max_distance_km: f64,
    },
    #[error("no start date")]
    MissingStartDate,
    #[error("invalid date format: {0}")]
    InvalidStartDate(String),
    #[error("not a {expected}: started on {actual}")]
    WrongWeekday { expected: Weekday, actual: Weekday },
    #[error("outside time window: {time} (window: {start}-{end})")]
    OutsideWindow {
        time: NaiveTime,
        start: NaiveTime,
        end: NaiveTime,
    },
}

/// Run every gate against `record`, stopping at the first failure.
pub fn classify(
    record: &ActivityRecord,
    club: &ClubLocation,
    max_distance_km: f64,
) -> Result<(), Rejection> {
    if !record.is_run() {
        return Err(Rejection::NotARun(record.activity_type.clone()));
    }

    let (lat, lon) = record
        .start_coordinates()
        .ok_or(Rejection::NoStartLocation)?;
    let distance = club.distance_to(lat, lon);
    debug!(
        distance_km = distance,
        max_distance_km, "distance from club location"
    );
    if distance > max_distance_km {
        return Err(Rejection::TooFar {
            distance_km: distance,
            max_distance_km,
        });
    }

    let raw = record
        .start_date_local
        .as_deref()
        .ok_or(Rejection::MissingStartDate)?;
    let started =
        parse_start_local(raw).ok_or_else(|| Rejection::InvalidStartDate(raw.to_string()))?;

    let window = MatchWindow::run_club();
    let weekday = started.weekday();
    debug!(%weekday, "day of week");
    if weekday != window.weekday {
        return Err(Rejection::WrongWeekday {
            expected: window.weekday,
            actual: weekday,
        });
    }

    let time = started.time();
    debug!(%time, start = %window.start, end = %window.end, "start time");
    if !window.contains_time(time) {
        return Err(Rejection::OutsideWindow {
            time,
            start: window.start,
            end: window.end,
        });
    }

    Ok(())
}

/// `true` when `record` passes every gate. Malformed records are simply
/// not club runs.
pub fn is_club_activity(
    record: &ActivityRecord,
    club: &ClubLocation,
    max_distance_km: f64,
) -> bool {
    let name = record.name.as_deref().unwrap_or("Unnamed");
    debug!(
        activity = name,
        activity_type = ?record.activity_type,
        start_date_local = ?record.start_date_local,
        start_latlng = ?record.start_latlng,
        "checking activity"
    );
    match classify(record, club, max_distance_km) {
        Ok(()) => {
            debug!(activity = name, "matches all criteria");
            true
        }
        Err(reason) => {
            debug!(activity = name, %reason, "rejected");
            false
        }
    }
}

/// Club runs among `activities`, in their original order.
pub fn filter_club_activities<'a>(
    activities: &'a [ActivityRecord],
    club: &ClubLocation,
) -> Vec<&'a ActivityRecord> {
    activities
        .iter()
        .filter(|a| is_club_activity(a, club, club.max_distance_km))
        .collect()
}
