//! Totals, averages and the recent-activities listing for matched runs.

use serde::Serialize;
use strava_client::ActivityRecord;

/// How many runs the recent-activities listing shows.
pub const RECENT_LIMIT: usize = 10;
pub const UNNAMED: &str = "Unnamed";
pub const UNKNOWN_DATE: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub total_runs: usize,
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub avg_distance_km: f64,
    pub avg_pace_min_per_km: f64,
}

/// One line of the recent-activities listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentActivity {
    pub date: String,
    pub name: String,
    pub distance_km: f64,
}

impl RecentActivity {
    pub fn from_record(record: &ActivityRecord) -> Self {
        let date = record
            .start_date_local
            .as_deref()
            .map(|s| s.chars().take(10).collect())
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());
        Self {
            date,
            name: record.name.clone().unwrap_or_else(|| UNNAMED.to_string()),
            distance_km: record.distance / 1000.0,
        }
    }
}

pub fn summarize<'a, I>(matched: I) -> StatsSummary
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let (total_runs, meters, seconds) = matched
        .into_iter()
        .fold((0usize, 0.0f64, 0.0f64), |(n, m, s), a| {
            (n + 1, m + a.distance, s + a.moving_time)
        });

    let total_distance_km = meters / 1000.0;
    let avg_distance_km = if total_runs > 0 {
        total_distance_km / total_runs as f64
    } else {
        0.0
    };
    let avg_pace_min_per_km = if total_distance_km > 0.0 {
        (seconds / 60.0) / total_distance_km
    } else {
        0.0
    };

    StatsSummary {
        total_runs,
        total_distance_km,
        total_time_hours: seconds / 3600.0,
        avg_distance_km,
        avg_pace_min_per_km,
    }
}

/// Most recent `limit` runs, newest first.
///
/// `start_date_local` strings share one fixed-width format, so comparing
/// them as strings orders them chronologically. Runs without a start date
/// sort last.
pub fn recent_activities<'a, I>(matched: I, limit: usize) -> Vec<RecentActivity>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut sorted: Vec<&ActivityRecord> = matched.into_iter().collect();
    sorted.sort_by(|a, b| start_key(b).cmp(start_key(a)));
    sorted
        .into_iter()
        .take(limit)
        .map(RecentActivity::from_record)
        .collect()
}

fn start_key(record: &ActivityRecord) -> &str {
    record.start_date_local.as_deref().unwrap_or("")
}
