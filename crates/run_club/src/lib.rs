//! Run Club tracker: picks out the runs that started at the club meeting
//! point during the Tuesday evening session and summarizes them.
//!
//! The pipeline is `fetch -> classify -> summarize -> render`. Fetching
//! lives in `strava_client`; everything here is pure over the fetched
//! records.

use serde::Serialize;
use strava_client::ActivityRecord;

pub mod classifier;
pub mod config;
pub mod error;
pub mod geo;
pub mod logging;
pub mod report;
pub mod stats;

pub use classifier::{ClubLocation, Rejection, classify, filter_club_activities, is_club_activity};
pub use error::{RunClubError, RunClubResult};
pub use geo::distance_km;
pub use stats::{RECENT_LIMIT, RecentActivity, StatsSummary, recent_activities, summarize};

/// Outcome of one run: how many activities were looked at, and the stats
/// and listing for the ones that matched. `summary` is `None` when nothing
/// matched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClubReport {
    pub fetched: usize,
    pub summary: Option<StatsSummary>,
    pub recent: Vec<RecentActivity>,
}

impl ClubReport {
    pub fn from_activities(activities: &[ActivityRecord], club: &ClubLocation) -> Self {
        let matched = filter_club_activities(activities, club);
        tracing::info!(
            fetched = activities.len(),
            matched = matched.len(),
            "filtered run club activities"
        );
        if matched.is_empty() {
            return Self {
                fetched: activities.len(),
                ..Default::default()
            };
        }
        Self {
            fetched: activities.len(),
            summary: Some(summarize(matched.iter().copied())),
            recent: recent_activities(matched.iter().copied(), RECENT_LIMIT),
        }
    }

    pub fn has_matches(&self) -> bool {
        self.summary.is_some()
    }
}
