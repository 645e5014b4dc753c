//! Text and JSON rendering of a [`ClubReport`].

use std::fmt;

use crate::ClubReport;
use crate::error::RunClubResult;

pub const TITLE: &str = "Strava Run Club Tracker";
pub const STATS_TITLE: &str = "RUN CLUB STATISTICS";
pub const NO_MATCHES: &str = "No Run Club activities found matching the criteria.";
const RULE_WIDTH: usize = 60;

/// Title framed by two rows of `=`.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}")
}

impl fmt::Display for ClubReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", banner(STATS_TITLE))?;

        let Some(stats) = &self.summary else {
            return writeln!(f, "{NO_MATCHES}");
        };

        writeln!(f)?;
        writeln!(f, "Total Run Club Runs: {}", stats.total_runs)?;
        writeln!(f, "Total Run Club Kilometers: {:.2} km", stats.total_distance_km)?;
        writeln!(f, "Total Time: {:.2} hours", stats.total_time_hours)?;
        writeln!(f, "Average Distance: {:.2} km", stats.avg_distance_km)?;
        writeln!(f, "Average Pace: {:.2} min/km", stats.avg_pace_min_per_km)?;

        writeln!(f)?;
        writeln!(f, "Recent Run Club activities:")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for a in &self.recent {
            writeln!(f, "  {} - {} ({:.2} km)", a.date, a.name, a.distance_km)?;
        }
        Ok(())
    }
}

pub fn render_json(report: &ClubReport) -> RunClubResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
