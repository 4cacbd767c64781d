use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a match. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Upcoming => "upcoming",
            MatchStatus::Live => "live",
            MatchStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownStatus;

impl FromStr for MatchStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(MatchStatus::Upcoming),
            "live" => Ok(MatchStatus::Live),
            "finished" => Ok(MatchStatus::Finished),
            _ => Err(UnknownStatus),
        }
    }
}

/// Team info from teams table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Match row joined with both team names
#[derive(Debug, sqlx::FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub match_date: String,
    pub match_time: String,
    pub home_team: String,
    pub away_team: String,
    pub status: String,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub twitch_channel: Option<String>,
}

impl MatchRow {
    /// Convert database row to API response format
    pub fn to_schedule_match(&self) -> ScheduleMatch {
        let score = match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some(format!("{}:{}", home, away)),
            _ => None,
        };

        ScheduleMatch {
            id: self.id,
            date: self.match_date.clone(),
            time: format_match_time(&self.match_time),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            status: self.status.clone(),
            score,
            twitch_channel: self.twitch_channel.clone(),
        }
    }
}

/// Render a stored time as `HH:MM`.
fn format_match_time(raw: &str) -> String {
    let raw = raw.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| chrono::NaiveTime::parse_from_str(raw, fmt).ok())
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| raw.chars().take(5).collect())
}

/// Match info for the public schedule
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMatch {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub status: String,
    pub score: Option<String>,
    pub twitch_channel: Option<String>,
}

/// Finished match as seen by the standings aggregator
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FinishedMatch {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

/// One line of the league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub id: i64,
    pub name: String,
    pub games: i64,
    pub wins: i64,
    pub losses: i64,
    pub points: i64,
    pub goals_for: i64,
    pub goals_against: i64,
}

/// Validated fields for creating or replacing a match
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub date: String,
    pub time: String,
    pub twitch_channel: Option<String>,
}

/// Validated score/status update from the public surface
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreUpdate {
    pub match_id: i64,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: MatchStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: &str, home: Option<i64>, away: Option<i64>) -> MatchRow {
        MatchRow {
            id: 1,
            match_date: "2025-01-10".to_string(),
            match_time: time.to_string(),
            home_team: "Falcons".to_string(),
            away_team: "Bears".to_string(),
            status: "finished".to_string(),
            home_score: home,
            away_score: away,
            twitch_channel: None,
        }
    }

    #[test]
    fn score_is_formatted_when_both_sides_present() {
        assert_eq!(row("19:30", Some(3), Some(1)).to_schedule_match().score.as_deref(), Some("3:1"));
        assert_eq!(row("19:30", Some(0), Some(0)).to_schedule_match().score.as_deref(), Some("0:0"));
    }

    #[test]
    fn score_is_null_when_either_side_missing() {
        assert!(row("19:30", Some(3), None).to_schedule_match().score.is_none());
        assert!(row("19:30", None, None).to_schedule_match().score.is_none());
    }

    #[test]
    fn time_is_trimmed_to_hours_and_minutes() {
        assert_eq!(format_match_time("19:30:00"), "19:30");
        assert_eq!(format_match_time("08:15"), "08:15");
        assert_eq!(format_match_time("evening"), "eveni");
    }

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("live".parse::<MatchStatus>(), Ok(MatchStatus::Live));
        assert_eq!("paused".parse::<MatchStatus>(), Err(UnknownStatus));
        assert_eq!(MatchStatus::Finished.to_string(), "finished");
    }
}
