// Storage module - typed in-memory relations for the three football datasets
// Rows are loaded once from CSV and joined on the composite match key

pub mod index;
pub mod loader;
pub mod table;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::quality::DqFlag;

/// The composite natural key shared by all three datasets
///
/// None of the datasets carries a match id, so a match is identified by the
/// day it was played and the two teams in home/away order. Same-day rematches
/// between the same two teams collapse onto one key and fan out in joins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchKey {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
}

impl MatchKey {
    /// Column names that make up the key, in key order
    pub const COLUMNS: [&'static str; 3] = ["date", "home_team", "away_team"];

    pub fn new(date: NaiveDate, home_team: &str, away_team: &str) -> Self {
        Self {
            date,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
        }
    }

    /// Human readable form of the key columns: `[date] + [home_team] + [away_team]`
    pub fn describe() -> String {
        Self::COLUMNS
            .iter()
            .map(|c| format!("[{}]", c))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} v {}", self.date, self.home_team, self.away_team)
    }
}

/// Implemented by every relation that can be joined on the match key
pub trait Keyed {
    fn key(&self) -> MatchKey;
}

/// A row of `results.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Match {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    /// Missing for fixtures that have no recorded result yet
    #[serde(default, deserialize_with = "optional")]
    pub home_score: Option<u32>,
    #[serde(default, deserialize_with = "optional")]
    pub away_score: Option<u32>,
    pub tournament: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub neutral: Option<String>,
}

impl Match {
    /// Combined goals for both sides, if the result is known
    pub fn total_goals(&self) -> Option<u32> {
        Some(self.home_score? + self.away_score?)
    }

    pub fn is_score(&self, home: u32, away: u32) -> bool {
        self.home_score == Some(home) && self.away_score == Some(away)
    }
}

impl Keyed for Match {
    fn key(&self) -> MatchKey {
        MatchKey::new(self.date, &self.home_team, &self.away_team)
    }
}

/// A row of `shootouts.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shootout {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub winner: String,
    #[serde(default)]
    pub first_shooter: Option<String>,
}

impl Keyed for Shootout {
    fn key(&self) -> MatchKey {
        MatchKey::new(self.date, &self.home_team, &self.away_team)
    }
}

/// A row of `goalscorers.csv`, one per goal
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoalEvent {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub team: Option<String>,
    /// `None` when the goal is not attributed to anyone
    #[serde(default, deserialize_with = "optional")]
    pub scorer: Option<String>,
    #[serde(default)]
    pub minute: Option<String>,
    #[serde(default)]
    pub own_goal: Option<String>,
    #[serde(default)]
    pub penalty: Option<String>,
    /// Set by the data-quality pass, never read from the file
    #[serde(skip)]
    pub dq_flag: Option<DqFlag>,
}

impl Keyed for GoalEvent {
    fn key(&self) -> MatchKey {
        MatchKey::new(self.date, &self.home_team, &self.away_team)
    }
}

/// Markers the source data uses for an absent value
const MISSING_MARKERS: [&str; 3] = ["", "NA", "NaN"];

/// Check whether a raw field holds one of the missing-value markers
pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// Deserialize an optional field, mapping the missing-value markers to `None`
fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !is_missing(&s) => s.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_key_is_shared_across_relations() {
        let m = Match {
            date: date(1986, 6, 21),
            home_team: "Brazil".into(),
            away_team: "France".into(),
            home_score: Some(1),
            away_score: Some(1),
            tournament: "FIFA World Cup".into(),
            city: None,
            country: None,
            neutral: None,
        };
        let s = Shootout {
            date: date(1986, 6, 21),
            home_team: "Brazil".into(),
            away_team: "France".into(),
            winner: "France".into(),
            first_shooter: None,
        };

        assert_eq!(m.key(), s.key());
        assert!(m.is_score(1, 1));
        assert_eq!(m.total_goals(), Some(2));
    }

    #[test]
    fn test_key_respects_home_away_order() {
        let a = MatchKey::new(date(2000, 1, 1), "A", "B");
        let b = MatchKey::new(date(2000, 1, 1), "B", "A");
        assert_ne!(a, b);
    }

    #[test]
    fn test_describe_lists_key_columns() {
        assert_eq!(MatchKey::describe(), "[date] + [home_team] + [away_team]");
    }

    #[test]
    fn test_missing_markers() {
        assert!(is_missing(""));
        assert!(is_missing(" NA "));
        assert!(is_missing("NaN"));
        assert!(!is_missing("Pelé"));
    }
}
