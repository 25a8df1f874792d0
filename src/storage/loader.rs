// CSV loader
// Reads the three datasets into typed tables

use super::table::Table;
use super::{GoalEvent, Match, Shootout};
use crate::error::LoadError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const RESULTS_FILE: &str = "results.csv";
pub const SHOOTOUTS_FILE: &str = "shootouts.csv";
pub const GOALSCORERS_FILE: &str = "goalscorers.csv";

const RESULTS_COLUMNS: &[&str] = &[
    "date",
    "home_team",
    "away_team",
    "home_score",
    "away_score",
    "tournament",
];
const SHOOTOUTS_COLUMNS: &[&str] = &["date", "home_team", "away_team", "winner"];
const GOALSCORERS_COLUMNS: &[&str] = &["date", "home_team", "away_team", "scorer"];

/// All three relations, loaded together
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub results: Table<Match>,
    pub shootouts: Table<Shootout>,
    pub goals: Table<GoalEvent>,
}

impl Dataset {
    pub fn new(results: Table<Match>, shootouts: Table<Shootout>, goals: Table<GoalEvent>) -> Self {
        Self {
            results,
            shootouts,
            goals,
        }
    }

    /// Load `results.csv`, `shootouts.csv` and `goalscorers.csv` from a directory
    ///
    /// Every file is checked for existence before any of them is parsed, so a
    /// missing input fails fast without doing partial work.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let results_path = dir.join(RESULTS_FILE);
        let shootouts_path = dir.join(SHOOTOUTS_FILE);
        let goals_path = dir.join(GOALSCORERS_FILE);

        for path in [&results_path, &shootouts_path, &goals_path] {
            if !path.is_file() {
                return Err(LoadError::MissingFile { path: path.clone() });
            }
        }

        let dataset = Self {
            results: load_table(&results_path, "results", RESULTS_COLUMNS)?,
            shootouts: load_table(&shootouts_path, "shootouts", SHOOTOUTS_COLUMNS)?,
            goals: load_table(&goals_path, "goalscorers", GOALSCORERS_COLUMNS)?,
        };

        info!(
            results = dataset.results.row_count(),
            shootouts = dataset.shootouts.row_count(),
            goals = dataset.goals.row_count(),
            "datasets loaded"
        );

        Ok(dataset)
    }
}

/// Read one CSV file into a typed table
///
/// The header must contain every column in `required`. Any record that fails
/// to deserialize (a malformed date, a non-numeric score) fails the whole load.
pub fn load_table<R: DeserializeOwned>(
    path: &Path,
    name: &str,
    required: &[&str],
) -> Result<Table<R>, LoadError> {
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: PathBuf::from(path),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_error)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    if let Some(column) = required.iter().find(|c| !columns.iter().any(|h| h.as_str() == **c)) {
        return Err(LoadError::MissingColumn {
            path: PathBuf::from(path),
            column: column.to_string(),
        });
    }

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(csv_error)?;

    debug!(table = name, rows = rows.len(), path = %path.display(), "table loaded");

    Ok(Table::new(name, columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_results_with_missing_scores() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            RESULTS_FILE,
            "date,home_team,away_team,home_score,away_score,tournament,city,country,neutral\n\
             1872-11-30,Scotland,England,0,0,Friendly,Glasgow,Scotland,FALSE\n\
             2030-06-01,Spain,Morocco,NA,NA,FIFA World Cup,Madrid,Spain,FALSE\n",
        );

        let table: Table<Match> = load_table(&path, "results", RESULTS_COLUMNS).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns.len(), 9);
        assert!(table.has_column("neutral"));
        assert_eq!(table.rows()[0].total_goals(), Some(0));
        assert_eq!(table.rows()[1].home_score, None);
        assert_eq!(table.rows()[1].city.as_deref(), Some("Madrid"));
    }

    #[test]
    fn test_missing_scorer_becomes_none() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            GOALSCORERS_FILE,
            "date,home_team,away_team,team,scorer,minute,own_goal,penalty\n\
             1916-07-02,Chile,Uruguay,Uruguay,José Piendibene,44,FALSE,FALSE\n\
             1916-07-02,Chile,Uruguay,Uruguay,,NA,FALSE,FALSE\n\
             1916-07-02,Chile,Uruguay,Uruguay,NA,70,FALSE,FALSE\n",
        );

        let table: Table<GoalEvent> =
            load_table(&path, "goalscorers", GOALSCORERS_COLUMNS).unwrap();

        let scorers: Vec<_> = table.rows().iter().map(|g| g.scorer.as_deref()).collect();
        assert_eq!(scorers, vec![Some("José Piendibene"), None, None]);
        assert!(table.rows().iter().all(|g| g.dq_flag.is_none()));
    }

    #[test]
    fn test_malformed_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            SHOOTOUTS_FILE,
            "date,home_team,away_team,winner\n\
             1967-08-22,India,Taiwan,Taiwan\n\
             22/08/1967,India,Taiwan,Taiwan\n",
        );

        let err = load_table::<Shootout>(&path, "shootouts", SHOOTOUTS_COLUMNS).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, SHOOTOUTS_FILE, "date,home_team,away_team\n");

        let err = load_table::<Shootout>(&path, "shootouts", SHOOTOUTS_COLUMNS).unwrap_err();
        match err {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "winner"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_reported_before_parsing() {
        let dir = TempDir::new().unwrap();
        write(&dir, RESULTS_FILE, "garbage without the expected header\n");

        let err = Dataset::load(dir.path()).unwrap_err();
        match err {
            LoadError::MissingFile { path } => assert!(path.ends_with(SHOOTOUTS_FILE)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
