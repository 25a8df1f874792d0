// Data-quality pass
// Flags goal events without a scorer, repairs them in place, and checks
// how well the composite key links the relations

use crate::storage::loader::Dataset;
use crate::storage::table::Table;
use crate::storage::{GoalEvent, Keyed};
use std::fmt;
use tracing::{info, warn};

/// Stand-in name written over missing scorers
pub const PLACEHOLDER_SCORER: &str = "Unknown Scorer";

/// Per-row data-quality verdict for a goal event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DqFlag {
    Ok,
    MissingScorerName,
}

impl DqFlag {
    /// Classify a single goal event
    ///
    /// A scorer that already holds the placeholder still counts as missing,
    /// so re-running the pass on repaired data flags the same rows.
    pub fn for_event(event: &GoalEvent) -> Self {
        match event.scorer.as_deref().map(str::trim) {
            None | Some("") | Some(PLACEHOLDER_SCORER) => DqFlag::MissingScorerName,
            Some(_) => DqFlag::Ok,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DqFlag::Ok => "OK",
            DqFlag::MissingScorerName => "Missing_Scorer_Name",
        }
    }
}

impl fmt::Display for DqFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Histogram of flag values over the goal table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagCounts {
    pub ok: usize,
    pub missing_scorer: usize,
}

impl FlagCounts {
    pub fn total(&self) -> usize {
        self.ok + self.missing_scorer
    }

    /// (flag, count) pairs, flagged rows first
    pub fn entries(&self) -> [(DqFlag, usize); 2] {
        [
            (DqFlag::MissingScorerName, self.missing_scorer),
            (DqFlag::Ok, self.ok),
        ]
    }
}

/// Fill a missing scorer with the placeholder, leaving every other field alone
///
/// Returns whether the scorer value changed.
pub fn fill_scorer(event: &mut GoalEvent) -> bool {
    if DqFlag::for_event(event) == DqFlag::Ok
        || event.scorer.as_deref() == Some(PLACEHOLDER_SCORER)
    {
        return false;
    }
    event.scorer = Some(PLACEHOLDER_SCORER.to_string());
    true
}

/// Compute `dq_flag` for every goal event and count the outcomes
pub fn flag_missing_scorers(goals: &mut Table<GoalEvent>) -> FlagCounts {
    let mut counts = FlagCounts::default();
    for row in goals.rows_mut() {
        let flag = DqFlag::for_event(row);
        row.dq_flag = Some(flag);
        match flag {
            DqFlag::Ok => counts.ok += 1,
            DqFlag::MissingScorerName => counts.missing_scorer += 1,
        }
    }
    counts
}

/// Replace missing scorers in place; returns how many rows were filled
pub fn fill_missing_scorers(goals: &mut Table<GoalEvent>) -> usize {
    goals
        .rows_mut()
        .iter_mut()
        .map(fill_scorer)
        .filter(|&changed| changed)
        .count()
}

/// How well the composite key links goal events to results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyIntegrity {
    /// Keys in `results` shared by more than one match
    pub duplicate_result_keys: usize,
    /// Goal events whose key has no match in `results`
    pub unmatched_goals: usize,
}

impl KeyIntegrity {
    pub fn check(dataset: &Dataset) -> Self {
        let index = dataset.results.key_index();
        let duplicate_result_keys = index.duplicate_keys().count();
        let unmatched_goals = dataset
            .goals
            .rows()
            .iter()
            .filter(|g| !index.contains(&g.key()))
            .count();

        if duplicate_result_keys > 0 {
            warn!(
                duplicate_result_keys,
                "results contain repeated match keys; joins will fan out"
            );
        }
        if unmatched_goals > 0 {
            warn!(unmatched_goals, "goal events without a matching result");
        }

        Self {
            duplicate_result_keys,
            unmatched_goals,
        }
    }
}

/// Outcome of a full data-quality pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityReport {
    pub flags: FlagCounts,
    pub filled: usize,
    pub rows_before: usize,
    pub rows_after: usize,
    pub keys: KeyIntegrity,
}

/// Run the data-quality pass: key checks, then flag, then repair
pub fn run(dataset: &mut Dataset) -> QualityReport {
    let keys = KeyIntegrity::check(dataset);
    let rows_before = dataset.goals.row_count();

    let flags = flag_missing_scorers(&mut dataset.goals);
    let filled = fill_missing_scorers(&mut dataset.goals);
    let rows_after = dataset.goals.row_count();

    info!(
        flagged = flags.missing_scorer,
        filled, rows_before, rows_after, "data-quality pass complete"
    );

    QualityReport {
        flags,
        filled,
        rows_before,
        rows_after,
        keys,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn goal(scorer: Option<&str>) -> GoalEvent {
        GoalEvent {
            date: NaiveDate::from_ymd_opt(1954, 7, 4).unwrap(),
            home_team: "West Germany".into(),
            away_team: "Hungary".into(),
            team: Some("Hungary".into()),
            scorer: scorer.map(str::to_string),
            minute: Some("6".into()),
            own_goal: Some("FALSE".into()),
            penalty: Some("FALSE".into()),
            dq_flag: None,
        }
    }

    fn goals_table() -> Table<GoalEvent> {
        Table::new(
            "goalscorers",
            vec!["date".into(), "home_team".into(), "away_team".into(), "scorer".into()],
            vec![
                goal(Some("Ferenc Puskás")),
                goal(None),
                goal(Some("Zoltán Czibor")),
                goal(Some("   ")),
            ],
        )
    }

    #[test]
    fn test_flag_counts() {
        let mut table = goals_table();
        let counts = flag_missing_scorers(&mut table);

        assert_eq!(counts, FlagCounts { ok: 2, missing_scorer: 2 });
        assert_eq!(counts.total(), table.row_count());
        assert_eq!(table.rows()[1].dq_flag, Some(DqFlag::MissingScorerName));
        assert_eq!(table.rows()[0].dq_flag, Some(DqFlag::Ok));
    }

    #[test]
    fn test_repair_preserves_rows_and_other_values() {
        let original = goals_table();
        let mut table = original.clone();

        flag_missing_scorers(&mut table);
        let filled = fill_missing_scorers(&mut table);

        assert_eq!(filled, 2);
        assert_eq!(table.row_count(), original.row_count());
        for (before, after) in original.rows().iter().zip(table.rows()) {
            let scorer = after.scorer.as_deref().unwrap();
            if DqFlag::for_event(before) == DqFlag::MissingScorerName {
                assert_eq!(scorer, PLACEHOLDER_SCORER);
            } else {
                assert_eq!(after.scorer, before.scorer);
            }
            assert_eq!(after.date, before.date);
            assert_eq!(after.team, before.team);
            assert_eq!(after.minute, before.minute);
        }
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut once = goals_table();
        flag_missing_scorers(&mut once);
        fill_missing_scorers(&mut once);

        let mut twice = once.clone();
        let counts = flag_missing_scorers(&mut twice);
        let filled = fill_missing_scorers(&mut twice);

        assert_eq!(twice, once);
        assert_eq!(counts.missing_scorer, 2);
        assert_eq!(filled, 0);
    }

    #[test]
    fn test_fill_scorer_only_touches_missing_names() {
        let mut missing = goal(None);
        assert!(fill_scorer(&mut missing));
        assert_eq!(missing.scorer.as_deref(), Some(PLACEHOLDER_SCORER));
        assert!(!fill_scorer(&mut missing));

        let mut named = goal(Some("Helmut Rahn"));
        assert!(!fill_scorer(&mut named));
        assert_eq!(named, goal(Some("Helmut Rahn")));
    }

    #[test]
    fn test_flag_labels() {
        assert_eq!(DqFlag::Ok.to_string(), "OK");
        assert_eq!(DqFlag::MissingScorerName.to_string(), "Missing_Scorer_Name");
    }
}
