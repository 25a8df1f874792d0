// Query Executor
// This module answers the report questions against the loaded datasets

use super::Query;
use crate::config::YearRange;
use crate::quality::DqFlag;
use crate::storage::index::KeyIndex;
use crate::storage::loader::Dataset;
use crate::storage::{Keyed, Match, MatchKey};
use chrono::Datelike;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Label used for goals whose match is missing from the results table
pub const UNMATCHED_TOURNAMENT: &str = "(no matching result)";

/// One row of the top-scorer question
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerShare {
    /// `None` collects goals whose match key has no result
    pub tournament: Option<String>,
    pub scorer: String,
    pub goals: usize,
    pub total_goals: usize,
    pub percent: f64,
}

/// Runs queries over a dataset
///
/// The composite key indexes are built once when the executor is created and
/// shared by every join.
pub struct QueryExecutor<'a> {
    dataset: &'a Dataset,
    results_index: KeyIndex,
    shootouts_index: KeyIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        let results_index = dataset.results.key_index();
        let shootouts_index = dataset.shootouts.key_index();
        debug!(
            result_keys = results_index.len(),
            shootout_keys = shootouts_index.len(),
            "key indexes built"
        );

        Self {
            dataset,
            results_index,
            shootouts_index,
        }
    }

    /// Execute a query and return a printable result
    pub fn execute(&self, query: Query) -> QueryResult {
        match query {
            Query::AverageGoals { years } => QueryResult::Value(self.average_goals(years)),

            Query::ShootoutWins => QueryResult::rows(
                &["winner", "wins"],
                self.shootout_wins()
                    .into_iter()
                    .map(|(winner, wins)| vec![winner, wins.to_string()])
                    .collect(),
            ),

            Query::CompositeKey => QueryResult::Message(format!(
                "Matches are linked across datasets by the composite key {}",
                MatchKey::describe()
            )),

            Query::DrawShootoutWinners => QueryResult::rows(
                &["winner"],
                self.draw_shootout_winners()
                    .into_iter()
                    .map(|winner| vec![winner])
                    .collect(),
            ),

            Query::TopScorerShare => QueryResult::rows(
                &["tournament", "scorer", "percent"],
                self.top_scorer_shares()
                    .into_iter()
                    .map(|share| {
                        vec![
                            share
                                .tournament
                                .unwrap_or_else(|| UNMATCHED_TOURNAMENT.to_string()),
                            share.scorer,
                            format!("{:.2}", share.percent),
                        ]
                    })
                    .collect(),
            ),
        }
    }

    /// Mean of home + away goals over matches played in `years`
    ///
    /// Matches without a recorded score are skipped. Returns `None` when no
    /// scored match falls in the range.
    pub fn average_goals(&self, years: YearRange) -> Option<f64> {
        let (sum, count) = self
            .dataset
            .results
            .rows()
            .iter()
            .filter(|m| years.contains(m.date.year()))
            .filter_map(Match::total_goals)
            .fold((0u64, 0usize), |(sum, count), goals| {
                (sum + u64::from(goals), count + 1)
            });

        (count > 0).then(|| sum as f64 / count as f64)
    }

    /// Number of shootouts won by each country, ordered by country name
    pub fn shootout_wins(&self) -> Vec<(String, usize)> {
        let mut wins: BTreeMap<&str, usize> = BTreeMap::new();
        for shootout in self.dataset.shootouts.rows() {
            *wins.entry(shootout.winner.as_str()).or_default() += 1;
        }

        wins.into_iter()
            .map(|(winner, count)| (winner.to_string(), count))
            .collect()
    }

    /// Distinct shootout winners of 1-1 draws, in alphabetical order
    ///
    /// Inner join: a draw without a shootout record contributes nothing.
    pub fn draw_shootout_winners(&self) -> Vec<String> {
        let shootouts = &self.dataset.shootouts;

        self.dataset
            .results
            .rows()
            .iter()
            .filter(|m| m.is_score(1, 1))
            .flat_map(|m| self.shootouts_index.lookup(&m.key()).to_vec())
            .filter_map(|row_id| shootouts.get(row_id))
            .map(|s| s.winner.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Each tournament's leading scorer with their share of its goals
    ///
    /// Goals are left-joined to results, so a goal whose match is unknown
    /// still counts, under the `None` tournament. Tournament totals include
    /// goals without a named scorer, but only named scorers can lead. Ties go
    /// to the scorer whose name sorts first.
    pub fn top_scorer_shares(&self) -> Vec<ScorerShare> {
        let mut totals: BTreeMap<Option<&str>, usize> = BTreeMap::new();
        let mut per_scorer: BTreeMap<Option<&str>, BTreeMap<&str, usize>> = BTreeMap::new();

        for goal in self.dataset.goals.rows() {
            let scorer = goal
                .scorer
                .as_deref()
                .filter(|_| DqFlag::for_event(goal) == DqFlag::Ok);

            for tournament in self.tournaments_for(&goal.key()) {
                *totals.entry(tournament).or_default() += 1;
                if let Some(scorer) = scorer {
                    *per_scorer
                        .entry(tournament)
                        .or_default()
                        .entry(scorer)
                        .or_default() += 1;
                }
            }
        }

        let mut shares: Vec<ScorerShare> = per_scorer
            .into_iter()
            .filter_map(|(tournament, scorers)| {
                let total_goals = totals.get(&tournament).copied()?;
                let (scorer, goals) = top_scorer(scorers)?;
                Some(ScorerShare {
                    tournament: tournament.map(str::to_string),
                    scorer: scorer.to_string(),
                    goals,
                    total_goals,
                    percent: goals as f64 / total_goals as f64 * 100.0,
                })
            })
            .collect();

        // Named tournaments alphabetically, the unmatched bucket last
        shares.sort_by(|a, b| {
            (a.tournament.is_none(), &a.tournament).cmp(&(b.tournament.is_none(), &b.tournament))
        });
        shares
    }

    /// Left join of a match key onto the results table
    ///
    /// Yields one tournament per matching result, or a single `None` when
    /// there is no match.
    fn tournaments_for(&self, key: &MatchKey) -> Vec<Option<&'a str>> {
        let results = &self.dataset.results;
        let row_ids = self.results_index.lookup(key);
        if row_ids.is_empty() {
            return vec![None];
        }

        row_ids
            .iter()
            .filter_map(|&row_id| results.get(row_id))
            .map(|m| Some(m.tournament.as_str()))
            .collect()
    }
}

/// Highest count wins; scorers arrive in name order so the first one seen
/// wins a tie
fn top_scorer<'s>(scorers: BTreeMap<&'s str, usize>) -> Option<(&'s str, usize)> {
    scorers
        .into_iter()
        .fold(None::<(&'s str, usize)>, |best, (name, goals)| match best {
            Some((_, most)) if most >= goals => best,
            _ => Some((name, goals)),
        })
}

/// Represents the result of a query execution
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// A single number; `None` when the aggregate is undefined
    Value(Option<f64>),
    /// A small result set rendered as a table
    Rows {
        column_names: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A plain statement
    Message(String),
}

impl QueryResult {
    pub fn rows(column_names: &[&str], rows: Vec<Vec<String>>) -> Self {
        QueryResult::Rows {
            column_names: column_names.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Format the result as a string for display
    pub fn format(&self) -> String {
        match self {
            QueryResult::Value(Some(value)) => format!("{:.2}", value),
            QueryResult::Value(None) => "n/a".to_string(),
            QueryResult::Message(msg) => msg.clone(),
            QueryResult::Rows { column_names, rows } => {
                if rows.is_empty() {
                    return "No rows found".to_string();
                }

                // Widths are counted in chars so accented names line up
                let mut widths: Vec<usize> =
                    column_names.iter().map(|c| c.chars().count()).collect();
                for row in rows {
                    for (i, value) in row.iter().enumerate().take(widths.len()) {
                        widths[i] = widths[i].max(value.chars().count());
                    }
                }

                let mut result = String::new();

                result.push_str(&border(&widths, '┌', '┬', '┐'));
                result.push_str(&line(column_names, &widths));
                result.push_str(&border(&widths, '├', '┼', '┤'));
                for row in rows {
                    result.push_str(&line(row, &widths));
                }
                result.push_str(&border(&widths, '└', '┴', '┘'));

                result.push_str(&format!("\n{} row(s) returned", rows.len()));

                result
            }
        }
    }
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    let separator = middle.to_string();
    format!("{}{}{}\n", left, segments.join(separator.as_str()), right)
}

fn line(values: &[String], widths: &[usize]) -> String {
    let mut out = String::from("│");
    for (value, width) in values.iter().zip(widths) {
        out.push_str(&format!(" {:<width$} │", value, width = width));
    }
    out.push('\n');
    out
}
