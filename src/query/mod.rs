// Query module - the fixed set of report questions and their executor
pub mod executor;

pub use executor::{QueryExecutor, QueryResult, ScorerShare};

use crate::config::YearRange;

/// The questions the report answers, in the order they are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Q1: mean goals per match over a range of calendar years
    AverageGoals { years: YearRange },
    /// Q2: penalty shootout wins per country, alphabetical
    ShootoutWins,
    /// Q3: the key used to link the datasets
    CompositeKey,
    /// Q4: shootout winners of matches that ended 1-1
    DrawShootoutWinners,
    /// Q5: top scorer and their share of goals, per tournament
    TopScorerShare,
}

impl Query {
    /// Every question, in report order
    pub fn report(years: YearRange) -> [Query; 5] {
        [
            Query::AverageGoals { years },
            Query::ShootoutWins,
            Query::CompositeKey,
            Query::DrawShootoutWinners,
            Query::TopScorerShare,
        ]
    }

    /// Section heading printed above the answer
    pub fn title(&self) -> String {
        match self {
            Query::AverageGoals { years } => format!("Q1: Average goals per game ({})", years),
            Query::ShootoutWins => "Q2: Shootout wins by country".to_string(),
            Query::CompositeKey => "Q3: Composite match key".to_string(),
            Query::DrawShootoutWinners => "Q4: Shootout winners after a 1-1 draw".to_string(),
            Query::TopScorerShare => "Q5: Top scorer share by tournament".to_string(),
        }
    }
}
