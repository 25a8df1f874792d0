// Football results report
// Answers a fixed set of questions over the results, shootouts and
// goalscorers datasets, then checks and repairs missing scorer names

pub mod config;
pub mod error;
pub mod logging;
pub mod quality;
pub mod query;
pub mod report;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{ReportConfig, YearRange};
pub use error::LoadError;
pub use query::{Query, QueryExecutor, QueryResult};
pub use storage::loader::Dataset;
pub use storage::{GoalEvent, Match, MatchKey, Shootout};
