// Report configuration
// Where the datasets live and which seasons Q1 averages over

use anyhow::{ensure, Result};
use std::fmt;
use std::path::PathBuf;

/// An inclusive range of calendar years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl YearRange {
    pub fn new(from: i32, to: i32) -> Result<Self> {
        ensure!(from <= to, "invalid year range: {} is after {}", from, to);
        Ok(Self { from, to })
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.from..=self.to).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            from: 1900,
            to: 2000,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Everything a report run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory holding results.csv, shootouts.csv and goalscorers.csv
    pub data_dir: PathBuf,
    /// Seasons covered by the average-goals question
    pub years: YearRange,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            years: YearRange::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_is_inclusive() {
        let years = YearRange::default();
        assert!(years.contains(1900));
        assert!(years.contains(2000));
        assert!(!years.contains(1899));
        assert!(!years.contains(2001));
        assert_eq!(years.to_string(), "1900-2000");
    }

    #[test]
    fn test_reversed_year_range_is_rejected() {
        assert!(YearRange::new(2001, 1999).is_err());
        assert!(YearRange::new(1950, 1950).is_ok());
    }
}
