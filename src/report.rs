// Report rendering
// Runs every query, then the data-quality pass, and lays the answers out
// as labelled text sections

use crate::config::YearRange;
use crate::quality::{self, QualityReport};
use crate::query::{Query, QueryExecutor, QueryResult};
use crate::storage::loader::Dataset;
use std::fmt::Write;
use tracing::info;

/// Produce the full report text
///
/// All queries run against the data as loaded. The data-quality pass runs
/// last and repairs the goal table in place.
pub fn render(dataset: &mut Dataset, years: YearRange) -> String {
    let mut out = String::new();

    {
        let executor = QueryExecutor::new(dataset);
        for query in Query::report(years) {
            info!(query = %query.title(), "running query");
            section(&mut out, &query.title(), &executor.execute(query).format());
        }
    }

    let report = quality::run(dataset);
    section(&mut out, "Data quality check & resolution", &format_quality(&report));

    out
}

fn section(out: &mut String, title: &str, body: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    // Writing into a String cannot fail
    let _ = writeln!(out, "----- {} -----", title);
    let _ = writeln!(out, "{}", body);
}

fn format_quality(report: &QualityReport) -> String {
    let flags = QueryResult::rows(
        &["dq_flag", "count"],
        report
            .flags
            .entries()
            .iter()
            .map(|(flag, count)| vec![flag.to_string(), count.to_string()])
            .collect(),
    );

    let mut out = String::from("Flagged goal records:\n");
    out.push_str(&flags.format());
    let _ = write!(
        out,
        "\n\nFilled {} missing scorer(s) with \"{}\"\n\
         Goal records before repair: {}, after repair: {}\n\
         Repeated match keys in results: {}\n\
         Goal records without a matching result: {}",
        report.filled,
        quality::PLACEHOLDER_SCORER,
        report.rows_before,
        report.rows_after,
        report.keys.duplicate_result_keys,
        report.keys.unmatched_goals,
    );
    out
}
