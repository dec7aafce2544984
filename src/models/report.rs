//! The report assembled by one scan run.

use serde::Serialize;

/// One matching row: a table-specific identifier, the extracted URLs
/// (deduplicated, first-seen order, capped by configuration), and a context
/// snippet around the match.
#[derive(Debug, Clone, Serialize)]
pub struct RowEntry {
    pub identifier: String,
    pub urls: Vec<String>,
    pub snippet: String,
}

/// One (table, column) pair with at least one match.
///
/// `total` is the true count-query result; `entries` holds at most
/// `row_limit` detailed rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub table: String,
    pub column: String,
    pub total: i64,
    pub row_limit: i64,
    pub entries: Vec<RowEntry>,
}

/// Ordered sections plus the grand total across all scanned columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
    pub total_matches: i64,
}

impl Report {
    /// An empty report is never mailed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
