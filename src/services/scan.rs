//! Scan orchestration: the single-pass scan-and-report routine.

use crate::config::{AppConfig, ScanConfig};
use crate::db::ContentStore;
use crate::errors::AppError;
use crate::mail::Mailer;
use crate::models::report::{Report, ReportSection, RowEntry};
use crate::models::table::TableKind;
use crate::services::extract::UrlExtractor;
use crate::services::{gate, notify, rows, snippet};

/// Run one full scan over the configured tables and columns.
///
/// Absent tables are skipped; columns with zero matches contribute neither a
/// section nor a total. The grand total sums the true count-query results
/// even though at most `row_limit` rows per column are detailed. Query
/// errors propagate and abort the run.
pub async fn run_scan(store: &dyn ContentStore, config: &ScanConfig) -> Result<Report, AppError> {
    let extractor = UrlExtractor::new(&config.patterns)?;
    let mut report = Report::default();

    for spec in &config.tables {
        if !store.table_exists(&spec.name).await? {
            tracing::debug!(table = %spec.name, "table absent, skipping");
            continue;
        }
        let kind = TableKind::detect(&spec.name);

        for column in &spec.columns {
            let total = store
                .count_matches(&spec.name, column, &config.patterns)
                .await?;
            if total == 0 {
                continue;
            }
            report.total_matches += total;

            let fetched = store
                .fetch_matches(
                    &spec.name,
                    column,
                    &config.patterns,
                    rows::extra_fields(kind),
                    config.row_limit,
                )
                .await?;
            tracing::debug!(table = %spec.name, %column, total, shown = fetched.len(), "column matched");

            let mut entries = Vec::with_capacity(fetched.len());
            for row in fetched {
                let text = row.get(column.as_str()).map(String::as_str).unwrap_or("");
                let urls = dedup_first_seen(extractor.extract(text), config.urls_per_row);
                let snippet = match urls.first() {
                    Some(url) => snippet::from_url(text, url, config.snippet_len),
                    None => snippet::from_patterns(text, &config.patterns, config.snippet_len),
                };
                entries.push(RowEntry {
                    identifier: rows::format_identifier(kind, &row),
                    urls,
                    snippet,
                });
            }

            report.sections.push(ReportSection {
                table: spec.name.clone(),
                column: column.clone(),
                total,
                row_limit: config.row_limit,
                entries,
            });
        }
    }

    Ok(report)
}

/// The full gate → scan → notify cycle shared by the daemon tick and the
/// one-shot binary. A non-production site short-circuits to an empty report;
/// an empty report is never mailed.
pub async fn scan_and_notify(
    store: &dyn ContentStore,
    mailer: &dyn Mailer,
    config: &AppConfig,
) -> Result<Report, AppError> {
    if !gate::is_production(&config.site_url) {
        tracing::info!(site = %config.site_url, "non-production site, scan disabled");
        return Ok(Report::default());
    }

    let report = run_scan(store, &config.scan).await?;
    if report.is_empty() {
        tracing::info!("no matches found, skipping notification");
        return Ok(report);
    }

    notify::send_report(mailer, &config.admin_email, &config.site_url, &report).await?;
    Ok(report)
}

/// First-seen-order deduplication, capped at `cap` entries.
fn dedup_first_seen(urls: Vec<String>, cap: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for url in urls {
        if out.len() == cap {
            break;
        }
        if !out.contains(&url) {
            out.push(url);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_seen_order() {
        let urls = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ];
        assert_eq!(dedup_first_seen(urls, 5), vec!["b", "a", "c"]);
    }

    #[test]
    fn dedup_caps_at_limit() {
        let urls = (0..7).map(|i| format!("u{i}")).collect();
        let deduped = dedup_first_seen(urls, 5);
        assert_eq!(deduped.len(), 5);
        assert_eq!(deduped[0], "u0");
        assert_eq!(deduped[4], "u4");
    }

    #[test]
    fn dedup_of_empty_is_empty() {
        assert!(dedup_first_seen(Vec::new(), 5).is_empty());
    }
}
