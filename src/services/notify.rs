//! Report rendering and mail dispatch.

use chrono::Utc;

use crate::errors::AppError;
use crate::mail::Mailer;
use crate::models::report::{Report, ReportSection};

pub const SUBJECT: &str = "Development URL scan report";

const SECTION_SEPARATOR: &str = "\n\n-----------------------------\n\n";
const NO_URLS: &str = "(not parsed; see snippet)";

/// Two header lines followed by one block per row entry.
pub fn render_section(section: &ReportSection) -> String {
    let mut lines = vec![
        format!("Table {}, column {}", section.table, section.column),
        format!(
            "Total matches: {} (showing up to {})",
            section.total, section.row_limit
        ),
    ];
    for entry in &section.entries {
        let urls = if entry.urls.is_empty() {
            NO_URLS.to_string()
        } else {
            entry.urls.join(", ")
        };
        lines.push(format!(
            "- {}\n  URLs: {}\n  Snippet: {}",
            entry.identifier, urls, entry.snippet
        ));
    }
    lines.join("\n")
}

/// Header block (site, date, grand total), a blank line, then the sections
/// joined by a fixed separator.
pub fn render_body(report: &Report, site_url: &str, date: &str) -> String {
    let sections: Vec<String> = report.sections.iter().map(render_section).collect();
    format!(
        "Site: {site_url}\nDate: {date}\nTotal matches: {}\n\n{}",
        report.total_matches,
        sections.join(SECTION_SEPARATOR)
    )
}

/// Mail the rendered report to the administrator. Callers only invoke this
/// for reports with at least one section.
pub async fn send_report(
    mailer: &dyn Mailer,
    to: &str,
    site_url: &str,
    report: &Report,
) -> Result<(), AppError> {
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let body = render_body(report, site_url, &date);
    mailer.send(to, SUBJECT, &body).await
}
