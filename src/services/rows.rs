//! Per-table-kind field selection and row identifier formatting.

use std::collections::HashMap;

use crate::models::table::TableKind;
use crate::services::snippet;

const TITLE_MAX_LEN: usize = 80;

/// Extra fields fetched alongside the scanned column for a table kind.
pub fn extra_fields(kind: TableKind) -> &'static [&'static str] {
    match kind {
        TableKind::Posts => &["ID", "post_title", "post_type", "post_status"],
        TableKind::PostMeta => &["meta_id", "post_id", "meta_key"],
        TableKind::Redirects => &["id", "action_type", "action_code"],
        TableKind::Other => &[],
    }
}

/// Stable human-readable identifier for a matching row.
///
/// Missing or empty fields default to empty strings; this never fails.
pub fn format_identifier(kind: TableKind, row: &HashMap<String, String>) -> String {
    match kind {
        TableKind::Posts => {
            let title = field(row, "post_title");
            let title = if title.is_empty() {
                "(no title)".to_string()
            } else {
                snippet::trim_text(title, TITLE_MAX_LEN)
            };
            format!(
                "Post ID {} [type={}, status={}, title=\"{}\"]",
                field(row, "ID"),
                field(row, "post_type"),
                field(row, "post_status"),
                title
            )
        }
        TableKind::PostMeta => format!(
            "Meta ID {} [post_id={}, meta_key=\"{}\"]",
            field(row, "meta_id"),
            field(row, "post_id"),
            field(row, "meta_key")
        ),
        TableKind::Redirects => format!(
            "Redirection ID {} [action_type={}, action_code={}]",
            field(row, "id"),
            field(row, "action_type"),
            field(row, "action_code")
        ),
        TableKind::Other => "Match".to_string(),
    }
}

fn field<'a>(row: &'a HashMap<String, String>, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}
