use std::env;

use crate::errors::AppError;
use crate::models::pattern::SearchPattern;
use crate::models::table::TableSpec;

const DEFAULT_PATTERNS: &str = "%wpengine.com%,%staging.%";
const DEFAULT_TABLES: &str = "wp_posts:post_content|post_excerpt,\
                              wp_postmeta:meta_value,\
                              wp_redirection_items:action_data,\
                              wp_options:option_value";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub site_url: String,
    pub admin_email: String,
    pub mail_endpoint: Option<String>,
    pub scan: ScanConfig,
}

/// Immutable scan tuning passed into the orchestrator.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub patterns: Vec<SearchPattern>,
    pub tables: Vec<TableSpec>,
    pub row_limit: i64,
    pub urls_per_row: usize,
    pub snippet_len: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            site_url: require("SITE_URL")?,
            admin_email: require("ADMIN_EMAIL")?,
            mail_endpoint: env::var("MAIL_ENDPOINT").ok(),
            scan: ScanConfig::from_env()?,
        })
    }
}

impl ScanConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            patterns: parse_patterns(
                &env::var("SCAN_PATTERNS").unwrap_or_else(|_| DEFAULT_PATTERNS.to_string()),
            )?,
            tables: parse_tables(
                &env::var("SCAN_TABLES").unwrap_or_else(|_| DEFAULT_TABLES.to_string()),
            )?,
            row_limit: env::var("SCAN_ROW_LIMIT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            urls_per_row: env::var("SCAN_URLS_PER_ROW")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            snippet_len: env::var("SCAN_SNIPPET_LEN")
                .unwrap_or_else(|_| "160".to_string())
                .parse()
                .unwrap_or(160),
        })
    }
}

fn require(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Config(format!("{name} must be set")))
}

/// Parse a comma-separated list of LIKE patterns.
pub fn parse_patterns(raw: &str) -> Result<Vec<SearchPattern>, AppError> {
    let patterns: Vec<SearchPattern> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SearchPattern::new)
        .collect();
    if patterns.is_empty() {
        return Err(AppError::Config(
            "SCAN_PATTERNS must contain at least one pattern".to_string(),
        ));
    }
    Ok(patterns)
}

/// Parse a comma-separated list of `table:col|col` entries.
pub fn parse_tables(raw: &str) -> Result<Vec<TableSpec>, AppError> {
    let mut tables = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, columns) = entry
            .split_once(':')
            .ok_or_else(|| AppError::Config(format!("malformed table entry: {entry}")))?;
        let columns: Vec<String> = columns
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if columns.is_empty() {
            return Err(AppError::Config(format!(
                "table entry has no columns: {entry}"
            )));
        }
        tables.push(TableSpec {
            name: name.trim().to_string(),
            columns,
        });
    }
    if tables.is_empty() {
        return Err(AppError::Config(
            "SCAN_TABLES must contain at least one table".to_string(),
        ));
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns_parse() {
        let patterns = parse_patterns(DEFAULT_PATTERNS).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].as_like(), "%wpengine.com%");
        assert_eq!(patterns[1].literal(), "staging.");
    }

    #[test]
    fn default_tables_parse() {
        let tables = parse_tables(DEFAULT_TABLES).unwrap();
        assert_eq!(tables.len(), 4);
        assert_eq!(tables[0].name, "wp_posts");
        assert_eq!(tables[0].columns, vec!["post_content", "post_excerpt"]);
        assert_eq!(tables[1].name, "wp_postmeta");
        assert_eq!(tables[1].columns, vec!["meta_value"]);
        assert_eq!(tables[3].name, "wp_options");
    }

    #[test]
    fn patterns_trim_whitespace_and_skip_blanks() {
        let patterns = parse_patterns(" %a% , ,%b%").unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].as_like(), "%a%");
    }

    #[test]
    fn empty_pattern_list_is_an_error() {
        assert!(parse_patterns("").is_err());
        assert!(parse_patterns(" , ").is_err());
    }

    #[test]
    fn table_entry_without_columns_is_an_error() {
        assert!(parse_tables("wp_posts").is_err());
        assert!(parse_tables("wp_posts:").is_err());
    }

    #[test]
    fn table_columns_preserve_order() {
        let tables = parse_tables("t:c3|c1|c2").unwrap();
        assert_eq!(tables[0].columns, vec!["c3", "c1", "c2"]);
    }
}
