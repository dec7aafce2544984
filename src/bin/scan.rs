//! One-shot scan for operators — runs a single pass and prints the report.
//!
//! Usage: `cargo run --bin scan [-- --json] [-- --send]`
//!
//! Requires `DATABASE_URL`, `SITE_URL`, and `ADMIN_EMAIL` (reads .env).
//! `--json` prints the report as JSON instead of the mail body text;
//! `--send` also mails the report when it is non-empty.

use devsweep::config::AppConfig;
use devsweep::db::PgContentStore;
use devsweep::services::{gate, notify, scan};
use devsweep::{db, mail};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let send = args.iter().any(|a| a == "--send");

    let config = AppConfig::from_env()?;

    if !gate::is_production(&config.site_url) {
        println!("Non-production site ({}); scan skipped.", config.site_url);
        return Ok(());
    }

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    let store = PgContentStore::new(pool);

    let report = scan::run_scan(&store, &config.scan).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_empty() {
        println!("No matches found.");
    } else {
        let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
        println!("{}", notify::render_body(&report, &config.site_url, &date));
    }

    if send && !report.is_empty() {
        let mailer = mail::from_config(&config);
        notify::send_report(mailer.as_ref(), &config.admin_email, &config.site_url, &report)
            .await?;
        println!("\nReport sent to {}", config.admin_email);
    }

    Ok(())
}
