use std::sync::Arc;
use std::time::Duration;

use devsweep::config::AppConfig;
use devsweep::db::PgContentStore;
use devsweep::schedule::{Scheduler, DAILY};
use devsweep::services::{gate, scan};
use devsweep::{db, mail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "devsweep=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    if !gate::is_production(&config.site_url) {
        tracing::info!(site = %config.site_url, "non-production site, scan will not be scheduled");
        return Ok(());
    }

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    let store = Arc::new(PgContentStore::new(pool));
    let mailer = mail::from_config(&config);
    let config = Arc::new(config);

    tracing::info!(
        site = %config.site_url,
        tables = config.scan.tables.len(),
        patterns = config.scan.patterns.len(),
        "scheduling daily content scan"
    );

    let mut scheduler = Scheduler::new();
    {
        let store = store.clone();
        let mailer = mailer.clone();
        let config = config.clone();
        scheduler.schedule(Duration::ZERO, DAILY, move || {
            let store = store.clone();
            let mailer = mailer.clone();
            let config = config.clone();
            async move {
                match scan::scan_and_notify(store.as_ref(), mailer.as_ref(), &config).await {
                    Ok(report) if report.is_empty() => {
                        tracing::info!("scan completed with no matches");
                    }
                    Ok(report) => tracing::info!(
                        total = report.total_matches,
                        sections = report.sections.len(),
                        "scan report sent"
                    ),
                    Err(e) => tracing::error!(error = %e, "scheduled scan failed"),
                }
            }
        });
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down, unscheduling scan");
    scheduler.unschedule();

    Ok(())
}
