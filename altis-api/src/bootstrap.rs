use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use altis_core::{repository::CatalogSource, BookingEngine};
use altis_store::{Config, FileCatalogSource};
use altis_ticketing::TicketLedger;

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Logs go to stderr so the console front end keeps stdout for replies.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read the configured catalog file and build an engine over it.
pub async fn load_engine(config: &Config) -> anyhow::Result<BookingEngine> {
    let source = FileCatalogSource::new(&config.catalog.path);
    let loaded = source
        .load_flights()
        .await
        .with_context(|| format!("loading flight catalog from {}", config.catalog.path))?;

    tracing::info!(
        "Loaded {} flights ({} catalog warnings)",
        loaded.flights.len(),
        loaded.warnings.len()
    );

    let ledger = TicketLedger::with_retention(config.business_rules.retention());
    let engine = BookingEngine::new(loaded.flights, ledger)?;
    Ok(engine)
}
