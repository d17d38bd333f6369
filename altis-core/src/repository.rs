use async_trait::async_trait;
use altis_catalog::{CatalogParseWarning, FlightCatalog};
use std::fmt;

/// Flights read from a catalog source, plus everything that was skipped on the way
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub flights: Vec<FlightCatalog>,
    pub warnings: Vec<CatalogLoadWarning>,
}

/// Non-fatal problem found while reading a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLoadWarning {
    /// A price-band triplet inside an otherwise usable record was dropped
    Band {
        line: usize,
        warning: CatalogParseWarning,
    },
    /// A whole flight record was dropped
    Record {
        line: usize,
        reason: String,
    },
    /// Declared record count does not match what was read
    RecordCount {
        declared: usize,
        found: usize,
    },
}

impl fmt::Display for CatalogLoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLoadWarning::Band { line, warning } => write!(f, "line {}: {}", line, warning),
            CatalogLoadWarning::Record { line, reason } => {
                write!(f, "line {}: flight record skipped: {}", line, reason)
            }
            CatalogLoadWarning::RecordCount { declared, found } => {
                write!(f, "catalog declares {} records but {} were found", declared, found)
            }
        }
    }
}

/// Fatal catalog problems. Without a catalog there is nothing to book.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Catalog load failed for {location}: {reason}")]
    CatalogLoadFailed {
        location: String,
        reason: String,
    },

    #[error("Malformed catalog header: {0}")]
    MalformedHeader(String),
}

/// Where the booking engine gets its flights from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_flights(&self) -> Result<LoadedCatalog, CatalogLoadError>;
}

/// Fixed in-memory catalog, handy for tests and demos
pub struct StaticCatalogSource {
    flights: Vec<FlightCatalog>,
}

impl StaticCatalogSource {
    pub fn new(flights: Vec<FlightCatalog>) -> Self {
        Self { flights }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load_flights(&self) -> Result<LoadedCatalog, CatalogLoadError> {
        tracing::debug!("Serving {} flights from static catalog", self.flights.len());

        Ok(LoadedCatalog {
            flights: self.flights.clone(),
            warnings: Vec::new(),
        })
    }
}
