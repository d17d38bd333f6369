use altis_core::repository::{CatalogLoadError, CatalogSource};
use altis_core::BookingEngine;
use altis_store::FileCatalogSource;
use altis_ticketing::TicketLedger;
use std::path::PathBuf;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("altis-{}-{}.txt", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_load_catalog_file_into_engine() {
    let path = scratch_file(
        "catalog",
        "2\n11.12.2022 FQ12 3 1-2 100$ 3-5 150$\n12.12.2022 PA44 2 1-10 80$ 11 5$\n",
    );

    let loaded = FileCatalogSource::new(&path).load_flights().await.unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.flights.len(), 2);
    assert_eq!(loaded.warnings.len(), 1);

    let mut engine = BookingEngine::new(loaded.flights, TicketLedger::new()).unwrap();
    let ticket = engine.book_seat("12.12.2022", "PA44", "10B", "Alice").unwrap();
    assert_eq!(ticket.price, 80);
}

#[tokio::test]
async fn test_missing_catalog_file() {
    let source = FileCatalogSource::new("/definitely/not/here/flights.txt");

    let result = source.load_flights().await;

    assert!(matches!(result, Err(CatalogLoadError::CatalogLoadFailed { .. })));
}
