use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};
use altis_catalog::FlightCatalog;
use altis_core::repository::{CatalogLoadError, CatalogLoadWarning, CatalogSource, LoadedCatalog};
use altis_core::FlightKey;

/// Flight catalog kept in a plain text file:
///
/// ```text
/// 2
/// 11.12.2022 FQ12 6 1-20 100$ 21-40 50$
/// 12.12.2022 PA44 4 1-10 120$
/// ```
///
/// The first line is the record count; each following line is
/// `<date> <flight> <seats per row> <price bands...>`.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load_flights(&self) -> Result<LoadedCatalog, CatalogLoadError> {
        let location = self.path.display().to_string();
        info!("Loading flight catalog from {}", location);

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogLoadError::CatalogLoadFailed {
                location: location.clone(),
                reason: e.to_string(),
            })?;

        let loaded = parse_catalog(&text)?;
        for warning in &loaded.warnings {
            warn!("{}: {}", location, warning);
        }
        info!("Loaded {} flights from {} ({} warnings)", loaded.flights.len(), location, loaded.warnings.len());

        Ok(loaded)
    }
}

/// Parse catalog text. Bad records are skipped with a warning; only a
/// missing or unreadable header is fatal.
pub fn parse_catalog(text: &str) -> Result<LoadedCatalog, CatalogLoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| CatalogLoadError::MalformedHeader("catalog is empty".to_string()))?;
    let declared: usize = header
        .split_whitespace()
        .next()
        .and_then(|count| count.parse().ok())
        .ok_or_else(|| CatalogLoadError::MalformedHeader(format!("expected a record count, got '{}'", header)))?;

    let records: Vec<(usize, &str)> = lines.collect();
    let mut loaded = LoadedCatalog::default();
    let mut seen = HashSet::new();

    if records.len() != declared {
        loaded.warnings.push(CatalogLoadWarning::RecordCount {
            declared,
            found: records.len(),
        });
    }

    for &(line, record) in records.iter().take(declared) {
        match parse_record(line, record, &mut loaded.warnings) {
            Ok(flight) => {
                if !seen.insert(FlightKey::of(&flight)) {
                    loaded.warnings.push(CatalogLoadWarning::Record {
                        line,
                        reason: format!("duplicate flight {} on {}", flight.flight_number(), flight.date()),
                    });
                    continue;
                }
                loaded.flights.push(flight);
            }
            Err(reason) => loaded.warnings.push(CatalogLoadWarning::Record { line, reason }),
        }
    }

    Ok(loaded)
}

fn parse_record(
    line: usize,
    record: &str,
    warnings: &mut Vec<CatalogLoadWarning>,
) -> Result<FlightCatalog, String> {
    let mut rest = record;
    let mut fields = Vec::with_capacity(3);
    for _ in 0..3 {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if end == 0 {
            break;
        }
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    let &[date, flight_number, seats_per_row] = fields.as_slice() else {
        return Err(format!("expected '<date> <flight> <seats per row> <bands>', got '{}'", record));
    };

    let seats_per_row: u8 = seats_per_row
        .parse()
        .map_err(|_| format!("seats per row '{}' is not a number", seats_per_row))?;

    let (flight, band_warnings) = FlightCatalog::from_band_text(date, flight_number, seats_per_row, rest)
        .map_err(|e| e.to_string())?;

    warnings.extend(
        band_warnings
            .into_iter()
            .map(|warning| CatalogLoadWarning::Band { line, warning }),
    );

    if flight.price_bands().is_empty() {
        return Err(format!("flight {} on {} has no usable price bands", flight_number, date));
    }

    Ok(flight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use altis_catalog::CatalogParseWarning;

    #[test]
    fn test_parse_catalog() {
        let text = "2\n11.12.2022 FQ12 6 1-20 100$ 21-40 50$\n12.12.2022 PA44 4 1-10 120$\n";
        let loaded = parse_catalog(text).unwrap();

        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.flights.len(), 2);

        let fq12 = &loaded.flights[0];
        assert_eq!(fq12.date(), "11.12.2022");
        assert_eq!(fq12.flight_number(), "FQ12");
        assert_eq!(fq12.seats_per_row(), 6);
        assert_eq!(fq12.num_rows(), 40);
        assert_eq!(fq12.price_for_row(21), Some(50));
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let text = "\
5
11.12.2022 FQ12 6 1-20 100$ 21-40 50€ 41-45 30$
11.12.2022 FQ12 3 1-2 10$
12.12.2022 PA44 many 1-10 120$
13.12.2022 KL01
14.12.2022 LH07 30 1-5 99$
";
        let loaded = parse_catalog(text).unwrap();

        assert_eq!(loaded.flights.len(), 1);
        assert_eq!(loaded.flights[0].num_rows(), 45);
        assert_eq!(loaded.flights[0].price_for_row(30), Some(30));
        assert_eq!(
            loaded.warnings[0],
            CatalogLoadWarning::Band {
                line: 2,
                warning: CatalogParseWarning::MissingCurrency {
                    range: "21-40".to_string(),
                    price: "50€".to_string(),
                },
            }
        );

        let skipped: Vec<usize> = loaded
            .warnings
            .iter()
            .filter_map(|w| match w {
                CatalogLoadWarning::Record { line, .. } => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_record_count_mismatch() {
        let loaded = parse_catalog("3\n11.12.2022 FQ12 6 1-20 100$\n").unwrap();
        assert_eq!(loaded.flights.len(), 1);
        assert_eq!(loaded.warnings, vec![CatalogLoadWarning::RecordCount { declared: 3, found: 1 }]);

        // Lines past the declared count are not read
        let loaded = parse_catalog("1\n11.12.2022 FQ12 6 1-20 100$\n11.12.2022 FQ13 6 1-20 100$\n").unwrap();
        assert_eq!(loaded.flights.len(), 1);
        assert_eq!(loaded.warnings, vec![CatalogLoadWarning::RecordCount { declared: 1, found: 2 }]);
    }

    #[test]
    fn test_malformed_header() {
        assert!(matches!(parse_catalog(""), Err(CatalogLoadError::MalformedHeader(_))));
        assert!(matches!(
            parse_catalog("two\n11.12.2022 FQ12 6 1-20 100$\n"),
            Err(CatalogLoadError::MalformedHeader(_))
        ));
    }
}
