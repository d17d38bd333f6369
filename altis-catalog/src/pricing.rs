use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency marker every price in band text must carry.
pub const CURRENCY_MARKER: &str = "$";

/// Highest row a price band may reach.
pub const MAX_ROWS: u32 = 999;

/// A single pricing rule: every row up to and including `row_ceiling`
/// (and above the previous band's ceiling) costs `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub row_ceiling: u32,
    pub price: u32,
}

impl PriceBand {
    pub fn new(row_ceiling: u32, price: u32) -> Self {
        Self { row_ceiling, price }
    }
}

/// Row → price resolution over ceiling-ordered bands.
/// Serialized as a plain list of bands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PriceBand>", into = "Vec<PriceBand>")]
pub struct PriceBands {
    bands: Vec<PriceBand>,
}

impl PriceBands {
    /// Build from bands in any order. Bands are sorted by ceiling here;
    /// the sort is stable so the earlier of two equal ceilings wins lookups.
    pub fn new(bands: Vec<PriceBand>) -> Self {
        let mut bands = bands;
        bands.sort_by_key(|b| b.row_ceiling);
        Self { bands }
    }

    /// Price of the first band whose ceiling covers `row`.
    /// `None` when the row is past every ceiling.
    pub fn price_for_row(&self, row: u32) -> Option<u32> {
        self.bands
            .iter()
            .find(|band| band.row_ceiling >= row)
            .map(|band| band.price)
    }

    /// Highest ceiling across all bands, 0 when there are none.
    pub fn num_rows(&self) -> u32 {
        self.bands.last().map_or(0, |b| b.row_ceiling)
    }

    pub fn bands(&self) -> &[PriceBand] {
        &self.bands
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl From<Vec<PriceBand>> for PriceBands {
    fn from(bands: Vec<PriceBand>) -> Self {
        Self::new(bands)
    }
}

impl From<PriceBands> for Vec<PriceBand> {
    fn from(bands: PriceBands) -> Self {
        bands.bands
    }
}

impl fmt::Display for PriceBands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut floor = 0;
        for (i, band) in self.bands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}-{} {}{}", floor + 1, band.row_ceiling, band.price, CURRENCY_MARKER)?;
            floor = band.row_ceiling;
        }
        Ok(())
    }
}

/// A rejected triplet in price-band text. Parsing carries on past it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogParseWarning {
    #[error("Price '{price}' for range '{range}' is missing the '$' marker")]
    MissingCurrency { range: String, price: String },

    #[error("Row range '{0}' is missing a '-' separator")]
    MissingRangeSeparator(String),

    #[error("Row range '{0}' is not an ascending range of rows between 1 and 999")]
    InvalidRange(String),

    #[error("Price '{price}' for range '{range}' is not a whole amount")]
    InvalidPrice { range: String, price: String },

    #[error("Incomplete price band at end of input: '{0}'")]
    Incomplete(String),
}

/// Outcome of parsing price-band text: the bands that survived plus
/// one warning per rejected triplet.
#[derive(Debug, Clone, Default)]
pub struct ParsedBands {
    pub bands: PriceBands,
    pub warnings: Vec<CatalogParseWarning>,
}

/// Parse band text such as `1-12 100$ 13-30 150$`.
///
/// Each accepted `<start>-<end>` range contributes one band keyed by its
/// end row. The marker may be glued to the price or stand alone (`100 $`).
/// A price without a marker rejects only its own triplet; the next token
/// starts a fresh one.
pub fn parse_price_bands(text: &str) -> ParsedBands {
    let mut tokens = text.split_whitespace().peekable();
    let mut bands = Vec::new();
    let mut warnings = Vec::new();

    while let Some(range) = tokens.next() {
        let Some(price_token) = tokens.next() else {
            warnings.push(CatalogParseWarning::Incomplete(range.to_string()));
            break;
        };

        let price = match price_token.strip_suffix(CURRENCY_MARKER) {
            Some(amount) if !amount.is_empty() => amount,
            _ => match tokens.peek() {
                Some(&CURRENCY_MARKER) => {
                    tokens.next();
                    price_token
                }
                Some(_) => {
                    warnings.push(CatalogParseWarning::MissingCurrency {
                        range: range.to_string(),
                        price: price_token.to_string(),
                    });
                    continue;
                }
                None => {
                    warnings.push(CatalogParseWarning::Incomplete(format!("{} {}", range, price_token)));
                    break;
                }
            },
        };

        match parse_band(range, price) {
            Ok(band) => bands.push(band),
            Err(warning) => warnings.push(warning),
        }
    }

    ParsedBands {
        bands: PriceBands::new(bands),
        warnings,
    }
}

fn parse_band(range: &str, price: &str) -> Result<PriceBand, CatalogParseWarning> {
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| CatalogParseWarning::MissingRangeSeparator(range.to_string()))?;

    let invalid_range = || CatalogParseWarning::InvalidRange(range.to_string());
    let start: u32 = start.parse().map_err(|_| invalid_range())?;
    let end: u32 = end.parse().map_err(|_| invalid_range())?;
    if start == 0 || start > end || end > MAX_ROWS {
        return Err(invalid_range());
    }

    let price: u32 = price.parse().map_err(|_| CatalogParseWarning::InvalidPrice {
        range: range.to_string(),
        price: price.to_string(),
    })?;

    Ok(PriceBand::new(end, price))
}
