use tracing::{debug, warn};

use std::collections::HashMap;

use crate::{
    record::{CatalogEntry, Field, Row},
    usd::Usd,
    warning::{Warning, WarningKind},
};

/// Maps product names to unit prices.
///
/// To build an index from raw catalogue rows, use [`CatalogIndex::build`].
/// Names are matched exactly (case-sensitive, after trimming surrounding
/// whitespace), and no price in the index is negative.
///
/// # Examples
///
/// ```
/// # use compute_sales::{CatalogEntry, CatalogIndex, Field, Row, Usd};
/// let entry = |title: &str, price: f64| {
///     Row::Record(CatalogEntry {
///         title: Some(Field::Text(title.into())),
///         price: Some(Field::Number(price)),
///     })
/// };
/// let (index, warnings) = CatalogIndex::build(&[entry("Tea", 2.0), entry("Tea", 2.5)]);
/// assert_eq!(index.price("Tea"), Some(Usd::from_dollars(2.5)));
/// assert_eq!(warnings.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogIndex {
    prices: HashMap<String, Usd>,
}

impl CatalogIndex {
    /// Builds an index from catalogue rows, in order.
    ///
    /// Rows without a usable title or price are left out, with an
    /// `invalid_catalog_entry` warning. When a title repeats, the later price
    /// replaces the earlier one and a `duplicate_product` warning is
    /// emitted for each repeat.
    #[must_use]
    pub fn build(rows: &[Row<CatalogEntry>]) -> (Self, Vec<Warning>) {
        let mut index = Self::default();
        let mut warnings = Vec::new();
        for (row, entry) in (1..).zip(rows) {
            let (title, price) = match validate(entry) {
                Ok(valid) => valid,
                Err(detail) => {
                    warnings.push(Warning::catalog(row, WarningKind::InvalidCatalogEntry, detail));
                    continue;
                }
            };
            if let Some(previous) = index.prices.insert(title.to_string(), price) {
                warnings.push(Warning::catalog(
                    row,
                    WarningKind::DuplicateProduct,
                    format!("'{title}' already listed at {previous}, now priced at {price}"),
                ));
            }
        }
        debug!(
            products = index.len(),
            rejected = warnings.len(),
            "built catalogue index"
        );
        if index.is_empty() {
            warn!("no valid products found in catalogue");
        }
        (index, warnings)
    }

    /// Returns the unit price of `product`, if it is in the catalogue.
    #[must_use]
    pub fn price(&self, product: &str) -> Option<Usd> {
        self.prices.get(product).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

fn validate(entry: &Row<CatalogEntry>) -> Result<(&str, Usd), String> {
    let entry = match entry {
        Row::Record(entry) => entry,
        Row::Malformed(what) => return Err(what.clone()),
    };
    let Some(title) = entry.title.as_ref().and_then(|t| t.as_name()) else {
        return Err(match &entry.title {
            None => "missing title".to_string(),
            Some(other) => format!("invalid title '{other}'"),
        });
    };
    let Some(price) = entry.price.as_ref() else {
        return Err(format!("missing price for '{title}'"));
    };
    let amount = match price {
        Field::Number(n) => Some(Usd::from_dollars(*n)),
        Field::Text(text) => text.parse::<Usd>().ok(),
        Field::Other(_) => None,
    };
    match amount {
        Some(p) if p.is_finite() && p >= Usd::ZERO => Ok((title, p)),
        Some(p) if p < Usd::ZERO => Err(format!("negative price {price} for '{title}'")),
        _ => Err(format!("invalid price '{price}' for '{title}'")),
    }
}
