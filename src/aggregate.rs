use serde::Serialize;
use tracing::{debug, trace, warn};

use std::collections::BTreeMap;

use crate::{
    catalog::CatalogIndex,
    record::{CatalogEntry, Field, Row, SaleEntry},
    usd::Usd,
    warning::{Warning, WarningKind},
};

/// Holds sales data on a specific product.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductSales {
    pub units: f64,
    pub revenue: Usd,
}

/// The outcome of one aggregation run.
///
/// Every sales row either contributed to `total` (and to the per-product
/// breakdown) or produced exactly one warning.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    /// Sum of price × quantity over every valid sales row, unrounded.
    pub total: Usd,
    /// Catalogue warnings first, then sales warnings, each in row order.
    pub warnings: Vec<Warning>,
    /// Number of sales rows read.
    pub rows: usize,
    /// Number of sales rows that contributed to the total.
    pub processed: usize,
    /// Number of distinct products in the catalogue index.
    pub catalog_products: usize,
    pub products: BTreeMap<String, ProductSales>,
}

impl AggregationResult {
    /// Number of sales rows left out of the total.
    #[must_use]
    pub fn ignored(&self) -> usize {
        self.rows - self.processed
    }

    /// Number of sales rows naming a product missing from the catalogue.
    #[must_use]
    pub fn unknown_products(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.kind == WarningKind::UnknownProduct)
            .count()
    }

    fn record(&mut self, product: &str, revenue: Usd, qty: f64) {
        let prod = self.products.entry(product.to_string()).or_default();
        prod.units += qty;
        prod.revenue += revenue;
        self.total += revenue;
        self.processed += 1;
    }
}

/// Builds a [`CatalogIndex`] from `catalog` and totals `sales` against it.
///
/// The returned warnings are those from building the index, followed by
/// those from the sales rows.
///
/// # Examples
///
/// ```
/// # use compute_sales::{aggregate, parse_rows, CatalogEntry, Row, SaleEntry, Usd, WarningKind};
/// let catalog: Vec<Row<CatalogEntry>> =
///     parse_rows(r#"[{"title": "Fresh bananas", "price": 0.5}]"#).unwrap();
/// let sales: Vec<Row<SaleEntry>> = parse_rows(r#"[
///     {"Product": "Fresh bananas", "Quantity": 12},
///     {"Product": "Elotes", "Quantity": 1}
/// ]"#).unwrap();
/// let result = aggregate(&catalog, &sales);
/// assert_eq!(result.total, Usd::from_dollars(6.0));
/// assert_eq!(result.warnings[0].kind, WarningKind::UnknownProduct);
/// ```
#[must_use]
pub fn aggregate(catalog: &[Row<CatalogEntry>], sales: &[Row<SaleEntry>]) -> AggregationResult {
    let (index, mut warnings) = CatalogIndex::build(catalog);
    let mut result = index.aggregate(sales);
    warnings.append(&mut result.warnings);
    result.warnings = warnings;
    result
}

impl CatalogIndex {
    /// Totals `sales` against this catalogue in a single pass.
    ///
    /// Rows are checked in this order, and the first problem found is the
    /// one reported:
    ///
    /// 1. the row is a record (`invalid_entry`)
    /// 2. the product is in the catalogue (`unknown_product`)
    /// 3. the quantity is a finite number (`invalid_quantity`)
    /// 4. the quantity is not negative (`negative_quantity`)
    ///
    /// A zero quantity is valid, and contributes nothing.
    #[must_use]
    pub fn aggregate(&self, sales: &[Row<SaleEntry>]) -> AggregationResult {
        let mut result = AggregationResult {
            rows: sales.len(),
            catalog_products: self.len(),
            ..AggregationResult::default()
        };
        for (row, sale) in (1..).zip(sales) {
            match self.check(sale) {
                Ok((product, revenue, qty)) => {
                    trace!(row, product, qty, %revenue, "counted sale");
                    result.record(product, revenue, qty);
                }
                Err((kind, detail)) => result.warnings.push(Warning::sales(row, kind, detail)),
            }
        }
        debug!(
            rows = result.rows,
            processed = result.processed,
            total = %result.total,
            "aggregated sales"
        );
        if result.processed == 0 {
            warn!(rows = result.rows, "no valid sales rows found");
        }
        result
    }

    /// Returns the product, its contribution to the total, and the quantity.
    fn check<'a>(
        &self,
        sale: &'a Row<SaleEntry>,
    ) -> Result<(&'a str, Usd, f64), (WarningKind, String)> {
        let sale = match sale {
            Row::Record(sale) => sale,
            Row::Malformed(what) => return Err((WarningKind::InvalidEntry, what.clone())),
        };
        let Some(product) = sale.product.as_ref().and_then(Field::as_name) else {
            let detail = match &sale.product {
                None => "missing product".to_string(),
                Some(other) => format!("product '{other}' not in catalogue"),
            };
            return Err((WarningKind::UnknownProduct, detail));
        };
        let Some(price) = self.price(product) else {
            return Err((
                WarningKind::UnknownProduct,
                format!("product '{product}' not in catalogue"),
            ));
        };
        let Some(quantity) = sale.quantity.as_ref() else {
            return Err((
                WarningKind::InvalidQuantity,
                format!("missing quantity for '{product}'"),
            ));
        };
        let Some(qty) = quantity.as_number().filter(|n| n.is_finite()) else {
            return Err((
                WarningKind::InvalidQuantity,
                format!("invalid quantity '{quantity}' for '{product}'"),
            ));
        };
        if qty < 0.0 {
            return Err((
                WarningKind::NegativeQuantity,
                format!("negative quantity {quantity} for '{product}'"),
            ));
        }
        let revenue = price * qty;
        if !revenue.is_finite() {
            return Err((
                WarningKind::InvalidQuantity,
                format!("quantity {quantity} for '{product}' is too large"),
            ));
        }
        Ok((product, revenue, qty))
    }
}
