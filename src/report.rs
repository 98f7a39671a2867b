use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

use std::{
    fmt::Display,
    fs::OpenOptions,
    io::Write,
    path::Path,
    time::{Duration, Instant},
};

use crate::{
    aggregate::{aggregate, AggregationResult},
    input::read_rows,
    record::{CatalogEntry, SaleEntry},
    warning::Warning,
};

/// Holds the results of one run over a catalogue and a sales record.
///
/// To run the files through the aggregator, use [`Report::from_files`].
///
/// To get a printable version of the report, use its [`Display`]
/// implementation; for a machine-readable one, serialize it.
///
/// To keep a record of the run, use [`Report::append_to`].
#[derive(Debug, Serialize)]
pub struct Report {
    catalogue: String,
    sales: String,
    #[serde(flatten)]
    result: AggregationResult,
    #[serde(rename = "elapsed_seconds", serialize_with = "as_secs")]
    elapsed: Duration,
    #[serde(skip)]
    pub sort_by_revenue: bool,
}

impl Report {
    /// Reads the catalogue and sales files and totals the sales.
    ///
    /// The elapsed time covers the whole run, including reading the files.
    ///
    /// # Errors
    ///
    /// Returns any errors from opening or parsing either file. Problems with
    /// individual rows are never errors; they show up as [`Warning`]s.
    pub fn from_files(catalogue: impl AsRef<Path>, sales: impl AsRef<Path>) -> Result<Self> {
        let start = Instant::now();
        let catalogue = catalogue.as_ref();
        let sales = sales.as_ref();
        let catalog_rows = read_rows::<CatalogEntry>(catalogue)?;
        let sale_rows = read_rows::<SaleEntry>(sales)?;
        let result = aggregate(&catalog_rows, &sale_rows);
        Ok(Self::new(file_name(catalogue), file_name(sales), result, start.elapsed()))
    }

    #[must_use]
    pub fn new(
        catalogue: impl Into<String>,
        sales: impl Into<String>,
        result: AggregationResult,
        elapsed: Duration,
    ) -> Self {
        Self {
            catalogue: catalogue.into(),
            sales: sales.into(),
            result,
            elapsed,
            sort_by_revenue: false,
        }
    }

    #[must_use]
    pub fn result(&self) -> &AggregationResult {
        &self.result
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.result.warnings
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    /// Returns product names sorted by unit sales, descending.
    ///
    /// The name of the best-selling product (by units, as opposed to revenue)
    /// is given first, and then the remaining names in descending order of unit
    /// sales. Products with identical sales are sorted alphabetically.
    pub fn products_by_unit_sales(&self) -> Vec<&str> {
        let mut products: Vec<_> = self.result.products.iter().collect();
        products.sort_by(|(_, a), (_, b)| b.units.total_cmp(&a.units));
        products.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    #[must_use]
    /// Returns product names sorted by revenue, descending.
    ///
    /// The name of the best-selling product (by revenue, as opposed to units)
    /// is given first, and then the remaining names in descending order of
    /// revenue. Products with identical sales are sorted alphabetically.
    pub fn products_by_revenue(&self) -> Vec<&str> {
        let mut products: Vec<_> = self.result.products.iter().collect();
        products.sort_by(|(_, a), (_, b)| b.revenue.total_cmp(&a.revenue));
        products.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Appends the text report to the file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns any errors from opening or writing the file.
    pub fn append_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        write!(file, "\n===== RUN =====\n{self}\n")
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = &self.result;
        writeln!(f, "=== SALES RESULTS ===")?;
        writeln!(f, "Price catalogue: {}", self.catalogue)?;
        writeln!(f, "Sales record:    {}", self.sales)?;
        writeln!(f)?;

        const HEADING: &str = "Product";
        let width = result
            .products
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or_default()
            .max(HEADING.len());
        writeln!(f, "{HEADING:width$} {:>6} {:>12}", "Units", "Revenue")?;
        let length = width + 20;
        writeln!(f, "{:-<length$}", "")?;
        let rows = if self.sort_by_revenue {
            self.products_by_revenue()
        } else {
            self.products_by_unit_sales()
        };
        for name in rows {
            let prod = &result.products[name];
            writeln!(f, "{name:width$} {:6} {:>12}", prod.units, prod.revenue)?;
        }
        writeln!(f, "{:-<length$}", "")?;
        let units: f64 = result.products.values().map(|p| p.units).sum();
        writeln!(f, "{:width$} {units:6} {:>12}", "Total", result.total)?;
        writeln!(f)?;

        writeln!(f, "Processed rows:  {}", result.processed)?;
        writeln!(f, "Ignored rows:    {}", result.ignored())?;
        writeln!(f, "Unknown products ignored: {}", result.unknown_products())?;
        writeln!(f)?;
        writeln!(f, "TOTAL COST: {}", result.total)?;
        write!(f, "Elapsed time (s): {:.6}", self.elapsed.as_secs_f64())?;

        if !result.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Warnings:")?;
            for warning in &result.warnings {
                write!(f, "\n- {warning}")?;
            }
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn as_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}
