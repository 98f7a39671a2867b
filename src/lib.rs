#![doc = include_str!("../README.md")]
mod aggregate;
mod catalog;
mod input;
mod record;
mod report;
mod usd;
mod warning;

pub use aggregate::{aggregate, AggregationResult, ProductSales};
pub use catalog::CatalogIndex;
pub use input::{parse_rows, read_rows};
pub use record::{CatalogEntry, Field, Row, SaleEntry};
pub use report::Report;
pub use usd::Usd;
pub use warning::{Source, Warning, WarningKind};
