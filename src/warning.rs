use serde::Serialize;

use std::fmt::Display;

/// Which input list a [`Warning`]'s row number refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Catalog,
    Sales,
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Source::Catalog => "catalog",
            Source::Sales => "sales",
        })
    }
}

/// The reason an input row was left out of the total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Catalog row without a usable title or price.
    InvalidCatalogEntry,
    /// Catalog row repeating an earlier title; its price replaces the earlier one.
    DuplicateProduct,
    UnknownProduct,
    InvalidQuantity,
    NegativeQuantity,
    /// Sales row that isn't a record at all.
    InvalidEntry,
}

impl WarningKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WarningKind::InvalidCatalogEntry => "invalid_catalog_entry",
            WarningKind::DuplicateProduct => "duplicate_product",
            WarningKind::UnknownProduct => "unknown_product",
            WarningKind::InvalidQuantity => "invalid_quantity",
            WarningKind::NegativeQuantity => "negative_quantity",
            WarningKind::InvalidEntry => "invalid_entry",
        }
    }
}

impl Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A non-fatal problem with one input row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub source: Source,
    /// 1-based position of the row in its input list.
    pub row: usize,
    pub kind: WarningKind,
    pub detail: String,
}

impl Warning {
    pub(crate) fn catalog(row: usize, kind: WarningKind, detail: impl Into<String>) -> Self {
        Self {
            source: Source::Catalog,
            row,
            kind,
            detail: detail.into(),
        }
    }

    pub(crate) fn sales(row: usize, kind: WarningKind, detail: impl Into<String>) -> Self {
        Self {
            source: Source::Sales,
            row,
            kind,
            detail: detail.into(),
        }
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} row {}: {}: {}",
            self.source, self.row, self.kind, self.detail
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_fn_names_source_row_and_kind() {
        let warning = Warning::sales(3, WarningKind::NegativeQuantity, "quantity -35 for 'Elotes'");
        assert_eq!(
            warning.to_string(),
            "sales row 3: negative_quantity: quantity -35 for 'Elotes'"
        );
    }

    #[test]
    fn warning_kind_serializes_in_snake_case() {
        let json = serde_json::to_string(&Warning::catalog(
            2,
            WarningKind::InvalidCatalogEntry,
            "missing price",
        ))
        .unwrap();
        assert_eq!(
            json,
            r#"{"source":"catalog","row":2,"kind":"invalid_catalog_entry","detail":"missing price"}"#
        );
    }

    #[test]
    fn as_str_fn_matches_serialized_name() {
        for kind in [
            WarningKind::InvalidCatalogEntry,
            WarningKind::DuplicateProduct,
            WarningKind::UnknownProduct,
            WarningKind::InvalidQuantity,
            WarningKind::NegativeQuantity,
            WarningKind::InvalidEntry,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
