use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use std::fmt::Display;

/// A single raw value taken from an input record.
///
/// Input files are hand-edited, so a price might arrive as `28.1`, as
/// `"28.1"`, or as something that isn't a number at all. `Field` keeps
/// whatever was there, and leaves it to the catalog and the aggregator to
/// decide whether it's acceptable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Field {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Field {
    /// Returns the trimmed text of a [`Field::Text`], if it isn't blank.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Field::Text(text) => Some(text.trim()).filter(|name| !name.is_empty()),
            _ => None,
        }
    }

    /// Returns the numeric value of the field, parsing text if necessary.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(*n),
            Field::Text(text) => text.trim().parse().ok(),
            Field::Other(_) => None,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Number(n) => write!(f, "{n}"),
            Field::Text(text) => write!(f, "{text}"),
            Field::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Defines the format for price catalogue entries.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CatalogEntry {
    #[serde(alias = "Title")]
    pub title: Option<Field>,
    #[serde(alias = "Price")]
    pub price: Option<Field>,
}

/// Defines the format for sales record entries.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SaleEntry {
    #[serde(rename = "Product", alias = "product")]
    pub product: Option<Field>,
    #[serde(rename = "Quantity", alias = "quantity")]
    pub quantity: Option<Field>,
}

/// One entry of an input list, classified once at the boundary.
///
/// An entry that is an object becomes a [`Row::Record`], even if every field
/// in it is missing or nonsense; anything else (a bare number, a string, a
/// nested list) is a [`Row::Malformed`] carrying a description of what was
/// found instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Row<T> {
    Record(T),
    Malformed(String),
}

impl<T: DeserializeOwned> Row<T> {
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Row::Malformed(format!("expected an object, found {}", describe(&value)));
        }
        match serde_json::from_value(value) {
            Ok(record) => Row::Record(record),
            Err(err) => Row::Malformed(err.to_string()),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
