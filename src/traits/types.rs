//! Shared value types for record operations.
//!
//! Filters and update payloads accept arbitrary column names, but values are
//! restricted to [`Scalar`]s so the boundary stays explicit.

use std::fmt;

use schemars::JsonSchema;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// A row as returned by the backend: column name to JSON value.
///
/// Rows are passed through untouched; no schema coercion is applied.
pub type Row = serde_json::Map<String, Value>;

/// A single column value usable in filters and updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Scalar {
    /// SQL `NULL`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer or floating point number.
    Number(Number),
    /// Text value.
    String(String),
}

impl Scalar {
    /// Renders this value as a PostgREST equality operand.
    ///
    /// `NULL` cannot be matched with `eq`, so it becomes `is.null`.
    ///
    /// ```
    /// use supabase_mcp::traits::Scalar;
    ///
    /// assert_eq!(Scalar::from("electronics").to_filter_operand(), "eq.electronics");
    /// assert_eq!(Scalar::from(123).to_filter_operand(), "eq.123");
    /// assert_eq!(Scalar::Null.to_filter_operand(), "is.null");
    /// ```
    #[must_use]
    pub fn to_filter_operand(&self) -> String {
        match self {
            Self::Null => "is.null".to_string(),
            Self::Bool(b) => format!("eq.{b}"),
            Self::Number(n) => format!("eq.{n}"),
            Self::String(s) => format!("eq.{s}"),
        }
    }

    /// Returns true if a stored column value equals this scalar.
    ///
    /// A missing column matches only `NULL`. Numbers compare by value,
    /// so `1` matches `1.0`.
    #[must_use]
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Self::Null, None | Some(Value::Null)) => true,
            (Self::Bool(expected), Some(Value::Bool(actual))) => expected == actual,
            (Self::Number(expected), Some(Value::Number(actual))) => {
                expected == actual || expected.as_f64() == actual.as_f64()
            }
            (Self::String(expected), Some(Value::String(actual))) => expected == actual,
            (Self::String(expected), Some(Value::Number(actual))) => {
                *expected == actual.to_string()
            }
            _ => false,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Self::Null,
            Scalar::Bool(b) => Self::Bool(b),
            Scalar::Number(n) => Self::Number(n),
            Scalar::String(s) => Self::String(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Scalar {
    /// Non-finite values have no JSON representation and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

/// An insertion-ordered mapping of column name to [`Scalar`].
///
/// Iteration order is the order columns were inserted (or appeared in the
/// incoming JSON object). Re-inserting a column replaces its value in place.
///
/// # Example
///
/// ```
/// use supabase_mcp::traits::{ColumnMap, Scalar};
///
/// let filters = ColumnMap::new().with("category", "electronics").with("in_stock", true);
/// let columns: Vec<&str> = filters.iter().map(|(c, _)| c).collect();
/// assert_eq!(columns, vec!["category", "in_stock"]);
/// assert_eq!(filters.get("in_stock"), Some(&Scalar::Bool(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap(Vec<(String, Scalar)>);

/// Conjunctive equality constraints on rows.
pub type FilterSet = ColumnMap;

/// Column values to write in an update.
pub type ValueMap = ColumnMap;

impl ColumnMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        let column = column.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(c, _)| *c == column) {
            slot.1 = value;
        } else {
            self.0.push((column, value));
        }
    }

    /// Builder-style [`ColumnMap::insert`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(column, value);
        self
    }

    /// Looks up a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.0.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no columns are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates columns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Returns true if every entry matches the corresponding column of `row`.
    ///
    /// An empty map matches every row.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        self.iter().all(|(column, value)| value.matches(row.get(column)))
    }

    /// Converts to a JSON object, preserving values.
    #[must_use]
    pub fn to_json_object(&self) -> Row {
        self.0
            .iter()
            .map(|(c, v)| (c.clone(), Value::from(v.clone())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (column, value) in iter {
            map.insert(column, value);
        }
        map
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, value) in &self.0 {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnMapVisitor;

        impl<'de> Visitor<'de> for ColumnMapVisitor {
            type Value = ColumnMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping column names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ColumnMap, A::Error> {
                let mut map = ColumnMap::new();
                while let Some((column, value)) = access.next_entry::<String, Scalar>()? {
                    map.insert(column, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ColumnMapVisitor)
    }
}
