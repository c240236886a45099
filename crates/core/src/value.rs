//! Dynamic values handed over by the scripting host.
//!
//! `DynamicValue` mirrors what a scripting runtime can express: primitives,
//! ordered lists and ordered key/value tables. Numeric semantics follow the
//! host: an `Integer` also counts as a number, a `Number` never counts as an
//! integer. Lists and mappings are both "tables"; a list's entries carry
//! implicit 1-based integer keys.

/// A value produced by the scripting caller.
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicValue {
    /// nil
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Double precision number
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Sequence table
    List(Vec<DynamicValue>),
    /// Keyed table in caller order
    Mapping(Mapping),
}

/// An ordered sequence of key/value pairs.
///
/// Keys are arbitrary dynamic values; entries keep the order the caller
/// supplied them in and duplicates are not collapsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(DynamicValue, DynamicValue)>,
}

impl Mapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a mapping with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, key: impl Into<DynamicValue>, value: impl Into<DynamicValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style append.
    pub fn with(mut self, key: impl Into<DynamicValue>, value: impl Into<DynamicValue>) -> Self {
        self.push(key, value);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first value stored under a string key.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Iterates entries in caller order.
    pub fn iter(&self) -> impl Iterator<Item = (&DynamicValue, &DynamicValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates values in caller order.
    pub fn values(&self) -> impl Iterator<Item = &DynamicValue> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<DynamicValue>,
    V: Into<DynamicValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl DynamicValue {
    /// Creates a mapping value from key/value pairs.
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<DynamicValue>,
        V: Into<DynamicValue>,
    {
        DynamicValue::Mapping(entries.into_iter().collect())
    }

    /// Creates a list value.
    pub fn list<T: Into<DynamicValue>>(items: impl IntoIterator<Item = T>) -> Self {
        DynamicValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns a short name of the value's shape for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            DynamicValue::Null => "nil",
            DynamicValue::Boolean(_) => "boolean",
            DynamicValue::Integer(_) => "integer",
            DynamicValue::Number(_) => "number",
            DynamicValue::String(_) => "string",
            DynamicValue::List(_) | DynamicValue::Mapping(_) => "table",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    /// Returns true for lists and mappings.
    #[inline]
    pub fn is_table(&self) -> bool {
        matches!(self, DynamicValue::List(_) | DynamicValue::Mapping(_))
    }

    /// Returns the boolean value if this is a Boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DynamicValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as f64 if this is an Integer or a Number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DynamicValue::Integer(i) => Some(*i as f64),
            DynamicValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the mapping if this is a Mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            DynamicValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the number of entries if this is a table.
    pub fn table_len(&self) -> Option<usize> {
        match self {
            DynamicValue::List(items) => Some(items.len()),
            DynamicValue::Mapping(m) => Some(m.len()),
            _ => None,
        }
    }

    /// Returns the table's entries as (key, value) pairs in iteration order.
    ///
    /// List entries get their 1-based integer keys.
    pub fn table_entries(&self) -> Option<Vec<(DynamicValue, &DynamicValue)>> {
        match self {
            DynamicValue::List(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (DynamicValue::Integer(i as i64 + 1), v))
                    .collect(),
            ),
            DynamicValue::Mapping(m) => Some(m.iter().map(|(k, v)| (k.clone(), v)).collect()),
            _ => None,
        }
    }

    /// Returns the table's values in iteration order.
    pub fn table_values(&self) -> Option<Vec<&DynamicValue>> {
        match self {
            DynamicValue::List(items) => Some(items.iter().collect()),
            DynamicValue::Mapping(m) => Some(m.values().collect()),
            _ => None,
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        DynamicValue::Boolean(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        DynamicValue::Integer(v as i64)
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        DynamicValue::Integer(v)
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        DynamicValue::Number(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        DynamicValue::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        DynamicValue::String(v.to_string())
    }
}

impl From<Mapping> for DynamicValue {
    fn from(v: Mapping) -> Self {
        DynamicValue::Mapping(v)
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        DynamicValue::list(v)
    }
}

impl<T> From<Option<T>> for DynamicValue
where
    T: Into<DynamicValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => DynamicValue::Null,
        }
    }
}

/// JSON objects keep their key order (serde_json `preserve_order`), so the
/// caller's field order survives the conversion.
impl From<serde_json::Value> for DynamicValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => DynamicValue::Null,
            serde_json::Value::Bool(b) => DynamicValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => DynamicValue::Integer(i),
                None => DynamicValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => DynamicValue::String(s),
            serde_json::Value::Array(items) => {
                DynamicValue::List(items.into_iter().map(DynamicValue::from).collect())
            }
            serde_json::Value::Object(map) => DynamicValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (DynamicValue::String(k), DynamicValue::from(v)))
                    .collect(),
            ),
        }
    }
}
