//! Filters, data payloads and WHERE-clause extraction.

use serde_json::Value;

/// Reserved pagination keys; never treated as filter columns.
pub const LIMIT_KEY: &str = "limit";
pub const OFFSET_KEY: &str = "offset";

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;

/// Ordered column/value pairs. Order decides both the SQL column order and the parameter order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnValues(Vec<(String, Value)>);

/// Equality filter for a WHERE clause.
pub type Filter = ColumnValues;
/// Column values for INSERT and UPDATE.
pub type Data = ColumnValues;

impl ColumnValues {
    pub fn new() -> Self {
        ColumnValues(Vec::new())
    }

    /// Builder form: `Filter::new().with("id", 1)`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a pair. A repeated key replaces the earlier value in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ColumnValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = ColumnValues::new();
        for (k, v) in iter {
            out.push(k, v);
        }
        out
    }
}

/// Parameterized WHERE text (without the `WHERE` keyword) and its positional parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClauseFragment {
    pub where_sql: String,
    pub params: Vec<Value>,
}

impl ClauseFragment {
    /// True when there is nothing to filter on.
    pub fn is_empty(&self) -> bool {
        self.where_sql.is_empty() || self.params.is_empty()
    }
}

/// Build `a = ? AND b = ?` from a filter, skipping `limit` and `offset`.
/// Column names are not validated; values only ever travel as parameters.
pub fn extract_query(filter: &Filter) -> ClauseFragment {
    let mut where_parts = Vec::new();
    let mut params = Vec::new();
    for (key, value) in filter.iter() {
        if key == LIMIT_KEY || key == OFFSET_KEY {
            continue;
        }
        where_parts.push(format!("{} = ?", key));
        params.push(value.clone());
    }
    ClauseFragment {
        where_sql: where_parts.join(" AND "),
        params,
    }
}

/// Pagination and count toggle for list operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Only `get_by_query` honours this; `None` means count.
    pub count: Option<bool>,
}

impl ListOptions {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        ListOptions {
            limit,
            offset,
            count: None,
        }
    }

    pub fn without_count(mut self) -> Self {
        self.count = Some(false);
        self
    }

    /// Effective limit: missing or zero falls back to the default, capped at `MAX_LIMIT`.
    pub fn limit(&self) -> u32 {
        match self.limit {
            Some(n) if n > 0 => n.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    pub fn count(&self) -> bool {
        self.count.unwrap_or(true)
    }

    /// Read `limit` / `offset` out of a filter (numbers or numeric strings).
    pub fn from_filter(filter: &Filter) -> Self {
        ListOptions::new(
            filter.get(LIMIT_KEY).and_then(value_as_u32),
            filter.get(OFFSET_KEY).and_then(value_as_u32),
        )
    }
}

fn value_as_u32(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_gives_empty_fragment() {
        let frag = extract_query(&Filter::new());
        assert_eq!(frag.where_sql, "");
        assert!(frag.params.is_empty());
        assert!(frag.is_empty());
    }

    #[test]
    fn pagination_only_filter_gives_empty_fragment() {
        let filter = Filter::new().with("limit", 5).with("offset", 20);
        let frag = extract_query(&filter);
        assert_eq!(frag, ClauseFragment::default());
        assert!(frag.is_empty());
    }

    #[test]
    fn builds_placeholders_in_filter_order() {
        let filter = Filter::new().with("a", 1).with("b", "x").with("limit", 5);
        let frag = extract_query(&filter);
        assert_eq!(frag.where_sql, "a = ? AND b = ?");
        assert_eq!(frag.params, vec![json!(1), json!("x")]);
    }

    #[test]
    fn placeholder_count_matches_params() {
        let filter: Filter = vec![("z", json!(3)), ("offset", json!(1)), ("y", json!(null)), ("x", json!(true))]
            .into_iter()
            .collect();
        let frag = extract_query(&filter);
        assert_eq!(frag.where_sql.matches('?').count(), frag.params.len());
        assert_eq!(frag.where_sql, "z = ? AND y = ? AND x = ?");
    }

    #[test]
    fn repeated_key_keeps_first_position() {
        let mut filter = Filter::new().with("a", 1).with("b", 2);
        filter.push("a", 9);
        assert_eq!(filter.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(filter.get("a"), Some(&json!(9)));
    }

    #[test]
    fn list_options_defaults_and_cap() {
        let opts = ListOptions::default();
        assert_eq!((opts.limit(), opts.offset(), opts.count()), (10, 0, true));
        assert_eq!(ListOptions::new(Some(0), None).limit(), 10);
        assert_eq!(ListOptions::new(Some(5000), Some(3)).limit(), MAX_LIMIT);
        assert!(!ListOptions::default().without_count().count());
    }

    #[test]
    fn list_options_from_filter_accepts_strings() {
        let filter = Filter::new().with("limit", "25").with("offset", 50).with("name", "Rock");
        let opts = ListOptions::from_filter(&filter);
        assert_eq!(opts.limit(), 25);
        assert_eq!(opts.offset(), 50);
    }
}
