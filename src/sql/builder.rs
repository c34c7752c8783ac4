//! Builds parameterized SELECT, COUNT, INSERT, UPDATE, DELETE text for the CRUD helper.
//! Table and column names come from the resource registry; values are always `?` parameters.

use crate::sql::{ClauseFragment, Data};
use serde_json::Value;

/// Column alias used by every COUNT query.
pub const TOTAL_COLUMN: &str = "total";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new(sql: String, params: Vec<Value>) -> Self {
        QueryBuf { sql, params }
    }
}

fn with_page(mut params: Vec<Value>, limit: u32, offset: u32) -> Vec<Value> {
    params.push(Value::from(limit));
    params.push(Value::from(offset));
    params
}

/// SELECT * with LIMIT/OFFSET and no filter.
pub fn select_page(table: &str, limit: u32, offset: u32) -> QueryBuf {
    QueryBuf::new(
        format!("SELECT * FROM {} LIMIT ? OFFSET ?", table),
        with_page(Vec::new(), limit, offset),
    )
}

/// Unfiltered row count.
pub fn count_all(table: &str) -> QueryBuf {
    QueryBuf::new(
        format!("SELECT COUNT(*) AS {} FROM {}", TOTAL_COLUMN, table),
        Vec::new(),
    )
}

/// SELECT * WHERE fragment, no pagination.
pub fn select_where(table: &str, frag: &ClauseFragment) -> QueryBuf {
    QueryBuf::new(
        format!("SELECT * FROM {} WHERE {}", table, frag.where_sql),
        frag.params.clone(),
    )
}

/// SELECT * WHERE fragment with LIMIT/OFFSET appended after the filter params.
pub fn select_where_page(table: &str, frag: &ClauseFragment, limit: u32, offset: u32) -> QueryBuf {
    QueryBuf::new(
        format!("SELECT * FROM {} WHERE {} LIMIT ? OFFSET ?", table, frag.where_sql),
        with_page(frag.params.clone(), limit, offset),
    )
}

pub fn count_where(table: &str, frag: &ClauseFragment) -> QueryBuf {
    QueryBuf::new(
        format!(
            "SELECT COUNT(*) AS {} FROM {} WHERE {}",
            TOTAL_COLUMN, table, frag.where_sql
        ),
        frag.params.clone(),
    )
}

/// Caller-supplied SELECT with LIMIT/OFFSET appended. The caller's text must not paginate itself.
pub fn raw_page(raw: &str, params: &[Value], limit: u32, offset: u32) -> QueryBuf {
    QueryBuf::new(
        format!("{} LIMIT ? OFFSET ?", raw.trim()),
        with_page(params.to_vec(), limit, offset),
    )
}

/// Count over the caller-supplied SELECT, bound with the same params.
pub fn raw_count(raw: &str, params: &[Value]) -> QueryBuf {
    QueryBuf::new(
        format!("SELECT COUNT(*) AS {} FROM ({})", TOTAL_COLUMN, raw.trim()),
        params.to_vec(),
    )
}

/// INSERT ... RETURNING *; columns and placeholders in data order.
pub fn insert(table: &str, data: &Data) -> QueryBuf {
    let cols: Vec<&str> = data.keys().collect();
    let placeholders = vec!["?"; cols.len()];
    QueryBuf::new(
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            table,
            cols.join(", "),
            placeholders.join(", ")
        ),
        data.values().cloned().collect(),
    )
}

/// UPDATE ... SET from data, WHERE from fragment. Params: data values, then filter values.
pub fn update(table: &str, data: &Data, frag: &ClauseFragment) -> QueryBuf {
    let sets: Vec<String> = data.keys().map(|k| format!("{} = ?", k)).collect();
    let mut params: Vec<Value> = data.values().cloned().collect();
    params.extend(frag.params.iter().cloned());
    QueryBuf::new(
        format!("UPDATE {} SET {} WHERE {}", table, sets.join(", "), frag.where_sql),
        params,
    )
}

pub fn delete(table: &str, frag: &ClauseFragment) -> QueryBuf {
    QueryBuf::new(
        format!("DELETE FROM {} WHERE {}", table, frag.where_sql),
        frag.params.clone(),
    )
}
