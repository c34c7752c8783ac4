//! Resource handlers: list, read, create, update, delete, named raw query.
//! Each handler resolves the resource by path and hands the helper's envelope straight back.

use crate::case::to_snake_case;
use crate::config::{ColumnType, Operation, ResolvedResource};
use crate::error::AppError;
use crate::response::Envelope;
use crate::sql::{Data, Filter, ListOptions, LIMIT_KEY, OFFSET_KEY};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde_json::Value;

fn resource<'a>(state: &'a AppState, path: &str, op: Operation) -> Result<&'a ResolvedResource, AppError> {
    let resource = state
        .registry
        .by_path(path)
        .ok_or_else(|| AppError::NotFound(format!("resource {}", path)))?;
    if !resource.allows(op) {
        return Err(AppError::BadRequest(format!("{} not allowed", op.as_str())));
    }
    Ok(resource)
}

/// Typed value for a path or query-string string. Unparsable input stays a string.
fn value_for_type(type_: ColumnType, s: &str) -> Value {
    match type_ {
        ColumnType::Integer => s.parse::<i64>().map(Value::from).unwrap_or_else(|_| Value::from(s)),
        ColumnType::Real => s.parse::<f64>().map(Value::from).unwrap_or_else(|_| Value::from(s)),
        ColumnType::Boolean => {
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Value::Bool(true)
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Value::Bool(false)
            } else {
                Value::from(s)
            }
        }
        ColumnType::Text => Value::from(s),
    }
}

/// Split query-string pairs into column filters and pagination. Unknown keys are ignored.
/// An unparsable `limit`, `offset` or `count` (e.g. `limit=-1`) falls back to its default.
fn split_query(resource: &ResolvedResource, params: Vec<(String, String)>) -> (Filter, ListOptions) {
    let mut filter = Filter::new();
    let mut options = ListOptions::default();
    for (k, v) in params {
        let key = to_snake_case(&k);
        match key.as_str() {
            LIMIT_KEY => options.limit = v.trim().parse().ok(),
            OFFSET_KEY => options.offset = v.trim().parse().ok(),
            "count" => options.count = v.trim().parse().ok(),
            _ => {
                if let Some(col) = resource.column(&key) {
                    let val = value_for_type(col.type_, &v);
                    filter.push(key, val);
                }
            }
        }
    }
    (filter, options)
}

/// Keep only declared columns, in declaration order. Keys may arrive in camelCase.
fn body_to_data(resource: &ResolvedResource, body: Value) -> Result<Data, AppError> {
    let Value::Object(obj) = body else {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    };
    let mut fields: Vec<(String, Value)> = obj.into_iter().map(|(k, v)| (to_snake_case(&k), v)).collect();
    let mut data = Data::new();
    for col in &resource.columns {
        if let Some(pos) = fields.iter().position(|(k, _)| *k == col.name) {
            let (k, v) = fields.swap_remove(pos);
            data.push(k, v);
        }
    }
    Ok(data)
}

/// Body extraction failures answer with the same `{"error": ...}` body as every other error.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn pk_filter(resource: &ResolvedResource, id: &str) -> Filter {
    Filter::new().with(
        resource.primary_key.clone(),
        value_for_type(resource.primary_key_type(), id),
    )
}

pub async fn list(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Envelope, AppError> {
    let resource = resource(&state, &path, Operation::List)?;
    let (filter, options) = split_query(resource, params);
    let env = if filter.is_empty() {
        state.helper.get_all(&resource.table, &options).await
    } else {
        state.helper.get_by_query(&resource.table, &filter, &options).await
    };
    Ok(env)
}

pub async fn read(
    State(state): State<AppState>,
    Path((path, id)): Path<(String, String)>,
) -> Result<Envelope, AppError> {
    let resource = resource(&state, &path, Operation::Read)?;
    Ok(state.helper.get_by_id(&resource.table, &pk_filter(resource, &id)).await)
}

pub async fn create(
    State(state): State<AppState>,
    Path(path): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Envelope, AppError> {
    let resource = resource(&state, &path, Operation::Create)?;
    let data = body_to_data(resource, json_body(payload)?)?;
    Ok(state.helper.create(&resource.table, &data).await)
}

pub async fn update(
    State(state): State<AppState>,
    Path((path, id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Envelope, AppError> {
    let resource = resource(&state, &path, Operation::Update)?;
    let mut data = body_to_data(resource, json_body(payload)?)?;
    data.remove(&resource.primary_key);
    Ok(state
        .helper
        .update(&resource.table, &data, &pk_filter(resource, &id))
        .await)
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path, id)): Path<(String, String)>,
) -> Result<Envelope, AppError> {
    let resource = resource(&state, &path, Operation::Delete)?;
    Ok(state.helper.delete(&resource.table, &pk_filter(resource, &id)).await)
}

/// GET /:resource/:id/:query runs the named SELECT with the path id as its parameter.
pub async fn query(
    State(state): State<AppState>,
    Path((path, id, name)): Path<(String, String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Envelope, AppError> {
    let resource = resource(&state, &path, Operation::Query)?;
    let sql = resource
        .queries
        .get(&name)
        .ok_or_else(|| AppError::NotFound(format!("query {}", name)))?;
    let (_, options) = split_query(resource, params);
    let id = value_for_type(resource.primary_key_type(), &id);
    Ok(state.helper.get_by_raw_query(sql, &[id], &options).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnInfo;
    use serde_json::json;
    use std::collections::{HashMap, HashSet};

    fn tracks() -> ResolvedResource {
        ResolvedResource {
            table: "tracks".into(),
            path: "tracks".into(),
            label: "Tracks".into(),
            primary_key: "track_id".into(),
            columns: vec![
                ColumnInfo { name: "track_id".into(), type_: ColumnType::Integer },
                ColumnInfo { name: "name".into(), type_: ColumnType::Text },
                ColumnInfo { name: "unit_price".into(), type_: ColumnType::Real },
                ColumnInfo { name: "album_id".into(), type_: ColumnType::Integer },
            ],
            operations: Operation::ALL.into_iter().collect::<HashSet<_>>(),
            queries: HashMap::new(),
        }
    }

    #[test]
    fn query_string_splits_into_filter_and_page() {
        let params = vec![
            ("albumId".to_string(), "3".to_string()),
            ("limit".to_string(), "5".to_string()),
            ("sort".to_string(), "name".to_string()),
            ("count".to_string(), "false".to_string()),
        ];
        let (filter, options) = split_query(&tracks(), params);
        assert_eq!(filter, Filter::new().with("album_id", 3));
        assert_eq!(options.limit(), 5);
        assert!(!options.count());
    }

    #[test]
    fn unparsable_pagination_falls_back_to_defaults() {
        let params = vec![
            ("limit".to_string(), "-1".to_string()),
            ("offset".to_string(), "abc".to_string()),
            ("count".to_string(), "maybe".to_string()),
        ];
        let (filter, options) = split_query(&tracks(), params);
        assert!(filter.is_empty());
        assert_eq!((options.limit(), options.offset(), options.count()), (10, 0, true));
    }

    #[test]
    fn body_keeps_declared_columns_in_order() {
        let body = json!({ "unitPrice": 0.99, "name": "Intro", "bogus": 1 });
        let data = body_to_data(&tracks(), body).unwrap();
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["name", "unit_price"]);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = body_to_data(&tracks(), json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn values_follow_column_type() {
        assert_eq!(value_for_type(ColumnType::Integer, "42"), json!(42));
        assert_eq!(value_for_type(ColumnType::Integer, "abc"), json!("abc"));
        assert_eq!(value_for_type(ColumnType::Real, "1.5"), json!(1.5));
        assert_eq!(value_for_type(ColumnType::Boolean, "TRUE"), json!(true));
        assert_eq!(value_for_type(ColumnType::Text, "7"), json!("7"));
    }
}
