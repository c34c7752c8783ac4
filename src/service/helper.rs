//! Generic CRUD execution over an injected executor. Every operation returns an `Envelope`.

use crate::error::AppError;
use crate::executor::SqlExecutor;
use crate::response::Envelope;
use crate::sql::{self, extract_query, ClauseFragment, Data, Filter, ListOptions, QueryBuf, TOTAL_COLUMN};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

const MISSING_FILTER: &str = "Please provide field and value";
const MISSING_DATA: &str = "Please provide data";
const MISSING_QUERY: &str = "Please provide query";

pub struct CrudHelper {
    executor: Arc<dyn SqlExecutor>,
}

impl CrudHelper {
    pub fn new(executor: Arc<dyn SqlExecutor>) -> Self {
        CrudHelper { executor }
    }

    pub fn executor(&self) -> &Arc<dyn SqlExecutor> {
        &self.executor
    }

    /// One page of the whole table plus the unfiltered row count.
    pub async fn get_all(&self, table: &str, options: &ListOptions) -> Envelope {
        let page = sql::select_page(table, options.limit(), options.offset());
        let count = sql::count_all(table);
        match self.rows_and_total(&page, Some(&count)).await {
            Ok(result) => Envelope::ok(result),
            Err(e) => Envelope::from_error("getAll", &e),
        }
    }

    /// Single row matching the filter. The payload is `null` when nothing matches.
    pub async fn get_by_id(&self, table: &str, filter: &Filter) -> Envelope {
        let frag = extract_query(filter);
        if frag.is_empty() {
            return Envelope::from_error("getById", &AppError::BadRequest(MISSING_FILTER.into()));
        }
        let q = sql::select_where(table, &frag);
        match self.executor.get(&q.sql, &q.params).await {
            Ok(row) => Envelope::ok(row.unwrap_or(Value::Null)),
            Err(e) => Envelope::from_error("getById", &e),
        }
    }

    /// Paginate a caller-supplied SELECT and count it by wrapping the same text.
    pub async fn get_by_raw_query(&self, raw: &str, params: &[Value], options: &ListOptions) -> Envelope {
        if raw.trim().is_empty() {
            return Envelope::from_error("executeQuery", &AppError::BadRequest(MISSING_QUERY.into()));
        }
        let page = sql::raw_page(raw, params, options.limit(), options.offset());
        let count = sql::raw_count(raw, params);
        match self.rows_and_total(&page, Some(&count)).await {
            Ok(result) => Envelope::ok(result),
            Err(e) => Envelope::from_error("executeQuery", &e),
        }
    }

    /// Filtered page; the count query runs only when `options.count()` is set (otherwise `total` is 0).
    pub async fn get_by_query(&self, table: &str, filter: &Filter, options: &ListOptions) -> Envelope {
        let frag = extract_query(filter);
        if frag.is_empty() {
            return Envelope::from_error("executeQuery", &AppError::BadRequest(MISSING_FILTER.into()));
        }
        let page = sql::select_where_page(table, &frag, options.limit(), options.offset());
        let count = options.count().then(|| sql::count_where(table, &frag));
        match self.rows_and_total(&page, count.as_ref()).await {
            Ok(result) => Envelope::ok(result),
            Err(e) => Envelope::from_error("executeQuery", &e),
        }
    }

    /// Probe with `get_by_id`. `None` means the row exists and the caller may proceed.
    ///
    /// A 400 from the probe (unusable filter) is reported as 404 rather than re-surfaced.
    pub async fn check_exists(&self, table: &str, filter: &Filter) -> Option<Envelope> {
        let probe = self.get_by_id(table, filter).await;
        match probe.status.as_u16() {
            500 => Some(probe),
            400 => Some(Envelope::not_found()),
            200 if probe.result.is_null() => Some(Envelope::not_found()),
            200 => None,
            _ => Some(Envelope::error(StatusCode::INTERNAL_SERVER_ERROR, "Unexpected status")),
        }
    }

    async fn verify_data(&self, table: &str, data: &Data, frag: &ClauseFragment, filter: &Filter) -> Option<Envelope> {
        if data.is_empty() {
            return Some(Envelope::from_error("update", &AppError::Validation(MISSING_DATA.into())));
        }
        if frag.is_empty() {
            return Some(Envelope::from_error("update", &AppError::BadRequest(MISSING_FILTER.into())));
        }
        self.check_exists(table, filter).await
    }

    /// Update matching rows, then return the first matching row as it now reads.
    pub async fn update(&self, table: &str, data: &Data, filter: &Filter) -> Envelope {
        let frag = extract_query(filter);
        if let Some(rejected) = self.verify_data(table, data, &frag, filter).await {
            return rejected;
        }
        let q = sql::update(table, data, &frag);
        let result = async {
            self.executor.run(&q.sql, &q.params).await?;
            let reread = sql::select_where(table, &frag);
            let row = self.executor.get(&reread.sql, &reread.params).await?;
            Ok::<_, AppError>(row.unwrap_or(Value::Null))
        }
        .await;
        match result {
            Ok(row) => Envelope::ok(row),
            Err(e) => Envelope::from_error("update", &e),
        }
    }

    pub async fn delete(&self, table: &str, filter: &Filter) -> Envelope {
        let frag = extract_query(filter);
        if frag.is_empty() {
            return Envelope::from_error("delete", &AppError::BadRequest(MISSING_FILTER.into()));
        }
        let q = sql::delete(table, &frag);
        match self.executor.run(&q.sql, &q.params).await {
            Ok(changes) => Envelope::ok(json!({ "deleted": true, "changes": changes })),
            Err(e) => Envelope::from_error("delete", &e),
        }
    }

    /// Insert one row and return it as stored (201).
    pub async fn create(&self, table: &str, data: &Data) -> Envelope {
        if data.is_empty() {
            return Envelope::from_error("create", &AppError::Validation(MISSING_DATA.into()));
        }
        let q = sql::insert(table, data);
        match self.executor.get(&q.sql, &q.params).await {
            Ok(row) => Envelope::created(row.unwrap_or(Value::Null)),
            Err(e) => Envelope::from_error("create", &e),
        }
    }

    async fn rows_and_total(&self, page: &QueryBuf, count: Option<&QueryBuf>) -> Result<Value, AppError> {
        let rows = self.executor.all(&page.sql, &page.params).await?;
        let total = match count {
            Some(c) => self
                .executor
                .get(&c.sql, &c.params)
                .await?
                .as_ref()
                .and_then(|row| row.get(TOTAL_COLUMN))
                .and_then(Value::as_u64)
                .unwrap_or(0),
            None => 0,
        };
        Ok(json!({ "rows": rows, "total": total }))
    }
}
