mod common;

use axum::http::StatusCode;
use chinook_api::{CrudHelper, Data, Filter, ListOptions, SqlExecutor};
use serde_json::{json, Value};
use std::sync::Arc;

async fn helper() -> CrudHelper {
    CrudHelper::new(Arc::new(common::seeded_executor().await))
}

#[tokio::test]
async fn get_all_pages_rows_but_counts_whole_table() {
    let h = helper().await;
    let env = h.get_all("genres", &ListOptions::default()).await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.result["rows"].as_array().map(Vec::len), Some(10));
    assert_eq!(env.result["total"], 12);

    let env = h.get_all("genres", &ListOptions::new(Some(5), Some(10))).await;
    let rows = env.result["rows"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Bossa Nova");
    assert_eq!(env.result["total"], 12);
}

#[tokio::test]
async fn get_by_id_returns_row_or_null() {
    let h = helper().await;
    let env = h.get_by_id("genres", &Filter::new().with("genre_id", 2)).await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.result, json!({ "genre_id": 2, "name": "Jazz" }));

    let env = h.get_by_id("genres", &Filter::new().with("genre_id", 999)).await;
    assert_eq!(env.status, StatusCode::OK);
    assert!(env.result.is_null());
}

#[tokio::test]
async fn get_by_query_filters_and_counts_matches() {
    let h = helper().await;
    let filter = Filter::new().with("album_id", 1).with("limit", 2);
    let opts = ListOptions::from_filter(&filter);
    let env = h.get_by_query("tracks", &filter, &opts).await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.result["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(env.result["total"], 3);
    assert_eq!(env.result["rows"][0]["unit_price"], 0.99);
}

#[tokio::test]
async fn raw_query_paginates_and_counts_join() {
    let h = helper().await;
    let sql = "
        SELECT tracks.* FROM tracks
        INNER JOIN playlist_track ON tracks.track_id = playlist_track.track_id
        WHERE playlist_track.playlist_id = ?
    ";
    let env = h.get_by_raw_query(sql, &[json!(1)], &ListOptions::new(Some(2), None)).await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.result["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(env.result["total"], 3);
}

#[tokio::test]
async fn create_returns_inserted_row() {
    let h = helper().await;
    assert_eq!(h.create("genres", &Data::new()).await.status, StatusCode::UNPROCESSABLE_ENTITY);

    let env = h.create("genres", &Data::new().with("name", "Rock")).await;
    assert_eq!(env.status, StatusCode::CREATED);
    assert_eq!(env.result, json!({ "genre_id": 13, "name": "Rock" }));
}

#[tokio::test]
async fn update_rereads_row_and_rejects_missing() {
    let h = helper().await;
    let env = h
        .update("genres", &Data::new().with("name", "Heavy Metal"), &Filter::new().with("genre_id", 3))
        .await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.result["name"], "Heavy Metal");

    let env = h
        .update("genres", &Data::new().with("name", "X"), &Filter::new().with("genre_id", 999))
        .await;
    assert_eq!(env.status, StatusCode::NOT_FOUND);
    assert_eq!(env.result["error"], "Not found");
}

#[tokio::test]
async fn delete_removes_row() {
    let h = helper().await;
    let env = h.delete("genres", &Filter::new().with("genre_id", 12)).await;
    assert_eq!(env.status, StatusCode::OK);
    assert_eq!(env.result, json!({ "deleted": true, "changes": 1 }));

    let env = h.get_by_id("genres", &Filter::new().with("genre_id", 12)).await;
    assert_eq!(env.result, Value::Null);
}

#[tokio::test]
async fn database_errors_become_500_with_driver_message() {
    let h = helper().await;
    let env = h.get_all("no_such_table", &ListOptions::default()).await;
    assert_eq!(env.status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = env.result["error"].as_str().unwrap_or_default();
    assert!(message.contains("no such table"), "got {message}");
}

#[tokio::test]
async fn executor_run_reports_changes() {
    let exec = common::seeded_executor().await;
    let changed = exec
        .run("UPDATE tracks SET unit_price = ? WHERE album_id = ?", &[json!(1.29), json!(1)])
        .await
        .unwrap();
    assert_eq!(changed, 3);
    let row = exec
        .get("SELECT unit_price, composer FROM tracks WHERE track_id = ?", &[json!(4)])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row, json!({ "unit_price": 0.99, "composer": null }));
}

#[tokio::test]
async fn blob_cells_decode_as_byte_arrays() {
    let exec = common::seeded_executor().await;
    let row = exec.get("SELECT x'0102ff' AS b, NULL AS n", &[]).await.unwrap();
    assert_eq!(row, Some(json!({ "b": [1, 2, 255], "n": null })));
}
