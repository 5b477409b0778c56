// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CONFIG_HEADERS, PersistenceError, Row, SqliteTabularStore, TRIP_HEADERS, TRIPS_RANGE,
    TabularStore,
};

fn row(cells: &[&str]) -> Row {
    cells.iter().map(|c| (*c).to_string()).collect()
}

#[tokio::test]
async fn test_fresh_database_has_headed_sheets() {
    let store = SqliteTabularStore::new_in_memory().unwrap();

    let trips: Vec<Row> = store.read_rows(TRIPS_RANGE).await.unwrap();
    let config: Vec<Row> = store.read_rows("Config").await.unwrap();

    assert_eq!(trips, vec![row(&TRIP_HEADERS)]);
    assert_eq!(config, vec![row(&CONFIG_HEADERS)]);
}

#[tokio::test]
async fn test_in_memory_stores_are_isolated() {
    let first = SqliteTabularStore::new_in_memory().unwrap();
    let second = SqliteTabularStore::new_in_memory().unwrap();

    first
        .append_rows(TRIPS_RANGE, vec![row(&["a", "b"])])
        .await
        .unwrap();

    assert_eq!(first.read_rows(TRIPS_RANGE).await.unwrap().len(), 2);
    assert_eq!(second.read_rows(TRIPS_RANGE).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rows_keep_append_order_and_ragged_width() {
    let store = SqliteTabularStore::new_in_memory().unwrap();

    store
        .append_rows("Trips", vec![row(&["1"]), row(&["2", "two"])])
        .await
        .unwrap();
    store.append_rows("Trips", vec![row(&[])]).await.unwrap();

    let rows: Vec<Row> = store.read_rows("Trips").await.unwrap();
    assert_eq!(&rows[1..], &[row(&["1"]), row(&["2", "two"]), row(&[])]);
}

#[tokio::test]
async fn test_unknown_sheet_is_an_error() {
    let store = SqliteTabularStore::new_in_memory().unwrap();

    let result = store.append_rows("Archive!A:L", vec![row(&["x"])]).await;

    assert_eq!(
        result,
        Err(PersistenceError::SheetNotFound(String::from("Archive")))
    );
}

#[tokio::test]
async fn test_write_rows_replaces_sheet_contents() {
    let store = SqliteTabularStore::new_in_memory().unwrap();

    store
        .write_rows("Config!A:D", vec![row(&["Key"]), row(&["a", "1"])])
        .await
        .unwrap();

    assert_eq!(
        store.read_rows("Config").await.unwrap(),
        vec![row(&["Key"]), row(&["a", "1"])]
    );
}

#[tokio::test]
async fn test_add_sheet_writes_headers_and_rejects_duplicates() {
    let store = SqliteTabularStore::new_in_memory().unwrap();

    store.add_sheet("2026-10", row(&["H1", "H2"])).await.unwrap();
    let duplicate = store.add_sheet("2026-10", row(&["H1"])).await;

    assert_eq!(
        store.read_rows("'2026-10'!A1:L1").await.unwrap(),
        vec![row(&["H1", "H2"])]
    );
    assert_eq!(
        duplicate,
        Err(PersistenceError::SheetExists(String::from("2026-10")))
    );
}

#[tokio::test]
async fn test_file_backed_store_persists_across_reopen() {
    let path = std::env::temp_dir().join(format!(
        "fleetdash-sqlite-test-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let store = SqliteTabularStore::new_with_file(&path).unwrap();
        store
            .append_rows(TRIPS_RANGE, vec![row(&["kept"])])
            .await
            .unwrap();
    }
    let reopened = SqliteTabularStore::new_with_file(&path).unwrap();
    let rows: Vec<Row> = reopened.read_rows(TRIPS_RANGE).await.unwrap();

    assert_eq!(rows.last(), Some(&row(&["kept"])));
    drop(reopened);
    let _ = std::fs::remove_file(&path);
}
