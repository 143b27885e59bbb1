//! End-to-end tests driving the HTTP surface against a live MongoDB.
//!
//! Run with:
//! ```bash
//! cargo test --features integration-tests
//! ```
//!
//! Requires a MongoDB server, `127.0.0.1:27017` by default; override with
//! `PINGS_TEST_MONGO_URI`. Each test works in its own database so the suite
//! can run in parallel.

use pings_server::config::DatabaseConfig;
use pings_server::database::PingStore;
use pings_server::server::{AppState, router};

use std::collections::HashMap;

/// Spin up the full router on an ephemeral port, backed by a dedicated test
/// database, and return its base URL. The database is emptied first so
/// leftovers from an earlier run cannot leak in.
async fn start_test_server(dbname: &str) -> String {
    let uri = std::env::var("PINGS_TEST_MONGO_URI")
        .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());
    let config = DatabaseConfig {
        uri,
        dbname: dbname.to_string(),
    };
    let store = PingStore::connect(&config)
        .await
        .expect("test MongoDB not reachable");
    store.clear_all().await.expect("failed to empty test db");

    let app = router(AppState { store });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server died");
    });

    format!("http://{addr}")
}

async fn record(client: &reqwest::Client, base: &str, device_id: &str, epoch: &str) {
    let resp = client
        .post(format!("{base}/{device_id}/{epoch}"))
        .send()
        .await
        .expect("POST failed");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn health_check_answers_pong() {
    let base = start_test_server("pings_test_health").await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("{base}/ping"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "pong");
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn insert_then_query_round_trip() {
    let base = start_test_server("pings_test_roundtrip").await;
    let client = reqwest::Client::new();

    record(&client, &base, "d1", "1000").await;

    let timestamps: Vec<i64> = client
        .get(format!("{base}/d1/1000/1001"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(timestamps, vec![1000]);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn grouped_window_query_preserves_insert_order() {
    let base = start_test_server("pings_test_grouping").await;
    let client = reqwest::Client::new();

    record(&client, &base, "d1", "100").await;
    record(&client, &base, "d2", "150").await;
    record(&client, &base, "d1", "200").await;

    let grouped: HashMap<String, Vec<i64>> = client
        .get(format!("{base}/all/0/1000"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["d1"], vec![100, 200]);
    assert_eq!(grouped["d2"], vec![150]);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn window_start_is_inclusive_and_end_is_exclusive() {
    let base = start_test_server("pings_test_boundary").await;
    let client = reqwest::Client::new();

    record(&client, &base, "d1", "100").await;
    record(&client, &base, "d1", "150").await;
    record(&client, &base, "d1", "200").await;

    let timestamps: Vec<i64> = client
        .get(format!("{base}/d1/100/200"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(timestamps, vec![100, 150]);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn calendar_date_query_covers_exactly_one_utc_day() {
    let base = start_test_server("pings_test_calendar").await;
    let client = reqwest::Client::new();

    // 2016-02-24 runs from 1456272000 (inclusive) to 1456358400 (exclusive)
    record(&client, &base, "d1", "1456272000").await;
    record(&client, &base, "d1", "1456358399").await;
    record(&client, &base, "d1", "1456358400").await;

    let grouped: HashMap<String, Vec<i64>> = client
        .get(format!("{base}/all/2016-02-24"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(grouped["d1"], vec![1456272000, 1456358399]);

    let timestamps: Vec<i64> = client
        .get(format!("{base}/d1/2016-02-24"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(timestamps, vec![1456272000, 1456358399]);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn devices_lists_each_id_once() {
    let base = start_test_server("pings_test_devices").await;
    let client = reqwest::Client::new();

    record(&client, &base, "d1", "100").await;
    record(&client, &base, "d1", "200").await;
    record(&client, &base, "d2", "300").await;

    let mut devices: Vec<String> = client
        .get(format!("{base}/devices"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    devices.sort();
    assert_eq!(devices, vec!["d1", "d2"]);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn clear_data_empties_the_store_and_is_idempotent() {
    let base = start_test_server("pings_test_clear").await;
    let client = reqwest::Client::new();

    record(&client, &base, "d1", "100").await;

    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/clear_data"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let devices: Vec<String> = client
        .get(format!("{base}/devices"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn malformed_dates_are_rejected_with_400() {
    let base = start_test_server("pings_test_badinput").await;
    let client = reqwest::Client::new();

    // date-shaped but impossible
    let resp = client
        .get(format!("{base}/d1/2016-13-40"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // neither a date nor an epoch
    let resp = client
        .get(format!("{base}/all/yesterday"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn non_numeric_epoch_on_insert_coerces_to_zero() {
    let base = start_test_server("pings_test_coerce").await;
    let client = reqwest::Client::new();

    record(&client, &base, "d1", "garbage").await;

    let timestamps: Vec<i64> = client
        .get(format!("{base}/d1/0/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(timestamps, vec![0]);
}
