use mockito::{Matcher, ServerGuard};

use workspace_metrics::models::{Aggregation, NOT_AVAILABLE};
use workspace_metrics::{ApiClient, MetricsCollector};

use chrono::{TimeZone, Utc};

fn collector_for(server: &ServerGuard) -> MetricsCollector {
    let to = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
    let from = to - chrono::Duration::hours(47);
    let client = ApiClient::new(server.url(), "token");
    MetricsCollector::new(client, Aggregation::Hourly, from, to)
}

/// One floor, one workspace; duration returns two items, temperature one,
/// every other metric fails. Expect exactly three rows.
#[test]
fn test_collect_flattens_successful_series() {
    let mut server = mockito::Server::new();

    let _floors = server
        .mock("GET", "/workspaceLocations/loc-1/floors")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "floor-1", "floorNumber": 3}]}"#)
        .create();
    let _workspaces = server
        .mock("GET", "/workspaces")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "ws-1"}]}"#)
        .create();
    let _detail = server
        .mock("GET", "/workspaces/ws-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "ws-1", "displayName": "Huddle 1", "capacity": 4}"#)
        .create();
    let _duration = server
        .mock("GET", "/workspaceDurationMetrics")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"items": [
                {"start": "2024-03-10T10:00:00Z", "end": "2024-03-10T11:00:00Z", "duration": 600},
                {"start": "2024-03-10T11:00:00Z", "end": "2024-03-10T12:00:00Z", "duration": 1200}
            ]}"#,
        )
        .create();
    // Registered before the temperature mock so the newer, more specific
    // mock wins for metricName=temperature.
    let _failing_metrics = server
        .mock("GET", "/workspaceMetrics")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();
    let _temperature = server
        .mock("GET", "/workspaceMetrics")
        .match_query(Matcher::UrlEncoded(
            "metricName".into(),
            "temperature".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"items": [
                {"start": "2024-03-10T11:00:00Z", "end": "2024-03-10T12:00:00Z", "mean": 21.5, "min": 20.0, "max": 23.0}
            ]}"#,
        )
        .create();

    let rows = collector_for(&server).collect("loc-1");

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.workspace_name, "Huddle 1");
        assert_eq!(row.floor_number, 3);
        assert_eq!(row.capacity, Some(4));
    }

    let duration_rows: Vec<_> = rows.iter().filter(|r| r.metric_name == "duration").collect();
    assert_eq!(duration_rows.len(), 2);
    assert_eq!(duration_rows[0].duration, Some(600.0));
    assert!(duration_rows.iter().all(|r| r.mean.is_none()
        && r.min.is_none()
        && r.max.is_none()));

    let temp_rows: Vec<_> = rows
        .iter()
        .filter(|r| r.metric_name == "temperature")
        .collect();
    assert_eq!(temp_rows.len(), 1);
    assert_eq!(temp_rows[0].mean, Some(21.5));
    assert!(temp_rows[0].duration.is_none());
}

#[test]
fn test_collect_zero_floors_yields_zero_rows() {
    let mut server = mockito::Server::new();
    let _floors = server
        .mock("GET", "/workspaceLocations/loc-1/floors")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": []}"#)
        .create();

    let rows = collector_for(&server).collect("loc-1");
    assert!(rows.is_empty());
}

#[test]
fn test_collect_empty_series_yields_zero_rows() {
    let mut server = mockito::Server::new();
    let _floors = server
        .mock("GET", "/workspaceLocations/loc-1/floors")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "floor-1", "floorNumber": 1}]}"#)
        .create();
    let _workspaces = server
        .mock("GET", "/workspaces")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "ws-1"}]}"#)
        .create();
    let _detail = server
        .mock("GET", "/workspaces/ws-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "ws-1", "displayName": "Empty Desk", "capacity": 1}"#)
        .create();
    let _duration = server
        .mock("GET", "/workspaceDurationMetrics")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": []}"#)
        .create();
    let _metrics = server
        .mock("GET", "/workspaceMetrics")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": []}"#)
        .create();

    let rows = collector_for(&server).collect("loc-1");
    assert!(rows.is_empty());
}

#[test]
fn test_collect_missing_fields_become_sentinels() {
    let mut server = mockito::Server::new();
    let _floors = server
        .mock("GET", "/workspaceLocations/loc-1/floors")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "floor-1", "floorNumber": 1}]}"#)
        .create();
    let _workspaces = server
        .mock("GET", "/workspaces")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"id": "ws-1"}]}"#)
        .create();
    // Detail carries no capacity field at all.
    let _detail = server
        .mock("GET", "/workspaces/ws-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "ws-1", "displayName": "Hot Desk"}"#)
        .create();
    let _duration = server
        .mock("GET", "/workspaceDurationMetrics")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"duration": 300}]}"#)
        .create();
    let _metrics = server
        .mock("GET", "/workspaceMetrics")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let rows = collector_for(&server).collect("loc-1");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].capacity, None);
    assert_eq!(rows[0].start, NOT_AVAILABLE);
    assert_eq!(rows[0].end, NOT_AVAILABLE);
    assert_eq!(rows[0].duration, Some(300.0));
}
