//! HTTP behaviour against a local mock server

use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

use dida365_core::batch::TaskMove;
use dida365_core::config::ApiConfig;
use dida365_core::types::{Project, TaskRef};
use dida365_core::{
    BatchService, CompletedService, CredentialStore, Dida365Client, Dida365Error, OpenApiService,
    QuadrantService, SyncService, TagService,
};

struct Harness {
    server: ServerGuard,
    client: Dida365Client,
    _dir: TempDir,
}

async fn harness(token: Option<&str>) -> Harness {
    let server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(dir.path().join("token.json"));
    if let Some(token) = token {
        store.save(token).unwrap();
    }
    let config = ApiConfig {
        private_base_url: format!("{}/api/v2", server.url()),
        official_base_url: server.url(),
    };
    let client = Dida365Client::new(config, store).unwrap();
    Harness {
        server,
        client,
        _dir: dir,
    }
}

fn sync_body() -> serde_json::Value {
    json!({
        "checkPoint": 1,
        "syncTaskBean": {"update": [
            {"id": "t1", "projectId": "p1", "title": "Write report", "priority": 5, "status": 0},
            {"id": "t2", "projectId": "p2", "title": "Call bank", "priority": 3, "status": 0}
        ]},
        "projectProfiles": [{"id": "p1", "name": "Work"}],
        "projectGroups": [],
        "tags": [{"name": "urgent"}],
        "inboxId": "inbox1"
    })
}

#[tokio::test]
async fn test_private_call_carries_browser_headers() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("GET", "/api/v2/batch/check/0")
        .match_header("cookie", "t=abc123")
        .match_header("user-agent", Matcher::Regex("Firefox/95.0".to_string()))
        .match_header("x-device", Matcher::Regex(r#""id":"6490[0-9a-f]{20}""#.to_string()))
        .with_status(200)
        .with_body(sync_body().to_string())
        .create_async()
        .await;

    let snapshot = SyncService::new(h.client.clone()).full_sync().await.unwrap();
    assert_eq!(snapshot.tasks().len(), 2);
    assert_eq!(snapshot.inbox_id(), Some("inbox1"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_hex_secret_fails_before_request() {
    let mut h = harness(Some("not-a-hex-token")).await;
    let mock = h
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = SyncService::new(h.client.clone()).full_sync().await.unwrap_err();
    assert!(matches!(err, Dida365Error::InvalidCredential(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_is_unauthenticated() {
    let mut h = harness(None).await;
    let mock = h
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = SyncService::new(h.client.clone()).full_sync().await.unwrap_err();
    assert!(matches!(err, Dida365Error::Unauthenticated));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_official_call_uses_bearer_and_skips_hex_check() {
    let mut h = harness(Some("oauth.token-value")).await;
    let mock = h
        .server
        .mock("GET", "/open/v1/project")
        .match_header("authorization", "Bearer oauth.token-value")
        .match_header("cookie", Matcher::Missing)
        .with_status(200)
        .with_body(r##"[{"id": "p1", "name": "Work", "color": "#ff0000"}]"##)
        .create_async()
        .await;

    let projects = OpenApiService::new(h.client.clone()).list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "Work");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_carries_request_details() {
    let mut h = harness(Some("abc123")).await;
    h.server
        .mock("GET", "/api/v2/project/all/completed")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let err = CompletedService::new(h.client.clone())
        .get_by_date(date, Some("UTC"))
        .await
        .unwrap_err();

    match err {
        Dida365Error::Upstream {
            status,
            method,
            path,
            body,
        } => {
            assert_eq!(status, 403);
            assert_eq!(method, "GET");
            assert_eq!(
                path,
                "/project/all/completed?from=2024-01-15+00%3A00%3A00&to=2024-01-15+23%3A59%3A59&limit=100"
            );
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_body_yields_default() {
    let mut h = harness(Some("abc123")).await;
    h.server
        .mock("POST", "/api/v2/batch/task")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let response = BatchService::new(h.client.clone())
        .delete_task("t1", "p1")
        .await
        .unwrap();
    assert!(response.id2etag.is_empty());
    assert!(!response.has_errors());
}

#[tokio::test]
async fn test_completed_query_in_shanghai() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("GET", "/api/v2/project/all/completed")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "2024-01-14 16:00:00".into()),
            Matcher::UrlEncoded("to".into(), "2024-01-15 15:59:59".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"id": "t9", "projectId": "p1", "status": 2, "completedTime": "2024-01-15T02:00:00.000+0000"}]"#)
        .create_async()
        .await;

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let tasks = CompletedService::new(h.client.clone())
        .get_by_date(date, None)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].is_completed());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_range_makes_no_request() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let err = CompletedService::new(h.client.clone())
        .get_by_date_range(start, end, Some("Asia/Tokyo"))
        .await
        .unwrap_err();
    assert!(matches!(err, Dida365Error::InvalidRange { .. }));

    let err = CompletedService::new(h.client.clone())
        .get_today(Some("Not/AZone"))
        .await
        .unwrap_err();
    assert!(matches!(err, Dida365Error::InvalidTimezone(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_full_sync_is_deterministic() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body(sync_body().to_string())
        .expect(2)
        .create_async()
        .await;

    let sync = SyncService::new(h.client.clone());
    let first = sync.full_sync().await.unwrap();
    let second = sync.full_sync().await.unwrap();
    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_project_with_tasks_from_sync() {
    let mut h = harness(Some("abc123")).await;
    h.server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body(sync_body().to_string())
        .create_async()
        .await;

    let result = SyncService::new(h.client.clone())
        .get_project_with_tasks("p1")
        .await
        .unwrap();
    assert_eq!(result.project.map(|p| p.name), Some("Work".to_string()));
    let ids: Vec<_> = result.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1"]);
}

#[tokio::test]
async fn test_settings_timezone_defaults() {
    let mut h = harness(Some("abc123")).await;
    h.server
        .mock("GET", "/api/v2/user/preferences/settings")
        .with_status(200)
        .with_body(r#"{"theme": "dark"}"#)
        .create_async()
        .await;

    let tz = SyncService::new(h.client.clone()).get_timezone().await.unwrap();
    assert_eq!(tz, "Asia/Shanghai");
}

#[tokio::test]
async fn test_batch_complete_posts_status_update() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("POST", "/api/v2/batch/task")
        .match_body(Matcher::Json(json!({
            "update": [
                {"id": "t1", "projectId": "p1", "status": 2},
                {"id": "t2", "projectId": "p2", "status": 2}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"id2etag": {"t1": "e1", "t2": "e2"}, "id2error": {}}"#)
        .create_async()
        .await;

    let response = BatchService::new(h.client.clone())
        .complete_tasks(vec![TaskRef::new("t1", "p1"), TaskRef::new("t2", "p2")])
        .await
        .unwrap();
    assert_eq!(response.id2etag.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_move_and_project_endpoints() {
    let mut h = harness(Some("abc123")).await;
    let moves = h
        .server
        .mock("POST", "/api/v2/batch/taskProject")
        .match_body(Matcher::Json(json!([
            {"taskId": "t1", "fromProjectId": "p1", "toProjectId": "p2"}
        ])))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let projects = h
        .server
        .mock("POST", "/api/v2/batch/project")
        .match_body(Matcher::Json(json!({"add": [{"name": "Side"}]})))
        .with_status(200)
        .with_body(r#"{"id2etag": {"pnew": "e"}}"#)
        .create_async()
        .await;

    let batch = BatchService::new(h.client.clone());
    batch
        .move_tasks(&[TaskMove::new("t1", "p1", "p2")])
        .await
        .unwrap();
    let response = batch.create_project(Project::new("Side")).await.unwrap();
    assert!(response.id2error.is_empty());

    moves.assert_async().await;
    projects.assert_async().await;
}

#[tokio::test]
async fn test_tag_delete_repeats_name_parameter() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("DELETE", "/api/v2/tag")
        .match_query(Matcher::Exact("name=work&name=home".to_string()))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    TagService::new(h.client.clone())
        .delete_batch(&["work".to_string(), "home".to_string()])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tag_rename_and_merge_bodies() {
    let mut h = harness(Some("abc123")).await;
    let rename = h
        .server
        .mock("PUT", "/api/v2/tag/rename")
        .match_body(Matcher::Json(json!({"name": "old", "newName": "new"})))
        .with_status(200)
        .create_async()
        .await;
    let merge = h
        .server
        .mock("PUT", "/api/v2/tag/merge")
        .match_body(Matcher::Json(json!({"from": "a", "to": "b"})))
        .with_status(200)
        .create_async()
        .await;

    let tags = TagService::new(h.client.clone());
    tags.rename("old", "new").await.unwrap();
    tags.merge("a", "b").await.unwrap();

    rename.assert_async().await;
    merge.assert_async().await;
}

#[tokio::test]
async fn test_quadrant_view_rejects_bad_name_before_sync() {
    let mut h = harness(Some("abc123")).await;
    let mock = h
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let service = QuadrantService::new(SyncService::new(h.client.clone()));
    let err = service.view("Q7").await.unwrap_err();
    assert!(matches!(err, Dida365Error::InvalidArgument(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_quadrant_listing_from_sync() {
    let mut h = harness(Some("abc123")).await;
    h.server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body(sync_body().to_string())
        .create_async()
        .await;

    let service = QuadrantService::new(SyncService::new(h.client.clone()));
    let listing = service.list().await.unwrap();
    assert_eq!(listing.buckets.len(), 4);
    assert_eq!(listing.total(), 2);
    assert_eq!(listing.project_name("p1"), "Work");
}

#[tokio::test]
async fn test_open_api_task_lifecycle() {
    let mut h = harness(Some("oauth.token-value")).await;
    let create = h
        .server
        .mock("POST", "/open/v1/task")
        .match_body(Matcher::Json(json!({"projectId": "p1", "title": "Buy milk"})))
        .with_status(200)
        .with_body(r#"{"id": "t9", "projectId": "p1", "title": "Buy milk", "status": 0}"#)
        .create_async()
        .await;
    let complete = h
        .server
        .mock("POST", "/open/v1/project/p1/task/t9/complete")
        .with_status(200)
        .create_async()
        .await;
    let delete = h
        .server
        .mock("DELETE", "/open/v1/project/p1/task/t9")
        .with_status(200)
        .create_async()
        .await;

    let api = OpenApiService::new(h.client.clone());
    let created = api
        .create_task(&dida365_core::types::Task::new("Buy milk", "p1"))
        .await
        .unwrap();
    assert_eq!(created.id, "t9");
    assert!(api.complete_task("p1", "t9").await.unwrap().is_null());
    assert!(api.delete_task("p1", "t9").await.unwrap().is_null());

    create.assert_async().await;
    complete.assert_async().await;
    delete.assert_async().await;
}
