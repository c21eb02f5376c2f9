//! Tool handlers against a local mock of the Dida365 API

use dida365_core::config::{ApiConfig, CredentialConfig};
use dida365_core::Config;
use dida365_mcp::handlers::{self, Dida365Context};
use dida365_mcp::params::*;
use mockito::{Matcher, Server, ServerGuard};
use rmcp::model::{CallToolResult, RawContent};
use tempfile::TempDir;

struct Fixture {
    server: ServerGuard,
    ctx: Dida365Context,
    _dir: TempDir,
}

async fn fixture() -> Fixture {
    let server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let config = Config {
        api: ApiConfig {
            private_base_url: format!("{}/api/v2", server.url()),
            official_base_url: server.url(),
        },
        credentials: CredentialConfig {
            path: Some(dir.path().join("token.json")),
        },
        ..Default::default()
    };
    Fixture {
        server,
        ctx: Dida365Context::new(config).unwrap(),
        _dir: dir,
    }
}

fn text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(t) => t.text.clone(),
        _ => String::new(),
    }
}

fn is_error(result: &CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}

fn auth(action: AuthAction, token: Option<&str>) -> AuthParams {
    AuthParams {
        action,
        code: None,
        token: token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_cookie_status_logout_cycle() {
    let f = fixture().await;

    let status = handlers::auth(&f.ctx, auth(AuthAction::Status, None)).await.unwrap();
    assert!(text(&status).starts_with("Not authenticated"));

    let saved = handlers::auth(&f.ctx, auth(AuthAction::Cookie, Some("abc123")))
        .await
        .unwrap();
    assert!(!is_error(&saved));

    let status = handlers::auth(&f.ctx, auth(AuthAction::Status, None)).await.unwrap();
    assert!(text(&status).starts_with("Authenticated"));

    handlers::auth(&f.ctx, auth(AuthAction::Logout, None)).await.unwrap();
    let status = handlers::auth(&f.ctx, auth(AuthAction::Status, None)).await.unwrap();
    assert!(text(&status).starts_with("Not authenticated"));
}

#[tokio::test]
async fn test_cookie_rejects_non_hex_token() {
    let f = fixture().await;
    let result = handlers::auth(&f.ctx, auth(AuthAction::Cookie, Some("xyz!")))
        .await
        .unwrap();
    assert!(is_error(&result));
    assert!(f.ctx.credential_store().load().is_none());
}

#[tokio::test]
async fn test_callback_requires_code() {
    let f = fixture().await;
    let err = handlers::auth(&f.ctx, auth(AuthAction::Callback, None)).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_login_without_oauth_client_is_error_result() {
    let f = fixture().await;
    let result = handlers::auth(&f.ctx, auth(AuthAction::Login, None)).await.unwrap();
    assert!(is_error(&result));
    assert!(text(&result).contains("configuration error"));
}

#[tokio::test]
async fn test_unauthenticated_call_is_error_result() {
    let f = fixture().await;
    let result = handlers::sync(&f.ctx).await.unwrap();
    assert!(is_error(&result));
    assert!(text(&result).contains("not authenticated"));
}

#[tokio::test]
async fn test_sync_summary() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    f.server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body(
            r##"{
                "syncTaskBean": {"update": [
                    {"id": "t1", "projectId": "p1", "title": "A", "status": 0},
                    {"id": "t2", "projectId": "p1", "title": "B", "status": 2}
                ]},
                "projectProfiles": [{"id": "p1", "name": "Work"}],
                "tags": [{"name": "home", "color": "#00ff00"}],
                "inboxId": "inbox9"
            }"##,
        )
        .create_async()
        .await;

    let result = handlers::sync(&f.ctx).await.unwrap();
    assert!(!is_error(&result));
    let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    assert_eq!(body["summary"], "Synced: 2 tasks, 1 projects, 1 tags, 0 folders");
    assert_eq!(body["inboxId"], "inbox9");
    assert_eq!(body["tasks"][1]["status"], 2);
}

#[tokio::test]
async fn test_find_task_absent_is_not_an_error() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    f.server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let result = handlers::find_task(
        &f.ctx,
        FindTaskParams {
            task_id: "nope".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(!is_error(&result));
    assert_eq!(text(&result), "Task nope not found.");
}

const PROJECT_SNAPSHOT: &str = r#"{
    "syncTaskBean": {"update": [
        {"id": "t1", "projectId": "p1", "title": "A", "status": 0},
        {"id": "t2", "projectId": "p2", "title": "B", "status": 0}
    ]},
    "projectProfiles": [{"id": "p1", "name": "Work"}, {"id": "p2", "name": "Home"}]
}"#;

#[tokio::test]
async fn test_projects_come_from_sync_with_cookie_token() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    let sync = f
        .server
        .mock("GET", "/api/v2/batch/check/0")
        .match_header("cookie", "t=abc123")
        .with_status(200)
        .with_body(PROJECT_SNAPSHOT)
        .expect(1)
        .create_async()
        .await;
    let official = f
        .server
        .mock("GET", "/open/v1/project")
        .expect(0)
        .create_async()
        .await;

    let result = handlers::list_projects(&f.ctx).await.unwrap();
    assert!(!is_error(&result));
    let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    assert_eq!(body[0]["name"], "Work");
    assert_eq!(body[1]["id"], "p2");
    sync.assert_async().await;
    official.assert_async().await;
}

#[tokio::test]
async fn test_project_tasks_come_from_sync() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    f.server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body(PROJECT_SNAPSHOT)
        .create_async()
        .await;

    let result = handlers::get_project_tasks(
        &f.ctx,
        ProjectIdParams {
            project_id: "p1".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(!is_error(&result));
    let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    assert_eq!(body["project"]["name"], "Work");
    assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(body["tasks"][0]["id"], "t1");
}

#[tokio::test]
async fn test_completed_requires_date_or_range() {
    let f = fixture().await;
    let missing = CompletedParams {
        date: None,
        start_date: Some("2024-01-01".to_string()),
        end_date: None,
        timezone: None,
    };
    assert!(handlers::get_completed_tasks(&f.ctx, missing).await.is_err());

    let malformed = CompletedParams {
        date: Some("15/01/2024".to_string()),
        start_date: None,
        end_date: None,
        timezone: None,
    };
    assert!(handlers::get_completed_tasks(&f.ctx, malformed).await.is_err());
}

#[tokio::test]
async fn test_completed_range_report() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    let mock = f
        .server
        .mock("GET", "/api/v2/project/all/completed")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "2024-01-01 00:00:00".into()),
            Matcher::UrlEncoded("to".into(), "2024-01-31 23:59:59".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"id": "t1", "projectId": "p1", "title": "Done", "status": 2}]"#)
        .create_async()
        .await;

    let params = CompletedParams {
        date: None,
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-31".to_string()),
        timezone: Some("UTC".to_string()),
    };
    let result = handlers::get_completed_tasks(&f.ctx, params).await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["summary"], "Found 1 completed task(s)");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_quadrant_rejects_unknown_name_without_request() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    let mock = f
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = handlers::quadrant_list(
        &f.ctx,
        QuadrantParams {
            quadrant: Some("Q9".to_string()),
        },
    )
    .await;
    assert!(result.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_quadrant_single_bucket() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    f.server
        .mock("GET", "/api/v2/batch/check/0")
        .with_status(200)
        .with_body(
            r#"{
                "syncTaskBean": {"update": [
                    {"id": "t1", "projectId": "p1", "title": "Urgent", "priority": 5, "status": 0},
                    {"id": "t2", "projectId": "p1", "title": "Later", "priority": 0, "status": 0}
                ]},
                "projectProfiles": [{"id": "p1", "name": "Work"}]
            }"#,
        )
        .create_async()
        .await;

    let result = handlers::quadrant_list(
        &f.ctx,
        QuadrantParams {
            quadrant: Some("q1".to_string()),
        },
    )
    .await
    .unwrap();
    let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["Q1"]);
    assert_eq!(body["Q1"]["count"], 1);
    assert_eq!(body["Q1"]["label"], "Do First");
    assert_eq!(body["Q1"]["tasks"][0]["projectName"], "Work");
}

#[tokio::test]
async fn test_batch_tools_reject_empty_lists() {
    let f = fixture().await;
    assert!(handlers::batch_complete_tasks(&f.ctx, TaskRefsParams { tasks: vec![] })
        .await
        .is_err());
    assert!(handlers::delete_tag(&f.ctx, DeleteTagParams { names: vec![] })
        .await
        .is_err());
}

#[tokio::test]
async fn test_batch_complete_reports_upstream_maps() {
    let mut f = fixture().await;
    f.ctx.credential_store().save("abc123").unwrap();
    f.server
        .mock("POST", "/api/v2/batch/task")
        .with_status(200)
        .with_body(r#"{"id2etag": {"t1": "e1"}, "id2error": {"t2": "NOT_FOUND"}}"#)
        .create_async()
        .await;

    let params = TaskRefsParams {
        tasks: vec![
            TaskRefParam {
                task_id: "t1".to_string(),
                project_id: "p1".to_string(),
            },
            TaskRefParam {
                task_id: "t2".to_string(),
                project_id: "p1".to_string(),
            },
        ],
    };
    let result = handlers::batch_complete_tasks(&f.ctx, params).await.unwrap();
    assert!(!is_error(&result));
    let body: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
    assert_eq!(body["message"], "Completed 2 task(s).");
    assert_eq!(body["id2etag"]["t1"], "e1");
    assert_eq!(body["id2error"]["t2"], "NOT_FOUND");
}
