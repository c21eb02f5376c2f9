//! Sync handler implementations

use dida365_core::SyncSnapshot;
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde::Serialize;

use crate::result::{json_success, respond};

use super::{summarize, Dida365Context, TaskSummary};

#[derive(Debug, Serialize)]
struct NamedRef<'a> {
    id: Option<&'a str>,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct TagRef<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncReport<'a> {
    summary: String,
    inbox_id: Option<&'a str>,
    projects: Vec<NamedRef<'a>>,
    project_groups: Vec<NamedRef<'a>>,
    tags: Vec<TagRef<'a>>,
    task_count: usize,
    tasks: Vec<TaskSummary<'a>>,
}

impl<'a> SyncReport<'a> {
    fn new(snapshot: &'a SyncSnapshot) -> Self {
        Self {
            summary: format!(
                "Synced: {} tasks, {} projects, {} tags, {} folders",
                snapshot.tasks().len(),
                snapshot.projects().len(),
                snapshot.tags().len(),
                snapshot.project_groups().len()
            ),
            inbox_id: snapshot.inbox_id(),
            projects: snapshot
                .projects()
                .iter()
                .map(|p| NamedRef {
                    id: Some(p.id.as_str()),
                    name: &p.name,
                })
                .collect(),
            project_groups: snapshot
                .project_groups()
                .iter()
                .map(|g| NamedRef {
                    id: g.id.as_deref(),
                    name: &g.name,
                })
                .collect(),
            tags: snapshot
                .tags()
                .iter()
                .map(|t| TagRef {
                    name: &t.name,
                    color: t.color.as_deref(),
                })
                .collect(),
            task_count: snapshot.tasks().len(),
            tasks: summarize(snapshot.tasks()),
        }
    }
}

/// Everything in one request, summarised
pub async fn sync(ctx: &Dida365Context) -> Result<CallToolResult, McpError> {
    respond(ctx.sync().full_sync().await, |snapshot| {
        json_success(&SyncReport::new(&snapshot))
    })
}

pub async fn get_settings(ctx: &Dida365Context) -> Result<CallToolResult, McpError> {
    respond(ctx.sync().get_settings().await, |settings| {
        json_success(&settings)
    })
}
