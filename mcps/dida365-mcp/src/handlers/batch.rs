//! Batch handler implementations (private API)

use dida365_core::types::{Project, ProjectGroup};
use dida365_core::BatchResponse;
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde::Serialize;

use crate::params::{
    CreateProjectGroupParams, CreateProjectParams, GroupIdsParams, MoveTaskParams,
    ProjectIdsParams, SetSubtaskParams, TaskRefsParams,
};
use crate::result::{invalid_params, json_success, respond, text_success};

use super::Dida365Context;

#[derive(Debug, Serialize)]
struct BatchReport {
    message: String,
    #[serde(flatten)]
    response: BatchResponse,
}

/// Message plus the upstream etag/error maps, unchanged
pub fn batch_report(message: String, response: BatchResponse) -> Result<CallToolResult, McpError> {
    json_success(&BatchReport { message, response })
}

fn non_empty<T>(items: &[T], field: &str) -> Result<(), McpError> {
    if items.is_empty() {
        Err(invalid_params(format!("'{field}' must not be empty")))
    } else {
        Ok(())
    }
}

pub async fn move_task(
    ctx: &Dida365Context,
    params: MoveTaskParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.batch()
            .move_task(&params.task_id, &params.from_project_id, &params.to_project_id)
            .await,
        |_| {
            Ok(text_success(format!(
                "Task moved from project {} to {} successfully.",
                params.from_project_id, params.to_project_id
            )))
        },
    )
}

pub async fn set_subtask(
    ctx: &Dida365Context,
    params: SetSubtaskParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.batch()
            .set_subtask(&params.task_id, &params.parent_id, &params.project_id)
            .await,
        |_| {
            Ok(text_success(format!(
                "Task {} is now a subtask of {}.",
                params.task_id, params.parent_id
            )))
        },
    )
}

pub async fn batch_complete_tasks(
    ctx: &Dida365Context,
    params: TaskRefsParams,
) -> Result<CallToolResult, McpError> {
    non_empty(&params.tasks, "tasks")?;
    let count = params.tasks.len();
    respond(
        ctx.batch().complete_tasks(params.into_refs()).await,
        |response| batch_report(format!("Completed {} task(s).", count), response),
    )
}

pub async fn batch_delete_tasks(
    ctx: &Dida365Context,
    params: TaskRefsParams,
) -> Result<CallToolResult, McpError> {
    non_empty(&params.tasks, "tasks")?;
    let count = params.tasks.len();
    respond(
        ctx.batch().delete_tasks(params.into_refs()).await,
        |response| batch_report(format!("Deleted {} task(s).", count), response),
    )
}

pub async fn batch_create_project(
    ctx: &Dida365Context,
    params: CreateProjectParams,
) -> Result<CallToolResult, McpError> {
    let name = params.name.clone();
    respond(
        ctx.batch().create_project(Project::from(params)).await,
        |response| batch_report(format!("Project '{}' created.", name), response),
    )
}

pub async fn batch_delete_projects(
    ctx: &Dida365Context,
    params: ProjectIdsParams,
) -> Result<CallToolResult, McpError> {
    non_empty(&params.project_ids, "project_ids")?;
    let count = params.project_ids.len();
    respond(
        ctx.batch().delete_projects(params.project_ids).await,
        |response| batch_report(format!("Deleted {} project(s).", count), response),
    )
}

pub async fn create_project_group(
    ctx: &Dida365Context,
    params: CreateProjectGroupParams,
) -> Result<CallToolResult, McpError> {
    let name = params.name.clone();
    respond(
        ctx.batch()
            .create_project_group(ProjectGroup::new(params.name))
            .await,
        |response| batch_report(format!("Folder '{}' created.", name), response),
    )
}

pub async fn delete_project_groups(
    ctx: &Dida365Context,
    params: GroupIdsParams,
) -> Result<CallToolResult, McpError> {
    non_empty(&params.group_ids, "group_ids")?;
    let count = params.group_ids.len();
    respond(
        ctx.batch().delete_project_groups(params.group_ids).await,
        |response| batch_report(format!("Deleted {} folder(s).", count), response),
    )
}
