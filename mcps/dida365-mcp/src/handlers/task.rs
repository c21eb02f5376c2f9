//! Task handler implementations
//!
//! Single-task CRUD goes through the open API; `find_task` searches a full
//! sync instead, so it works without knowing the project.

use dida365_core::types::Task;
use rmcp::{model::CallToolResult, ErrorData as McpError};

use crate::params::{CreateTaskParams, FindTaskParams, TaskLocatorParams, UpdateTaskParams};
use crate::result::{json_success, respond, text_success};

use super::Dida365Context;

pub async fn get_task(
    ctx: &Dida365Context,
    params: TaskLocatorParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.open_api()
            .get_task(&params.project_id, &params.task_id)
            .await,
        |task| json_success(&task),
    )
}

pub async fn create_task(
    ctx: &Dida365Context,
    params: CreateTaskParams,
) -> Result<CallToolResult, McpError> {
    let task = Task::from(params);
    respond(ctx.open_api().create_task(&task).await, |created| {
        created_or_updated("created", &created)
    })
}

pub async fn update_task(
    ctx: &Dida365Context,
    params: UpdateTaskParams,
) -> Result<CallToolResult, McpError> {
    let task_id = params.task_id.clone();
    let task = Task::from(params);
    respond(ctx.open_api().update_task(&task_id, &task).await, |updated| {
        created_or_updated("updated", &updated)
    })
}

pub async fn complete_task(
    ctx: &Dida365Context,
    params: TaskLocatorParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.open_api()
            .complete_task(&params.project_id, &params.task_id)
            .await,
        |_| {
            Ok(text_success(format!(
                "Task {} has been marked as complete.",
                params.task_id
            )))
        },
    )
}

pub async fn delete_task(
    ctx: &Dida365Context,
    params: TaskLocatorParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.open_api()
            .delete_task(&params.project_id, &params.task_id)
            .await,
        |_| Ok(text_success(format!("Task {} has been deleted.", params.task_id))),
    )
}

/// Look a task up by id in a fresh sync; absence is not an error
pub async fn find_task(
    ctx: &Dida365Context,
    params: FindTaskParams,
) -> Result<CallToolResult, McpError> {
    respond(ctx.sync().get_task(&params.task_id).await, |found| match found {
        Some(task) => json_success(&task),
        None => Ok(text_success(format!("Task {} not found.", params.task_id))),
    })
}

fn created_or_updated(verb: &str, task: &Task) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(task)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(text_success(format!("Task {} successfully:\n{}", verb, json)))
}
