//! Project handler implementations (sync data, private API)

use rmcp::{model::CallToolResult, ErrorData as McpError};

use crate::params::ProjectIdParams;
use crate::result::{json_success, respond};

use super::Dida365Context;

pub async fn list_projects(ctx: &Dida365Context) -> Result<CallToolResult, McpError> {
    respond(ctx.sync().list_projects().await, |projects| {
        json_success(&projects)
    })
}

/// The project (null when unknown) and every task that points at it
pub async fn get_project_tasks(
    ctx: &Dida365Context,
    params: ProjectIdParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.sync().get_project_with_tasks(&params.project_id).await,
        |data| json_success(&data),
    )
}
