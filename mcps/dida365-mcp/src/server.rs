//! MCP Server implementation
//!
//! This module defines the MCP server that exposes Dida365 operations as
//! tools. Handler implementations are in the handlers/ module.
//!
//! # Tool Groups
//! - Auth: OAuth login/callback, cookie token, status, logout
//! - Projects & tasks: official open API
//! - Completed, sync, tags, batch, quadrant: private web API

use dida365_core::Config;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::handlers::{self, Dida365Context};
use crate::params::*;

/// The main Dida365 MCP Server
#[derive(Clone)]
pub struct Dida365McpServer {
    ctx: Dida365Context,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Auth Tools
// ============================================================================

#[tool_router(router = auth_tool_router)]
impl Dida365McpServer {
    #[tool(
        description = "Authenticate with Dida365. action='login': get the OAuth URL to open in a browser. \
                       action='callback': exchange the authorization code for a token. \
                       action='cookie': save the 't' cookie of a logged-in web session (needed for private-API tools). \
                       action='status': check if authenticated. action='logout': forget the saved token."
    )]
    async fn dida365_auth(
        &self,
        Parameters(params): Parameters<AuthParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::auth(&self.ctx, params).await
    }
}

// ============================================================================
// Project & Task Tools (projects from sync, tasks from the official API)
// ============================================================================

#[tool_router(router = task_tool_router)]
impl Dida365McpServer {
    #[tool(description = "List all projects in your Dida365 account, read from a full sync. \
                       WARNING: Uses private API.")]
    async fn dida365_list_projects(
        &self,
        Parameters(_): Parameters<EmptyParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_projects(&self.ctx).await
    }

    #[tool(description = "Get a project together with its open tasks, read from a full sync. \
                       WARNING: Uses private API.")]
    async fn dida365_get_project_tasks(
        &self,
        Parameters(params): Parameters<ProjectIdParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_project_tasks(&self.ctx, params).await
    }

    #[tool(description = "Get details of a specific task by its project ID and task ID.")]
    async fn dida365_get_task(
        &self,
        Parameters(params): Parameters<TaskLocatorParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_task(&self.ctx, params).await
    }

    #[tool(
        description = "Create a new task. Requires title and project_id. Optional: content, desc, start_date, \
                       due_date, priority (0=none,1=low,3=medium,5=high), all_day, time_zone, tags."
    )]
    async fn dida365_create_task(
        &self,
        Parameters(params): Parameters<CreateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_task(&self.ctx, params).await
    }

    #[tool(description = "Update an existing task. Requires task_id and project_id. Pass any fields to update.")]
    async fn dida365_update_task(
        &self,
        Parameters(params): Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::update_task(&self.ctx, params).await
    }

    #[tool(description = "Mark a task as complete.")]
    async fn dida365_complete_task(
        &self,
        Parameters(params): Parameters<TaskLocatorParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::complete_task(&self.ctx, params).await
    }

    #[tool(description = "Delete a task permanently. This cannot be undone.")]
    async fn dida365_delete_task(
        &self,
        Parameters(params): Parameters<TaskLocatorParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_task(&self.ctx, params).await
    }
}

// ============================================================================
// Sync & Completed Tools (private API)
// ============================================================================

#[tool_router(router = sync_tool_router)]
impl Dida365McpServer {
    #[tool(description = "Find a task by ID alone, searching a full sync. WARNING: Uses private API.")]
    async fn dida365_find_task(
        &self,
        Parameters(params): Parameters<FindTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::find_task(&self.ctx, params).await
    }

    #[tool(
        description = "Get completed tasks for a date ('date') or an inclusive range ('start_date' and 'end_date'), \
                       YYYY-MM-DD. WARNING: Uses private API."
    )]
    async fn dida365_get_completed_tasks(
        &self,
        Parameters(params): Parameters<CompletedParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_completed_tasks(&self.ctx, params).await
    }

    #[tool(description = "Get tasks completed today. WARNING: Uses private API.")]
    async fn dida365_get_completed_today(
        &self,
        Parameters(params): Parameters<TimezoneParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_completed_today(&self.ctx, params).await
    }

    #[tool(description = "Get tasks completed yesterday. WARNING: Uses private API.")]
    async fn dida365_get_completed_yesterday(
        &self,
        Parameters(params): Parameters<TimezoneParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_completed_yesterday(&self.ctx, params).await
    }

    #[tool(description = "Get tasks completed this week (Sunday to Saturday). WARNING: Uses private API.")]
    async fn dida365_get_completed_this_week(
        &self,
        Parameters(params): Parameters<TimezoneParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_completed_this_week(&self.ctx, params).await
    }

    #[tool(
        description = "Full sync - fetch all tasks, projects, project groups, and tags in one request. \
                       WARNING: Uses private API."
    )]
    async fn dida365_sync(
        &self,
        Parameters(_): Parameters<EmptyParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::sync(&self.ctx).await
    }

    #[tool(description = "Get user preferences such as timezone. WARNING: Uses private API.")]
    async fn dida365_get_settings(
        &self,
        Parameters(_): Parameters<EmptyParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::get_settings(&self.ctx).await
    }

    #[tool(
        description = "List open tasks by Eisenhower quadrant: Q1 (priority high), Q2 (medium with due date), \
                       Q3 (low with due date), Q4 (everything else). WARNING: Uses private API."
    )]
    async fn dida365_quadrant_list(
        &self,
        Parameters(params): Parameters<QuadrantParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::quadrant_list(&self.ctx, params).await
    }
}

// ============================================================================
// Tag Tools (private API)
// ============================================================================

#[tool_router(router = tag_tool_router)]
impl Dida365McpServer {
    #[tool(description = "List all tags. WARNING: Uses private API.")]
    async fn dida365_list_tags(
        &self,
        Parameters(_): Parameters<EmptyParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_tags(&self.ctx).await
    }

    #[tool(description = "Create a new tag. WARNING: Uses private API.")]
    async fn dida365_create_tag(
        &self,
        Parameters(params): Parameters<CreateTagParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_tag(&self.ctx, params).await
    }

    #[tool(description = "Rename a tag; tasks keep it under the new name. WARNING: Uses private API.")]
    async fn dida365_rename_tag(
        &self,
        Parameters(params): Parameters<RenameTagParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::rename_tag(&self.ctx, params).await
    }

    #[tool(description = "Update a tag's color, sort order or parent. WARNING: Uses private API.")]
    async fn dida365_update_tag(
        &self,
        Parameters(params): Parameters<UpdateTagParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::update_tag(&self.ctx, params).await
    }

    #[tool(
        description = "Merge one tag into another: tasks with from_tag get to_tag and from_tag is deleted. \
                       WARNING: Uses private API."
    )]
    async fn dida365_merge_tags(
        &self,
        Parameters(params): Parameters<MergeTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::merge_tags(&self.ctx, params).await
    }

    #[tool(description = "Delete one or more tags. WARNING: Uses private API.")]
    async fn dida365_delete_tag(
        &self,
        Parameters(params): Parameters<DeleteTagParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_tag(&self.ctx, params).await
    }
}

// ============================================================================
// Batch Tools (private API)
// ============================================================================

#[tool_router(router = batch_tool_router)]
impl Dida365McpServer {
    #[tool(description = "Move a task from one project to another. WARNING: Uses private API.")]
    async fn dida365_move_task(
        &self,
        Parameters(params): Parameters<MoveTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::move_task(&self.ctx, params).await
    }

    #[tool(description = "Make a task a subtask of another task. WARNING: Uses private API.")]
    async fn dida365_set_subtask(
        &self,
        Parameters(params): Parameters<SetSubtaskParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::set_subtask(&self.ctx, params).await
    }

    #[tool(description = "Complete several tasks in one request. WARNING: Uses private API.")]
    async fn dida365_batch_complete_tasks(
        &self,
        Parameters(params): Parameters<TaskRefsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_complete_tasks(&self.ctx, params).await
    }

    #[tool(description = "Delete several tasks in one request. WARNING: Uses private API.")]
    async fn dida365_batch_delete_tasks(
        &self,
        Parameters(params): Parameters<TaskRefsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_delete_tasks(&self.ctx, params).await
    }

    #[tool(description = "Create a project. WARNING: Uses private API.")]
    async fn dida365_batch_create_project(
        &self,
        Parameters(params): Parameters<CreateProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_create_project(&self.ctx, params).await
    }

    #[tool(description = "Delete projects by ID. This cannot be undone. WARNING: Uses private API.")]
    async fn dida365_batch_delete_projects(
        &self,
        Parameters(params): Parameters<ProjectIdsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_delete_projects(&self.ctx, params).await
    }

    #[tool(description = "Create a project group (folder). WARNING: Uses private API.")]
    async fn dida365_create_project_group(
        &self,
        Parameters(params): Parameters<CreateProjectGroupParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_project_group(&self.ctx, params).await
    }

    #[tool(description = "Delete project groups (folders) by ID. WARNING: Uses private API.")]
    async fn dida365_delete_project_groups(
        &self,
        Parameters(params): Parameters<GroupIdsParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::delete_project_groups(&self.ctx, params).await
    }
}

// ============================================================================
// Router Composition & Server Initialization
// ============================================================================

impl Dida365McpServer {
    pub fn new(config: Config) -> dida365_core::Result<Self> {
        let router = Self::auth_tool_router()
            + Self::task_tool_router()
            + Self::sync_tool_router()
            + Self::tag_tool_router()
            + Self::batch_tool_router();

        Ok(Self {
            ctx: Dida365Context::new(config)?,
            tool_router: router,
        })
    }

    pub fn context(&self) -> &Dida365Context {
        &self.ctx
    }

    /// Names of every registered tool
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for Dida365McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Dida365 MCP Server - tools for Dida365 (TickTick CN) tasks, projects, folders \
                 and tags. Project/task CRUD uses the official API (OAuth token); sync, \
                 completed-task queries, tags and batch operations use the private web API \
                 (cookie token). Authenticate first with dida365_auth."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
