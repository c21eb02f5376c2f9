//! Task parameter types

use dida365_core::types::Task;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters naming one task in one project
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TaskLocatorParams {
    #[schemars(description = "The project ID the task belongs to")]
    pub project_id: String,

    #[schemars(description = "The task ID")]
    pub task_id: String,
}

/// Parameters for looking a task up in a full sync
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindTaskParams {
    #[schemars(description = "The task ID; the project does not need to be known")]
    pub task_id: String,
}

/// Parameters for creating a task
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTaskParams {
    #[schemars(description = "The task title")]
    pub title: String,

    #[schemars(description = "The project ID to create the task in")]
    pub project_id: String,

    #[schemars(description = "Task content/notes")]
    pub content: Option<String>,

    #[schemars(description = "Task description")]
    pub desc: Option<String>,

    #[schemars(description = "Start date in ISO 8601 format")]
    pub start_date: Option<String>,

    #[schemars(description = "Due date in ISO 8601 format")]
    pub due_date: Option<String>,

    #[schemars(description = "Priority: 0=none, 1=low, 3=medium, 5=high")]
    pub priority: Option<i32>,

    #[schemars(description = "Whether this is an all-day task")]
    pub all_day: Option<bool>,

    #[schemars(description = "Time zone, e.g. 'Asia/Shanghai'")]
    pub time_zone: Option<String>,

    #[schemars(description = "Tag names")]
    pub tags: Option<Vec<String>>,
}

/// Parameters for updating a task; only the given fields change
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    #[schemars(description = "The task ID to update")]
    pub task_id: String,

    #[schemars(description = "The project ID the task belongs to")]
    pub project_id: String,

    #[schemars(description = "New task title")]
    pub title: Option<String>,

    #[schemars(description = "New task content/notes")]
    pub content: Option<String>,

    #[schemars(description = "New task description")]
    pub desc: Option<String>,

    #[schemars(description = "New start date (ISO 8601)")]
    pub start_date: Option<String>,

    #[schemars(description = "New due date (ISO 8601)")]
    pub due_date: Option<String>,

    #[schemars(description = "Priority: 0=none, 1=low, 3=medium, 5=high")]
    pub priority: Option<i32>,

    #[schemars(description = "Whether this is an all-day task")]
    pub all_day: Option<bool>,

    #[schemars(description = "Time zone")]
    pub time_zone: Option<String>,

    #[schemars(description = "Replacement tag names")]
    pub tags: Option<Vec<String>>,
}

impl From<CreateTaskParams> for Task {
    fn from(p: CreateTaskParams) -> Self {
        Task {
            content: p.content,
            desc: p.desc,
            start_date: p.start_date,
            due_date: p.due_date,
            priority: p.priority,
            all_day: p.all_day,
            time_zone: p.time_zone,
            tags: p.tags,
            ..Task::new(p.title, p.project_id)
        }
    }
}

impl From<UpdateTaskParams> for Task {
    fn from(p: UpdateTaskParams) -> Self {
        Task {
            title: p.title,
            content: p.content,
            desc: p.desc,
            start_date: p.start_date,
            due_date: p.due_date,
            priority: p.priority,
            all_day: p.all_day,
            time_zone: p.time_zone,
            tags: p.tags,
            ..Task::reference(p.task_id, p.project_id)
        }
    }
}
