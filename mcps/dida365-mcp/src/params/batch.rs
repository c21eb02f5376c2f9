//! Batch operation parameter types

use dida365_core::types::{Project, TaskRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveTaskParams {
    #[schemars(description = "The task ID to move")]
    pub task_id: String,

    #[schemars(description = "Current project ID")]
    pub from_project_id: String,

    #[schemars(description = "Target project ID")]
    pub to_project_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SetSubtaskParams {
    #[schemars(description = "The task ID to become a subtask")]
    pub task_id: String,

    #[schemars(description = "The parent task ID")]
    pub parent_id: String,

    #[schemars(description = "The project ID containing both tasks")]
    pub project_id: String,
}

/// One `(task, project)` pair
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskRefParam {
    #[schemars(description = "Task ID")]
    pub task_id: String,

    #[schemars(description = "Project ID")]
    pub project_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TaskRefsParams {
    #[schemars(description = "Tasks as {task_id, project_id} pairs")]
    pub tasks: Vec<TaskRefParam>,
}

impl TaskRefsParams {
    pub fn into_refs(self) -> Vec<TaskRef> {
        self.tasks
            .into_iter()
            .map(|t| TaskRef::new(t.task_id, t.project_id))
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateProjectParams {
    #[schemars(description = "Project name")]
    pub name: String,

    #[schemars(description = "Project color")]
    pub color: Option<String>,

    #[schemars(description = "Project group/folder ID")]
    pub group_id: Option<String>,

    #[schemars(description = "View mode (e.g., 'list', 'kanban')")]
    pub view_mode: Option<String>,
}

impl From<CreateProjectParams> for Project {
    fn from(p: CreateProjectParams) -> Self {
        Project {
            color: p.color,
            group_id: p.group_id,
            view_mode: p.view_mode,
            ..Project::new(p.name)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectIdsParams {
    #[schemars(description = "Project IDs to delete")]
    pub project_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateProjectGroupParams {
    #[schemars(description = "Group/folder name")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GroupIdsParams {
    #[schemars(description = "Group/folder IDs to delete")]
    pub group_ids: Vec<String>,
}
