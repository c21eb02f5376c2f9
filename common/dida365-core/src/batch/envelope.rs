//! Wire shapes of the private batch endpoints
//!
//! Everything here is a pure transformation from intent to payload; no
//! cross-entity checks are made (a move to a project that does not exist is
//! forwarded as-is).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Project, ProjectGroup, Tag, Task, TaskRef, STATUS_COMPLETED};

/// `add` / `update` / `delete` envelope for one entity kind
///
/// Empty lists are omitted from the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEnvelope<T, D> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<D>,
}

impl<T, D> Default for BatchEnvelope<T, D> {
    fn default() -> Self {
        Self {
            add: Vec::new(),
            update: Vec::new(),
            delete: Vec::new(),
        }
    }
}

impl<T, D> BatchEnvelope<T, D> {
    pub fn add(items: Vec<T>) -> Self {
        Self {
            add: items,
            ..Default::default()
        }
    }

    pub fn update(items: Vec<T>) -> Self {
        Self {
            update: items,
            ..Default::default()
        }
    }

    pub fn delete(ids: Vec<D>) -> Self {
        Self {
            delete: ids,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// `POST /batch/task`; deletes name `(taskId, projectId)` pairs
pub type TaskBatch = BatchEnvelope<Task, TaskRef>;
/// `POST /batch/project`
pub type ProjectBatch = BatchEnvelope<Project, String>;
/// `POST /batch/projectGroup`
pub type ProjectGroupBatch = BatchEnvelope<ProjectGroup, String>;
/// `POST /batch/tag`
pub type TagBatch = BatchEnvelope<Tag, String>;

/// Completion is an update that sets `status = 2`
pub fn complete_tasks(refs: impl IntoIterator<Item = TaskRef>) -> TaskBatch {
    TaskBatch::update(
        refs.into_iter()
            .map(|r| Task {
                status: Some(STATUS_COMPLETED),
                ..Task::reference(r.task_id, r.project_id)
            })
            .collect(),
    )
}

/// One entry of `POST /batch/taskParent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskParent {
    pub task_id: String,
    pub parent_id: String,
    pub project_id: String,
}

impl TaskParent {
    pub fn new(
        task_id: impl Into<String>,
        parent_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            parent_id: parent_id.into(),
            project_id: project_id.into(),
        }
    }
}

/// One entry of `POST /batch/taskProject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMove {
    pub task_id: String,
    pub from_project_id: String,
    pub to_project_id: String,
}

impl TaskMove {
    pub fn new(
        task_id: impl Into<String>,
        from_project_id: impl Into<String>,
        to_project_id: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            from_project_id: from_project_id.into(),
            to_project_id: to_project_id.into(),
        }
    }
}

/// Moves for every listed task between the same two projects
pub fn move_all(task_ids: impl IntoIterator<Item = String>, from: &str, to: &str) -> Vec<TaskMove> {
    task_ids
        .into_iter()
        .map(|id| TaskMove::new(id, from, to))
        .collect()
}

/// Tag update touching only the colour
pub fn tag_color(name: impl Into<String>, color: impl Into<String>) -> TagBatch {
    TagBatch::update(vec![Tag {
        color: Some(color.into()),
        ..Tag::new(name)
    }])
}

/// Tag update touching only the parent; `""` removes nesting
pub fn tag_parent(name: impl Into<String>, parent: impl Into<String>) -> TagBatch {
    TagBatch::update(vec![Tag {
        parent: Some(parent.into()),
        ..Tag::new(name)
    }])
}

/// Response of the envelope endpoints: new etags and per-id failures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub id2etag: HashMap<String, String>,
    #[serde(default)]
    pub id2error: HashMap<String, serde_json::Value>,
}

impl BatchResponse {
    pub fn has_errors(&self) -> bool {
        !self.id2error.is_empty()
    }
}
