//! Documented open API (`/open/v1`), authenticated with an OAuth bearer token

use serde_json::Value;

use crate::error::Result;
use crate::transport::{encode_path, ApiRequest, Backend, Dida365Client};
use crate::types::{Project, ProjectData, Task};

#[derive(Debug, Clone)]
pub struct OpenApiService {
    client: Dida365Client,
}

impl OpenApiService {
    pub fn new(client: Dida365Client) -> Self {
        Self { client }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.client
            .send(ApiRequest::get(Backend::Official, "/open/v1/project"))
            .await
    }

    /// A project with its open tasks and kanban columns
    pub async fn get_project_data(&self, project_id: &str) -> Result<ProjectData> {
        let path = encode_path(&["open", "v1", "project", project_id, "data"])?;
        self.client
            .send(ApiRequest::get(Backend::Official, path))
            .await
    }

    pub async fn get_task(&self, project_id: &str, task_id: &str) -> Result<Task> {
        let path = task_path(project_id, task_id, None)?;
        self.client
            .send(ApiRequest::get(Backend::Official, path))
            .await
    }

    pub async fn create_task(&self, task: &Task) -> Result<Task> {
        let request = ApiRequest::post(Backend::Official, "/open/v1/task").json(task)?;
        self.client.send(request).await
    }

    /// `task` must carry its `id` and `projectId`
    pub async fn update_task(&self, task_id: &str, task: &Task) -> Result<Task> {
        let path = encode_path(&["open", "v1", "task", task_id])?;
        let request = ApiRequest::post(Backend::Official, path).json(task)?;
        self.client.send(request).await
    }

    pub async fn complete_task(&self, project_id: &str, task_id: &str) -> Result<Value> {
        let path = task_path(project_id, task_id, Some("complete"))?;
        self.client
            .send(ApiRequest::post(Backend::Official, path))
            .await
    }

    pub async fn delete_task(&self, project_id: &str, task_id: &str) -> Result<Value> {
        let path = task_path(project_id, task_id, None)?;
        self.client
            .send(ApiRequest::delete(Backend::Official, path))
            .await
    }
}

/// `/open/v1/project/{project}/task/{task}` with an optional action suffix
fn task_path(project_id: &str, task_id: &str, action: Option<&str>) -> Result<String> {
    let mut segments = vec!["open", "v1", "project", project_id, "task", task_id];
    segments.extend(action);
    encode_path(&segments)
}
