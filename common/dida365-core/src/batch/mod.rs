//! Batch mutations through the private API
//!
//! Tasks, projects and folders share the envelope endpoints; subtask links
//! and project moves have endpoints of their own. Tags live in [`tag`].

pub mod envelope;
pub mod tag;

pub use envelope::{
    BatchEnvelope, BatchResponse, ProjectBatch, ProjectGroupBatch, TagBatch, TaskBatch, TaskMove,
    TaskParent,
};
pub use tag::TagService;

use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::transport::{ApiRequest, Backend, Dida365Client};
use crate::types::{Project, ProjectGroup, Task, TaskRef};

/// Task, project and folder mutations
#[derive(Debug, Clone)]
pub struct BatchService {
    client: Dida365Client,
}

impl BatchService {
    pub fn new(client: Dida365Client) -> Self {
        Self { client }
    }

    // ------------------------------------------------------------------
    // Envelope submission
    // ------------------------------------------------------------------

    #[instrument(skip(self, batch), fields(add = batch.add.len(), update = batch.update.len(), delete = batch.delete.len()))]
    pub async fn submit_tasks(&self, batch: &TaskBatch) -> Result<BatchResponse> {
        self.post("/batch/task", batch).await
    }

    #[instrument(skip(self, batch), fields(add = batch.add.len(), update = batch.update.len(), delete = batch.delete.len()))]
    pub async fn submit_projects(&self, batch: &ProjectBatch) -> Result<BatchResponse> {
        self.post("/batch/project", batch).await
    }

    #[instrument(skip(self, batch), fields(add = batch.add.len(), update = batch.update.len(), delete = batch.delete.len()))]
    pub async fn submit_project_groups(&self, batch: &ProjectGroupBatch) -> Result<BatchResponse> {
        self.post("/batch/projectGroup", batch).await
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn set_parents(&self, items: &[TaskParent]) -> Result<Value> {
        self.post("/batch/taskParent", items).await
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn move_tasks(&self, items: &[TaskMove]) -> Result<Value> {
        self.post("/batch/taskProject", items).await
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub async fn create_task(&self, task: Task) -> Result<BatchResponse> {
        self.create_tasks(vec![task]).await
    }

    pub async fn create_tasks(&self, tasks: Vec<Task>) -> Result<BatchResponse> {
        self.submit_tasks(&TaskBatch::add(tasks)).await
    }

    pub async fn update_task(&self, task: Task) -> Result<BatchResponse> {
        self.update_tasks(vec![task]).await
    }

    pub async fn update_tasks(&self, tasks: Vec<Task>) -> Result<BatchResponse> {
        self.submit_tasks(&TaskBatch::update(tasks)).await
    }

    pub async fn complete_task(&self, task_id: &str, project_id: &str) -> Result<BatchResponse> {
        self.complete_tasks(vec![TaskRef::new(task_id, project_id)])
            .await
    }

    pub async fn complete_tasks(&self, refs: Vec<TaskRef>) -> Result<BatchResponse> {
        self.submit_tasks(&envelope::complete_tasks(refs)).await
    }

    pub async fn delete_task(&self, task_id: &str, project_id: &str) -> Result<BatchResponse> {
        self.delete_tasks(vec![TaskRef::new(task_id, project_id)])
            .await
    }

    pub async fn delete_tasks(&self, refs: Vec<TaskRef>) -> Result<BatchResponse> {
        self.submit_tasks(&TaskBatch::delete(refs)).await
    }

    /// Make `task_id` a subtask of `parent_id`
    pub async fn set_subtask(&self, task_id: &str, parent_id: &str, project_id: &str) -> Result<Value> {
        self.set_parents(&[TaskParent::new(task_id, parent_id, project_id)])
            .await
    }

    pub async fn move_task(&self, task_id: &str, from_project_id: &str, to_project_id: &str) -> Result<Value> {
        self.move_tasks(&[TaskMove::new(task_id, from_project_id, to_project_id)])
            .await
    }

    /// Move every listed task from one project to another in one call
    pub async fn move_all_tasks(
        &self,
        task_ids: Vec<String>,
        from_project_id: &str,
        to_project_id: &str,
    ) -> Result<Value> {
        self.move_tasks(&envelope::move_all(task_ids, from_project_id, to_project_id))
            .await
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn create_project(&self, project: Project) -> Result<BatchResponse> {
        self.create_projects(vec![project]).await
    }

    pub async fn create_projects(&self, projects: Vec<Project>) -> Result<BatchResponse> {
        self.submit_projects(&ProjectBatch::add(projects)).await
    }

    pub async fn update_project(&self, project: Project) -> Result<BatchResponse> {
        self.update_projects(vec![project]).await
    }

    pub async fn update_projects(&self, projects: Vec<Project>) -> Result<BatchResponse> {
        self.submit_projects(&ProjectBatch::update(projects)).await
    }

    pub async fn delete_projects(&self, project_ids: Vec<String>) -> Result<BatchResponse> {
        self.submit_projects(&ProjectBatch::delete(project_ids)).await
    }

    // ------------------------------------------------------------------
    // Project groups (folders)
    // ------------------------------------------------------------------

    pub async fn create_project_group(&self, group: ProjectGroup) -> Result<BatchResponse> {
        self.create_project_groups(vec![group]).await
    }

    pub async fn create_project_groups(&self, groups: Vec<ProjectGroup>) -> Result<BatchResponse> {
        self.submit_project_groups(&ProjectGroupBatch::add(groups))
            .await
    }

    pub async fn update_project_group(&self, group: ProjectGroup) -> Result<BatchResponse> {
        self.update_project_groups(vec![group]).await
    }

    pub async fn update_project_groups(&self, groups: Vec<ProjectGroup>) -> Result<BatchResponse> {
        self.submit_project_groups(&ProjectGroupBatch::update(groups))
            .await
    }

    pub async fn delete_project_groups(&self, group_ids: Vec<String>) -> Result<BatchResponse> {
        self.submit_project_groups(&ProjectGroupBatch::delete(group_ids))
            .await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned + Default,
    {
        let request = ApiRequest::post(Backend::Private, path).json(body)?;
        self.client.send(request).await
    }
}
