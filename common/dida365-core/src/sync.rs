//! Full-state sync against the private API
//!
//! One `GET /batch/check/0` returns every task, project, folder and tag. The
//! engine reshapes it into a [`SyncSnapshot`]; lookups by id are answered from
//! the snapshot, never from a per-entity endpoint.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::transport::{ApiRequest, Backend, Dida365Client};
use crate::types::{BatchCheckResponse, Project, ProjectGroup, Tag, Task, UserSettings};

/// Immutable result of one full sync
///
/// Task `project_id`s are not checked against `projects`; a lookup that
/// finds nothing is an "unknown", not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSnapshot {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    project_groups: Vec<ProjectGroup>,
    tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inbox_id: Option<String>,
    #[serde(skip)]
    task_index: HashMap<String, usize>,
    #[serde(skip)]
    project_index: HashMap<String, usize>,
}

/// A project (if known) and the tasks that point at it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectWithTasks {
    pub project: Option<Project>,
    pub tasks: Vec<Task>,
}

impl SyncSnapshot {
    pub fn new(
        tasks: Vec<Task>,
        projects: Vec<Project>,
        project_groups: Vec<ProjectGroup>,
        tags: Vec<Tag>,
        inbox_id: Option<String>,
    ) -> Self {
        let task_index = index_by(&tasks, |t| &t.id);
        let project_index = index_by(&projects, |p| &p.id);
        Self {
            tasks,
            projects,
            project_groups,
            tags,
            inbox_id,
            task_index,
            project_index,
        }
    }

    /// Reshape the raw envelope; absent collections become empty
    pub fn from_envelope(raw: BatchCheckResponse) -> Self {
        let tasks = raw
            .sync_task_bean
            .and_then(|bean| bean.update)
            .unwrap_or_default();
        Self::new(
            tasks,
            raw.project_profiles.unwrap_or_default(),
            raw.project_groups.unwrap_or_default(),
            raw.tags.unwrap_or_default(),
            raw.inbox_id,
        )
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_groups(&self) -> &[ProjectGroup] {
        &self.project_groups
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn inbox_id(&self) -> Option<&str> {
        self.inbox_id.as_deref()
    }

    /// First task with this id
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.task_index.get(id).map(|&i| &self.tasks[i])
    }

    /// First project with this id
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.project_index.get(id).map(|&i| &self.projects[i])
    }

    /// Tasks whose `project_id` equals `project_id`, in snapshot order
    pub fn tasks_in_project<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn project_with_tasks(&self, project_id: &str) -> ProjectWithTasks {
        ProjectWithTasks {
            project: self.project(project_id).cloned(),
            tasks: self.tasks_in_project(project_id).cloned().collect(),
        }
    }

    /// Project id to display name
    pub fn project_names(&self) -> HashMap<String, String> {
        self.projects
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }

    pub fn into_tags(self) -> Vec<Tag> {
        self.tags
    }
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        index.entry(key(item).clone()).or_insert(i);
    }
    index
}

/// Sync and settings queries
#[derive(Debug, Clone)]
pub struct SyncService {
    client: Dida365Client,
}

impl SyncService {
    pub fn new(client: Dida365Client) -> Self {
        Self { client }
    }

    /// Fetch everything in one request
    #[instrument(skip(self))]
    pub async fn full_sync(&self) -> Result<SyncSnapshot> {
        let raw: BatchCheckResponse = self
            .client
            .send(ApiRequest::get(Backend::Private, "/batch/check/0"))
            .await?;
        let snapshot = SyncSnapshot::from_envelope(raw);

        debug!(
            tasks = snapshot.tasks.len(),
            projects = snapshot.projects.len(),
            groups = snapshot.project_groups.len(),
            tags = snapshot.tags.len(),
            "sync complete"
        );
        Ok(snapshot)
    }

    pub async fn get_settings(&self) -> Result<UserSettings> {
        self.client
            .send(ApiRequest::get(Backend::Private, "/user/preferences/settings"))
            .await
    }

    /// Account timezone, "Asia/Shanghai" when the account has none
    pub async fn get_timezone(&self) -> Result<String> {
        Ok(self.get_settings().await?.timezone().to_string())
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.full_sync().await?.into_projects())
    }

    pub async fn get_project_with_tasks(&self, project_id: &str) -> Result<ProjectWithTasks> {
        Ok(self.full_sync().await?.project_with_tasks(project_id))
    }

    /// Task by id from a fresh snapshot; `None` when it is not there
    pub async fn get_task(&self, task_id: &str) -> Result<Option<Task>> {
        Ok(self.full_sync().await?.task(task_id).cloned())
    }
}
