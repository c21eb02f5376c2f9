//! Handler implementations for Dida365 MCP tools
//!
//! Organized by domain: auth, project, task, completed, sync, tag, batch,
//! quadrant

mod auth;
mod batch;
mod completed;
mod project;
mod quadrant;
mod sync;
mod tag;
mod task;

pub use auth::*;
pub use batch::*;
pub use completed::*;
pub use project::*;
pub use quadrant::*;
pub use sync::*;
pub use tag::*;
pub use task::*;

use dida365_core::{
    BatchService, CompletedService, Config, CredentialStore, Dida365Client, OpenApiService,
    QuadrantService, SyncService, TagService,
};
use dida365_core::types::Task;
use serde::Serialize;

/// Configuration and client shared by every tool call
#[derive(Debug, Clone)]
pub struct Dida365Context {
    config: Config,
    client: Dida365Client,
}

impl Dida365Context {
    pub fn new(config: Config) -> dida365_core::Result<Self> {
        let client = config.client()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credential_store(&self) -> &CredentialStore {
        self.client.credential_store()
    }

    pub fn sync(&self) -> SyncService {
        SyncService::new(self.client.clone())
    }

    pub fn batch(&self) -> BatchService {
        BatchService::new(self.client.clone())
    }

    pub fn tags(&self) -> TagService {
        TagService::new(self.client.clone())
    }

    pub fn completed(&self) -> CompletedService {
        CompletedService::new(self.client.clone())
    }

    pub fn open_api(&self) -> OpenApiService {
        OpenApiService::new(self.client.clone())
    }

    pub fn quadrant(&self) -> QuadrantService {
        QuadrantService::new(self.sync())
    }
}

/// Compact task view used in listings
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub project_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

impl<'a> From<&'a Task> for TaskSummary<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: &task.id,
            title: task.title(),
            project_id: &task.project_id,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date.as_deref(),
            completed_time: task.completed_time.as_deref(),
            tags: task.tags.as_deref(),
        }
    }
}

pub fn summarize(tasks: &[Task]) -> Vec<TaskSummary<'_>> {
    tasks.iter().map(TaskSummary::from).collect()
}
