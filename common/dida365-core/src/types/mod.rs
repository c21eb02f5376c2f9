//! Dida365 data model
//!
//! Vendor JSON uses camelCase names and grows new fields over time; every
//! record here names the fields the tools use and ignores the rest.

mod project;
mod tag;
mod task;

pub use project::{Project, ProjectData, ProjectGroup};
pub use tag::{Tag, TagMerge, TagRename};
pub use task::{ChecklistItem, Priority, Task, TaskRef, STATUS_COMPLETED};

use serde::{Deserialize, Serialize};

/// Timezone assumed when neither the caller nor the account names one
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// `GET /user/preferences/settings` response (known fields only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_of_week: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<serde_json::Value>,
}

impl UserSettings {
    /// Account timezone, falling back to [`DEFAULT_TIMEZONE`]
    pub fn timezone(&self) -> &str {
        self.time_zone
            .as_deref()
            .filter(|tz| !tz.is_empty())
            .unwrap_or(DEFAULT_TIMEZONE)
    }
}

/// `GET /batch/check/0` response (the parts the sync engine reads)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCheckResponse {
    #[serde(default)]
    pub sync_task_bean: Option<SyncTaskBean>,
    #[serde(default)]
    pub project_profiles: Option<Vec<Project>>,
    #[serde(default)]
    pub project_groups: Option<Vec<ProjectGroup>>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub inbox_id: Option<String>,
}

/// Task section of the sync envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncTaskBean {
    #[serde(default)]
    pub update: Option<Vec<Task>>,
}
