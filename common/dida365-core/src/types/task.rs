//! Task records as exchanged with Dida365

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `status` value of a completed task
pub const STATUS_COMPLETED: i32 = 2;

/// A task; also used as a partial record for updates
///
/// Absent fields are omitted on the wire, so a task built with only
/// `id`, `project_id` and `status` updates just the status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_flag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChecklistItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_floating: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<i32>,
}

/// Checklist entry embedded in a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

impl Task {
    /// New task to be created in `project_id`
    pub fn new(title: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    /// Partial record naming an existing task, to be filled with changes
    pub fn reference(id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn is_completed(&self) -> bool {
        self.status == Some(STATUS_COMPLETED)
    }

    pub fn has_due_date(&self) -> bool {
        self.due_date.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Priority level; unknown wire values map to `None`
    pub fn priority_level(&self) -> Option<Priority> {
        Priority::from_value(self.priority.unwrap_or_default())
    }

    /// Identity pair used by batch deletes
    pub fn task_ref(&self) -> TaskRef {
        TaskRef::new(&self.id, &self.project_id)
    }
}

/// `(taskId, projectId)` pair naming a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    pub task_id: String,
    pub project_id: String,
}

impl TaskRef {
    pub fn new(task_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            project_id: project_id.into(),
        }
    }
}

/// Task priority as understood by the Dida365 clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Wire value (0, 1, 3, 5)
    pub fn value(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 3,
            Self::High => 5,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            3 => Some(Self::Medium),
            5 => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for Priority {
    type Err = String;

    /// Accepts a name (`high`) or a wire value (`5`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(Self::None),
            "low" | "1" => Ok(Self::Low),
            "medium" | "3" => Ok(Self::Medium),
            "high" | "5" => Ok(Self::High),
            other => Err(format!(
                "invalid priority '{}': expected none/low/medium/high or 0/1/3/5",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_update_omits_absent_fields() {
        let task = Task {
            status: Some(STATUS_COMPLETED),
            ..Task::reference("t1", "p1")
        };
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({"id": "t1", "projectId": "p1", "status": 2})
        );
    }

    #[test]
    fn test_new_task_has_no_id() {
        let task = Task::new("Write report", "p1");
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({"projectId": "p1", "title": "Write report"})
        );
    }

    #[test]
    fn test_unknown_vendor_fields_are_ignored() {
        let task: Task = serde_json::from_value(json!({
            "id": "t1",
            "projectId": "p1",
            "title": "Hello",
            "priority": 3,
            "status": 0,
            "tags": ["work"],
            "focusSummaries": [{"x": 1}],
            "reminders": [{"id": "r1", "trigger": "TRIGGER:PT0S"}],
            "items": [{"id": "i1", "title": "step", "status": 1}]
        }))
        .unwrap();

        assert_eq!(task.title(), "Hello");
        assert_eq!(task.priority_level(), Some(Priority::Medium));
        assert_eq!(task.items.as_ref().unwrap()[0].title, "step");
        assert!(!task.is_completed());
    }

    #[test]
    fn test_due_date_presence() {
        let mut task = Task::reference("t1", "p1");
        assert!(!task.has_due_date());
        task.due_date = Some(String::new());
        assert!(!task.has_due_date());
        task.due_date = Some("2024-01-01T00:00:00.000+0000".to_string());
        assert!(task.has_due_date());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("3".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("2".parse::<Priority>().is_err());
        assert_eq!(Priority::from_value(4), None);
        assert_eq!(Priority::Low.value(), 1);
    }

    #[test]
    fn test_task_ref_wire_shape() {
        assert_eq!(
            serde_json::to_value(TaskRef::new("t1", "p1")).unwrap(),
            json!({"taskId": "t1", "projectId": "p1"})
        );
    }
}
