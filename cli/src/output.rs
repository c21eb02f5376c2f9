//! Plain-text and JSON rendering of command results
//!
//! Renderers return strings so they can be tested; `Output` decides whether
//! a result is printed as text or as pretty JSON.

use dida365_core::types::{Priority, Project, Tag, Task};
use dida365_core::{BatchResponse, ProjectWithTasks};
use serde::Serialize;

/// Where results go and in which form
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as JSON, or the text produced by `plain`
    pub fn show<T: Serialize>(&self, value: &T, plain: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", plain(value));
        }
        Ok(())
    }

    /// Print a confirmation; in JSON mode it becomes `{"message": ...}`
    pub fn message(&self, text: impl Into<String>) -> anyhow::Result<()> {
        let text = text.into();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "message": text }))?);
        } else {
            println!("{}", text);
        }
        Ok(())
    }
}

/// One line per task: checkbox, title, id, then the optional bits
pub fn task_line(task: &Task) -> String {
    let mark = if task.is_completed() { "[x]" } else { "[ ]" };
    let mut line = format!("{} {} ({})", mark, task.title(), task.id);

    if let Some(priority) = task.priority_level().filter(|p| *p != Priority::None) {
        line.push_str(&format!(" !{}", priority));
    }
    if let Some(due) = task.due_date.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!(" due {}", due));
    }
    if let Some(done) = task.completed_time.as_deref() {
        line.push_str(&format!(" done {}", done));
    }
    if let Some(tags) = task.tags.as_deref().filter(|t| !t.is_empty()) {
        line.push_str(&format!(" #{}", tags.join(" #")));
    }
    line
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_string();
    }
    tasks.iter().map(task_line).collect::<Vec<_>>().join("\n")
}

/// Multi-line view of a single task
pub fn task_detail(task: &Task) -> String {
    let mut lines = vec![
        task_line(task),
        format!("  project: {}", task.project_id),
    ];
    if let Some(parent) = task.parent_id.as_deref() {
        lines.push(format!("  parent:  {}", parent));
    }
    if let Some(content) = task.content.as_deref().filter(|c| !c.is_empty()) {
        lines.push(String::new());
        lines.extend(content.lines().map(|l| format!("  {}", l)));
    }
    for item in task.items.iter().flatten() {
        let mark = if item.status.unwrap_or_default() != 0 { "[x]" } else { "[ ]" };
        lines.push(format!("    {} {}", mark, item.title));
    }
    lines.join("\n")
}

pub fn project_line(project: &Project) -> String {
    let mut line = format!("{} ({})", project.name, project.id);
    if project.closed == Some(true) {
        line.push_str(" [archived]");
    }
    line
}

pub fn project_list(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects.".to_string();
    }
    projects.iter().map(project_line).collect::<Vec<_>>().join("\n")
}

/// Project header over its tasks; a project missing from sync shows its id
pub fn project_with_tasks(project_id: &str, data: &ProjectWithTasks) -> String {
    let header = match &data.project {
        Some(project) => project_line(project),
        None => format!("Project {} not found", project_id),
    };
    format!("{}\n\n{}", header, task_list(&data.tasks))
}

pub fn tag_line(tag: &Tag) -> String {
    let mut line = tag.display_name().to_string();
    if let Some(parent) = tag.parent.as_deref().filter(|p| !p.is_empty()) {
        line = format!("{}/{}", parent, line);
    }
    if let Some(color) = tag.color.as_deref() {
        line.push_str(&format!(" {}", color));
    }
    line
}

pub fn tag_list(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags.".to_string();
    }
    tags.iter().map(tag_line).collect::<Vec<_>>().join("\n")
}

/// Message, then any per-id failures reported by the batch endpoint
pub fn batch_summary(message: &str, response: &BatchResponse) -> String {
    let mut lines = vec![message.to_string()];
    if response.has_errors() {
        let mut failed: Vec<_> = response.id2error.iter().collect();
        failed.sort_by(|a, b| a.0.cmp(b.0));
        lines.push(format!("{} item(s) reported errors:", failed.len()));
        lines.extend(failed.into_iter().map(|(id, reason)| format!("  {}: {}", id, reason)));
    }
    lines.join("\n")
}

/// Batch result as printed in JSON mode
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub message: &'a str,
    #[serde(flatten)]
    pub response: &'a BatchResponse,
}
