use anyhow::{anyhow, Result};
use dida365_core::types::{Priority, Task};
use dida365_core::{OpenApiService, SyncService};

use super::App;
use crate::args::TaskCommands;
use crate::output::{task_detail, task_line};

pub async fn run(app: &App, cmd: TaskCommands) -> Result<()> {
    let api = OpenApiService::new(app.client.clone());

    match cmd {
        TaskCommands::Create {
            title,
            project,
            content,
            priority,
            due,
            tags,
        } => {
            let priority = priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()
                .map_err(|e| anyhow!(e))?;
            let task = Task {
                content,
                priority: priority.map(Priority::value),
                due_date: due,
                tags: (!tags.is_empty()).then_some(tags),
                ..Task::new(title, project.unwrap_or_default())
            };
            let created = api.create_task(&task).await?;
            app.out.show(&created, |t| format!("Created {}", task_line(t)))
        }
        TaskCommands::Show {
            project_id,
            task_id,
        } => {
            let task = api.get_task(&project_id, &task_id).await?;
            app.out.show(&task, |t| task_detail(t))
        }
        TaskCommands::Complete {
            project_id,
            task_id,
        } => {
            api.complete_task(&project_id, &task_id).await?;
            app.out.message(format!("Task {} completed.", task_id))
        }
        TaskCommands::Delete {
            project_id,
            task_id,
        } => {
            api.delete_task(&project_id, &task_id).await?;
            app.out.message(format!("Task {} deleted.", task_id))
        }
        TaskCommands::Find { task_id } => {
            match SyncService::new(app.client.clone()).get_task(&task_id).await? {
                Some(task) => app.out.show(&task, |t| task_detail(t)),
                None => app.out.message(format!("Task {} not found.", task_id)),
            }
        }
    }
}
