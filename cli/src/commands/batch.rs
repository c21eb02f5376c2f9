use anyhow::Result;
use dida365_core::types::{Project, ProjectGroup, TaskRef};
use dida365_core::{BatchResponse, BatchService};

use super::App;
use crate::args::BatchCommands;
use crate::output::{batch_summary, BatchReport};

fn report(app: &App, message: &str, response: &BatchResponse) -> Result<()> {
    app.out.show(&BatchReport { message, response }, |r| {
        batch_summary(r.message, r.response)
    })
}

fn refs(project_id: &str, task_ids: Vec<String>) -> Vec<TaskRef> {
    task_ids
        .into_iter()
        .map(|id| TaskRef::new(id, project_id))
        .collect()
}

pub async fn run(app: &App, cmd: BatchCommands) -> Result<()> {
    let batch = BatchService::new(app.client.clone());

    match cmd {
        BatchCommands::MoveTask {
            task_id,
            from_project,
            to_project,
        } => {
            batch.move_task(&task_id, &from_project, &to_project).await?;
            app.out.message(format!(
                "Task {} moved from {} to {}.",
                task_id, from_project, to_project
            ))
        }
        BatchCommands::SetSubtask {
            task_id,
            parent_id,
            project_id,
        } => {
            batch.set_subtask(&task_id, &parent_id, &project_id).await?;
            app.out
                .message(format!("Task {} is now a subtask of {}.", task_id, parent_id))
        }
        BatchCommands::CompleteTasks {
            project_id,
            task_ids,
        } => {
            let count = task_ids.len();
            let response = batch.complete_tasks(refs(&project_id, task_ids)).await?;
            report(app, &format!("Completed {} task(s).", count), &response)
        }
        BatchCommands::DeleteTasks {
            project_id,
            task_ids,
        } => {
            let count = task_ids.len();
            let response = batch.delete_tasks(refs(&project_id, task_ids)).await?;
            report(app, &format!("Deleted {} task(s).", count), &response)
        }
        BatchCommands::CreateProject { name, color, group } => {
            let project = Project {
                color,
                group_id: group,
                ..Project::new(name.as_str())
            };
            let response = batch.create_project(project).await?;
            report(app, &format!("Project '{}' created.", name), &response)
        }
        BatchCommands::DeleteProjects { project_ids } => {
            let count = project_ids.len();
            let response = batch.delete_projects(project_ids).await?;
            report(app, &format!("Deleted {} project(s).", count), &response)
        }
        BatchCommands::CreateFolder { name } => {
            let response = batch
                .create_project_group(ProjectGroup::new(name.as_str()))
                .await?;
            report(app, &format!("Folder '{}' created.", name), &response)
        }
        BatchCommands::DeleteFolders { group_ids } => {
            let count = group_ids.len();
            let response = batch.delete_project_groups(group_ids).await?;
            report(app, &format!("Deleted {} folder(s).", count), &response)
        }
    }
}
