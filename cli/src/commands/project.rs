use anyhow::Result;
use dida365_core::SyncService;

use super::App;
use crate::args::ProjectCommands;
use crate::output::{project_list, project_with_tasks};

pub async fn run(app: &App, cmd: ProjectCommands) -> Result<()> {
    let sync = SyncService::new(app.client.clone());

    match cmd {
        ProjectCommands::List => {
            let projects = sync.list_projects().await?;
            app.out.show(&projects, |p| project_list(p))
        }
        ProjectCommands::Show { id } => {
            let data = sync.get_project_with_tasks(&id).await?;
            app.out.show(&data, |d| project_with_tasks(&id, d))
        }
    }
}
