use anyhow::Result;
use dida365_core::types::UserSettings;
use dida365_core::{SyncService, SyncSnapshot};

use super::App;
use crate::args::SyncCommands;

fn snapshot_summary(s: &SyncSnapshot) -> String {
    let open = s.tasks().iter().filter(|t| !t.is_completed()).count();
    let mut lines = vec![format!(
        "{} tasks ({} open), {} projects, {} folders, {} tags",
        s.tasks().len(),
        open,
        s.projects().len(),
        s.project_groups().len(),
        s.tags().len()
    )];
    if let Some(inbox) = s.inbox_id() {
        lines.push(format!("Inbox: {}", inbox));
    }
    for project in s.projects() {
        lines.push(format!(
            "  {} ({}): {} task(s)",
            project.name,
            project.id,
            s.tasks_in_project(&project.id).count()
        ));
    }
    lines.join("\n")
}

fn settings_summary(s: &UserSettings) -> String {
    let mut lines = vec![format!("Timezone: {}", s.timezone())];
    let extra = [
        ("Start of week", &s.start_of_week),
        ("Date format", &s.date_format),
        ("Time format", &s.time_format),
        ("Theme", &s.theme),
    ];
    for (label, value) in extra {
        if let Some(value) = value {
            lines.push(format!("{}: {}", label, value));
        }
    }
    lines.join("\n")
}

pub async fn run(app: &App, cmd: SyncCommands) -> Result<()> {
    let sync = SyncService::new(app.client.clone());

    match cmd {
        SyncCommands::All => {
            let snapshot = sync.full_sync().await?;
            app.out.show(&snapshot, snapshot_summary)
        }
        SyncCommands::Settings => {
            let settings = sync.get_settings().await?;
            app.out.show(&settings, settings_summary)
        }
        SyncCommands::Timezone => {
            let timezone = sync.get_timezone().await?;
            app.out.show(&timezone, String::clone)
        }
    }
}
