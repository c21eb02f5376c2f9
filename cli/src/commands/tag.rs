use anyhow::Result;
use dida365_core::types::Tag;
use dida365_core::{BatchResponse, TagService};

use super::App;
use crate::args::TagCommands;
use crate::output::{batch_summary, tag_list, BatchReport};

fn report(app: &App, message: &str, response: &BatchResponse) -> Result<()> {
    app.out.show(&BatchReport { message, response }, |r| {
        batch_summary(r.message, r.response)
    })
}

pub async fn run(app: &App, cmd: TagCommands) -> Result<()> {
    let tags = TagService::new(app.client.clone());

    match cmd {
        TagCommands::List => {
            let all = tags.list_all().await?;
            app.out.show(&all, |t| tag_list(t))
        }
        TagCommands::Create {
            name,
            color,
            parent,
        } => {
            let tag = Tag {
                color,
                parent,
                ..Tag::new(name.as_str())
            };
            let response = tags.create(tag).await?;
            report(app, &format!("Tag '{}' created.", name), &response)
        }
        TagCommands::Rename { old_name, new_name } => {
            tags.rename(&old_name, &new_name).await?;
            app.out
                .message(format!("Tag '{}' renamed to '{}'.", old_name, new_name))
        }
        TagCommands::Color { name, color } => {
            let response = tags.set_color(&name, &color).await?;
            report(app, &format!("Tag '{}' colour set to {}.", name, color), &response)
        }
        TagCommands::Nest { name, parent } => {
            let parent = parent.unwrap_or_default();
            let response = tags.set_parent(&name, &parent).await?;
            let message = if parent.is_empty() {
                format!("Tag '{}' is now top-level.", name)
            } else {
                format!("Tag '{}' nested under '{}'.", name, parent)
            };
            report(app, &message, &response)
        }
        TagCommands::Merge { from, to } => {
            tags.merge(&from, &to).await?;
            app.out
                .message(format!("Tag '{}' merged into '{}'.", from, to))
        }
        TagCommands::Delete { names } => {
            tags.delete_batch(&names).await?;
            app.out.message(format!("Deleted {} tag(s).", names.len()))
        }
    }
}
