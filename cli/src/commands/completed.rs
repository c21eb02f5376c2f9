use anyhow::{Context, Result};
use chrono::NaiveDate;
use dida365_core::completed::{end_of_day, start_of_day};
use dida365_core::CompletedService;

use super::App;
use crate::args::CompletedCommands;
use crate::output::task_list;

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("expected a YYYY-MM-DD date, got '{}'", value))
}

pub async fn run(app: &App, cmd: CompletedCommands) -> Result<()> {
    let service = CompletedService::new(app.client.clone());

    let tasks = match cmd {
        CompletedCommands::Today(tz) => service.get_today(tz.timezone.as_deref()).await?,
        CompletedCommands::Yesterday(tz) => service.get_yesterday(tz.timezone.as_deref()).await?,
        CompletedCommands::Week(tz) => service.get_this_week(tz.timezone.as_deref()).await?,
        CompletedCommands::Date { date, tz } => {
            service
                .get_by_date(parse_date(&date)?, tz.timezone.as_deref())
                .await?
        }
        CompletedCommands::Range { start, end, tz } => {
            let start = start_of_day(parse_date(&start)?);
            let end = end_of_day(parse_date(&end)?);
            service
                .get_by_date_range(start, end, tz.timezone.as_deref())
                .await?
        }
    };

    app.out.show(&tasks, |t| {
        format!("{} completed task(s)\n{}", t.len(), task_list(t))
    })
}
