//! Completed-task handler implementations

use chrono::NaiveDate;
use dida365_core::completed::{end_of_day, start_of_day};
use dida365_core::types::Task;
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde::Serialize;

use crate::params::{CompletedParams, TimezoneParams};
use crate::result::{invalid_params, json_success, respond};

use super::{summarize, Dida365Context, TaskSummary};

#[derive(Debug, Serialize)]
struct CompletedReport<'a> {
    summary: String,
    count: usize,
    tasks: Vec<TaskSummary<'a>>,
}

fn report(tasks: &[Task]) -> Result<CallToolResult, McpError> {
    json_success(&CompletedReport {
        summary: format!("Found {} completed task(s)", tasks.len()),
        count: tasks.len(),
        tasks: summarize(tasks),
    })
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, McpError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| invalid_params(format!("'{field}' must be a YYYY-MM-DD date, got '{value}'")))
}

/// Either `date`, or both `start_date` and `end_date`
pub async fn get_completed_tasks(
    ctx: &Dida365Context,
    params: CompletedParams,
) -> Result<CallToolResult, McpError> {
    let timezone = params.timezone.as_deref();
    let service = ctx.completed();

    let outcome = match (&params.date, &params.start_date, &params.end_date) {
        (Some(date), _, _) => {
            let date = parse_date("date", date)?;
            service.get_by_date(date, timezone).await
        }
        (None, Some(start), Some(end)) => {
            let start = parse_date("start_date", start)?;
            let end = parse_date("end_date", end)?;
            service
                .get_by_date_range(start_of_day(start), end_of_day(end), timezone)
                .await
        }
        _ => {
            return Err(invalid_params(
                "provide either 'date' or both 'start_date' and 'end_date'",
            ))
        }
    };

    respond(outcome, |tasks| report(&tasks))
}

pub async fn get_completed_today(
    ctx: &Dida365Context,
    params: TimezoneParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.completed().get_today(params.timezone.as_deref()).await,
        |tasks| report(&tasks),
    )
}

pub async fn get_completed_yesterday(
    ctx: &Dida365Context,
    params: TimezoneParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.completed()
            .get_yesterday(params.timezone.as_deref())
            .await,
        |tasks| report(&tasks),
    )
}

pub async fn get_completed_this_week(
    ctx: &Dida365Context,
    params: TimezoneParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.completed()
            .get_this_week(params.timezone.as_deref())
            .await,
        |tasks| report(&tasks),
    )
}
