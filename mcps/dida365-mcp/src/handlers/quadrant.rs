//! Eisenhower-matrix handler implementation

use dida365_core::{Quadrant, QuadrantListing};
use rmcp::{model::CallToolResult, ErrorData as McpError};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::params::QuadrantParams;
use crate::result::{invalid_params, json_success, respond};

use super::{Dida365Context, TaskSummary};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuadrantTask<'a> {
    #[serde(flatten)]
    task: TaskSummary<'a>,
    project_name: &'a str,
}

#[derive(Debug, Serialize)]
struct QuadrantBucket<'a> {
    label: &'static str,
    description: &'static str,
    count: usize,
    tasks: Vec<QuadrantTask<'a>>,
}

fn bucket(listing: &QuadrantListing, quadrant: Quadrant) -> QuadrantBucket<'_> {
    let tasks = listing.tasks(quadrant);
    QuadrantBucket {
        label: quadrant.label(),
        description: quadrant.description(),
        count: tasks.len(),
        tasks: tasks
            .iter()
            .map(|t| QuadrantTask {
                task: TaskSummary::from(t),
                project_name: listing.project_name(&t.project_id),
            })
            .collect(),
    }
}

/// All four quadrants, or just the one asked for
pub async fn quadrant_list(
    ctx: &Dida365Context,
    params: QuadrantParams,
) -> Result<CallToolResult, McpError> {
    let only = params
        .quadrant
        .as_deref()
        .map(str::parse::<Quadrant>)
        .transpose()
        .map_err(|e| invalid_params(e.to_string()))?;

    respond(ctx.quadrant().list().await, |listing| {
        let selected: Vec<Quadrant> = match only {
            Some(q) => vec![q],
            None => Quadrant::ALL.to_vec(),
        };
        let view: BTreeMap<String, QuadrantBucket<'_>> = selected
            .into_iter()
            .map(|q| (q.to_string(), bucket(&listing, q)))
            .collect();
        json_success(&view)
    })
}
