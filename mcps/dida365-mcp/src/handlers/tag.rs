//! Tag handler implementations

use dida365_core::types::Tag;
use rmcp::{model::CallToolResult, ErrorData as McpError};

use crate::params::{CreateTagParams, DeleteTagParams, MergeTagsParams, RenameTagParams, UpdateTagParams};
use crate::result::{invalid_params, json_success, respond, text_success};

use super::{batch_report, Dida365Context};

pub async fn list_tags(ctx: &Dida365Context) -> Result<CallToolResult, McpError> {
    respond(ctx.tags().list_all().await, |tags| json_success(&tags))
}

pub async fn create_tag(
    ctx: &Dida365Context,
    params: CreateTagParams,
) -> Result<CallToolResult, McpError> {
    let name = params.name.clone();
    respond(ctx.tags().create(Tag::from(params)).await, |response| {
        batch_report(format!("Tag '{}' created.", name), response)
    })
}

pub async fn rename_tag(
    ctx: &Dida365Context,
    params: RenameTagParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.tags().rename(&params.old_name, &params.new_name).await,
        |_| {
            Ok(text_success(format!(
                "Tag '{}' renamed to '{}'.",
                params.old_name, params.new_name
            )))
        },
    )
}

pub async fn update_tag(
    ctx: &Dida365Context,
    params: UpdateTagParams,
) -> Result<CallToolResult, McpError> {
    let name = params.name.clone();
    respond(ctx.tags().update(Tag::from(params)).await, |response| {
        batch_report(format!("Tag '{}' updated.", name), response)
    })
}

pub async fn merge_tags(
    ctx: &Dida365Context,
    params: MergeTagsParams,
) -> Result<CallToolResult, McpError> {
    respond(
        ctx.tags().merge(&params.from_tag, &params.to_tag).await,
        |_| {
            Ok(text_success(format!(
                "Tag '{}' merged into '{}'.",
                params.from_tag, params.to_tag
            )))
        },
    )
}

pub async fn delete_tag(
    ctx: &Dida365Context,
    params: DeleteTagParams,
) -> Result<CallToolResult, McpError> {
    if params.names.is_empty() {
        return Err(invalid_params("'names' must list at least one tag"));
    }
    respond(ctx.tags().delete_batch(&params.names).await, |_| {
        Ok(text_success(format!(
            "Deleted {} tag(s): {}",
            params.names.len(),
            params.names.join(", ")
        )))
    })
}
