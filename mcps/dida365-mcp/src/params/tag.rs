//! Tag parameter types

use dida365_core::types::Tag;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTagParams {
    #[schemars(description = "Tag name")]
    pub name: String,

    #[schemars(description = "Tag color (e.g., '#ff0000')")]
    pub color: Option<String>,

    #[schemars(description = "Parent tag name for nesting")]
    pub parent: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RenameTagParams {
    #[schemars(description = "Current tag name")]
    pub old_name: String,

    #[schemars(description = "New tag name")]
    pub new_name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTagParams {
    #[schemars(description = "Tag name to update")]
    pub name: String,

    #[schemars(description = "New color (e.g., '#ff0000')")]
    pub color: Option<String>,

    #[schemars(description = "Parent tag name (empty string to remove parent)")]
    pub parent: Option<String>,

    #[schemars(description = "Sort order")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MergeTagsParams {
    #[schemars(description = "Source tag name (will be deleted)")]
    pub from_tag: String,

    #[schemars(description = "Target tag name (will remain)")]
    pub to_tag: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteTagParams {
    #[schemars(description = "Tag names to delete")]
    pub names: Vec<String>,
}

impl From<CreateTagParams> for Tag {
    fn from(p: CreateTagParams) -> Self {
        Tag {
            color: p.color,
            parent: p.parent,
            ..Tag::new(p.name)
        }
    }
}

impl From<UpdateTagParams> for Tag {
    fn from(p: UpdateTagParams) -> Self {
        Tag {
            color: p.color,
            parent: p.parent,
            sort_order: p.sort_order,
            ..Tag::new(p.name)
        }
    }
}
