//! Tags, identified by name

use serde::{Deserialize, Serialize};

/// A tag; `parent` names another tag and `Some("")` clears nesting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Name as the user typed it
    pub fn display_name(&self) -> &str {
        self.raw_name
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or(&self.name)
    }
}

/// `PUT /tag/rename` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRename {
    pub name: String,
    pub new_name: String,
}

/// `PUT /tag/merge` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagMerge {
    pub from: String,
    pub to: String,
}
