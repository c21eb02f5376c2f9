//! Tag mutations
//!
//! Tags are keyed by name. Add/update share the envelope endpoint; delete,
//! rename and merge each have their own. Merge semantics (what happens to
//! the tasks carrying the source tag) belong to the server.

use serde_json::Value;
use tracing::instrument;

use super::envelope::{self, BatchResponse, TagBatch};
use crate::error::Result;
use crate::sync::SyncService;
use crate::transport::{ApiRequest, Backend, Dida365Client};
use crate::types::{Tag, TagMerge, TagRename};

#[derive(Debug, Clone)]
pub struct TagService {
    client: Dida365Client,
}

impl TagService {
    pub fn new(client: Dida365Client) -> Self {
        Self { client }
    }

    /// All tags, from a full sync
    pub async fn list_all(&self) -> Result<Vec<Tag>> {
        let snapshot = SyncService::new(self.client.clone()).full_sync().await?;
        Ok(snapshot.into_tags())
    }

    #[instrument(skip(self, batch), fields(add = batch.add.len(), update = batch.update.len()))]
    pub async fn submit(&self, batch: &TagBatch) -> Result<BatchResponse> {
        let request = ApiRequest::post(Backend::Private, "/batch/tag").json(batch)?;
        self.client.send(request).await
    }

    pub async fn create(&self, tag: Tag) -> Result<BatchResponse> {
        self.create_batch(vec![tag]).await
    }

    pub async fn create_batch(&self, tags: Vec<Tag>) -> Result<BatchResponse> {
        self.submit(&TagBatch::add(tags)).await
    }

    /// Update colour, sort order, sort type or parent
    pub async fn update(&self, tag: Tag) -> Result<BatchResponse> {
        self.update_batch(vec![tag]).await
    }

    pub async fn update_batch(&self, tags: Vec<Tag>) -> Result<BatchResponse> {
        self.submit(&TagBatch::update(tags)).await
    }

    pub async fn set_color(&self, name: &str, color: &str) -> Result<BatchResponse> {
        self.submit(&envelope::tag_color(name, color)).await
    }

    /// Nest `name` under `parent`; an empty parent un-nests it
    pub async fn set_parent(&self, name: &str, parent: &str) -> Result<BatchResponse> {
        self.submit(&envelope::tag_parent(name, parent)).await
    }

    /// Change a tag's label; its tasks keep it
    #[instrument(skip(self))]
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<Value> {
        let body = TagRename {
            name: old_name.to_string(),
            new_name: new_name.to_string(),
        };
        let request = ApiRequest::put(Backend::Private, "/tag/rename").json(&body)?;
        self.client.send(request).await
    }

    /// Fold `from_tag` into `to_tag`; the server retags and drops `from_tag`
    #[instrument(skip(self))]
    pub async fn merge(&self, from_tag: &str, to_tag: &str) -> Result<Value> {
        let body = TagMerge {
            from: from_tag.to_string(),
            to: to_tag.to_string(),
        };
        let request = ApiRequest::put(Backend::Private, "/tag/merge").json(&body)?;
        self.client.send(request).await
    }

    pub async fn delete(&self, name: &str) -> Result<Value> {
        self.delete_batch(&[name.to_string()]).await
    }

    /// `DELETE /tag?name=a&name=b`
    #[instrument(skip(self), fields(count = names.len()))]
    pub async fn delete_batch(&self, names: &[String]) -> Result<Value> {
        let request = names
            .iter()
            .fold(ApiRequest::delete(Backend::Private, "/tag"), |req, name| {
                req.query("name", name.as_str())
            });
        self.client.send(request).await
    }
}
