pub mod pivotal;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::work_item::WorkItem;

#[async_trait]
pub trait Tracker: Send + Sync {
    fn name(&self) -> &str;
    /// Create one story in `project_id`. Any non-2xx answer is an error.
    async fn create_story(&self, project_id: &str, token: &str, item: &WorkItem) -> Result<()>;
}
