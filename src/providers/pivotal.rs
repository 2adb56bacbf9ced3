use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use super::Tracker;
use crate::error::TrackerError;
use crate::model::work_item::WorkItem;

pub const DEFAULT_BASE_URL: &str = "https://www.pivotaltracker.com";

pub struct PivotalTracker {
    base_url: String,
    client: reqwest::Client,
}

impl PivotalTracker {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn stories_url(&self, project_id: &str) -> String {
        format!("{}/services/v5/projects/{project_id}/stories", self.base_url)
    }
}

impl Default for PivotalTracker {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StoryPayload<'a> {
    name: &'a str,
    story_type: &'static str,
    description: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    labels: &'a [String],
}

impl<'a> From<&'a WorkItem> for StoryPayload<'a> {
    fn from(item: &'a WorkItem) -> Self {
        Self {
            name: &item.name,
            story_type: item.kind.as_str(),
            description: &item.description,
            labels: &item.labels,
        }
    }
}

#[async_trait]
impl Tracker for PivotalTracker {
    fn name(&self) -> &str {
        "Pivotal Tracker"
    }

    async fn create_story(&self, project_id: &str, token: &str, item: &WorkItem) -> Result<()> {
        let resp = self
            .client
            .post(self.stories_url(project_id))
            .header("X-TrackerToken", token)
            .json(&StoryPayload::from(item))
            .send()
            .await
            .map_err(TrackerError::from)
            .context("Pivotal Tracker request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TrackerError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }
}
