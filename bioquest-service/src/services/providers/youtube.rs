use super::{error_for_status, observe, ProviderError, VideoSearchProvider};
use crate::config::YoutubeConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::observability::TracedClientExt;

const PROVIDER: &str = "youtube";

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

pub fn watch_url(video_id: &str) -> String {
    format!("{}{}", WATCH_URL_BASE, video_id)
}

pub struct YoutubeVideoProvider {
    client: Client,
    api_key: Secret<String>,
    base_url: String,
}

impl YoutubeVideoProvider {
    pub fn new(client: Client, config: &YoutubeConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn search(&self, topic: &str) -> Result<Option<String>, ProviderError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "YouTube API key not configured".to_string(),
            ));
        }

        let url = format!("{}/search", self.base_url);

        let response = self
            .client
            .traced_get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", topic),
                ("key", self.api_key.expose_secret().as_str()),
                ("type", "video"),
                ("maxResults", "1"),
            ])
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let response = error_for_status("YouTube", response).await?;

        let search: SearchListResponse = response
            .json()
            .await
            .map_err(ProviderError::from_decode)?;

        Ok(search.first_video_id().map(|id| watch_url(&id)))
    }
}

#[async_trait]
impl VideoSearchProvider for YoutubeVideoProvider {
    async fn first_video_url(&self, topic: &str) -> Result<Option<String>, ProviderError> {
        observe(PROVIDER, self.search(topic)).await
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    #[serde(default)]
    video_id: Option<String>,
}

impl SearchListResponse {
    fn first_video_id(self) -> Option<String> {
        self.items
            .into_iter()
            .next()
            .and_then(|item| item.id)
            .and_then(|id| id.video_id)
    }
}
