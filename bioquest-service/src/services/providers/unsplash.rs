use super::{error_for_status, observe, ImageSearchProvider, ProviderError};
use crate::config::UnsplashConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::observability::TracedClientExt;

const PROVIDER: &str = "unsplash";

pub struct UnsplashImageProvider {
    client: Client,
    access_key: Secret<String>,
    base_url: String,
}

impl UnsplashImageProvider {
    pub fn new(client: Client, config: &UnsplashConfig) -> Self {
        Self {
            client,
            access_key: config.access_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn search(&self, topic: &str) -> Result<Option<String>, ProviderError> {
        if self.access_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Unsplash access key not configured".to_string(),
            ));
        }

        let url = format!("{}/search/photos", self.base_url);
        let authorization = format!("Client-ID {}", self.access_key.expose_secret());

        let response = self
            .client
            .traced_get(&url)
            .query(&[("query", topic), ("per_page", "1")])
            .header("Authorization", &authorization)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let response = error_for_status("Unsplash", response).await?;

        let search: SearchPhotosResponse = response
            .json()
            .await
            .map_err(ProviderError::from_decode)?;

        Ok(search.first_regular_url())
    }
}

#[async_trait]
impl ImageSearchProvider for UnsplashImageProvider {
    async fn first_image_url(&self, topic: &str) -> Result<Option<String>, ProviderError> {
        observe(PROVIDER, self.search(topic)).await
    }
}

#[derive(Debug, Deserialize)]
struct SearchPhotosResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    #[serde(default)]
    urls: Option<PhotoUrls>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    #[serde(default)]
    regular: Option<String>,
}

impl SearchPhotosResponse {
    fn first_regular_url(self) -> Option<String> {
        self.results
            .into_iter()
            .next()
            .and_then(|photo| photo.urls)
            .and_then(|urls| urls.regular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_results_yield_none() {
        let response: SearchPhotosResponse = serde_json::from_str(r#"{"total":0}"#).unwrap();
        assert_eq!(response.first_regular_url(), None);
    }

    #[test]
    fn takes_first_regular_url() {
        let response: SearchPhotosResponse = serde_json::from_str(
            r#"{"results":[
                {"urls":{"regular":"https://images.example/1","small":"s"}},
                {"urls":{"regular":"https://images.example/2"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            response.first_regular_url(),
            Some("https://images.example/1".to_string())
        );
    }
}
