//! Test helpers for bioquest-service integration tests.
//!
//! Every test spawns its own application on a random port. Upstream APIs are
//! either replaced by mock providers or by a `wiremock` server that the real
//! providers are pointed at.

#![allow(dead_code)]

use bioquest_service::config::{
    BioquestConfig, ChatConfig, CorsConfig, ObservabilityConfig, OpenAiConfig, UnsplashConfig,
    UpstreamConfig, YoutubeConfig,
};
use bioquest_service::services::providers::mock::{
    MockChatProvider, MockImageProvider, MockVideoProvider,
};
use bioquest_service::{AppState, Application};
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_ORIGIN: &str = "http://localhost:3000";
pub const TEST_API_KEY: &str = "test-api-key";

/// Config pointing every provider at `upstream_url`.
pub fn test_config(upstream_url: &str) -> BioquestConfig {
    BioquestConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        openai: OpenAiConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            base_url: format!("{}/v1", upstream_url),
            chat_model: "gpt-3.5-turbo".to_string(),
        },
        unsplash: UnsplashConfig {
            access_key: Secret::new(TEST_API_KEY.to_string()),
            base_url: upstream_url.to_string(),
        },
        youtube: YoutubeConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            base_url: format!("{}/youtube/v3", upstream_url),
        },
        cors: CorsConfig {
            allowed_origins: vec![
                TEST_ORIGIN.to_string(),
                "https://bioquest.example.app".to_string(),
            ],
        },
        chat: ChatConfig { history_limit: 4 },
        upstream: UpstreamConfig { timeout_secs: 5 },
        observability: ObservabilityConfig {
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    async fn spawn(state: AppState) -> Self {
        let app = Application::build_with_state(state)
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self {
            address: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        }
    }

    /// Application backed by the real HTTP providers talking to `upstream_url`.
    pub async fn with_upstream(upstream_url: &str) -> Self {
        let state = AppState::from_config(test_config(upstream_url))
            .expect("Failed to build application state");
        Self::spawn(state).await
    }

    /// Application backed by mock providers.
    pub async fn with_mocks(
        chat: Arc<MockChatProvider>,
        image: Option<&str>,
        video: Option<&str>,
    ) -> Self {
        let state = AppState {
            config: Arc::new(test_config("http://127.0.0.1:9")),
            chat_provider: chat,
            image_provider: Arc::new(MockImageProvider::new(image)),
            video_provider: Arc::new(MockVideoProvider::new(video)),
        };
        Self::spawn(state).await
    }

    pub async fn with_chat(chat: Arc<MockChatProvider>) -> Self {
        Self::with_mocks(chat, None, None).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// `n` alternating user/assistant lines, `"user: turn 1"`, `"assistant: turn 2"`, ...
pub fn teacher_history(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| {
            let role = if i % 2 == 1 { "user" } else { "assistant" };
            format!("{}: turn {}", role, i)
        })
        .collect()
}
