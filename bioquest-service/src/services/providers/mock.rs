//! Mock provider implementations for testing.

use super::{
    ChatProvider, CompletionParams, ImageSearchProvider, ProviderError, VideoSearchProvider,
};
use crate::models::ChatMessage;
use async_trait::async_trait;
use std::sync::Mutex;

/// A chat call as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedCompletion {
    pub messages: Vec<ChatMessage>,
    pub params: CompletionParams,
}

/// Mock chat provider: replies with a fixed text, or fails with a fixed
/// message, and records every conversation it receives.
pub struct MockChatProvider {
    reply: Result<String, String>,
    calls: Mutex<Vec<RecordedCompletion>>,
}

impl MockChatProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCompletion> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<RecordedCompletion> {
        self.calls().pop()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCompletion {
                messages: messages.to_vec(),
                params: *params,
            });
        }

        self.reply.clone().map_err(ProviderError::ApiError)
    }
}

/// Mock image search returning a fixed result.
pub struct MockImageProvider {
    url: Option<String>,
}

impl MockImageProvider {
    pub fn new(url: Option<&str>) -> Self {
        Self {
            url: url.map(str::to_string),
        }
    }
}

#[async_trait]
impl ImageSearchProvider for MockImageProvider {
    async fn first_image_url(&self, _topic: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.url.clone())
    }
}

/// Mock video search returning a fixed result.
pub struct MockVideoProvider {
    url: Option<String>,
}

impl MockVideoProvider {
    pub fn new(url: Option<&str>) -> Self {
        Self {
            url: url.map(str::to_string),
        }
    }
}

#[async_trait]
impl VideoSearchProvider for MockVideoProvider {
    async fn first_video_url(&self, _topic: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.url.clone())
    }
}
