use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub topic: String,
}

/// `url` is empty when the upstream search had no usable result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaUrl {
    pub url: String,
}

impl MediaUrl {
    pub fn from_option(url: Option<String>) -> Self {
        Self {
            url: url.unwrap_or_default(),
        }
    }
}
