use serde::{Deserialize, Serialize};

const DEFAULT_QUIZ_TOPIC: &str = "biology";

fn default_topic() -> String {
    DEFAULT_QUIZ_TOPIC.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            topic: default_topic(),
        }
    }
}

/// `questions` is the model's reply exactly as it parsed. The prompt asks for
/// an array of `{question, options, answer, explanation}` objects but nothing
/// checks that shape, so extra or missing fields reach the client unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: serde_json::Value,
}
