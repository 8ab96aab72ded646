pub mod chat;
pub mod media;
pub mod quiz;

pub use chat::{ChatMessage, ChatReply, ChatRequest, ChatRole, TeacherChatRequest};
pub use media::{MediaUrl, TopicQuery};
pub use quiz::{QuizRequest, QuizResponse};
