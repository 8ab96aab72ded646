//! Fixed instructions sent ahead of every chat-completion call.

pub const STUDENT_SYSTEM_PROMPT: &str = "You are a friendly biology tutor who explains complex terms using simple everyday language, \
avoids jargon, and breaks answers into short, readable pieces. \
Always end with a gentle, open-ended guiding question to encourage further thinking.";

pub const TEACHER_SYSTEM_PROMPT: &str = "You are a professional biology curriculum designer. \
Your goal is to help teachers create effective, well-organized lesson plans. \
Always format your response clearly using bullet points, numbered sections, or markdown tables. \
If the user's request lacks details such as student grade level, lesson duration, or learning goals, \
generate a basic draft **but also politely ask follow-up questions** to clarify the missing context. \
Avoid casual tone and do not use emojis. \
Use markdown to make content easy to read in HTML rendering (e.g. `**bold**`, tables, headers).";

/// Sampling temperature for lesson planning and quiz generation.
pub const CREATIVE_TEMPERATURE: f32 = 0.7;

pub const QUIZ_QUESTION_COUNT: usize = 3;

pub fn quiz_prompt(topic: &str) -> String {
    format!(
        r#"Generate a {count}-question multiple choice quiz on {topic}.
Each question should have:
- A question
- 4 options
- The correct answer
- A short explanation.
Format the output as a JSON list like this:
[
  {{
    "question": "...",
    "options": ["A", "B", "C", "D"],
    "answer": "...",
    "explanation": "..."
  }},
  ...
]"#,
        count = QUIZ_QUESTION_COUNT,
        topic = topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_prompt_names_topic_and_shape() {
        let prompt = quiz_prompt("mitosis");
        assert!(prompt.starts_with("Generate a 3-question multiple choice quiz on mitosis."));
        assert!(prompt.contains(r#""options": ["A", "B", "C", "D"]"#));
        assert!(prompt.contains(r#""explanation": "...""#));
    }
}
