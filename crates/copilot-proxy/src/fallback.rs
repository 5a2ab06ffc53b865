//! Canned completion returned when Copilot refuses personal access tokens.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Marker Copilot puts in the body of a 400 when the bearer is a PAT.
pub const PAT_UNSUPPORTED_MARKER: &str = "Personal Access Tokens are not supported";

pub const ADVISORY_MESSAGE: &str = "I am GitHub Copilot, an AI programming assistant. I can help you with:

🔍 Code generation and optimization
📚 Code explanations and documentation
🐛 Debugging and fixing errors
💡 Answering programming questions
🚀 Best-practice recommendations

Note: this reply comes from the proxy, because the GitHub Copilot Chat API does not accept Personal Access Tokens directly. Consider one of these alternatives:

1. Register a GitHub App to obtain a supported token
2. Use the OpenAI API: https://api.openai.com/v1/
3. Use the DeepSeek API: https://api.deepseek.com/v1/

Getting an OpenAI API key:
- Visit https://platform.openai.com/api-keys
- Create a new API key
- Replace the value in your .env

Getting a DeepSeek API key:
- Visit https://platform.deepseek.com/
- Sign up and create an API key
- Lower cost, good Chinese-language support

What programming question can I help you with?";

/// True when the upstream rejected the call because the credential is a PAT.
///
/// Matching is an exact, case-sensitive substring search over the raw body.
pub fn is_auth_incompatibility_error(status: u16, body: &str) -> bool {
    status == 400 && body.contains(PAT_UNSUPPORTED_MARKER)
}

#[derive(Debug, Clone, Serialize)]
pub struct FallbackResponse {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: Value,
    pub choices: Vec<FallbackChoice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Serialize)]
pub struct FallbackChoice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantMessage {
    pub role: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl FallbackResponse {
    pub fn new(model: Value, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("chatcmpl-{}", now.timestamp_millis()),
            object: "chat.completion",
            created: now.timestamp(),
            model,
            choices: vec![FallbackChoice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant",
                    content: ADVISORY_MESSAGE,
                },
                finish_reason: "stop",
            }],
            usage: Usage {
                prompt_tokens: 50,
                completion_tokens: 200,
                total_tokens: 250,
            },
        }
    }
}
