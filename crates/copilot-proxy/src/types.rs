//! OpenAI-compatible wire types.
//!
//! Notes:
//! - Inbound chat requests are not validated. Each forwarded field is kept as
//!   raw JSON so malformed shapes reach the upstream untouched.
//! - Absent and `null` fields are both replaced with their defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// An inbound `/v1/chat/completions` payload.
///
/// Only the five fields forwarded upstream are captured; anything else in the
/// body is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: Option<Value>,
    #[serde(default)]
    pub messages: Option<Value>,
    #[serde(default)]
    pub max_tokens: Option<Value>,
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub stream: Option<Value>,
}

impl ChatRequest {
    /// Lenient parse of an arbitrary request body.
    ///
    /// An empty body or a non-object JSON value yields an all-default request.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body)?;
        match value {
            Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }
}

/// The body sent to the Copilot chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamRequest {
    pub model: Value,
    pub messages: Value,
    pub max_tokens: Value,
    pub temperature: Value,
    pub stream: Value,
}

fn or_default(field: Option<Value>, default: Value) -> Value {
    match field {
        None | Some(Value::Null) => default,
        Some(v) => v,
    }
}

impl From<ChatRequest> for UpstreamRequest {
    fn from(req: ChatRequest) -> Self {
        Self {
            model: or_default(req.model, json!(DEFAULT_MODEL)),
            messages: or_default(req.messages, json!([])),
            max_tokens: or_default(req.max_tokens, json!(DEFAULT_MAX_TOKENS)),
            temperature: or_default(req.temperature, json!(DEFAULT_TEMPERATURE)),
            stream: or_default(req.stream, json!(false)),
        }
    }
}

/// `{error: {message, type, code}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: u16,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, kind: impl Into<String>, code: u16) -> Self {
        Self {
            error: ErrorDetails {
                message: message.into(),
                kind: kind.into(),
                code,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub port: u16,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub endpoints: StatusEndpoints,
    pub config: StatusConfig,
}

#[derive(Debug, Serialize)]
pub struct StatusEndpoints {
    pub health: &'static str,
    pub chat: &'static str,
    pub models: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusConfig {
    pub port: u16,
    pub proxy_target: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub owned_by: &'static str,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>, created: i64) -> Self {
        Self {
            id: id.into(),
            object: "model",
            created,
            owned_by: "github-copilot",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelInfo>,
}

impl ModelList {
    pub fn from_models(models: impl IntoIterator<Item = ModelInfo>) -> Self {
        Self {
            object: "list",
            data: models.into_iter().collect(),
        }
    }
}
