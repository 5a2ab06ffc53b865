//! Client for the Copilot chat-completion endpoint.

use std::time::Duration;

use actix_web::web::Bytes;
use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::{config::ProxyConfig, error::ProxyError, types::UpstreamRequest};

const USER_AGENT: &str = "GitHub-Copilot-Chat/1.0";

/// What the upstream answered, when it answered at all.
#[derive(Debug)]
pub enum UpstreamReply {
    /// 2xx: relayed to the caller untouched.
    Success {
        status: u16,
        content_type: String,
        body: Bytes,
    },
    /// Any other status, with the raw body for inspection.
    Rejected { status: u16, body: String },
}

pub struct CopilotClient {
    client: reqwest::Client,
    url: String,
}

impl CopilotClient {
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.github_token.expose_secret()
        ))
        .context("GITHUB_TOKEN is not a valid header value")?;
        bearer.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, bearer);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            client,
            url: config.chat_completions_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one chat request. Only transport failures are `Err`.
    pub async fn chat_completions(
        &self,
        request: &UpstreamRequest,
    ) -> Result<UpstreamReply, ProxyError> {
        debug!(
            url = %self.url,
            body = %serde_json::to_string(request).unwrap_or_default(),
            "sending to Copilot API"
        );

        let response = self.client.post(&self.url).json(request).send().await?;
        let status = response.status();
        info!(%status, "Copilot API responded");

        if status.is_success() {
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/json")
                .to_string();
            let body = response.bytes().await?;
            return Ok(UpstreamReply::Success {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        let body = response.text().await?;
        Ok(UpstreamReply::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
