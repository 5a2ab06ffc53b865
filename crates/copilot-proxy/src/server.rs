//! Actix Web HTTP server.
//!
//! Exposes OpenAI-compatible endpoints:
//! - `POST /v1/chat/completions`
//! - `GET /v1/models`
//! - `GET /health`
//! - `GET /status`

use crate::{
    config::ProxyConfig,
    error::ProxyError,
    fallback::{self, FallbackResponse},
    types::{
        ChatRequest, HealthResponse, ModelInfo, ModelList, StatusConfig, StatusEndpoints,
        StatusResponse, UpstreamRequest,
    },
    upstream::{CopilotClient, UpstreamReply},
};
use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, error, info, warn};

pub const SERVICE_NAME: &str = "copilot-proxy";

pub struct AppState {
    pub config: ProxyConfig,
    pub client: CopilotClient,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let client = CopilotClient::new(&config)?;
        Ok(Self { config, client })
    }
}

/// Route table shared by `serve` and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/status", web::get().to(status))
        .route("/v1/models", web::get().to(list_models))
        .route("/v1/chat/completions", web::post().to(chat_completions));
}

pub async fn serve(config: ProxyConfig) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    if config.uses_placeholder_token() {
        warn!("GITHUB_TOKEN is not set; Copilot will reject every request");
    }

    let state = web::Data::new(AppState::new(config)?);
    info!(upstream = %state.client.url(), "forwarding chat completions");

    let server = HttpServer::new({
        let state = state.clone();
        move || {
            App::new()
                .app_data(state.clone())
                .wrap(Cors::permissive())
                .configure(configure)
        }
    })
    .bind(&addr)
    .with_context(|| format!("failed to bind {}", addr))?
    .shutdown_timeout(0);

    let port = state.config.port;
    info!(addr = %addr, "copilot-proxy listening");
    info!("chat endpoint: http://localhost:{}/v1/chat/completions", port);
    info!("health check: http://localhost:{}/health", port);
    info!("status: http://localhost:{}/status", port);

    server.run().await.context("server error")?;

    info!("copilot-proxy stopped");
    Ok(())
}

async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        port: state.config.port,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn status(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: "running",
        endpoints: StatusEndpoints {
            health: "/health",
            chat: "/v1/chat/completions",
            models: "/v1/models",
        },
        config: StatusConfig {
            port: state.config.port,
            proxy_target: "GitHub Copilot API",
        },
    })
}

async fn list_models() -> HttpResponse {
    let created = Utc::now().timestamp();
    HttpResponse::Ok().json(ModelList::from_models([
        ModelInfo::new("gpt-4", created),
        ModelInfo::new("gpt-3.5-turbo", created),
    ]))
}

async fn chat_completions(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ProxyError> {
    debug!(body = %String::from_utf8_lossy(&body), "received chat request");

    let req = ChatRequest::from_body(&body).map_err(|e| {
        warn!(error = %e, "rejecting unparseable chat request");
        ProxyError::from(e)
    })?;
    let outgoing = UpstreamRequest::from(req);

    let reply = state.client.chat_completions(&outgoing).await.map_err(|e| {
        error!(error = %e, "Copilot API unreachable");
        e
    })?;

    match reply {
        UpstreamReply::Success {
            status,
            content_type,
            body,
        } => Ok(
            HttpResponse::build(StatusCode::from_u16(status).unwrap_or(StatusCode::OK))
                .content_type(content_type)
                .body(body),
        ),
        UpstreamReply::Rejected { status, body } => {
            if fallback::is_auth_incompatibility_error(status, &body) {
                info!("Copilot rejected the personal access token; answering with fallback");
                return Ok(
                    HttpResponse::Ok().json(FallbackResponse::new(outgoing.model, Utc::now()))
                );
            }

            error!(%status, body = %body, "Copilot API error");
            Err(ProxyError::from_upstream(status, &body))
        }
    }
}
