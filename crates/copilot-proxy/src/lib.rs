//! Copilot Proxy - OpenAI-compatible chat-completion proxy for GitHub Copilot.
//!
//! Chat UIs speak OpenAI's `/v1/chat/completions` API. This crate exposes that
//! surface and forwards each request to the Copilot chat endpoint with the
//! configured bearer token.
//!
//! When Copilot rejects the credential because personal access tokens are not
//! supported, the proxy answers with a canned completion instead of an error so
//! the calling UI still renders a well-formed reply.

pub mod config;
pub mod error;
pub mod fallback;
pub mod server;
pub mod types;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use server::serve;
