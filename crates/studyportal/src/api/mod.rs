//! HTTP transport for the portal backend.
//!
//! One `reqwest::Client` shared by every action. The bearer token is read
//! from the token store and injected on every request except login; a 401
//! response emits [`SessionEvent::Unauthorized`] on the broadcast channel so
//! the navigation guard can tear the session down from anywhere.

mod endpoints;

pub use endpoints::*;

use crate::config::PortalConfig;
use crate::error::{PortalError, GENERIC_ERROR_MESSAGE};
use crate::storage::{TokenStore, ACCESS_TOKEN_KEY};
use rand::Rng;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Cross-cutting session signals emitted by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The held credential was rejected; the guard must redirect to login.
    Unauthorized,
}

/// Transport client for the portal backend.
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: Arc<dyn TokenStore>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    /// Builds the client from configuration.
    pub fn new(config: &PortalConfig, storage: Arc<dyn TokenStore>) -> Result<Self, PortalError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PortalError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        let (events_tx, _) = broadcast::channel(16);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            storage,
            events_tx,
        })
    }

    /// Subscribes to session events (currently only `Unauthorized`).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// GET a JSON payload from an authenticated endpoint.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<(StatusCode, T), PortalError> {
        self.request_json(Method::GET, path, None::<&()>, true).await
    }

    /// POST a JSON body to an authenticated endpoint.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, T), PortalError> {
        self.request_json(Method::POST, path, Some(body), true).await
    }

    /// POST to an unauthenticated endpoint (login/register only).
    pub async fn post_json_unauthenticated<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, T), PortalError> {
        self.request_json(Method::POST, path, Some(body), false).await
    }

    async fn request_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<(StatusCode, T), PortalError> {
        let correlation_id = generate_correlation_id();
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let mut request = self.client.request(method.clone(), &url);
        if authenticated {
            let token = self.storage.get(ACCESS_TOKEN_KEY)?;
            match token {
                Some(token) if !token.is_empty() => {
                    debug!(
                        correlation_id = %correlation_id,
                        token = %token_fingerprint(&token),
                        "Attaching bearer token"
                    );
                    request = request.bearer_auth(token);
                }
                _ => {
                    // No credential held: the backend will answer 401 and the
                    // guard takes over, same as an expired token.
                    warn!(correlation_id = %correlation_id, "No persisted credential for authenticated request");
                }
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| PortalError::Network {
            message: e.to_string(),
        })?;
        let status = response.status();

        info!(
            correlation_id = %correlation_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        if status == StatusCode::UNAUTHORIZED {
            // Cross-cutting interrupt: any listener (the guard) reacts, no
            // matter which screen issued the request.
            let _ = self.events_tx.send(SessionEvent::Unauthorized);
            return Err(PortalError::Unauthorized);
        }

        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(PortalError::Server {
                status: status.as_u16(),
                message: extract_server_message(&body_text),
            });
        }

        let payload = response.json::<T>().await.map_err(|e| PortalError::Decode {
            message: e.to_string(),
        })?;
        Ok((status, payload))
    }
}

/// Extracts a human-readable message from an error body.
///
/// Preference order: JSON `detail` field, JSON `message` field, generic
/// fallback string.
fn extract_server_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "message"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    GENERIC_ERROR_MESSAGE.to_string()
}

/// Short hash of the token for log output; the raw credential never reaches
/// the logs.
fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = hasher.finalize();
    digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Generates a unique correlation ID for request tracing.
fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
