//! uTorrent WebUI client implementation.
//!
//! Every request carries HTTP basic auth. Before adding anything the client
//! fetches a CSRF token from `/gui/token.html`; the `GUID` cookie set with
//! it must accompany later requests, which the cookie store takes care of.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::{ClientAuth, TorrentClientConfig};

use super::magnet::extract_hash_from_magnet;
use super::{TorrentClient, TorrentClientError};

static TOKEN_DIV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div[^>]*\bid\s*=\s*['"]token['"][^>]*>\s*([^<\s]+)\s*</div>"#)
        .expect("static regex is valid")
});

/// uTorrent client implementation.
pub struct UTorrentClient {
    client: Client,
    config: TorrentClientConfig,
    auth: ClientAuth,
    /// WebUI token, fetched on first use.
    token: RwLock<Option<String>>,
}

impl UTorrentClient {
    /// Create a new uTorrent client.
    pub fn new(config: TorrentClientConfig, auth: ClientAuth) -> Result<Self, TorrentClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .cookie_store(true)
            .build()
            .map_err(|e| TorrentClientError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            auth,
            token: RwLock::new(None),
        })
    }

    /// WebUI root, e.g. `http://127.0.0.1:8080/gui/`.
    fn gui_url(&self) -> String {
        format!("{}/gui/", self.config.url.trim_end_matches('/'))
    }

    /// Fetch a fresh token from the WebUI.
    async fn fetch_token(&self) -> Result<String, TorrentClientError> {
        let url = format!("{}token.html", self.gui_url());
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.auth.username, Some(&self.auth.password))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(TorrentClientError::AuthenticationFailed {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(TorrentClientError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TorrentClientError::ApiError(e.to_string()))?;
        let token = extract_token(&body).ok_or(TorrentClientError::TokenMissing)?;

        debug!("uTorrent token acquired");
        Ok(token)
    }

    /// Return the cached token, fetching it if needed. A rejected request
    /// drops the cached token so the next one starts a fresh session.
    async fn ensure_token(&self) -> Result<String, TorrentClientError> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let token = self.fetch_token().await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }
}

/// Pull the token out of the `token.html` fragment.
fn extract_token(html: &str) -> Option<String> {
    TOKEN_DIV
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn map_transport_error(e: reqwest::Error) -> TorrentClientError {
    if e.is_timeout() {
        TorrentClientError::Timeout
    } else if e.is_connect() {
        TorrentClientError::ConnectionFailed(e.to_string())
    } else {
        TorrentClientError::ApiError(e.to_string())
    }
}

#[async_trait]
impl TorrentClient for UTorrentClient {
    fn name(&self) -> &str {
        "utorrent"
    }

    async fn add_magnet(&self, uri: &str) -> Result<(), TorrentClientError> {
        let hash = extract_hash_from_magnet(uri)
            .ok_or_else(|| TorrentClientError::InvalidMagnet(uri.to_string()))?;
        let token = self.ensure_token().await?;

        let response = self
            .client
            .get(self.gui_url())
            .basic_auth(&self.auth.username, Some(&self.auth.password))
            .query(&[("action", "add-url"), ("token", token.as_str()), ("s", uri)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(hash = %hash, "Magnet added to uTorrent");
            Ok(())
        } else {
            warn!(hash = %hash, status = %status, "uTorrent rejected magnet");
            *self.token.write().await = None;
            Err(TorrentClientError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
