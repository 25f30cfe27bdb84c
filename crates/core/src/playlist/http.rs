//! Music service HTTP playlist source.
//!
//! Protocol:
//! - `POST {url}/auth/login` with `{"login", "password", "device_id"}`,
//!   answered with `{"token"}`; 401/403 means bad credentials.
//! - `GET {url}/playlists/contents` with the bearer token, answered with the
//!   list of playlists and their entries.
//! - `POST {url}/auth/logout`, sent after every successful login.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::album::AlbumKey;
use crate::config::{Credentials, HttpPlaylistConfig};

use super::types::{album_keys_from_playlists, PlaylistContents, PlaylistError, PlaylistSource};

/// HTTP playlist source implementation.
pub struct HttpPlaylistSource {
    client: Client,
    config: HttpPlaylistConfig,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

impl HttpPlaylistSource {
    /// Create a new source with the given configuration.
    pub fn new(config: HttpPlaylistConfig) -> Result<Self, PlaylistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| PlaylistError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, PlaylistError> {
        let url = format!("{}/auth/login", self.base_url());
        let body = LoginRequest {
            login: &credentials.login,
            password: &credentials.password,
            device_id: credentials.device_id.as_deref(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PlaylistError::AuthenticationFailed(
                "wrong username or password".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(PlaylistError::ApiError(format!("HTTP {}", status)));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| PlaylistError::InvalidData(format!("login response: {}", e)))?;

        debug!(login = %credentials.login, "Music service login successful");
        Ok(login.token)
    }

    async fn fetch_playlists(&self, token: &str) -> Result<Vec<PlaylistContents>, PlaylistError> {
        let url = format!("{}/playlists/contents", self.base_url());
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PlaylistError::AuthenticationFailed(
                "session rejected".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(PlaylistError::ApiError(format!("HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| PlaylistError::InvalidData(format!("playlists response: {}", e)))
    }

    async fn logout(&self, token: &str) {
        let url = format!("{}/auth/logout", self.base_url());
        match self.client.post(&url).bearer_auth(token).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Music service logout successful");
            }
            Ok(response) => warn!(status = %response.status(), "Music service logout failed"),
            Err(e) => warn!(error = %e, "Music service logout failed"),
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> PlaylistError {
    if e.is_timeout() {
        PlaylistError::Timeout
    } else if e.is_connect() {
        PlaylistError::ConnectionFailed(e.to_string())
    } else {
        PlaylistError::ApiError(e.to_string())
    }
}

#[async_trait]
impl PlaylistSource for HttpPlaylistSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_album_keys(
        &self,
        credentials: &Credentials,
        playlist_name: &str,
    ) -> Result<Vec<AlbumKey>, PlaylistError> {
        let token = self.login(credentials).await?;
        let playlists = self.fetch_playlists(&token).await;
        self.logout(&token).await;

        album_keys_from_playlists(&playlists?, playlist_name)
    }
}
