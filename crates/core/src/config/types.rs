use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub torrent_index: TorrentIndexConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub torrent_client: Option<TorrentClientConfig>,
}

/// Playlist source configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaylistConfig {
    /// Playlist source backend
    #[serde(default)]
    pub backend: PlaylistBackend,
    /// Account login for the music service
    #[serde(default)]
    pub login: Option<String>,
    /// Account password for the music service
    #[serde(default)]
    pub password: Option<String>,
    /// Device identifier presented at login
    #[serde(default)]
    pub device_id: Option<String>,
    /// Playlist to fetch (case-insensitive)
    #[serde(default)]
    pub name: Option<String>,
    /// HTTP backend configuration (required when backend = "http")
    #[serde(default)]
    pub http: Option<HttpPlaylistConfig>,
    /// File backend configuration (required when backend = "file")
    #[serde(default)]
    pub file: Option<FilePlaylistConfig>,
}

/// Available playlist backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistBackend {
    #[default]
    Http,
    File,
}

/// Music service HTTP API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpPlaylistConfig {
    /// Base URL of the music service API
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// Exported playlist file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilePlaylistConfig {
    /// JSON export of all playlists
    pub path: PathBuf,
}

/// Login credentials for the playlist source
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
    pub device_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("device_id", &self.device_id)
            .finish()
    }
}

impl PlaylistConfig {
    /// Credentials, if both login and password are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.login, &self.password) {
            (Some(login), Some(password)) => Some(Credentials {
                login: login.clone(),
                password: password.clone(),
                device_id: self.device_id.clone(),
            }),
            _ => None,
        }
    }
}

/// Torrent index configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorrentIndexConfig {
    /// Index base URL
    #[serde(default = "default_index_url")]
    pub url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Separator placed between query words (default: a single space)
    #[serde(default = "default_query_separator")]
    pub query_separator: String,
}

impl Default for TorrentIndexConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            timeout_secs: default_timeout(),
            query_separator: default_query_separator(),
        }
    }
}

fn default_index_url() -> String {
    "https://torrentproject.se".to_string()
}

fn default_query_separator() -> String {
    " ".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Where and how matches are delivered
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Desired format, e.g. "mp3" or "flac" (default: mp3)
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for .magnet files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Delivery variant
    #[serde(default)]
    pub delivery: Delivery,
    /// Ask the operator when matching is inconclusive
    #[serde(default = "default_interactive")]
    pub interactive: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            dir: default_output_dir(),
            delivery: Delivery::default(),
            interactive: default_interactive(),
        }
    }
}

fn default_format() -> String {
    "mp3".to_string()
}

fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join("downloads")
        .join("torrents")
}

fn default_interactive() -> bool {
    true
}

/// Delivery variants for matched albums
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Write one .magnet file per match
    #[default]
    MagnetFile,
    /// Submit matches to a remote torrent client
    TorrentClient,
}

/// Remote torrent client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorrentClientConfig {
    /// Torrent client backend
    #[serde(default)]
    pub backend: TorrentClientBackend,
    /// WebUI base URL (e.g., "http://127.0.0.1:8080")
    #[serde(default = "default_client_url")]
    pub url: String,
    /// WebUI username (falls back to the playlist login)
    #[serde(default)]
    pub username: Option<String>,
    /// WebUI password (falls back to the playlist password)
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Local music library checked for albums already owned
    #[serde(default)]
    pub music_library: Option<PathBuf>,
}

impl Default for TorrentClientConfig {
    fn default() -> Self {
        Self {
            backend: TorrentClientBackend::default(),
            url: default_client_url(),
            username: None,
            password: None,
            timeout_secs: default_timeout(),
            music_library: None,
        }
    }
}

fn default_client_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

/// Available torrent client backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TorrentClientBackend {
    #[default]
    #[serde(rename = "utorrent")]
    UTorrent,
}

/// Resolved WebUI credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAuth {
    pub username: String,
    pub password: String,
}

impl Config {
    /// Torrent client credentials, falling back to the playlist login.
    pub fn client_auth(&self) -> Option<ClientAuth> {
        let client = self.torrent_client.as_ref()?;
        let username = client.username.clone().or_else(|| self.playlist.login.clone())?;
        let password = client
            .password
            .clone()
            .or_else(|| self.playlist.password.clone())?;
        Some(ClientAuth { username, password })
    }
}

/// Command-line overrides layered on top of file and environment config.
///
/// Only fields that are set are serialized, so unset flags never clobber
/// configured values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "PlaylistOverrides::is_empty")]
    pub playlist: PlaylistOverrides,
    #[serde(skip_serializing_if = "OutputOverrides::is_empty")]
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaylistOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PlaylistOverrides {
    fn is_empty(&self) -> bool {
        self.login.is_none()
            && self.password.is_none()
            && self.device_id.is_none()
            && self.name.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
}

impl OutputOverrides {
    fn is_empty(&self) -> bool {
        self.format.is_none()
            && self.dir.is_none()
            && self.delivery.is_none()
            && self.interactive.is_none()
    }
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub playlist: SanitizedPlaylistConfig,
    pub torrent_index: TorrentIndexConfig,
    pub output: OutputConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torrent_client: Option<SanitizedTorrentClientConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPlaylistConfig {
    pub backend: PlaylistBackend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    pub password_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpPlaylistConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FilePlaylistConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTorrentClientConfig {
    pub backend: TorrentClientBackend,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password_configured: bool,
    pub timeout_secs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub music_library: Option<PathBuf>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            playlist: SanitizedPlaylistConfig {
                backend: config.playlist.backend,
                login: config.playlist.login.clone(),
                password_configured: config.playlist.password.is_some(),
                name: config.playlist.name.clone(),
                http: config.playlist.http.clone(),
                file: config.playlist.file.clone(),
            },
            torrent_index: config.torrent_index.clone(),
            output: config.output.clone(),
            torrent_client: config
                .torrent_client
                .as_ref()
                .map(|c| SanitizedTorrentClientConfig {
                    backend: c.backend,
                    url: c.url.clone(),
                    username: c.username.clone(),
                    password_configured: c.password.is_some(),
                    timeout_secs: c.timeout_secs,
                    music_library: c.music_library.clone(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.playlist.backend, PlaylistBackend::Http);
        assert_eq!(config.torrent_index.url, "https://torrentproject.se");
        assert_eq!(config.torrent_index.timeout_secs, 30);
        assert_eq!(config.torrent_index.query_separator, " ");
        assert_eq!(config.output.format, "mp3");
        assert_eq!(config.output.delivery, Delivery::MagnetFile);
        assert!(config.output.interactive);
        assert!(config.output.dir.ends_with("downloads/torrents"));
        assert!(config.torrent_client.is_none());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[playlist]
backend = "http"
login = "me@example.com"
password = "hunter2"
device_id = "123456789abc"
name = "To Download"

[playlist.http]
url = "http://music.local/api"

[torrent_index]
query_separator = "+"

[output]
format = "FLAC"
dir = "/tmp/magnets"
delivery = "torrent_client"
interactive = false

[torrent_client]
backend = "utorrent"
url = "http://10.0.0.2:8080"
music_library = "/music"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.playlist.name.as_deref(), Some("To Download"));
        assert_eq!(
            config.playlist.http.as_ref().unwrap().url,
            "http://music.local/api"
        );
        assert_eq!(config.playlist.http.as_ref().unwrap().timeout_secs, 30);
        assert_eq!(config.torrent_index.query_separator, "+");
        assert_eq!(config.output.format, "FLAC");
        assert_eq!(config.output.delivery, Delivery::TorrentClient);
        assert!(!config.output.interactive);

        let client = config.torrent_client.as_ref().unwrap();
        assert_eq!(client.backend, TorrentClientBackend::UTorrent);
        assert_eq!(client.url, "http://10.0.0.2:8080");
        assert_eq!(client.music_library, Some(PathBuf::from("/music")));
    }

    #[test]
    fn test_deserialize_file_backend() {
        let toml = r#"
[playlist]
backend = "file"

[playlist.file]
path = "/exports/playlists.json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.playlist.backend, PlaylistBackend::File);
        assert_eq!(
            config.playlist.file.unwrap().path,
            PathBuf::from("/exports/playlists.json")
        );
    }

    #[test]
    fn test_credentials_require_login_and_password() {
        let mut playlist = PlaylistConfig {
            login: Some("me".to_string()),
            ..Default::default()
        };
        assert!(playlist.credentials().is_none());

        playlist.password = Some("secret".to_string());
        let credentials = playlist.credentials().unwrap();
        assert_eq!(credentials.login, "me");
        assert_eq!(credentials.password, "secret");
        assert!(!format!("{:?}", credentials).contains("secret"));
    }

    #[test]
    fn test_client_auth_falls_back_to_playlist_login() {
        let config = Config {
            playlist: PlaylistConfig {
                login: Some("me".to_string()),
                password: Some("secret".to_string()),
                ..Default::default()
            },
            torrent_client: Some(TorrentClientConfig::default()),
            ..Default::default()
        };
        let auth = config.client_auth().unwrap();
        assert_eq!(auth.username, "me");
        assert_eq!(auth.password, "secret");

        let config = Config {
            torrent_client: Some(TorrentClientConfig {
                username: Some("admin".to_string()),
                password: Some("pw".to_string()),
                ..Default::default()
            }),
            ..config
        };
        let auth = config.client_auth().unwrap();
        assert_eq!(auth.username, "admin");
        assert_eq!(auth.password, "pw");
    }

    #[test]
    fn test_client_auth_without_client_section() {
        assert!(Config::default().client_auth().is_none());
    }

    #[test]
    fn test_sanitized_config_hides_passwords() {
        let config = Config {
            playlist: PlaylistConfig {
                login: Some("me".to_string()),
                password: Some("secret".to_string()),
                ..Default::default()
            },
            torrent_client: Some(TorrentClientConfig {
                password: Some("client-secret".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.playlist.password_configured);
        assert!(sanitized.torrent_client.as_ref().unwrap().password_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"login\":\"me\""));
    }

    #[test]
    fn test_overrides_skip_unset_fields() {
        let overrides = ConfigOverrides {
            output: OutputOverrides {
                format: Some("flac".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&overrides).unwrap();
        assert_eq!(json, r#"{"output":{"format":"flac"}}"#);
    }
}
