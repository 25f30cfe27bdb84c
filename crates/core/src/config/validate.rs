use super::{
    types::{Config, Delivery, PlaylistBackend},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Desired format is not blank
/// - Timeouts are not 0
/// - URLs use http or https
/// - The selected playlist backend has its section (for http, only once a
///   playlist is requested)
/// - Torrent client delivery has a `[torrent_client]` section
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.output.format.trim().is_empty() {
        return Err(invalid("output.format cannot be empty"));
    }

    if config.torrent_index.timeout_secs == 0 {
        return Err(invalid("torrent_index.timeout_secs cannot be 0"));
    }
    check_url("torrent_index.url", &config.torrent_index.url)?;

    match config.playlist.backend {
        PlaylistBackend::Http => {
            match &config.playlist.http {
                Some(http) => {
                    check_url("playlist.http.url", &http.url)?;
                    if http.timeout_secs == 0 {
                        return Err(invalid("playlist.http.timeout_secs cannot be 0"));
                    }
                }
                None if config.playlist.name.is_some() => {
                    return Err(invalid(
                        "playlist.backend = \"http\" requires a [playlist.http] section with a url",
                    ));
                }
                None => {}
            }
        }
        PlaylistBackend::File => {
            if config.playlist.file.is_none() {
                return Err(invalid(
                    "playlist.backend = \"file\" requires a [playlist.file] section",
                ));
            }
        }
    }

    if let Some(client) = &config.torrent_client {
        check_url("torrent_client.url", &client.url)?;
        if client.timeout_secs == 0 {
            return Err(invalid("torrent_client.timeout_secs cannot be 0"));
        }
    }

    if config.output.delivery == Delivery::TorrentClient {
        if config.torrent_client.is_none() {
            return Err(invalid(
                "output.delivery = \"torrent_client\" requires a [torrent_client] section",
            ));
        }
        if config.client_auth().is_none() {
            return Err(invalid(
                "torrent client credentials missing (set torrent_client.username/password or playlist.login/password)",
            ));
        }
    }

    Ok(())
}

fn check_url(field: &str, url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(invalid(&format!("{} must be an http(s) URL, got {:?}", field, url)))
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}
