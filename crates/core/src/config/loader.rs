use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::path::{Path, PathBuf};

use super::{
    types::{Config, ConfigOverrides},
    ConfigError,
};

/// Prefix for environment variable overrides, e.g. `MAGPIE_OUTPUT__FORMAT`.
const ENV_PREFIX: &str = "MAGPIE_";

static ENV_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("static regex is valid")
});

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)).merge(env_provider()))
}

/// Load configuration with command-line overrides on top.
///
/// Precedence, lowest first: defaults, the TOML file (skipped when absent),
/// `MAGPIE_` environment variables, `overrides`.
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
    }

    extract(
        figment
            .merge(env_provider())
            .merge(Serialized::defaults(overrides)),
    )
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let mut config: Config =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    expand_config_paths(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__")
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    let mut config: Config = figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;
    expand_config_paths(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn expand_config_paths<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    config.output.dir = expand_path(&config.output.dir, &lookup);
    if let Some(file) = config.playlist.file.as_mut() {
        file.path = expand_path(&file.path, &lookup);
    }
    if let Some(library) = config
        .torrent_client
        .as_mut()
        .and_then(|c| c.music_library.as_mut())
    {
        *library = expand_path(library, &lookup);
    }
}

/// Expand `$VAR`, `${VAR}` and a leading `~` in a path.
///
/// Unknown variables are left untouched.
pub fn expand_path<F>(path: &Path, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let raw = path.to_string_lossy();

    let expanded = ENV_VAR.replace_all(&raw, |caps: &regex_lite::Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    });

    if expanded == "~" || expanded.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(expanded.trim_start_matches('~').trim_start_matches('/'));
        }
    }

    PathBuf::from(expanded.into_owned())
}
