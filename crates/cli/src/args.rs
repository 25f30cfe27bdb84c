//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use magpie_core::config::{ConfigOverrides, OutputOverrides, PlaylistOverrides};
use magpie_core::{AlbumKey, Delivery};

/// Find magnet links for the albums of a music playlist
#[derive(Parser, Debug)]
#[command(name = "magpie", author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the playlist to scrape (case-insensitive)
    #[arg(conflicts_with = "artist_album")]
    pub playlist: Option<String>,

    /// Look up a single album instead of a playlist
    #[arg(short, long, value_name = "ARTIST - ALBUM")]
    pub artist_album: Option<AlbumKey>,

    /// Desired format, e.g. mp3 or flac
    #[arg(short, long)]
    pub format: Option<String>,

    /// Directory for retrieved .magnet files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, env = "MAGPIE_CONFIG", default_value = "magpie.toml")]
    pub config: PathBuf,

    /// Music service login
    #[arg(short, long)]
    pub login: Option<String>,

    /// Music service password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Music service device id
    #[arg(long)]
    pub device_id: Option<String>,

    /// Never prompt; inconclusive matches are recorded as failures
    #[arg(long)]
    pub batch: bool,

    /// Submit matches to the configured torrent client instead of writing files
    #[arg(long)]
    pub submit: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags that override file and environment configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            playlist: PlaylistOverrides {
                login: self.login.clone(),
                password: self.password.clone(),
                device_id: self.device_id.clone(),
                name: self.playlist.clone(),
            },
            output: OutputOverrides {
                format: self.format.clone(),
                dir: self.dir.clone(),
                delivery: self.submit.then_some(Delivery::TorrentClient),
                interactive: self.batch.then_some(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_with_flags() {
        let cli = Cli::try_parse_from([
            "magpie", "Road Trip", "-f", "flac", "-l", "me", "-p", "pw", "--batch",
        ])
        .unwrap();

        assert_eq!(cli.playlist.as_deref(), Some("Road Trip"));
        let overrides = cli.overrides();
        assert_eq!(overrides.playlist.name.as_deref(), Some("Road Trip"));
        assert_eq!(overrides.playlist.login.as_deref(), Some("me"));
        assert_eq!(overrides.output.format.as_deref(), Some("flac"));
        assert_eq!(overrides.output.interactive, Some(false));
        assert_eq!(overrides.output.delivery, None);
    }

    #[test]
    fn test_artist_album() {
        let cli = Cli::try_parse_from(["magpie", "-a", "POLIÇA - Shulamith", "--submit"]).unwrap();

        let album = cli.artist_album.clone().unwrap();
        assert_eq!(album.artist, "POLIÇA");
        assert_eq!(album.album, "Shulamith");
        assert_eq!(cli.overrides().output.delivery, Some(Delivery::TorrentClient));
        assert_eq!(cli.overrides().output.interactive, None);
    }

    #[test]
    fn test_malformed_artist_album_rejected() {
        assert!(Cli::try_parse_from(["magpie", "-a", "no separator"]).is_err());
    }

    #[test]
    fn test_playlist_conflicts_with_artist_album() {
        assert!(Cli::try_parse_from(["magpie", "Road Trip", "-a", "A - B"]).is_err());
    }
}
