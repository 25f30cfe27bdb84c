mod args;
mod report;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use magpie_core::config::{PlaylistBackend, TorrentClientBackend};
use magpie_core::{
    load_config_with_overrides, validate_config, AlbumSelection, Config, ConsolePrompter,
    Credentials, DecliningPrompter, Delivery, FilePlaylistSource, HttpPlaylistSource,
    MagnetFilePlacer, MatchSelector, Placer, PlaylistSource, Prompter, RunConfig,
    RunOrchestrator, SanitizedConfig, TorrentClient, TorrentClientPlacer, TorrentIndex,
    TorrentProjectIndex, UTorrentClient,
};

use args::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,magpie_core=debug,magpie_cli=debug"
    } else {
        "warn,magpie_core=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config_with_overrides(Some(&cli.config), &cli.overrides())
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!(config = ?SanitizedConfig::from(&config), "Configuration loaded");

    let selection = album_selection(&cli, &config)?;

    let prompter: Arc<dyn Prompter> = if config.output.interactive {
        Arc::new(ConsolePrompter::stdio())
    } else {
        Arc::new(DecliningPrompter)
    };

    let index: Arc<dyn TorrentIndex> = Arc::new(
        TorrentProjectIndex::new(config.torrent_index.clone())
            .context("Failed to create torrent index client")?,
    );
    let placer = create_placer(&config, prompter.clone())?;
    info!(index = index.name(), placer = placer.name(), "Collaborators ready");

    let mut orchestrator = RunOrchestrator::new(
        RunConfig::from(&config),
        index,
        MatchSelector::new(prompter),
        placer,
    )
    .with_progress(Arc::new(report::print_event));

    if let AlbumSelection::Playlist { name, .. } = &selection {
        println!("Retrieving albums of playlist \"{}\"..", name);
        orchestrator = orchestrator.with_playlist_source(create_playlist_source(&config)?);
    }

    let summary = orchestrator.run(&selection).await.context("Run aborted")?;
    report::print_summary(&summary);
    Ok(())
}

fn album_selection(cli: &Cli, config: &Config) -> Result<AlbumSelection> {
    if let Some(album) = &cli.artist_album {
        return Ok(AlbumSelection::Single(album.clone()));
    }

    let name = config
        .playlist
        .name
        .clone()
        .context("No playlist given: pass a playlist name or --artist-album")?;

    let credentials = match (config.playlist.backend, config.playlist.credentials()) {
        (_, Some(credentials)) => credentials,
        // the export file needs no login
        (PlaylistBackend::File, None) => Credentials {
            login: String::new(),
            password: String::new(),
            device_id: None,
        },
        (PlaylistBackend::Http, None) => anyhow::bail!(
            "Playlist login and password are required (--login/--password or [playlist] in the config)"
        ),
    };

    Ok(AlbumSelection::Playlist { name, credentials })
}

fn create_playlist_source(config: &Config) -> Result<Arc<dyn PlaylistSource>> {
    match config.playlist.backend {
        PlaylistBackend::Http => {
            let http = config
                .playlist
                .http
                .clone()
                .context("playlist.backend = \"http\" requires a [playlist.http] section")?;
            Ok(Arc::new(
                HttpPlaylistSource::new(http).context("Failed to create playlist client")?,
            ))
        }
        PlaylistBackend::File => {
            let file = config
                .playlist
                .file
                .as_ref()
                .context("playlist.backend = \"file\" requires a [playlist.file] section")?;
            Ok(Arc::new(FilePlaylistSource::new(&file.path)))
        }
    }
}

fn create_placer(config: &Config, prompter: Arc<dyn Prompter>) -> Result<Arc<dyn Placer>> {
    match config.output.delivery {
        Delivery::MagnetFile => {
            println!("Saving found magnet links to {}..", config.output.dir.display());
            Ok(Arc::new(MagnetFilePlacer::new(&config.output.dir)))
        }
        Delivery::TorrentClient => {
            let client_config = config
                .torrent_client
                .clone()
                .context("Torrent client delivery requires a [torrent_client] section")?;
            let auth = config
                .client_auth()
                .context("Torrent client credentials are missing")?;
            let music_library = client_config.music_library.clone();

            let client: Arc<dyn TorrentClient> = match client_config.backend {
                TorrentClientBackend::UTorrent => Arc::new(
                    UTorrentClient::new(client_config, auth)
                        .context("Failed to create uTorrent client")?,
                ),
            };
            println!("Submitting found magnet links to {}..", client.name());

            let mut placer = TorrentClientPlacer::new(client, prompter);
            if let Some(library) = music_library {
                placer = placer.with_music_library(library);
            }
            Ok(Arc::new(placer))
        }
    }
}
