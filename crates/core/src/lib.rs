pub mod album;
pub mod config;
pub mod matcher;
pub mod orchestrator;
pub mod placer;
pub mod playlist;
pub mod searcher;
pub mod testing;
pub mod torrent_client;

pub use album::{normalize, AlbumKey, AlbumKeyError};
pub use config::{
    load_config, load_config_from_str, load_config_with_overrides, validate_config, Config,
    ConfigError, ConfigOverrides, Credentials, Delivery, SanitizedConfig,
};
pub use matcher::{
    ConsolePrompter, DecliningPrompter, FailureReason, MatchOutcome, MatchResult, MatchSelector,
    MatchSource, Prompter,
};
pub use orchestrator::{
    AlbumReport, AlbumSelection, RunConfig, RunError, RunEvent, RunOrchestrator, RunSummary,
};
pub use placer::{MagnetFilePlacer, PlacementOutcome, Placer, PlacerError, TorrentClientPlacer};
pub use playlist::{FilePlaylistSource, HttpPlaylistSource, PlaylistError, PlaylistSource};
pub use searcher::{Candidate, SearchError, SearchResponse, TorrentIndex, TorrentProjectIndex};
pub use torrent_client::{TorrentClient, TorrentClientError, UTorrentClient};
