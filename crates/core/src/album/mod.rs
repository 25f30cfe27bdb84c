//! Album identity and the text normalization used to search for albums.

mod normalize;
mod types;

pub use normalize::{file_stem, normalize, search_query, to_ascii, MAX_FILE_STEM_BYTES};
pub use types::*;
