//! Text normalization shared by query building and title matching.

use unicode_normalization::UnicodeNormalization;

/// Drop text to its closest ASCII rendition.
///
/// Decomposes compatibility characters (NFKD) and discards everything that
/// is not ASCII afterwards, so `POLIÇA` becomes `POLICA`. Case is kept.
pub fn to_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// Normalize text for searching and comparison.
///
/// ASCII-folds, lower-cases and collapses every run of whitespace into a
/// single space. Leading and trailing whitespace is removed.
pub fn normalize(text: &str) -> String {
    to_ascii(text)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the free-text query for an artist/album pair.
///
/// Both parts are normalized and joined with `separator`; whitespace inside
/// either part is collapsed to the same separator.
pub fn search_query(artist: &str, album: &str, separator: &str) -> String {
    let joined = format!("{} {}", artist, album);
    normalize(&joined)
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Longest file stem produced by [`file_stem`], in bytes.
///
/// Leaves room for the `.magnet` extension under the 255 byte name limit of
/// common filesystems.
pub const MAX_FILE_STEM_BYTES: usize = 200;

/// Turn a torrent title into a safe file stem.
///
/// ASCII-folds the title and replaces path separators and other characters
/// that are invalid in file names on common platforms. Long titles are cut
/// to [`MAX_FILE_STEM_BYTES`].
pub fn file_stem(title: &str) -> String {
    let mut stem: String = to_ascii(title)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_ascii_control() => '_',
            c => c,
        })
        .collect();

    if stem.len() > MAX_FILE_STEM_BYTES {
        let mut end = MAX_FILE_STEM_BYTES;
        while !stem.is_char_boundary(end) {
            end -= 1;
        }
        stem.truncate(end);
    }

    let stem = stem.trim().trim_matches('.').to_string();
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}
