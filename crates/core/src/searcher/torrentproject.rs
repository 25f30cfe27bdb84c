//! torrentproject JSON search backend.
//!
//! The index answers `GET /?s=<query>&out=json` with a flat object: a
//! `total_found` counter plus one entry per hit keyed by its rank
//! (`"1"`, `"2"`, ...).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::TorrentIndexConfig;

use super::{Candidate, SearchError, SearchResponse, TorrentIndex};

/// torrentproject search backend implementation.
pub struct TorrentProjectIndex {
    client: Client,
    config: TorrentIndexConfig,
}

impl TorrentProjectIndex {
    /// Create a new index client with the given configuration.
    pub fn new(config: TorrentIndexConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SearchError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the search URL for a normalized query.
    fn build_search_url(&self, query: &str) -> String {
        format!(
            "{}/?s={}&out=json",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl TorrentIndex for TorrentProjectIndex {
    fn name(&self) -> &str {
        "torrentproject"
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let start = Instant::now();
        let url = self.build_search_url(query);
        debug!(query = %query, "Searching torrentproject");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else if e.is_connect() {
                SearchError::ConnectionFailed(e.to_string())
            } else {
                SearchError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::ApiError(e.to_string()))?;
        let parsed = parse_response(&body)?;

        debug!(
            total_found = parsed.total_found,
            results = parsed.results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        Ok(parsed)
    }
}

/// Parse a torrentproject JSON body.
///
/// Hits are returned in rank order. Entries that are not objects, or that
/// lack a title or hash, are skipped.
pub(crate) fn parse_response(body: &str) -> Result<SearchResponse, SearchError> {
    let mut object: Map<String, Value> =
        serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

    let total_found = object
        .remove("total_found")
        .as_ref()
        .and_then(lenient_u64)
        .ok_or_else(|| SearchError::InvalidResponse("missing total_found".to_string()))?;

    let mut ranked: Vec<((usize, usize), TorrentProjectHit)> = object
        .into_iter()
        .enumerate()
        .filter_map(|(position, (key, value))| {
            let hit: TorrentProjectHit = serde_json::from_value(value).ok()?;
            let rank = key
                .parse::<usize>()
                .map(|n| (0, n))
                .unwrap_or((1, position));
            Some((rank, hit))
        })
        .collect();

    // Ranks are string keys, so "10" would otherwise sort before "2"
    ranked.sort_by_key(|(rank, _)| *rank);

    let results = ranked
        .into_iter()
        .map(|(_, hit)| hit.into_candidate())
        .collect();

    Ok(SearchResponse {
        total_found,
        results,
    })
}

/// Accepts numbers and numeric strings, which the index mixes freely.
fn lenient_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|v| v.max(0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// torrentproject API response types
#[derive(Debug, Deserialize)]
struct TorrentProjectHit {
    title: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    seeds: Value,
    torrent_hash: String,
}

impl TorrentProjectHit {
    fn into_candidate(self) -> Candidate {
        Candidate {
            title: self.title,
            category: self.category.unwrap_or_default(),
            seeds: lenient_u64(&self.seeds)
                .map(|s| s.min(u32::MAX as u64) as u32)
                .unwrap_or(0),
            info_hash: self.torrent_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(url: &str) -> TorrentProjectIndex {
        TorrentProjectIndex::new(TorrentIndexConfig {
            url: url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_build_search_url() {
        let url = index("https://torrentproject.se").build_search_url("polica shulamith");
        assert_eq!(
            url,
            "https://torrentproject.se/?s=polica%20shulamith&out=json"
        );
    }

    #[test]
    fn test_build_search_url_trailing_slash_and_plus() {
        let url = index("http://localhost:9000/").build_search_url("boards+of+canada");
        assert_eq!(url, "http://localhost:9000/?s=boards%2Bof%2Bcanada&out=json");
    }

    #[test]
    fn test_parse_response_orders_by_rank() {
        let body = r#"{
            "total_found": "11",
            "10": {"title": "Ten", "category": "mp3", "seeds": 1, "torrent_hash": "h10"},
            "2": {"title": "Two", "category": "lossless", "seeds": "7", "torrent_hash": "h2"},
            "1": {"title": "One", "category": "mp3", "seeds": 3, "torrent_hash": "h1"}
        }"#;

        let response = parse_response(body).unwrap();
        assert_eq!(response.total_found, 11);
        let titles: Vec<_> = response.results.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Ten"]);
        assert_eq!(response.results[1].seeds, 7);
        assert_eq!(response.results[1].category, "lossless");
        assert_eq!(response.results[1].info_hash, "h2");
    }

    #[test]
    fn test_parse_response_zero_results() {
        let response = parse_response(r#"{"total_found": "0"}"#).unwrap();
        assert_eq!(response.total_found, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_parse_response_numeric_total() {
        let response = parse_response(r#"{"total_found": 0}"#).unwrap();
        assert_eq!(response.total_found, 0);
    }

    #[test]
    fn test_parse_response_skips_malformed_entries() {
        let body = r#"{
            "total_found": "3",
            "1": {"title": "Good", "category": "mp3", "seeds": 4, "torrent_hash": "abc"},
            "2": "not an object",
            "3": {"title": "No hash", "seeds": 9}
        }"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "Good");
    }

    #[test]
    fn test_parse_response_missing_fields_default() {
        let body = r#"{
            "total_found": "1",
            "1": {"title": "Bare", "torrent_hash": "abc"}
        }"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response.results[0].seeds, 0);
        assert_eq!(response.results[0].category, "");
    }

    #[test]
    fn test_parse_response_missing_total_fails() {
        let result = parse_response(r#"{"1": {"title": "x", "torrent_hash": "y"}}"#);
        assert!(matches!(result, Err(SearchError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_response_invalid_json_fails() {
        let result = parse_response("<html>rate limited</html>");
        assert!(matches!(result, Err(SearchError::InvalidResponse(_))));
    }
}
