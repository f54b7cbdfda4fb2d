use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Synthetic subtitle language key carrying a session's text chat log.
pub const LIVE_CHAT_LANG: &str = "live_chat";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: String,
    pub title: String,
    /// Seconds.
    pub duration: Option<u64>,
    /// Unix epoch seconds.
    pub timestamp: Option<i64>,
    pub formats: Vec<Format>,
    pub subtitles: HashMap<String, Vec<Subtitle>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    pub url: String,
    /// Container extension derived from the MIME type ("mp4", "webm", ...).
    pub container: String,
    pub filesize: Option<u64>,
    pub aspect_ratio: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtitle {
    pub url: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Public,
    NeedsAuth,
}

/// An unresolved pointer into another extractor. Entries are never resolved
/// eagerly; the host decides when (and whether) to feed the URL back through
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: String,
    pub url: String,
    pub view_count: Option<u64>,
    /// Seconds.
    pub duration: Option<u64>,
    pub availability: Option<Availability>,
    pub filesize: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Unix epoch seconds of the last modification, when known.
    pub timestamp: Option<i64>,
    pub entries: Vec<PlaylistEntry>,
    /// Server-reported entry count, which may differ from `entries.len()`.
    pub playlist_count: Option<u64>,
}
