use crate::core::ExtractError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Client for the Collaborate CSA REST surface of one region (or one
/// LTI-provided base URL).
#[derive(Debug, Clone)]
pub struct CollabApi {
    http: reqwest::Client,
    base: String,
}

impl CollabApi {
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    /// Regions are data-center codes embedded in the hostname, e.g. `us-lti`.
    pub fn for_region(http: reqwest::Client, region: &str) -> Self {
        Self::new(http, format!("https://{}.bbcollab.com", region))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, token: Option<&str>) -> Result<T> {
        let mut request = self.http.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// Fetch the playback document for a recording.
    ///
    /// The authenticated endpoint is tried first the way the player does it
    /// behind a login; its failure is non-fatal. The server allows replays
    /// from the same IP without authentication for a while, so the plain
    /// variant is the fallback, and only its failure aborts extraction.
    pub async fn recording_data(&self, id: &str, token: Option<&str>) -> Result<RecordingData> {
        let base = format!("{}/collab/api/csa/recordings/{}", self.base, id);

        match self.get_json(format!("{}/data/secure", base), token).await {
            Ok(data) => Ok(data),
            Err(err) => {
                debug!("Secure endpoint failed for {}: {}; trying fallback", id, err);
                self.get_json(format!("{}/data", base), None)
                    .await
                    .context(ExtractError::RecordingUnavailable { id: id.to_string() })
            }
        }
    }

    /// Supplementary recording attributes (file size). Best-effort: a failure
    /// here never aborts the main flow.
    pub async fn recording_attributes(
        &self,
        id: &str,
        token: Option<&str>,
    ) -> Option<RecordingAttributes> {
        let url = format!("{}/collab/api/csa/recordings/{}", self.base, id);
        match self.get_json(url, token).await {
            Ok(attrs) => Some(attrs),
            Err(err) => {
                debug!("No supplementary attributes for {}: {}", id, err);
                None
            }
        }
    }

    /// List the recordings attached to an LTI context.
    pub async fn list_recordings(
        &self,
        context_id: &str,
        token: Option<&str>,
    ) -> Result<RecordingList> {
        let url = format!(
            "{}/collab/api/csa/recordings?contextId={}",
            self.base,
            urlencoding::encode(context_id)
        );
        self.get_json(url, token).await
    }

    /// Resolve one recording to its direct playback (launch) URL.
    pub async fn recording_url(&self, id: &str, token: Option<&str>) -> Result<String> {
        let url = format!("{}/collab/api/csa/recordings/{}/url", self.base, id);
        let doc: PlaybackUrl = self.get_json(url, token).await?;
        Ok(doc.url)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingData {
    pub name: Option<String>,
    /// Milliseconds.
    pub duration: Option<u64>,
    /// ISO-8601 creation timestamp.
    pub created: Option<String>,
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub ext_streams: Vec<ExtStream>,
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
    #[serde(default)]
    pub chats: Vec<ChatTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtStream {
    pub stream_url: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleTrack {
    pub lang: Option<String>,
    pub label: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatTrack {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingAttributes {
    pub storage_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingList {
    pub name: Option<String>,
    /// Server-reported total.
    pub size: Option<u64>,
    #[serde(default)]
    pub results: Vec<RecordingSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSummary {
    pub id: String,
    pub name: Option<String>,
    /// Milliseconds.
    pub duration: Option<u64>,
    pub playback_count: Option<u64>,
    #[serde(default)]
    pub public_link_allowed: bool,
    pub storage_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct PlaybackUrl {
    url: String,
}

// Blackboard Learn public API documents (the course-tool side, one per host
// rather than per region).

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub name: Option<String>,
    pub course_id: Option<String>,
    pub description: Option<String>,
    /// ISO-8601.
    pub modified: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MembershipPage {
    /// Server-reported total membership count.
    pub size: Option<u64>,
    #[serde(default)]
    pub results: Vec<Membership>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Membership {
    pub course: Option<CourseRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub id: String,
    pub external_access_url: Option<String>,
    pub availability: Option<CourseAvailability>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseAvailability {
    pub available: Option<String>,
}

impl CourseRef {
    pub fn is_available(&self) -> bool {
        self.availability
            .as_ref()
            .and_then(|a| a.available.as_deref())
            == Some("Yes")
    }
}
