use crate::core::{
    Availability, ExtractContext, ExtractError, ExtractResult, Extractor, Playlist, PlaylistEntry,
};
use crate::extractors::collaborate::api::CollabApi;
use crate::extractors::collaborate::token;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use url::Url;

const URL_PATTERN: &str =
    r"^https?://(?P<region>[a-z][a-z0-9-]*)\.bbcollab\.com/lti/scheduler(?:[/?#]|$)";

fn parse_scheduler_url(url: &Url) -> Option<(String, String)> {
    let re = Regex::new(URL_PATTERN).ok()?;
    let captures = re.captures(url.as_str())?;
    let region = captures["region"].to_string();

    // query_pairs already percent-decodes the token
    let token = url
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())?;

    Some((region, token))
}

/// List the recordings of the LTI context named inside `session_token` and
/// turn each into a deferred playlist entry pointing at its launch URL.
pub async fn fetch_session_playlist(
    api: &CollabApi,
    session_token: &str,
    ctx: &ExtractContext,
) -> Result<Playlist> {
    let claims = token::decode_claims(session_token)?;
    let context_id = claims.context.ok_or(ExtractError::MissingField {
        field: "context",
        document: "session token",
    })?;

    let listing = api
        .list_recordings(&context_id, Some(session_token))
        .await?;

    let mut entries = Vec::with_capacity(listing.results.len());
    for item in &listing.results {
        // One sequential round-trip per recording; the endpoint hands back a
        // launch URL the engine will resolve later.
        let playback_url = api.recording_url(&item.id, Some(session_token)).await?;

        let availability = if item.public_link_allowed {
            Availability::Public
        } else {
            Availability::NeedsAuth
        };

        entries.push(PlaylistEntry {
            id: item.id.clone(),
            url: playback_url,
            view_count: item.playback_count,
            duration: item.duration.map(|ms| ms / 1000),
            availability: Some(availability),
            filesize: item.storage_size,
        });
    }

    Ok(Playlist {
        id: context_id,
        title: ctx.title.clone().or(listing.name),
        description: ctx.description.clone(),
        timestamp: ctx.timestamp,
        entries,
        playlist_count: listing.size,
    })
}

pub struct SessionsExtractor {
    http: reqwest::Client,
}

impl SessionsExtractor {
    pub fn new() -> Self {
        Self {
            http: super::http_client(),
        }
    }
}

impl Default for SessionsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for SessionsExtractor {
    fn name(&self) -> &'static str {
        "CollaborateSessions"
    }

    fn suitable(&self, url: &Url) -> bool {
        parse_scheduler_url(url).is_some()
    }

    async fn extract(&self, url: &Url, ctx: &ExtractContext) -> Result<ExtractResult> {
        let (region, session_token) = parse_scheduler_url(url)
            .ok_or_else(|| anyhow::anyhow!("Could not parse scheduler URL: {}", url))?;

        tracing::info!("Listing session recordings ({})", region);

        let api = CollabApi::for_region(self.http.clone(), &region);
        let playlist = fetch_session_playlist(&api, &session_token, ctx).await?;

        Ok(ExtractResult::Playlist(playlist))
    }
}
