use crate::core::{
    ExtractContext, ExtractResult, Extractor, Format, MediaInfo, Subtitle, LIVE_CHAT_LANG,
};
use crate::extractors::collaborate::api::CollabApi;
use crate::utils::{mimetype2ext, parse_iso8601};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use url::Url;

const URL_PATTERN: &str = r"^https?://(?P<region>[a-z][a-z0-9-]*)\.bbcollab\.com/(?:collab/ui/session/playback/load|recording)/(?P<id>[^/?#]+)";

#[derive(Debug, Clone)]
pub struct RecordingUrlParts {
    pub region: String,
    pub id: String,
    pub token: Option<String>,
}

/// Match a recording playback or short URL and pull out region, recording ID
/// and the optional `authToken` query parameter.
pub fn parse_recording_url(url: &Url) -> Option<RecordingUrlParts> {
    let re = Regex::new(URL_PATTERN).ok()?;
    let captures = re.captures(url.as_str())?;

    let token = url
        .query_pairs()
        .find(|(key, _)| key == "authToken")
        .map(|(_, value)| value.into_owned());

    Some(RecordingUrlParts {
        region: captures["region"].to_string(),
        id: captures["id"].to_string(),
        token,
    })
}

/// Resolve one recording into the normalized media record: formats from
/// `extStreams`, subtitles keyed by language code, and chat transcripts under
/// the synthetic `live_chat` key.
pub async fn fetch_media_info(
    api: &CollabApi,
    video_id: &str,
    token: Option<&str>,
) -> Result<MediaInfo> {
    let data = api.recording_data(video_id, token).await?;

    // Best-effort size lookup, decorating every stream below
    let filesize = api
        .recording_attributes(video_id, token)
        .await
        .and_then(|attrs| attrs.storage_size);

    let formats = data
        .ext_streams
        .iter()
        .map(|stream| Format {
            url: stream.stream_url.clone(),
            container: mimetype2ext(stream.content_type.as_deref().unwrap_or("video/mp4")),
            filesize,
            aspect_ratio: data.aspect_ratio,
        })
        .collect();

    let mut subtitles: HashMap<String, Vec<Subtitle>> = HashMap::new();
    for track in &data.subtitles {
        let lang = track.lang.clone().unwrap_or_else(|| "und".to_string());
        subtitles.entry(lang).or_default().push(Subtitle {
            url: track.url.clone(),
            name: track.label.clone(),
        });
    }
    for chat in &data.chats {
        subtitles
            .entry(LIVE_CHAT_LANG.to_string())
            .or_default()
            .push(Subtitle {
                url: chat.url.clone(),
                name: None,
            });
    }

    Ok(MediaInfo {
        id: video_id.to_string(),
        title: data.name.unwrap_or_else(|| "Unknown Title".to_string()),
        duration: data.duration.map(|ms| ms / 1000),
        timestamp: data.created.as_deref().and_then(parse_iso8601),
        formats,
        subtitles,
    })
}

pub struct RecordingExtractor {
    http: reqwest::Client,
}

impl RecordingExtractor {
    pub fn new() -> Self {
        Self {
            http: super::http_client(),
        }
    }
}

impl Default for RecordingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for RecordingExtractor {
    fn name(&self) -> &'static str {
        "CollaborateRecording"
    }

    fn suitable(&self, url: &Url) -> bool {
        parse_recording_url(url).is_some()
    }

    async fn extract(&self, url: &Url, _ctx: &ExtractContext) -> Result<ExtractResult> {
        let parts = parse_recording_url(url)
            .ok_or_else(|| anyhow::anyhow!("Could not parse recording URL: {}", url))?;

        tracing::info!("Extracting recording {} ({})", parts.id, parts.region);

        let api = CollabApi::for_region(self.http.clone(), &parts.region);
        let media = fetch_media_info(&api, &parts.id, parts.token.as_deref()).await?;

        Ok(ExtractResult::Media(media))
    }
}
