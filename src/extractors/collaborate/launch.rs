use crate::core::{ExtractContext, ExtractError, ExtractResult, Extractor};
use crate::extractors::collaborate::api::CollabApi;
use crate::extractors::collaborate::recording::{fetch_media_info, parse_recording_url};
use crate::extractors::collaborate::token;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

const URL_PATTERN: &str =
    r"^https?://(?P<region>[a-z][a-z0-9-]*)\.bbcollab\.com/launch/(?P<token>[\w.\-]+)";

fn parse_launch_url(url: &Url) -> Option<String> {
    let re = Regex::new(URL_PATTERN).ok()?;
    let captures = re.captures(url.as_str())?;
    Some(captures["token"].to_string())
}

/// Issue a plain GET and report where the redirect chain ends up. The client
/// follows redirects itself, so the final response URL is the target.
pub async fn resolve_redirect(http: &reqwest::Client, url: &Url) -> Result<Url> {
    let response = http.get(url.clone()).send().await?.error_for_status()?;
    Ok(response.url().clone())
}

pub struct LaunchExtractor {
    http: reqwest::Client,
}

impl LaunchExtractor {
    pub fn new() -> Self {
        Self {
            http: super::http_client(),
        }
    }
}

impl Default for LaunchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for LaunchExtractor {
    fn name(&self) -> &'static str {
        "CollaborateLaunch"
    }

    fn suitable(&self, url: &Url) -> bool {
        parse_launch_url(url).is_some()
    }

    async fn extract(&self, url: &Url, _ctx: &ExtractContext) -> Result<ExtractResult> {
        let launch_token = parse_launch_url(url)
            .ok_or_else(|| anyhow::anyhow!("Could not parse launch URL: {}", url))?;

        // Decode the embedded recording ID for logging only; the token stays
        // an untrusted routing hint.
        match token::decode_claims(&launch_token) {
            Ok(claims) => {
                let resource_id = claims
                    .resource_access_ticket
                    .and_then(|ticket| ticket.resource_id);
                debug!("Launch token references recording {:?}", resource_id);
            }
            Err(err) => debug!("Launch token payload not decodable: {}", err),
        }

        let final_url = resolve_redirect(&self.http, url).await?;
        let parts = parse_recording_url(&final_url)
            .ok_or_else(|| ExtractError::UnsupportedUrl(final_url.to_string()))?;

        let api = CollabApi::for_region(self.http.clone(), &parts.region);
        let media = fetch_media_info(&api, &parts.id, parts.token.as_deref()).await?;

        Ok(ExtractResult::Media(media))
    }
}
