use crate::core::{ExtractContext, ExtractError, ExtractResult, Extractor, Playlist};
use crate::extractors::collaborate::api::{CollabApi, CourseDetails};
use crate::extractors::collaborate::sessions::fetch_session_playlist;
use crate::utils::parse_iso8601;
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

// Three equivalent shapes the LMS exposes the Collaborate tool under.
const URL_PATTERN: &str = r"^https?://(?P<host>[\w.\-]+)/(?:webapps/collab-ultra/tool/collabultra\?course_id=(?P<course_id>[\w\-]+)|ultra/courses/(?P<course_id2>[\w\-]+)/(?:cl/)?outline)";

fn parse_course_url(url: &Url) -> Option<(String, String)> {
    let re = Regex::new(URL_PATTERN).ok()?;
    let captures = re.captures(url.as_str())?;
    let host = captures["host"].to_string();
    let course_id = captures
        .name("course_id")
        .or_else(|| captures.name("course_id2"))?
        .as_str()
        .to_string();
    Some((host, course_id))
}

/// Scrape the hidden `<input>` fields and the form action out of the LTI
/// launch page. These become the POST body and target of the handshake.
fn scrape_launch_form(html: &str) -> Result<(String, Vec<(String, String)>)> {
    let input_re = Regex::new(r#"<input[^>]+name="([^"]+)"[^>]+value="([^"]*)""#)?;
    let fields: Vec<(String, String)> = input_re
        .captures_iter(html)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();

    let action_re = Regex::new(r#"<form[^>]+action="([^"]+)""#)?;
    let action = action_re
        .captures(html)
        .map(|c| c[1].to_string())
        .ok_or(ExtractError::MissingField {
            field: "form action",
            document: "LTI launch page",
        })?;

    Ok((action, fields))
}

/// Best-effort course metadata from the Learn public API. Failures never
/// abort the flow; they just leave the context fields empty.
async fn fetch_course_context(
    http: &reqwest::Client,
    base: &str,
    course_id: &str,
) -> ExtractContext {
    let url = format!("{}/learn/api/public/v1/courses/{}", base, course_id);

    let response = match http.get(&url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(err) => {
            debug!("No course metadata for {}: {}", course_id, err);
            return ExtractContext::default();
        }
    };
    let course = match response.json::<CourseDetails>().await {
        Ok(course) => course,
        Err(err) => {
            debug!("Unreadable course metadata for {}: {}", course_id, err);
            return ExtractContext::default();
        }
    };

    ExtractContext {
        title: course.name,
        display_id: course.course_id,
        description: course.description,
        timestamp: course.modified.as_deref().and_then(parse_iso8601),
    }
}

/// Run the two-step LTI form handshake for one course and hand the resulting
/// session token to the sessions resolver. `base` is the Learn host root,
/// e.g. `https://umb.umassonline.net`.
pub async fn fetch_course_playlist(
    http: &reqwest::Client,
    base: &str,
    course_id: &str,
    ctx: &ExtractContext,
) -> Result<Playlist> {
    // Step one of the handshake: the launch page carries the signed LTI
    // fields as hidden inputs.
    let launch_url = format!(
        "{}/webapps/collab-ultra/tool/collabultra/lti/launch?course_id={}",
        base, course_id
    );
    let html = http
        .get(&launch_url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let (action, fields) = scrape_launch_form(&html)?;

    // Step two: POST them back and let the redirect chain hand us a
    // token-bearing scheduler URL.
    let response = http
        .post(&action)
        .form(&fields)
        .send()
        .await?
        .error_for_status()?;

    let token_url = response.url().clone();
    let session_token = token_url
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .ok_or(ExtractError::MissingField {
            field: "token",
            document: "LTI redirect URL",
        })
        .with_context(|| {
            format!(
                "LTI handshake for course {} ended at {}",
                course_id, token_url
            )
        })?;

    // The CSA base is the form action with its /lti suffix removed.
    let playlist_base = action.trim_end_matches("/lti").to_string();

    let mut course_ctx = fetch_course_context(http, base, course_id).await;
    // Caller-supplied context wins over what we just fetched.
    if ctx.title.is_some() {
        course_ctx.title = ctx.title.clone();
    }
    if ctx.description.is_some() {
        course_ctx.description = ctx.description.clone();
    }
    if ctx.timestamp.is_some() {
        course_ctx.timestamp = ctx.timestamp;
    }

    let api = CollabApi::new(http.clone(), playlist_base);
    fetch_session_playlist(&api, &session_token, &course_ctx).await
}

pub struct CourseExtractor {
    http: reqwest::Client,
}

impl CourseExtractor {
    pub fn new() -> Self {
        Self {
            http: super::http_client(),
        }
    }
}

impl Default for CourseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for CourseExtractor {
    fn name(&self) -> &'static str {
        "CollaborateCourse"
    }

    fn suitable(&self, url: &Url) -> bool {
        parse_course_url(url).is_some()
    }

    async fn extract(&self, url: &Url, ctx: &ExtractContext) -> Result<ExtractResult> {
        let (host, course_id) = parse_course_url(url)
            .ok_or_else(|| anyhow::anyhow!("Could not parse course URL: {}", url))?;

        tracing::info!("Extracting course {} on {}", course_id, host);

        let base = format!("https://{}", host);
        let playlist = fetch_course_playlist(&self.http, &base, &course_id, ctx).await?;

        Ok(ExtractResult::Playlist(playlist))
    }
}
