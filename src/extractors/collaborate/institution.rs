use crate::core::{ExtractContext, ExtractError, ExtractResult, Extractor, Playlist, PlaylistEntry};
use crate::extractors::collaborate::api::MembershipPage;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

const URL_PATTERN: &str = r"^https?://(?P<host>[\w.\-]+)/ultra/institution-page(?:[/?#]|$)";

/// Upper bound on membership pages fetched per host. The termination
/// condition otherwise trusts the server-reported total, and a server that
/// lies about the count must not spin us forever.
const MAX_PAGES: usize = 100;

fn parse_institution_url(url: &Url) -> Option<String> {
    let re = Regex::new(URL_PATTERN).ok()?;
    let captures = re.captures(url.as_str())?;
    Some(captures["host"].to_string())
}

/// Walk the membership listing with an offset cursor and emit one deferred
/// entry per available course. Stops once the accumulated result count
/// reaches the server-reported total; each offset is requested exactly once.
pub async fn fetch_course_entries(
    http: &reqwest::Client,
    base: &str,
    host: &str,
) -> Result<(Vec<PlaylistEntry>, Option<u64>)> {
    let mut entries = Vec::new();
    let mut offset = 0usize;
    let mut total = None;

    for page_no in 0.. {
        if page_no >= MAX_PAGES {
            return Err(ExtractError::PaginationOverrun {
                host: host.to_string(),
                max_pages: MAX_PAGES,
            }
            .into());
        }

        let url = format!(
            "{}/learn/api/public/v1/users/me/memberships?expand=course&offset={}",
            base, offset
        );
        let page: MembershipPage = http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let fetched = page.results.len();
        debug!("Membership page at offset {}: {} results", offset, fetched);

        for membership in page.results {
            let Some(course) = membership.course else {
                continue;
            };
            if !course.is_available() {
                continue;
            }

            let course_url = course
                .external_access_url
                .clone()
                .unwrap_or_else(|| format!("{}/ultra/courses/{}/cl/outline", base, course.id));

            entries.push(PlaylistEntry {
                id: course.id,
                url: course_url,
                view_count: None,
                duration: None,
                availability: None,
                filesize: None,
            });
        }

        offset += fetched;
        total = page.size.or(total);

        let reported = total.unwrap_or(0) as usize;
        if fetched == 0 || offset >= reported {
            break;
        }
    }

    Ok((entries, total))
}

pub struct InstitutionExtractor {
    http: reqwest::Client,
}

impl InstitutionExtractor {
    pub fn new() -> Self {
        Self {
            http: super::http_client(),
        }
    }
}

impl Default for InstitutionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for InstitutionExtractor {
    fn name(&self) -> &'static str {
        "CollaborateInstitution"
    }

    fn suitable(&self, url: &Url) -> bool {
        parse_institution_url(url).is_some()
    }

    async fn extract(&self, url: &Url, ctx: &ExtractContext) -> Result<ExtractResult> {
        let host = parse_institution_url(url)
            .ok_or_else(|| anyhow::anyhow!("Could not parse institution URL: {}", url))?;

        tracing::info!("Enumerating courses on {}", host);

        let base = format!("https://{}", host);
        let (entries, total) = fetch_course_entries(&self.http, &base, &host).await?;

        Ok(ExtractResult::Playlist(Playlist {
            id: host.clone(),
            title: ctx.title.clone().or(Some(host)),
            description: ctx.description.clone(),
            timestamp: ctx.timestamp,
            entries,
            playlist_count: total,
        }))
    }
}
