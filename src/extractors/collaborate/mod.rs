//! Extractors for the Blackboard Collaborate platform: single recordings,
//! launch tokens, course session playlists, single courses behind the LTI
//! handshake, and the all-courses institution listing. Resolution chains
//! top-down: institution → course → sessions → launch → recording, with
//! playlist entries deferred to the engine and the inner steps chained as
//! direct function calls.

pub mod api;
pub mod course;
pub mod institution;
pub mod launch;
pub mod recording;
pub mod sessions;
pub mod token;

pub use course::CourseExtractor;
pub use institution::InstitutionExtractor;
pub use launch::LaunchExtractor;
pub use recording::RecordingExtractor;
pub use sessions::SessionsExtractor;

/// Shared HTTP client settings for this family. Cookies matter: the LTI
/// handshake sets session cookies that later requests must carry.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .timeout(std::time::Duration::from_secs(30))
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to create HTTP client")
}
