use thiserror::Error;

/// Well-known extraction failures surfaced to the host with the URL or ID
/// that failed. Anything else travels as a plain `anyhow` error.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("recording {id}: no playable data (authenticated and fallback endpoints both failed)")]
    RecordingUnavailable { id: String },

    #[error("missing required field `{field}` in {document}")]
    MissingField {
        field: &'static str,
        document: &'static str,
    },

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("membership listing for {host} exceeded {max_pages} pages without reaching the reported total")]
    PaginationOverrun { host: String, max_pages: usize },
}
