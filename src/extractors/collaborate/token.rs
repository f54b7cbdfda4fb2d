//! Structural decoding of the JWT-shaped tokens Collaborate embeds in
//! launch and scheduler URLs. The payload is only a routing hint: the middle
//! segment is base64-decoded to recover an identifier without an extra
//! network round-trip. No signature or expiry check is ever performed.

use crate::core::ExtractError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub resource_access_ticket: Option<ResourceAccessTicket>,
    /// LTI context identifier (session tokens).
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAccessTicket {
    pub resource_id: Option<String>,
}

/// Decode one token segment, tolerating stripped or over-long `=` padding.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, ExtractError> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| ExtractError::MalformedToken(e.to_string()))
}

/// Parse the claims out of a three-segment token's payload.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ExtractError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ExtractError::MalformedToken(format!(
            "expected 3 dot-separated segments, got {}",
            segments.len()
        )));
    }

    let payload = decode_segment(segments[1])?;
    serde_json::from_slice(&payload).map_err(|e| ExtractError::MalformedToken(e.to_string()))
}
