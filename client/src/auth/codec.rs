//! Credential token payload decoding.
//!
//! DESIGN
//! ======
//! Tokens are `header.payload.signature`. Only the payload segment is read:
//! URL-safe base64 is mapped onto the standard alphabet, decoded with optional
//! padding and non-zero trailing bits tolerated, then parsed as a UTF-8 JSON
//! object. The signature is ignored.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};

const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("payload is not valid base64: {0}")]
    Base64(String),
    #[error("payload is not valid UTF-8")]
    Utf8,
    #[error("payload is not valid JSON: {0}")]
    Json(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// Decode the payload segment of `token` into its JSON claims.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the token has no second segment, the
/// segment is not base64, the bytes are not UTF-8, or the text is not a JSON
/// object. Never panics on malformed input.
pub fn decode(token: &str) -> Result<Map<String, Value>, DecodeError> {
    let segment = token.split('.').nth(1).ok_or(DecodeError::MissingPayload)?;
    let standard: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = PAYLOAD_ENGINE
        .decode(standard.as_bytes())
        .map_err(|e| DecodeError::Base64(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|_| DecodeError::Utf8)?;

    match serde_json::from_str::<Value>(&text).map_err(|e| DecodeError::Json(e.to_string()))? {
        Value::Object(claims) => Ok(claims),
        _ => Err(DecodeError::NotAnObject),
    }
}
