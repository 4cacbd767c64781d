pub mod admin;
pub mod health;
pub mod public;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON request body. An empty body reads as `{}` so that missing
/// fields surface as validation errors rather than parse failures.
/// Invalid UTF-8 is reported by the parser like any other syntax error.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { body };
    Ok(serde_json::from_slice(body)?)
}
