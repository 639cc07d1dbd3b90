// Collection: GET/POST /notes
pub mod notes_get;
pub mod notes_post;

// Single note: GET/PUT/DELETE /notes/*name
pub mod note_delete;
pub mod note_get;
pub mod note_put;

pub use note_delete::note_delete;
pub use note_get::note_get;
pub use note_put::{note_put, UpdateNote};
pub use notes_get::notes_get;
pub use notes_post::{notes_post, CreateNote};

use std::borrow::Cow;

use axum::{body::Bytes, http::Uri};
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON request body. Any failure, including an empty body, is a 400 and
/// happens before the store is touched.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("invalid json body: {}", e);
        ApiError::invalid_json("invalid json")
    })
}

/// The note name after `/notes/`, strictly percent-decoded.
pub(crate) fn note_name(uri: &Uri) -> Result<String, ApiError> {
    let raw = uri.path().strip_prefix("/notes/").unwrap_or_default();
    decode_note_name(raw).ok_or_else(|| {
        tracing::debug!("unparseable note name: {:?}", raw);
        ApiError::bad_request("invalid note name")
    })
}

fn decode_note_name(raw: &str) -> Option<String> {
    if raw.is_empty() || !escapes_are_complete(raw) {
        return None;
    }
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

// Every '%' must start a two-hex-digit escape.
fn escapes_are_complete(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
            _ => return false,
        }
    }
    true
}
