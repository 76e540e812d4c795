use thiserror::Error;

use crate::decode::{decode_text, decode_utf8, is_plain_ascii, DecodeError};

/// Content families the pipeline knows how to canonicalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentHandler {
    Plaintext,
    Json,
    Html,
    RawBytes,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Encoding(#[from] DecodeError),
    #[error("malformed json: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Pick the handler for a response. Exact content-type matches win; unknown
/// types with an ASCII-apparent body fall back to plaintext, everything else
/// to raw bytes. Every body maps to exactly one handler.
pub fn select_handler(content_type: &str, body: &[u8]) -> ContentHandler {
    match content_type {
        "text/plain" => ContentHandler::Plaintext,
        "application/json" => ContentHandler::Json,
        "text/html" => ContentHandler::Html,
        _ if is_plain_ascii(body) => ContentHandler::Plaintext,
        _ => ContentHandler::RawBytes,
    }
}

/// Re-encode declared-encoding text as UTF-8; undeclared bytes pass through
/// unchanged.
pub fn normalize_plaintext(
    bytes: &[u8],
    encoding: Option<&str>,
) -> Result<Vec<u8>, NormalizeError> {
    match encoding {
        Some(label) => Ok(decode_text(bytes, label)?.into_bytes()),
        None => Ok(bytes.to_vec()),
    }
}

/// Canonicalize JSON: keys sorted at every nesting level, no inserted
/// whitespace, UTF-8 output. Semantically equal documents come out
/// byte-identical.
pub fn normalize_json(bytes: &[u8], encoding: Option<&str>) -> Result<Vec<u8>, NormalizeError> {
    let text = match encoding {
        Some(label) => decode_text(bytes, label)?,
        None => decode_utf8(bytes)?,
    };
    let value: serde_json::Value = serde_json::from_str(&text)?;
    // serde_json's map is BTree-backed (no preserve_order feature), so
    // re-serializing sorts keys at every level.
    Ok(serde_json::to_vec(&value)?)
}
