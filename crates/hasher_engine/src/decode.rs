use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown encoding label: {0}")]
    UnknownLabel(String),
    #[error("failed to decode bytes as {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode `bytes` using the WHATWG encoding `label`, failing on malformed
/// input or an unrecognized label.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String, DecodeError> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| DecodeError::UnknownLabel(label.to_string()))?;
    decode_with(bytes, encoding)
}

/// Decode assuming the canonical target encoding.
pub fn decode_utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    decode_with(bytes, UTF_8)
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

/// True when the body reads as plain ASCII text: every byte is ASCII and
/// control bytes are limited to whitespace. This is the byte-pattern test
/// behind the dispatcher's plaintext fallback for unknown content types.
pub fn is_plain_ascii(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&b| matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | 0x20..=0x7e))
}

/// Pull the charset parameter out of a raw Content-Type header value.
pub(crate) fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            part.strip_prefix("charset=")
                .or_else(|| part.strip_prefix("Charset="))
                .or_else(|| part.strip_prefix("CHARSET="))
                .map(|v| v.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}
