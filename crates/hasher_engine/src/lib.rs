//! Hasher engine: fetch, normalize, and digest pipeline for URL content.
mod decode;
mod digest;
mod extract;
mod fetch;
mod hasher;
mod normalize;
mod render;
mod types;

pub use decode::{decode_text, decode_utf8, is_plain_ascii, DecodeError};
pub use digest::{available_algorithms, digest_hex, DigestError};
pub use extract::visible_text;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use hasher::{HashError, HasherOptions, UrlHasher};
pub use normalize::{
    normalize_json, normalize_plaintext, select_handler, ContentHandler, NormalizeError,
};
pub use render::{ChromiumRenderSession, RenderConfig, RenderError, RenderSession};
pub use types::{FetchError, FetchFailureKind, FetchOutcome, NormalizedContent, UrlResult};
