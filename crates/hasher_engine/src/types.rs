use std::fmt;

/// Classified result of one fetch attempt sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub status: u16,
    pub final_url: String,
    pub is_redirect: bool,
    /// Lowercase MIME type with parameters stripped.
    pub content_type: String,
    /// Charset asserted by the Content-Type header, if any.
    pub encoding: Option<String>,
    pub body: Vec<u8>,
}

/// Output of a normalizer. Invariant: `digest_hex` is computed from exactly
/// `bytes`, never from the raw body when normalization occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    pub digest_hex: String,
    pub bytes: Vec<u8>,
}

/// Public outcome for one hashed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResult {
    pub status: u16,
    pub visited_url: String,
    pub is_redirect: bool,
    pub content_type: String,
    pub hash: String,
    pub contents: Vec<u8>,
}

/// Transport failure, reported once the retry budget is spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchFailureKind,
    pub attempts: u32,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FetchFailureKind, attempts: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            attempts,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts > 1 {
            write!(
                f,
                "{} after {} attempts: {}",
                self.kind, self.attempts, self.message
            )
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    InvalidUrl,
    Timeout,
    RedirectLimitExceeded,
    Network,
}

impl fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailureKind::InvalidUrl => write!(f, "invalid url"),
            FetchFailureKind::Timeout => write!(f, "timeout"),
            FetchFailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FetchFailureKind::Network => write!(f, "network error"),
        }
    }
}
