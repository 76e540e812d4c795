use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use hasher_logging::hash_warn;
use reqwest::header::CONTENT_TYPE;

use crate::decode::extract_charset;
use crate::types::{FetchError, FetchFailureKind, FetchOutcome};

/// Statuses that signal "resource available at a different URI". 303 (See
/// Other) deliberately does not count as a redirect here.
const MOVED_STATUSES: [u16; 4] = [301, 302, 307, 308];

/// RFC 7231 section 3.1.1.5: assume octet-stream when the header is absent.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Additional attempts after the first failure.
    pub retries: u32,
    pub redirect_limit: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
            retries: 3,
            redirect_limit: 10,
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        saw_moved: Arc<AtomicBool>,
    ) -> Result<reqwest::Client, (FetchFailureKind, String)> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            if MOVED_STATUSES.contains(&attempt.status().as_u16()) {
                saw_moved.store(true, Ordering::Relaxed);
            }
            if attempt.previous().len() >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| (FetchFailureKind::Network, err.to_string()))
    }

    async fn attempt(
        &self,
        url: &reqwest::Url,
    ) -> Result<FetchOutcome, (FetchFailureKind, String)> {
        let saw_moved = Arc::new(AtomicBool::new(false));
        let client = self.build_client(saw_moved.clone())?;

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let header = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let (content_type, encoding) = split_content_type(header.as_deref());

        // Bodies are buffered whole; there is no streaming path.
        let body = response
            .bytes()
            .await
            .map_err(classify_reqwest_error)?
            .to_vec();

        Ok(FetchOutcome {
            status,
            final_url,
            is_redirect: saw_moved.load(Ordering::Relaxed),
            content_type,
            encoding,
            body,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    /// GET `url` with a bounded retry loop: `retries + 1` attempts, each
    /// transport failure before the last is logged and retried, the last one
    /// is returned as a typed error.
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FetchFailureKind::InvalidUrl, 1, err.to_string()))?;

        let attempts = self.settings.retries + 1;
        let mut attempt = 1;
        loop {
            let (kind, message) = match self.attempt(&parsed).await {
                Ok(outcome) => return Ok(outcome),
                Err(failure) => failure,
            };
            if attempt >= attempts {
                return Err(FetchError::new(kind, attempts, message));
            }
            hash_warn!("attempt {attempt}/{attempts} for {url} failed ({message}); retrying");
            attempt += 1;
        }
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> (FetchFailureKind, String) {
    let kind = if err.is_timeout() {
        FetchFailureKind::Timeout
    } else if err.is_redirect() {
        FetchFailureKind::RedirectLimitExceeded
    } else {
        FetchFailureKind::Network
    };
    (kind, err.to_string())
}

/// Split a raw Content-Type header into the bare lowercase media type and
/// the declared charset, if any.
fn split_content_type(header: Option<&str>) -> (String, Option<String>) {
    let Some(raw) = header else {
        return (FALLBACK_CONTENT_TYPE.to_string(), None);
    };
    let media_type = raw
        .split(';')
        .next()
        .unwrap_or(raw)
        .trim()
        .to_ascii_lowercase();
    (media_type, extract_charset(raw))
}
