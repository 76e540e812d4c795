use hasher_logging::hash_debug;
use thiserror::Error;

use crate::decode::{decode_text, decode_utf8};
use crate::digest::{digest_hex, DigestError};
use crate::extract::visible_text;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::normalize::{
    normalize_json, normalize_plaintext, select_handler, ContentHandler, NormalizeError,
};
use crate::render::{ChromiumRenderSession, RenderConfig, RenderError, RenderSession};
use crate::types::{FetchError, FetchOutcome, NormalizedContent, UrlResult};

/// Options for a hashing session.
#[derive(Debug, Clone, Default)]
pub struct HasherOptions {
    pub fetch: FetchSettings,
    pub render: RenderConfig,
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error(transparent)]
    Digest(#[from] DigestError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A per-invocation hashing session: one algorithm, one fetcher, one lazily
/// started render session shared by every HTML document it sees. URLs are
/// processed strictly one at a time.
pub struct UrlHasher {
    algorithm: String,
    fetcher: Box<dyn Fetcher>,
    render: Box<dyn RenderSession>,
}

impl UrlHasher {
    /// Build a session over the default HTTP and browser backends. The
    /// algorithm name is expected to be pre-validated by the caller against
    /// [`crate::available_algorithms`]; an unknown name surfaces as a
    /// [`DigestError`] from [`Self::hash_url`].
    pub fn new(algorithm: impl Into<String>, options: HasherOptions) -> Self {
        Self::with_parts(
            algorithm,
            Box::new(ReqwestFetcher::new(options.fetch)),
            Box::new(ChromiumRenderSession::new(options.render)),
        )
    }

    /// Injection constructor for tests and embedders with custom transports.
    pub fn with_parts(
        algorithm: impl Into<String>,
        fetcher: Box<dyn Fetcher>,
        render: Box<dyn RenderSession>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            fetcher,
            render,
        }
    }

    /// Fetch `url` and hash its normalized content.
    pub async fn hash_url(&mut self, url: &str) -> Result<UrlResult, HashError> {
        let outcome = self.fetcher.fetch(url).await?;
        hash_debug!(
            "fetched {url}: status {}, content-type {}",
            outcome.status,
            outcome.content_type
        );
        let normalized = self.process(&outcome).await?;
        Ok(UrlResult {
            status: outcome.status,
            visited_url: outcome.final_url,
            is_redirect: outcome.is_redirect,
            content_type: outcome.content_type,
            hash: normalized.digest_hex,
            contents: normalized.bytes,
        })
    }

    /// Tear down the render session if it was started.
    pub async fn shutdown(&mut self) -> Result<(), RenderError> {
        self.render.shutdown().await
    }

    /// Dispatch the body to exactly one normalizer and digest the result.
    async fn process(&mut self, outcome: &FetchOutcome) -> Result<NormalizedContent, HashError> {
        let encoding = outcome.encoding.as_deref();
        let bytes = match select_handler(&outcome.content_type, &outcome.body) {
            ContentHandler::Plaintext => normalize_plaintext(&outcome.body, encoding)?,
            ContentHandler::Json => normalize_json(&outcome.body, encoding)?,
            ContentHandler::Html => self.normalize_html(&outcome.body, encoding).await?,
            ContentHandler::RawBytes => outcome.body.clone(),
        };
        let digest_hex = digest_hex(&self.algorithm, &bytes)?;
        Ok(NormalizedContent { digest_hex, bytes })
    }

    /// Render the document, then keep only its visible text.
    async fn normalize_html(
        &mut self,
        body: &[u8],
        encoding: Option<&str>,
    ) -> Result<Vec<u8>, HashError> {
        let html = match encoding {
            Some(label) => decode_text(body, label).map_err(NormalizeError::Encoding)?,
            None => decode_utf8(body).map_err(NormalizeError::Encoding)?,
        };
        self.render.ensure_started().await?;
        let rendered = self.render.render(&html).await?;
        let text = visible_text(&rendered);
        Ok(text.into_bytes())
    }
}
