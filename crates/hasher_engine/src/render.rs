use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;
use hasher_logging::hash_debug;
use thiserror::Error;
use tokio::task::JoinHandle;

/// How a render session launches its browser, merged over the headless
/// default. `executable` and `args` cover serverless-style deployments that
/// ship their own Chromium.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    pub args: Vec<String>,
    /// How long to wait for the page to load and settle before serializing
    /// whatever has rendered.
    pub settle_timeout: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            args: Vec::new(),
            settle_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render session has not been started")]
    NotStarted,
    #[error("failed to configure browser: {0}")]
    Config(String),
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A persistent headless-browser execution context: started once, reused for
/// every HTML document in a session, shut down at the end.
#[async_trait::async_trait]
pub trait RenderSession: Send {
    /// Launch the browser if it is not already running.
    async fn ensure_started(&mut self) -> Result<(), RenderError>;
    /// Load `html`, let scripts run, and return the resulting DOM
    /// serialization. Requires a started session.
    async fn render(&mut self, html: &str) -> Result<String, RenderError>;
    /// Tear the browser down. Safe to skip; process exit reaps it.
    async fn shutdown(&mut self) -> Result<(), RenderError>;
}

pub struct ChromiumRenderSession {
    config: RenderConfig,
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
}

impl ChromiumRenderSession {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            browser: None,
            handler_task: None,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder();
        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.config.executable {
            builder = builder.chrome_executable(path);
        }
        builder = builder.args(self.config.args.clone());
        builder.build().map_err(RenderError::Config)
    }
}

#[async_trait::async_trait]
impl RenderSession for ChromiumRenderSession {
    async fn ensure_started(&mut self) -> Result<(), RenderError> {
        if self.browser.is_some() {
            return Ok(());
        }
        let (browser, mut handler) = Browser::launch(self.browser_config()?).await?;
        // The CDP connection only makes progress while the handler is polled.
        let task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        self.browser = Some(browser);
        self.handler_task = Some(task);
        Ok(())
    }

    async fn render(&mut self, html: &str) -> Result<String, RenderError> {
        let browser = self.browser.as_ref().ok_or(RenderError::NotStarted)?;

        // Serve the document from a real file so the page gets a load event;
        // in-memory content injection has no completion signal to wait on.
        let mut file = tempfile::Builder::new()
            .prefix("site-hash-")
            .suffix(".html")
            .tempfile()?;
        file.write_all(html.as_bytes())?;
        file.flush()?;
        let file_url = url::Url::from_file_path(file.path())
            .map_err(|_| RenderError::Config("temp file path is not absolute".to_string()))?;

        let page = browser.new_page(file_url.as_str()).await?;
        match tokio::time::timeout(self.config.settle_timeout, page.wait_for_navigation()).await {
            Ok(result) => {
                result?;
            }
            // Partial render acceptable: hash whatever made it onto the page.
            Err(_elapsed) => {
                hash_debug!(
                    "page did not settle within {:?}; using partial render",
                    self.config.settle_timeout
                );
            }
        }
        let dom = page.content().await?;
        page.close().await?;
        Ok(dom)
    }

    async fn shutdown(&mut self) -> Result<(), RenderError> {
        if let Some(mut browser) = self.browser.take() {
            browser.close().await?;
            let _ = browser.wait().await;
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        Ok(())
    }
}

impl Drop for ChromiumRenderSession {
    fn drop(&mut self) {
        // Browser's own Drop kills the child process; the handler task just
        // needs to stop polling a dead connection.
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
    }
}
