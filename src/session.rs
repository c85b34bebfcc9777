use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::{Instant, sleep};
use tracing::info;

use crate::backend::Backend;
use crate::errors::{Error, Result};
use crate::webdriver::{BrowserType, WebDriver};

/// Fixed timeout every polling wait runs against.
pub(crate) const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Sleep between polls.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handle to the active browser session.
///
/// Cheap to clone; every locator built from the same session observes the
/// same underlying backend. The handle is passed explicitly through
/// constructors rather than living in a process-wide slot.
#[derive(Clone)]
pub struct Session {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap an already-built backend.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Session { backend }
    }

    /// Connect a WebDriver-backed session.
    pub async fn webdriver(url: &str, browser: BrowserType, headless: bool) -> Result<Self> {
        let driver = WebDriver::connect(url, browser, headless).await?;
        Ok(Session::new(Arc::new(driver)))
    }

    pub(crate) fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// URL the session is currently on; the read is logged.
    pub async fn current_url(&self) -> Result<String> {
        info!("Getting current url");
        self.backend.current_url().await
    }

    /// Number of open windows/tabs.
    pub async fn window_count(&self) -> Result<usize> {
        self.backend.window_count().await
    }

    /// Navigate to a URL without any readiness gate. Page objects layer
    /// their own load wait on top of this.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.backend.goto(url).await
    }

    /// Run a script in the page.
    pub async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.backend.execute(script, args).await
    }

    /// Switch focus to the given tab, waiting up to the default timeout for
    /// it to open. Tab 0 is the original window.
    pub async fn switch_to_tab(&self, tab: usize) -> Result<()> {
        self.switch_to_tab_opts(tab, true, WAIT_TIMEOUT).await
    }

    /// Switch focus to the given tab.
    ///
    /// Switching to tab `n` requires exactly `n + 1` windows to exist. With
    /// `wait` the window count is polled every 50ms until it matches or the
    /// timeout elapses; without it the count is checked once. A count that
    /// never matches fails with `TabNotOpened`.
    pub async fn switch_to_tab_opts(
        &self,
        tab: usize,
        wait: bool,
        timeout: Duration,
    ) -> Result<()> {
        let expected = tab + 1;
        info!("Switching to tab {} (expecting {} windows)", tab, expected);

        if wait {
            let deadline = Instant::now() + timeout;
            while self.backend.window_count().await? != expected && Instant::now() < deadline {
                sleep(POLL_INTERVAL).await;
            }
        }
        if self.backend.window_count().await? != expected {
            return Err(Error::TabNotOpened { tab, expected });
        }
        self.backend.switch_to_window(tab).await
    }

    /// End the session.
    pub async fn close(self) -> Result<()> {
        self.backend.close().await
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
