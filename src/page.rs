use std::time::Duration;

use tracing::info;

use crate::element::Element;
use crate::errors::Result;
use crate::session::Session;
use crate::types::Selector;

/// A whole page's readiness gate and navigation entry point.
///
/// Readiness is a designated locator becoming visible; `open` always gates
/// on it, so callers never observe a half-loaded page.
#[derive(Debug)]
pub struct Page {
    session: Session,
    ready: Element,
    name: String,
    url: String,
}

impl Page {
    /// Describe a page by its readiness locator, display name and default
    /// URL.
    pub fn new(
        session: &Session,
        ready: Selector,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let ready = Element::with_selector(session, ready).named(name.clone());
        Page {
            session: session.clone(),
            ready,
            name,
            url: url.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.ready = self.ready.with_timeout(timeout);
        self
    }

    /// Block until the readiness locator is visible.
    pub async fn wait_for_load(&self, silent: bool) -> Result<&Self> {
        if !silent {
            info!("Wait presence of \"{}\"", self.name);
        }
        self.ready.wait_until_present(true).await?;
        Ok(self)
    }

    /// Navigate to the page's default URL, then gate on readiness.
    pub async fn open(&self) -> Result<&Self> {
        self.open_at(&self.url).await
    }

    /// Navigate to the given URL, then gate on readiness.
    pub async fn open_at(&self, url: &str) -> Result<&Self> {
        info!("Opening \"{}\" page", self.name);
        self.session.goto(url).await?;
        self.wait_for_load(false).await?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;
