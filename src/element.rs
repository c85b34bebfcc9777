use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::info;

use crate::errors::{Error, Result};
use crate::logging::truncate_for_log;
use crate::session::{POLL_INTERVAL, Session, WAIT_TIMEOUT};
use crate::types::{ScrollAlignment, Selector};

/// Delay between characters for `type_slowly`.
const TYPE_DELAY: Duration = Duration::from_millis(50);

#[derive(Clone, Copy)]
enum WaitState {
    Hidden,
    Visible,
    Clickable,
}

impl WaitState {
    fn describe(self) -> &'static str {
        match self {
            WaitState::Hidden => "hidden",
            WaitState::Visible => "present",
            WaitState::Clickable => "clickable",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            WaitState::Hidden => "element still visible",
            WaitState::Visible => "element not visible",
            WaitState::Clickable => "element not clickable",
        }
    }
}

/// A named place in the DOM.
///
/// Holds a selector and a display name, never a DOM node: every operation
/// re-resolves against the live page through the session backend, so callers
/// cannot end up holding a stale node across re-renders.
#[derive(Clone, Debug)]
pub struct Element {
    session: Session,
    selector: Selector,
    name: String,
    timeout: Duration,
}

impl Element {
    /// Bind a selector to a session, inferring the selector kind from its
    /// syntax. The selector text doubles as the display name until `named`
    /// replaces it.
    pub fn new(session: &Session, selector: impl Into<String>) -> Self {
        Self::with_selector(session, Selector::infer(selector))
    }

    /// Bind an explicit-kind selector to a session.
    pub fn with_selector(session: &Session, selector: Selector) -> Self {
        let name = selector.raw().to_string();
        Element {
            session: session.clone(),
            selector,
            name,
            timeout: WAIT_TIMEOUT,
        }
    }

    /// Replace the display name used in logs and errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    async fn observed(&self, state: WaitState) -> Result<bool> {
        let backend = self.session.backend();
        let probe = match state {
            WaitState::Hidden | WaitState::Visible => backend.is_displayed(&self.selector).await,
            WaitState::Clickable => backend.is_interactable(&self.selector).await,
        };
        match probe {
            Ok(visible) => Ok(match state {
                WaitState::Hidden => !visible,
                WaitState::Visible | WaitState::Clickable => visible,
            }),
            // An element that is not in the DOM at all counts as hidden and
            // as not-yet-present; the wait keeps polling either way
            Err(Error::ElementNotFound { .. }) => Ok(matches!(state, WaitState::Hidden)),
            Err(e) => Err(e),
        }
    }

    async fn wait_state(&self, state: WaitState, silent: bool) -> Result<&Self> {
        if !silent {
            info!("Waiting until \"{}\" is {}", self.name, state.describe());
        }
        let deadline = Instant::now() + self.timeout;
        loop {
            if self.observed(state).await? {
                return Ok(self);
            }
            if Instant::now() >= deadline {
                return Err(Error::WaitTimeout {
                    condition: state.failure(),
                    name: self.name.clone(),
                    selector: self.selector.raw().to_string(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Block until no element matching the locator is visible.
    pub async fn wait_until_hidden(&self, silent: bool) -> Result<&Self> {
        self.wait_state(WaitState::Hidden, silent).await
    }

    /// Block until an element matching the locator is visible.
    pub async fn wait_until_present(&self, silent: bool) -> Result<&Self> {
        self.wait_state(WaitState::Visible, silent).await
    }

    /// Block until an element matching the locator is visible and enabled.
    pub async fn wait_until_clickable(&self, silent: bool) -> Result<&Self> {
        self.wait_state(WaitState::Clickable, silent).await
    }

    /// Wait for presence and clickability, then click. The preliminary waits
    /// are silent so the action logs exactly once.
    pub async fn click(&self) -> Result<&Self> {
        self.wait_state(WaitState::Visible, true).await?;
        self.wait_state(WaitState::Clickable, true).await?;
        info!("Click into \"{}\"", self.name);
        self.session.backend().click(&self.selector).await?;
        Ok(self)
    }

    /// Send the whole text in one operation, waiting for presence first.
    /// The logged preview is truncated so large inputs do not flood the log.
    pub async fn type_text(&self, text: &str) -> Result<&Self> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Type \"{}\" into \"{}\"", truncate_for_log(text), self.name);
        self.session.backend().send_keys(&self.selector, text).await?;
        Ok(self)
    }

    /// Send one character at a time with the default 50ms gap, letting
    /// live-search widgets react to each keystroke.
    pub async fn type_slowly(&self, text: &str) -> Result<&Self> {
        self.type_slowly_with_gap(text, TYPE_DELAY).await
    }

    /// `type_slowly` with a caller-chosen inter-character gap.
    pub async fn type_slowly_with_gap(&self, text: &str, gap: Duration) -> Result<&Self> {
        self.wait_state(WaitState::Visible, true).await?;
        info!(
            "Type \"{}\" into \"{}\", one character at a time",
            truncate_for_log(text),
            self.name
        );
        for ch in text.chars() {
            self.session
                .backend()
                .send_keys(&self.selector, &ch.to_string())
                .await?;
            sleep(gap).await;
        }
        Ok(self)
    }

    /// Clear the element's content after a presence wait.
    pub async fn clear_text(&self) -> Result<&Self> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Clearing text in \"{}\"", self.name);
        self.session.backend().clear(&self.selector).await?;
        Ok(self)
    }

    /// Visibility of the first match right now; does not wait. A missing
    /// element surfaces as a resolve error, not as `false`.
    pub async fn is_displayed(&self) -> Result<bool> {
        info!("Checking visibility of \"{}\"", self.name);
        self.session.backend().is_displayed(&self.selector).await
    }

    /// Whether at least one match exists right now. No wait, no visibility
    /// check.
    pub async fn is_available(&self) -> Result<bool> {
        info!("Checking availability of \"{}\"", self.name);
        Ok(self.session.backend().count(&self.selector).await? > 0)
    }

    /// Text of the first match, after a silent presence wait.
    pub async fn text(&self) -> Result<String> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Get text from \"{}\"", self.name);
        self.session.backend().text(&self.selector).await
    }

    /// Attribute of the first match, after a silent presence wait.
    pub async fn attr(&self, name: &str) -> Result<Option<String>> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Get attribute \"{}\" from \"{}\"", name, self.name);
        self.session.backend().attr(&self.selector, name).await
    }

    /// Text of every match, re-queried on each call.
    pub async fn texts(&self) -> Result<Vec<String>> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Get texts from \"{}\"", self.name);
        self.session.backend().texts(&self.selector).await
    }

    /// Number of matches, after a silent presence wait.
    pub async fn count(&self) -> Result<usize> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Get element count of \"{}\"", self.name);
        self.session.backend().count(&self.selector).await
    }

    /// Scroll the first match into view with the given alignment.
    pub async fn scroll_into_view(&self, align: ScrollAlignment) -> Result<&Self> {
        self.wait_state(WaitState::Visible, true).await?;
        info!("Scroll to \"{}\"", self.name);
        self.session
            .backend()
            .scroll_into_view(&self.selector, align)
            .await?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;
