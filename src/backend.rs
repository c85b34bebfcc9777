use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;
use crate::types::{ScrollAlignment, Selector};

/// Boundary to the browser session provider.
///
/// Every operation re-resolves its selector against the live DOM; element
/// handles never cross this boundary, so callers cannot hold stale nodes.
/// Single-match operations fail with `Error::ElementNotFound` when nothing
/// matches at call time; multi-match operations return empty results instead.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Number of elements matching the selector right now.
    async fn count(&self, selector: &Selector) -> Result<usize>;

    /// Whether the first match is currently visible.
    async fn is_displayed(&self, selector: &Selector) -> Result<bool>;

    /// Whether the first match is both visible and enabled.
    async fn is_interactable(&self, selector: &Selector) -> Result<bool>;

    /// Click the first match.
    async fn click(&self, selector: &Selector) -> Result<()>;

    /// Send text to the first match.
    async fn send_keys(&self, selector: &Selector, text: &str) -> Result<()>;

    /// Clear the first match's content.
    async fn clear(&self, selector: &Selector) -> Result<()>;

    /// Text content of the first match.
    async fn text(&self, selector: &Selector) -> Result<String>;

    /// Attribute value of the first match, `None` when the attribute is absent.
    async fn attr(&self, selector: &Selector, name: &str) -> Result<Option<String>>;

    /// Text content of every match, in document order.
    async fn texts(&self, selector: &Selector) -> Result<Vec<String>>;

    /// Scroll the first match into view with the given block alignment.
    async fn scroll_into_view(&self, selector: &Selector, align: ScrollAlignment) -> Result<()>;

    /// Navigate the session to a URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Run a script in the page, returning its JSON result.
    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value>;

    /// URL the session is currently on.
    async fn current_url(&self) -> Result<String>;

    /// Number of open windows/tabs.
    async fn window_count(&self) -> Result<usize>;

    /// Focus the window at the given index of the ordered handle list.
    async fn switch_to_window(&self, index: usize) -> Result<()>;

    /// End the session.
    async fn close(&self) -> Result<()>;
}
