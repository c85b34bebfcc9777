// Scripted in-memory DOM used by unit tests in place of a live browser.
//
// Tests declare per-selector node state up front, including timed
// appearance/disappearance and click-driven removal, then assert on the
// interactions the code under test performed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::Backend;
use crate::errors::{Error, Result};
use crate::types::{ScrollAlignment, Selector};

/// Declared state for everything matching one selector.
#[derive(Clone)]
pub(crate) struct Node {
    pub count: usize,
    pub visible: bool,
    pub clickable: bool,
    pub texts: Vec<String>,
    pub attrs: HashMap<String, String>,
    pub(crate) appears_at: Option<Instant>,
    pub(crate) vanishes_at: Option<Instant>,
    pub(crate) clickable_at: Option<Instant>,
    pub(crate) clicks_left: Option<usize>,
}

impl Default for Node {
    fn default() -> Self {
        Node {
            count: 1,
            visible: true,
            clickable: true,
            texts: Vec::new(),
            attrs: HashMap::new(),
            appears_at: None,
            vanishes_at: None,
            clickable_at: None,
            clicks_left: None,
        }
    }
}

impl Node {
    pub fn with_text(text: &str) -> Self {
        Node {
            texts: vec![text.to_string()],
            ..Node::default()
        }
    }

    pub fn with_texts(texts: &[&str]) -> Self {
        Node {
            count: texts.len(),
            texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Node::default()
        }
    }

    pub fn with_attr(name: &str, value: &str) -> Self {
        let mut attrs = HashMap::new();
        attrs.insert(name.to_string(), value.to_string());
        Node {
            attrs,
            ..Node::default()
        }
    }

    pub fn hidden() -> Self {
        Node {
            visible: false,
            ..Node::default()
        }
    }

    fn present(&self, now: Instant) -> bool {
        if self.count == 0 {
            return false;
        }
        if let Some(t) = self.appears_at
            && now < t
        {
            return false;
        }
        if let Some(t) = self.vanishes_at
            && now >= t
        {
            return false;
        }
        if self.clicks_left == Some(0) {
            return false;
        }
        true
    }

    fn interactable(&self, now: Instant) -> bool {
        if !self.clickable {
            return false;
        }
        match self.clickable_at {
            Some(t) => now >= t,
            None => true,
        }
    }
}

#[derive(Default)]
struct Inner {
    nodes: HashMap<String, Node>,
    extra_windows: Vec<Instant>,
    current_window: Option<usize>,
    url: String,
    clicks: HashMap<String, usize>,
    keys: HashMap<String, Vec<String>>,
    attr_reads: HashMap<String, usize>,
    scrolls: HashMap<String, Vec<ScrollAlignment>>,
    cleared: Vec<String>,
}

impl Inner {
    fn live_node(&self, selector: &str) -> Option<&Node> {
        let node = self.nodes.get(selector)?;
        if node.present(Instant::now()) {
            Some(node)
        } else {
            None
        }
    }
}

fn not_found(selector: &Selector) -> Error {
    Error::ElementNotFound {
        selector: selector.raw().to_string(),
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeDom {
    inner: Arc<Mutex<Inner>>,
}

impl FakeDom {
    pub fn new() -> Self {
        FakeDom::default()
    }

    pub fn put(&self, selector: &str, node: Node) {
        self.inner
            .lock()
            .unwrap()
            .nodes
            .insert(selector.to_string(), node);
    }

    /// Insert a node that only becomes present after the delay.
    pub fn put_after(&self, selector: &str, delay: Duration, node: Node) {
        let node = Node {
            appears_at: Some(Instant::now() + delay),
            ..node
        };
        self.put(selector, node);
    }

    /// Make an existing node disappear after the delay.
    pub fn vanish_after(&self, selector: &str, delay: Duration) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(node) = inner.nodes.get_mut(selector) {
            node.vanishes_at = Some(Instant::now() + delay);
        }
    }

    /// Make an existing node report not-clickable until the delay passes.
    pub fn clickable_after(&self, selector: &str, delay: Duration) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(node) = inner.nodes.get_mut(selector) {
            node.clickable_at = Some(Instant::now() + delay);
        }
    }

    /// Make an existing node disappear after it receives this many clicks.
    pub fn vanish_after_clicks(&self, selector: &str, clicks: usize) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(node) = inner.nodes.get_mut(selector) {
            node.clicks_left = Some(clicks);
        }
    }

    /// Open one more window after the delay. The session starts with one.
    pub fn add_window_after(&self, delay: Duration) {
        self.inner
            .lock()
            .unwrap()
            .extra_windows
            .push(Instant::now() + delay);
    }

    pub fn clicks(&self, selector: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .clicks
            .get(selector)
            .copied()
            .unwrap_or(0)
    }

    pub fn keys_sent(&self, selector: &str) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .keys
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    pub fn attr_reads(&self, selector: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .attr_reads
            .get(selector)
            .copied()
            .unwrap_or(0)
    }

    pub fn scrolls(&self, selector: &str) -> Vec<ScrollAlignment> {
        self.inner
            .lock()
            .unwrap()
            .scrolls
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    pub fn was_cleared(&self, selector: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .cleared
            .iter()
            .any(|s| s == selector)
    }

    pub fn current_window(&self) -> Option<usize> {
        self.inner.lock().unwrap().current_window
    }

    pub fn last_url(&self) -> String {
        self.inner.lock().unwrap().url.clone()
    }
}

#[async_trait]
impl Backend for FakeDom {
    async fn count(&self, selector: &Selector) -> Result<usize> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.live_node(selector.raw()).map_or(0, |n| n.count))
    }

    async fn is_displayed(&self, selector: &Selector) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        inner
            .live_node(selector.raw())
            .map(|n| n.visible)
            .ok_or_else(|| not_found(selector))
    }

    async fn is_interactable(&self, selector: &Selector) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        inner
            .live_node(selector.raw())
            .map(|n| n.visible && n.interactable(Instant::now()))
            .ok_or_else(|| not_found(selector))
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.live_node(selector.raw()).is_none() {
            return Err(not_found(selector));
        }
        *inner.clicks.entry(selector.raw().to_string()).or_default() += 1;
        if let Some(node) = inner.nodes.get_mut(selector.raw())
            && let Some(left) = node.clicks_left
        {
            node.clicks_left = Some(left.saturating_sub(1));
        }
        Ok(())
    }

    async fn send_keys(&self, selector: &Selector, text: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.live_node(selector.raw()).is_none() {
            return Err(not_found(selector));
        }
        inner
            .keys
            .entry(selector.raw().to_string())
            .or_default()
            .push(text.to_string());
        Ok(())
    }

    async fn clear(&self, selector: &Selector) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.live_node(selector.raw()).is_none() {
            return Err(not_found(selector));
        }
        let raw = selector.raw().to_string();
        inner.cleared.push(raw);
        Ok(())
    }

    async fn text(&self, selector: &Selector) -> Result<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .live_node(selector.raw())
            .map(|n| n.texts.first().cloned().unwrap_or_default())
            .ok_or_else(|| not_found(selector))
    }

    async fn attr(&self, selector: &Selector, name: &str) -> Result<Option<String>> {
        let mut inner = self.inner.lock().unwrap();
        *inner
            .attr_reads
            .entry(selector.raw().to_string())
            .or_default() += 1;
        inner
            .live_node(selector.raw())
            .map(|n| n.attrs.get(name).cloned())
            .ok_or_else(|| not_found(selector))
    }

    async fn texts(&self, selector: &Selector) -> Result<Vec<String>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .live_node(selector.raw())
            .map(|n| n.texts.clone())
            .unwrap_or_default())
    }

    async fn scroll_into_view(&self, selector: &Selector, align: ScrollAlignment) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.live_node(selector.raw()).is_none() {
            return Err(not_found(selector));
        }
        inner
            .scrolls
            .entry(selector.raw().to_string())
            .or_default()
            .push(align);
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.inner.lock().unwrap().url = url.to_string();
        Ok(())
    }

    async fn execute(&self, _script: &str, _args: Vec<Value>) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.inner.lock().unwrap().url.clone())
    }

    async fn window_count(&self) -> Result<usize> {
        let inner = self.inner.lock().unwrap();
        let now = Instant::now();
        Ok(1 + inner.extra_windows.iter().filter(|t| **t <= now).count())
    }

    async fn switch_to_window(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let now = Instant::now();
        let open = 1 + inner.extra_windows.iter().filter(|t| **t <= now).count();
        if index >= open {
            return Err(Error::TabNotOpened {
                tab: index,
                expected: index + 1,
            });
        }
        inner.current_window = Some(index);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
