use async_trait::async_trait;
use fantoccini::elements::Element as WdElement;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::errors::{Error, Result};
use crate::types::{ScrollAlignment, Selector, SelectorKind};

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Default WebDriver endpoint for this browser type
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }
}

/// Check whether a WebDriver server answers on its status endpoint.
pub async fn webdriver_available(url: &str) -> bool {
    let status_url = format!("{}/status", url);
    match reqwest::get(&status_url).await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

// Resolves the first selector argument in the page so the same script works
// for CSS and XPath locators alike.
const SCROLL_SCRIPT: &str = r#"
    const sel = arguments[0];
    const kind = arguments[1];
    const block = arguments[2];
    const el = kind === 'xpath'
        ? document.evaluate(sel, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue
        : document.querySelector(sel);
    if (!el) { throw new Error('no element to scroll: ' + sel); }
    el.scrollIntoView({ block: block, inline: 'nearest' });
"#;

/// WebDriver-backed browser session.
pub struct WebDriver {
    client: Client,
}

impl WebDriver {
    /// Connect to a running WebDriver server and start a session.
    ///
    /// Headless mode is applied through browser capabilities; Chrome
    /// additionally gets the sandbox/shared-memory flags needed in CI
    /// containers.
    pub async fn connect(
        webdriver_url: &str,
        browser_type: BrowserType,
        headless: bool,
    ) -> Result<Self> {
        info!("Connecting to {:?} WebDriver at {}", browser_type, webdriver_url);

        let mut caps = serde_json::Map::new();
        match browser_type {
            BrowserType::Firefox => {
                let mut args: Vec<String> = Vec::new();
                if headless {
                    args.push("--headless".to_string());
                }
                caps.insert(
                    "moz:firefoxOptions".to_string(),
                    json!({ "args": args }),
                );
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox".to_string()];
                if headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                caps.insert(
                    "goog:chromeOptions".to_string(),
                    json!({ "args": args }),
                );
            }
        }

        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;

        Ok(WebDriver { client })
    }

    fn locator<'a>(&self, selector: &'a Selector) -> Locator<'a> {
        match selector.kind() {
            SelectorKind::Css => Locator::Css(selector.raw()),
            SelectorKind::XPath => Locator::XPath(selector.raw()),
        }
    }

    fn kind_tag(selector: &Selector) -> &'static str {
        match selector.kind() {
            SelectorKind::Css => "css",
            SelectorKind::XPath => "xpath",
        }
    }

    /// Resolve the first match, failing when nothing matches right now.
    async fn first(&self, selector: &Selector) -> Result<WdElement> {
        let mut elements = self.client.find_all(self.locator(selector)).await?;
        if elements.is_empty() {
            return Err(Error::ElementNotFound {
                selector: selector.raw().to_string(),
            });
        }
        Ok(elements.remove(0))
    }
}

#[async_trait]
impl Backend for WebDriver {
    async fn count(&self, selector: &Selector) -> Result<usize> {
        let elements = self.client.find_all(self.locator(selector)).await?;
        Ok(elements.len())
    }

    async fn is_displayed(&self, selector: &Selector) -> Result<bool> {
        let element = self.first(selector).await?;
        Ok(element.is_displayed().await?)
    }

    async fn is_interactable(&self, selector: &Selector) -> Result<bool> {
        let element = self.first(selector).await?;
        Ok(element.is_displayed().await? && element.is_enabled().await?)
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let element = self.first(selector).await?;
        element.click().await?;
        Ok(())
    }

    async fn send_keys(&self, selector: &Selector, text: &str) -> Result<()> {
        let element = self.first(selector).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn clear(&self, selector: &Selector) -> Result<()> {
        let element = self.first(selector).await?;
        element.clear().await?;
        Ok(())
    }

    async fn text(&self, selector: &Selector) -> Result<String> {
        let element = self.first(selector).await?;
        Ok(element.text().await?)
    }

    async fn attr(&self, selector: &Selector, name: &str) -> Result<Option<String>> {
        let element = self.first(selector).await?;
        Ok(element.attr(name).await?)
    }

    async fn texts(&self, selector: &Selector) -> Result<Vec<String>> {
        let elements = self.client.find_all(self.locator(selector)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in &elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn scroll_into_view(&self, selector: &Selector, align: ScrollAlignment) -> Result<()> {
        // Presence check first so a missing element surfaces as the usual
        // not-found error instead of a script exception
        self.first(selector).await?;
        self.client
            .execute(
                SCROLL_SCRIPT,
                vec![
                    json!(selector.raw()),
                    json!(Self::kind_tag(selector)),
                    json!(align.as_block()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        Ok(self.client.execute(script, args).await?)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn window_count(&self) -> Result<usize> {
        Ok(self.client.windows().await?.len())
    }

    async fn switch_to_window(&self, index: usize) -> Result<()> {
        let handles = self.client.windows().await?;
        let handle = handles.get(index).cloned().ok_or(Error::TabNotOpened {
            tab: index,
            expected: index + 1,
        })?;
        self.client.switch_to_window(handle).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.client.clone().close().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
