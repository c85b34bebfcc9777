// Shared helpers for the browser-driven suites

use std::env;
use std::str::FromStr;

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};

use rankprobe::{BrowserType, Session, webdriver_available};

/// Open a headless browser session, or `None` when no WebDriver server is
/// reachable so the suite can skip cleanly.
///
/// `TEST_BROWSER` picks the browser (default Firefox), `WEBDRIVER_URL`
/// overrides the endpoint.
pub async fn browser_session() -> Option<Session> {
    let browser = env::var("TEST_BROWSER")
        .ok()
        .and_then(|name| BrowserType::from_str(&name).ok())
        .unwrap_or(BrowserType::Firefox);
    let url = env::var("WEBDRIVER_URL")
        .unwrap_or_else(|_| browser.default_webdriver_url().to_string());

    if !webdriver_available(&url).await {
        eprintln!("Skipping test - no WebDriver server at {url}");
        return None;
    }
    match Session::webdriver(&url, browser, true).await {
        Ok(session) => Some(session),
        Err(e) => {
            eprintln!("Skipping test - WebDriver session failed: {e}");
            None
        }
    }
}

/// Random letters and digits, 10 to 30 characters: long enough to match no
/// clan, short enough for the search input.
pub fn random_string() -> String {
    let len = thread_rng().gen_range(10..=30);
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
