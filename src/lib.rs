//! # rankprobe
//!
//! Browser and API test suite for a game-clan leaderboard web page.
//!
//! The crate drives a real browser through a page-object layer built on the
//! WebDriver protocol, and cross-checks what the page displays against the
//! backing REST API. The locator core re-resolves elements on every
//! operation and waits for observed state with bounded polling, so tests
//! stay stable across the page's re-renders and background fetches.
//!
//! ## Layout
//!
//! - [`session::Session`] owns the browser connection; locators clone it.
//! - [`element::Element`] / [`page::Page`] are the wait-and-interact core.
//! - [`pages`] models the leaderboard page: table, carousel, search form,
//!   clan popup, cookie banner, social links.
//! - [`api`] calls the leaderboard REST endpoints, raw and typed.
//! - [`fixtures`] holds the page's constant data: URLs, echelon tiers,
//!   social links, search texts.
//!
//! ## Usage
//!
//! ```no_run
//! use rankprobe::pages::LeaderboardPage;
//! use rankprobe::{BrowserType, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = Session::webdriver("http://localhost:4444", BrowserType::Firefox, true).await?;
//!
//! let page = LeaderboardPage::new(&session);
//! page.open().await?;
//! page.cookie_banner.accept_if_shown().await?;
//!
//! let title = page.table.clan_title(1).await?;
//! println!("top clan: {title}");
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Unit tests run against a scripted in-memory backend; the integration
//! suites under `tests/` run against an in-process fixture server and skip
//! browser cases cleanly when no WebDriver server is reachable.

#![allow(clippy::uninlined_format_args)]

/// REST client and typed models for the leaderboard API
pub mod api;

/// Browser backend seam the locator core talks through
pub mod backend;

/// Element locator with wait, read and interact operations
pub mod element;

/// Error taxonomy shared by the locator core
pub mod errors;

/// Constant data of the page under test
pub mod fixtures;

/// Logging setup and the log-preview truncation helper
pub mod logging;

/// Whole-page readiness and navigation
pub mod page;

/// Page objects for the leaderboard page
pub mod pages;

/// Browser session handle with tab switching
pub mod session;

/// Locator value types and scroll alignment
pub mod types;

/// WebDriver-backed implementation of the backend seam
pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake_dom;

pub use backend::Backend;
pub use element::Element;
pub use errors::{Error, Result};
pub use logging::init_logging;
pub use page::Page;
pub use session::Session;
pub use types::{ScrollAlignment, Selector, SelectorKind};
pub use webdriver::{BrowserType, WebDriver, webdriver_available};
