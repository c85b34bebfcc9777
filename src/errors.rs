use thiserror::Error;

/// Errors raised by the locator core and the session layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A wait operation did not observe the desired state within the timeout
    #[error("wait timed out: {condition} for \"{name}\". Selector: {selector}")]
    WaitTimeout {
        condition: &'static str,
        name: String,
        selector: String,
    },

    /// A single-match resolve found zero elements at call time
    #[error("no element matching selector: {selector}")]
    ElementNotFound { selector: String },

    /// Tab switch did not observe the expected window count
    #[error("tab {tab} not opened (expected {expected} windows)")]
    TabNotOpened { tab: usize, expected: usize },

    /// Echelon name outside the known set
    #[error("unknown echelon \"{name}\": expected one of platinum, silver, bronze")]
    UnknownEchelon { name: String },

    /// WebDriver session could not be established
    #[error("failed to connect to WebDriver: {0}")]
    Connect(#[from] fantoccini::error::NewSessionError),

    /// WebDriver command failed mid-session
    #[error("webdriver command failed: {0}")]
    Driver(#[from] fantoccini::error::CmdError),
}

pub type Result<T> = std::result::Result<T, Error>;
