use crate::element::Element;
use crate::errors::Result;
use crate::session::Session;

const ROOT: &str = "[id = onetrust-banner-sdk]";

/// The consent banner overlaying the page on first visit.
#[derive(Clone)]
pub struct CookieBanner {
    session: Session,
}

impl CookieBanner {
    pub fn new(session: &Session) -> Self {
        CookieBanner {
            session: session.clone(),
        }
    }

    pub fn root(&self) -> Element {
        Element::new(&self.session, ROOT).named("cookie banner")
    }

    pub fn policy_text(&self) -> Element {
        Element::new(&self.session, format!("{ROOT} [id *= policy-text]"))
            .named("cookie policy text")
    }

    pub fn accept_button(&self) -> Element {
        Element::new(&self.session, format!("{ROOT} button[id *= accept]"))
            .named("accept cookie banner button")
    }

    pub fn close_button(&self) -> Element {
        Element::new(&self.session, format!("{ROOT} button[class *= close]"))
            .named("close cookie banner button")
    }

    /// Accept the banner when it is shown and wait for it to leave the
    /// page; a page without the banner is left alone.
    pub async fn accept_if_shown(&self) -> Result<()> {
        if self.root().is_available().await? {
            self.accept_button().click().await?;
            self.root().wait_until_hidden(true).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "cookie_banner_test.rs"]
mod cookie_banner_test;
