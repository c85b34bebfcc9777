use crate::element::Element;
use crate::session::Session;
use crate::types::Selector;

const ROOT: &str = "[class = social_content]";

/// The footer block of social network links.
#[derive(Clone)]
pub struct SocialBlock {
    session: Session,
}

impl SocialBlock {
    pub fn new(session: &Session) -> Self {
        SocialBlock {
            session: session.clone(),
        }
    }

    pub fn root(&self) -> Element {
        Element::new(&self.session, ROOT).named("social content block")
    }

    /// Anchor with an exact `href` match. The kind is explicit CSS; the
    /// `//` inside the URL must not be read as an XPath marker.
    pub fn link(&self, url: &str) -> Element {
        let selector = Selector::css(format!("{ROOT} a[href = \"{url}\"]"));
        Element::with_selector(&self.session, selector).named(format!("social link to {url}"))
    }
}

#[cfg(test)]
#[path = "social_test.rs"]
mod social_test;
