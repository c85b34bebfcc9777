use std::fmt;

/// How a selector string addresses the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// CSS selector semantics
    Css,
    /// XPath expression semantics
    XPath,
}

/// Immutable locator value: a selector string plus how to interpret it.
///
/// The kind is fixed at construction. When not given explicitly it is
/// inferred from the selector syntax: anything containing `//` is treated as
/// an XPath expression, everything else as a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    raw: String,
    kind: SelectorKind,
}

impl Selector {
    /// Build a selector, inferring the kind from its syntax.
    pub fn infer(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = if raw.contains("//") {
            SelectorKind::XPath
        } else {
            SelectorKind::Css
        };
        Selector { raw, kind }
    }

    /// Build a CSS selector. Needed where inference would misfire, e.g.
    /// attribute selectors whose value embeds a URL (`a[href = "https://…"]`).
    pub fn css(raw: impl Into<String>) -> Self {
        Selector {
            raw: raw.into(),
            kind: SelectorKind::Css,
        }
    }

    /// Build an XPath selector.
    pub fn xpath(raw: impl Into<String>) -> Self {
        Selector {
            raw: raw.into(),
            kind: SelectorKind::XPath,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Alignment for `scroll_into_view`, mirroring the DOM `block` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

impl ScrollAlignment {
    pub fn as_block(&self) -> &'static str {
        match self {
            ScrollAlignment::Start => "start",
            ScrollAlignment::Center => "center",
            ScrollAlignment::End => "end",
            ScrollAlignment::Nearest => "nearest",
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
