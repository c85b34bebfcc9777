//! Static data describing the leaderboard page under test: URLs, echelon
//! tiers, social links, page-size constants, and well-known page texts.

use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::errors::Error;

/// Rows shown per leaderboard page before infinite scroll loads the rest.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Total number of ranked clans across all echelons.
pub const RANKED_CLANS_COUNT: usize = 32;

/// Notice displayed when a search query matches no clan.
pub const EMPTY_SEARCH_NOTICE: &str = "По вашему запросу ничего не найдено";

/// Footer social links as rendered on the page, `(slug, href)` pairs.
pub const SOCIAL_LINKS: [(&str, &str); 6] = [
    ("vk", "https://vk.com/wotblitz"),
    ("instagram", "https://www.instagram.com/wotblitz_official"),
    ("discord", "https://discord.gg/VV8ggDm"),
    (
        "youtube",
        "https://www.youtube.com/channel/UCrh8Fd_QKmzhv4lhrS-k4sQ",
    ),
    ("facebook", "https://www.facebook.com/wotblitz"),
    ("ok", "https://ok.ru/wotblitz"),
];

/// Search payloads that must come back as plain data, never executed or
/// rendered by the page.
pub const INJECTION_PROBES: [(&str, &str); 2] = [
    ("js", "<script>alert('Executing JS')</script>"),
    ("html", "<blink>Hello there</blink>"),
];

/// Base URL of the deployment under test.
///
/// `LEADERBOARD_BASE_URL` overrides the default; the integration suites set
/// it to the local fixture server.
pub fn base_url() -> String {
    env::var("LEADERBOARD_BASE_URL").unwrap_or_else(|_| "https://wotblitz.eu".to_string())
}

/// URL of the leaderboard page itself.
pub fn leaderboard_url() -> String {
    leaderboard_url_under(&base_url())
}

/// Leaderboard page URL under an explicit deployment base.
pub fn leaderboard_url_under(base: &str) -> String {
    format!("{}/ru/clans-leaderboard", base.trim_end_matches('/'))
}

/// Base URL of the REST API backing the page.
pub fn api_base_url() -> String {
    api_base_url_under(&base_url())
}

/// REST API base URL under an explicit deployment base.
pub fn api_base_url_under(base: &str) -> String {
    format!("{}/ru/api/", base.trim_end_matches('/'))
}

/// One tier of the ranked-clans carousel.
///
/// The page shows three medals; each covers a contiguous, non-overlapping
/// rank range and maps to its own URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Echelon {
    Platinum,
    Silver,
    Bronze,
}

impl Echelon {
    /// All tiers in carousel order, top tier first.
    pub const ALL: [Echelon; 3] = [Echelon::Platinum, Echelon::Silver, Echelon::Bronze];

    /// Machine name as it appears in the page markup (medal style).
    pub fn name(self) -> &'static str {
        match self {
            Echelon::Platinum => "platinum",
            Echelon::Silver => "silver",
            Echelon::Bronze => "bronze",
        }
    }

    /// Slide title as displayed on the carousel.
    pub fn title(self) -> &'static str {
        match self {
            Echelon::Platinum => "Высший эшелон",
            Echelon::Silver => "Средний эшелон",
            Echelon::Bronze => "Нижний эшелон",
        }
    }

    /// Leaderboard ranks covered by this tier, inclusive.
    pub fn ranks(self) -> RangeInclusive<u32> {
        match self {
            Echelon::Platinum => 1..=8,
            Echelon::Silver => 9..=16,
            Echelon::Bronze => 17..=32,
        }
    }

    /// URL fragment preselecting this tier on the page.
    pub fn fragment(self) -> &'static str {
        match self {
            Echelon::Platinum => "#/leagues/0",
            Echelon::Silver => "#/leagues/1",
            Echelon::Bronze => "#/leagues/2",
        }
    }

    /// Full page URL preselecting this tier.
    pub fn url(self) -> String {
        self.url_under(&base_url())
    }

    /// Tier page URL under an explicit deployment base.
    pub fn url_under(self, base: &str) -> String {
        format!("{}/{}", leaderboard_url_under(base), self.fragment())
    }

    /// Pagination parameters covering exactly this tier's ranks:
    /// `(page_size, first_rank, last_rank)`.
    pub fn page_params(self) -> (usize, u32, u32) {
        let ranks = self.ranks();
        let (first, last) = (*ranks.start(), *ranks.end());
        ((last - first + 1) as usize, first, last)
    }
}

impl fmt::Display for Echelon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Echelon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platinum" => Ok(Echelon::Platinum),
            "silver" => Ok(Echelon::Silver),
            "bronze" => Ok(Echelon::Bronze),
            other => Err(Error::UnknownEchelon {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures_test;
