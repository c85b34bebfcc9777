//! Page objects for the clan leaderboard page: the page composite and its
//! components (carousel, search form, table, popup, cookie banner, social
//! block). Components hold no DOM state; they mint `Element` values bound
//! to the shared session on every access.

pub mod clan_popup;
pub mod cookie_banner;
pub mod leaderboard;
pub mod social;

pub use clan_popup::ClanPopup;
pub use cookie_banner::CookieBanner;
pub use leaderboard::{Carousel, CarouselMove, LeaderboardPage, LeaderboardTable, SearchForm};
pub use social::SocialBlock;
