//! REST layer for the leaderboard API: a thin verb-enumerated HTTP client,
//! raw endpoint calls, and a typed decoding layer on top.

pub mod client;
pub mod leaderboard;
pub mod models;

pub use client::ApiClient;
pub use leaderboard::{ClansQuery, LeaderboardApi, LeaderboardData};
pub use models::{
    ClanFacts, ClanProfile, ClanRewards, ClanSearchHit, ClanStanding, Emblems, LeaderInfo, Paged,
    Season, TeamFacts, TeamProfile, TeamReward, Tournament,
};
