//! Typed payloads of the leaderboard REST API, plus the display-level
//! expectation records the UI suites derive from them.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::fixtures::Echelon;

/// Envelope of the list endpoints: results for the requested page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub results: Vec<T>,
}

/// One tournament season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: u64,
    pub title: String,
}

/// Clan emblem URLs in the two sizes the page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emblems {
    pub small: String,
    pub big: String,
}

/// Clan identity as embedded in standings and rewards payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanProfile {
    pub id: u64,
    pub name: String,
    pub tag: String,
    pub emblems: Emblems,
}

/// One row of the ranked-clans listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanStanding {
    pub rank: u32,
    pub clan: ClanProfile,
    /// Raw efficiency ratio; the page displays it as a percentage.
    #[serde(rename = "clan_efficient")]
    pub efficiency: f64,
    /// Reward points; the page displays them with whitespace grouping.
    #[serde(rename = "rewards_count")]
    pub points: u64,
}

/// One hit of the clan search, ranked or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClanSearchHit {
    pub id: u64,
    pub name: String,
    pub tag: String,
}

/// Reward history of one clan: one entry per team that earned points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanRewards {
    pub clan: ClanProfile,
    pub teams: Vec<TeamReward>,
}

/// One team's reward entry. `team` is absent for entries whose team data
/// was purged upstream; the popup skips those rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReward {
    pub team: Option<TeamProfile>,
    #[serde(rename = "team_efficient")]
    pub efficiency: f64,
    #[serde(rename = "rewards")]
    pub points: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub title: String,
    pub tournament: Tournament,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub title: String,
}

/// Efficiency ratio as the page displays it: a percentage rounded to one
/// decimal place.
pub fn efficiency_percent(raw: f64) -> f64 {
    (raw * 1000.0).round() / 10.0
}

/// Clan title as the page displays it.
pub fn display_title(tag: &str, name: &str) -> String {
    format!("[{tag}] {name}")
}

/// Display-level expectations for one clan row, derived from a standing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClanFacts {
    pub id: u64,
    pub rank: u32,
    pub name: String,
    /// `"[TAG] Name"`, as rendered in the table and the popup header.
    pub title: String,
    pub efficiency: f64,
    pub points: u64,
}

impl ClanFacts {
    pub fn from_standing(standing: &ClanStanding) -> Self {
        ClanFacts {
            id: standing.clan.id,
            rank: standing.rank,
            name: standing.clan.name.clone(),
            title: display_title(&standing.clan.tag, &standing.clan.name),
            efficiency: efficiency_percent(standing.efficiency),
            points: standing.points,
        }
    }
}

/// Display-level expectations for one reward row in the clan popup.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamFacts {
    /// 1-based row among the popup's counted reward rows.
    pub row: usize,
    pub tournament: String,
    /// `"[TAG] Team Title"` with the owning clan's tag.
    pub title: String,
    pub efficiency: f64,
    pub points: u64,
    pub updated_at: DateTime<Utc>,
}

impl TeamFacts {
    /// Expectations for every reward entry that still carries team data,
    /// in popup row order.
    pub fn counted(rewards: &ClanRewards) -> Vec<TeamFacts> {
        rewards
            .teams
            .iter()
            .filter_map(|entry| entry.team.as_ref().map(|team| (entry, team)))
            .enumerate()
            .map(|(idx, (entry, team))| TeamFacts {
                row: idx + 1,
                tournament: team.tournament.title.clone(),
                title: display_title(&rewards.clan.tag, &team.title),
                efficiency: efficiency_percent(entry.efficiency),
                points: entry.points,
                updated_at: entry.updated_at,
            })
            .collect()
    }

    /// A random counted row, or `None` when no entry has team data.
    pub fn pick_random(rewards: &ClanRewards) -> Option<TeamFacts> {
        TeamFacts::counted(rewards)
            .choose(&mut rand::thread_rng())
            .cloned()
    }
}

/// Everything a UI test needs to locate and verify one clan on its echelon
/// page: where the row lives and what it should display.
#[derive(Debug, Clone)]
pub struct LeaderInfo {
    pub page_url: String,
    /// 1-based row on the echelon page (rank offset into the tier).
    pub row: usize,
    pub clan: ClanFacts,
    pub team: Option<TeamFacts>,
}

impl LeaderInfo {
    /// Derive expectations for a standing on its echelon page under the
    /// given deployment base.
    pub fn derive(
        standing: &ClanStanding,
        rewards: Option<&ClanRewards>,
        echelon: Echelon,
        base: &str,
    ) -> Self {
        let (_, first_rank, _) = echelon.page_params();
        LeaderInfo {
            page_url: echelon.url_under(base),
            row: (standing.rank - (first_rank - 1)) as usize,
            clan: ClanFacts::from_standing(standing),
            team: rewards.and_then(TeamFacts::pick_random),
        }
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;
