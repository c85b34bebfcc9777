use anyhow::{Context, Result, bail};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::api::client::ApiClient;
use crate::api::models::{ClanRewards, ClanSearchHit, ClanStanding, Paged, Season};
use crate::fixtures::{DEFAULT_PAGE_SIZE, Echelon, RANKED_CLANS_COUNT};
use crate::logging::truncate_for_log;

/// Query parameters of the ranked-clans listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClansQuery {
    pub page: usize,
    pub page_size: usize,
    /// First rank included, `rank__gte`.
    pub first_rank: u32,
    /// Last rank included, `rank__lte`.
    pub last_rank: u32,
}

impl Default for ClansQuery {
    fn default() -> Self {
        ClansQuery {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            first_rank: 1,
            last_rank: RANKED_CLANS_COUNT as u32,
        }
    }
}

impl ClansQuery {
    /// Every ranked clan on a single page.
    pub fn all_ranked() -> Self {
        ClansQuery {
            page_size: RANKED_CLANS_COUNT,
            ..ClansQuery::default()
        }
    }

    /// Exactly one echelon's ranks on a single page.
    pub fn echelon(echelon: Echelon) -> Self {
        let (page_size, first_rank, last_rank) = echelon.page_params();
        ClansQuery {
            page: 1,
            page_size,
            first_rank,
            last_rank,
        }
    }

    fn query_string(&self) -> String {
        format!(
            "?page={}&page_size={}&rank__gte={}&rank__lte={}",
            self.page, self.page_size, self.first_rank, self.last_rank
        )
    }
}

/// Raw calls against the leaderboard endpoints, mirroring the XHRs the page
/// itself issues. Responses come back undecoded; `LeaderboardData` layers
/// decoding on top.
#[derive(Debug, Clone)]
pub struct LeaderboardApi {
    client: ApiClient,
}

impl LeaderboardApi {
    /// Endpoints over the default deployment base.
    pub fn new() -> Self {
        Self::over(ApiClient::new())
    }

    /// Endpoints over an explicit client.
    pub fn over(client: ApiClient) -> Self {
        LeaderboardApi { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Available tournament seasons.
    pub async fn seasons(&self) -> Result<Response> {
        info!("Get available seasons for leaderboard");
        self.client.get("tournaments/seasons/").await
    }

    /// Clan search by name or tag, ranked clans and not.
    pub async fn search_clan(&self, query: &str) -> Result<Response> {
        info!("Searching clan with query: \"{}\"", truncate_for_log(query));
        let query = query.replace(' ', "+");
        self.client
            .get(&format!("clans-leaderboard/search/?query={query}"))
            .await
    }

    /// One page of the ranked-clans listing.
    pub async fn clans(&self, query: &ClansQuery) -> Result<Response> {
        info!(
            "Get ranked clans with: page_size={}, first_rank={}, last_rank={}",
            query.page_size, query.first_rank, query.last_rank
        );
        self.client
            .get(&format!(
                "clans-leaderboard/tournamentCupX/{}",
                query.query_string()
            ))
            .await
    }

    /// Per-team reward history of one clan.
    pub async fn clan_rewards(&self, clan_id: u64) -> Result<Response> {
        info!("Get clan rewards by clan id: {}", clan_id);
        self.client
            .get(&format!("clans-leaderboard/tournamentCupX/{clan_id}/"))
            .await
    }
}

impl Default for LeaderboardApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoding layer over `LeaderboardApi`: checks the status code and maps
/// bodies into typed results. Composed with, not inherited from, the raw
/// layer; both stay reachable.
#[derive(Debug, Clone)]
pub struct LeaderboardData {
    api: LeaderboardApi,
}

impl LeaderboardData {
    pub fn new() -> Self {
        Self::over(LeaderboardApi::new())
    }

    pub fn over(api: LeaderboardApi) -> Self {
        LeaderboardData { api }
    }

    pub fn api(&self) -> &LeaderboardApi {
        &self.api
    }

    /// Titles of the available seasons.
    pub async fn season_titles(&self) -> Result<Vec<String>> {
        let page: Paged<Season> = decode(self.api.seasons().await?).await?;
        Ok(page.results.into_iter().map(|s| s.title).collect())
    }

    /// Search hits for a clan name or tag.
    pub async fn search_clan(&self, query: &str) -> Result<Vec<ClanSearchHit>> {
        let page: Paged<ClanSearchHit> = decode(self.api.search_clan(query).await?).await?;
        Ok(page.results)
    }

    /// Standings for one listing page.
    pub async fn clans(&self, query: &ClansQuery) -> Result<Vec<ClanStanding>> {
        let page: Paged<ClanStanding> = decode(self.api.clans(query).await?).await?;
        Ok(page.results)
    }

    /// Reward history of one clan.
    pub async fn clan_rewards(&self, clan_id: u64) -> Result<ClanRewards> {
        decode(self.api.clan_rewards(clan_id).await?).await
    }

    /// Reward histories of the queried clans whose history spans more than
    /// `more_than` teams.
    pub async fn clans_with_rewards(
        &self,
        query: &ClansQuery,
        more_than: usize,
    ) -> Result<Vec<ClanRewards>> {
        let mut heavy = Vec::new();
        for standing in self.clans(query).await? {
            let rewards = self.clan_rewards(standing.clan.id).await?;
            if rewards.teams.len() > more_than {
                heavy.push(rewards);
            }
        }
        Ok(heavy)
    }
}

impl Default for LeaderboardData {
    fn default() -> Self {
        Self::new()
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().clone();
    if !status.is_success() {
        bail!("{} responded with status {}", url, status);
    }
    response
        .json::<T>()
        .await
        .with_context(|| format!("failed to decode response from {url}"))
}

#[cfg(test)]
#[path = "leaderboard_test.rs"]
mod leaderboard_test;
