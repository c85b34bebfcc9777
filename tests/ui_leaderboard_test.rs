// Integration tests driving the leaderboard page in a real browser against
// the local fixture server. Every test skips cleanly when no WebDriver
// server is reachable.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use serial_test::serial;

use rankprobe::Session;
use rankprobe::api::models::{ClanFacts, LeaderInfo, TeamFacts};
use rankprobe::api::{ApiClient, ClansQuery, LeaderboardApi, LeaderboardData};
use rankprobe::fixtures::{self, Echelon, SOCIAL_LINKS};
use rankprobe::pages::{CarouselMove, LeaderboardPage, LeaderboardTable};

fn data(server: &server::ServerHandle) -> LeaderboardData {
    LeaderboardData::over(LeaderboardApi::over(ApiClient::with_base(
        fixtures::api_base_url_under(&server.base_url),
    )))
}

/// Open the leaderboard replica, dismiss the consent banner and wait for
/// the first table render.
async fn open_page(session: &Session, server: &server::ServerHandle) -> LeaderboardPage {
    let page = LeaderboardPage::at(session, fixtures::leaderboard_url_under(&server.base_url));
    page.open().await.unwrap();
    page.cookie_banner.accept_if_shown().await.unwrap();
    page.wait_table_loaded().await.unwrap();
    page
}

#[tokio::test]
#[serial]
async fn test_cookie_banner_is_shown_and_accepted() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };

    let page = LeaderboardPage::at(&session, fixtures::leaderboard_url_under(&server.base_url));
    page.open().await.unwrap();
    assert!(page.cookie_banner.policy_text().is_displayed().await.unwrap());

    page.cookie_banner.accept_if_shown().await.unwrap();
    assert!(!page.cookie_banner.root().is_available().await.unwrap());

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_platinum_echelon_is_preselected() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    assert!(
        page.carousel
            .slide_with_title(Echelon::Platinum.title())
            .is_available()
            .await
            .unwrap()
    );
    assert_eq!(page.table.rows().count().await.unwrap(), 8);
    assert_eq!(page.table.clan_rank(1).await.unwrap(), 1);

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_social_links_are_displayed() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    for (slug, url) in SOCIAL_LINKS {
        assert!(
            page.social.link(url).is_displayed().await.unwrap(),
            "{slug} link is not displayed"
        );
    }

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_social_link_opens_in_new_tab() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    let (_, vk_url) = SOCIAL_LINKS[0];
    page.social.link(vk_url).click().await.unwrap();

    session.switch_to_tab(1).await.unwrap();
    let url = session.current_url().await.unwrap();
    assert!(url.contains("vk.com"), "unexpected tab url: {url}");

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_search_select_ranked_clan_filters_table() {
    let server = server::ensure_server().await;
    let data = data(server);
    let standings = data.clans(&ClansQuery::all_ranked()).await.unwrap();
    let facts = ClanFacts::from_standing(&standings[0]);
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    page.search.search_and_select(&facts.name).await.unwrap();

    let results = LeaderboardTable::search_results(&session);
    assert_eq!(results.rows().count().await.unwrap(), 1);
    assert_eq!(results.clan_title(1).await.unwrap(), facts.title);
    assert_eq!(results.clan_rank(1).await.unwrap(), facts.rank);

    results.back_button().click().await.unwrap();
    assert_eq!(page.table.rows().count().await.unwrap(), 8);

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_search_select_unranked_clan_empties_table() {
    let server = server::ensure_server().await;
    let (_, _, name) = server::UNRANKED_CLANS[0];
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    page.search.search_and_select(name).await.unwrap();

    assert!(!page.table.rows().is_available().await.unwrap());
    let results = LeaderboardTable::search_results(&session);
    assert!(!results.rows().is_available().await.unwrap());

    assert!(results.back_button().is_displayed().await.unwrap());
    results.back_button().click().await.unwrap();
    assert_eq!(page.table.rows().count().await.unwrap(), 8);

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_unmatched_query_shows_empty_notice() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    page.search.input().click().await.unwrap();
    page.search
        .input()
        .type_slowly(&common::random_string())
        .await
        .unwrap();
    page.search.empty_result().wait_until_present(false).await.unwrap();

    page.search.clear_button().click().await.unwrap();
    assert!(!page.search.empty_result().is_available().await.unwrap());

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_carousel_selects_every_echelon() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    for echelon in [Echelon::Silver, Echelon::Bronze, Echelon::Platinum] {
        page.carousel
            .select(CarouselMove::Echelon(echelon))
            .await
            .unwrap();
        let (page_size, first_rank, _) = echelon.page_params();
        assert_eq!(page.table.rows().count().await.unwrap(), page_size, "{echelon} rows");
        assert_eq!(page.table.clan_rank(1).await.unwrap(), first_rank, "{echelon} first rank");
    }

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_carousel_moves_relative() {
    let server = server::ensure_server().await;
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    page.carousel.select(CarouselMove::Next).await.unwrap();
    assert!(
        page.carousel
            .slide_with_title(Echelon::Silver.title())
            .is_available()
            .await
            .unwrap()
    );
    assert_eq!(page.carousel.unselected_count().await.unwrap(), 2);

    page.carousel.select(CarouselMove::Prev).await.unwrap();
    assert!(
        page.carousel
            .slide_with_title(Echelon::Platinum.title())
            .is_available()
            .await
            .unwrap()
    );

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_echelon_url_preselects_tier_and_row_matches_api() {
    let server = server::ensure_server().await;
    let data = data(server);
    let standings = data.clans(&ClansQuery::echelon(Echelon::Silver)).await.unwrap();
    let standing = standings.iter().find(|s| s.rank == 12).unwrap();
    let info = LeaderInfo::derive(standing, None, Echelon::Silver, &server.base_url);
    let Some(session) = common::browser_session().await else {
        return;
    };

    let page = LeaderboardPage::at(&session, info.page_url.as_str());
    page.open().await.unwrap();
    page.cookie_banner.accept_if_shown().await.unwrap();
    page.wait_table_loaded().await.unwrap();

    assert!(
        page.carousel
            .slide_with_title(Echelon::Silver.title())
            .is_available()
            .await
            .unwrap()
    );
    assert_eq!(page.table.clan_rank(info.row).await.unwrap(), info.clan.rank);
    assert_eq!(page.table.clan_title(info.row).await.unwrap(), info.clan.title);
    assert_eq!(page.table.clan_points(info.row).await.unwrap(), info.clan.points);
    assert_eq!(
        page.table.clan_efficiency(info.row).await.unwrap(),
        info.clan.efficiency
    );

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_clan_popup_matches_api() {
    let server = server::ensure_server().await;
    let data = data(server);
    let standings = data.clans(&ClansQuery::echelon(Echelon::Platinum)).await.unwrap();
    let mut picked = None;
    for standing in &standings {
        let rewards = data.clan_rewards(standing.clan.id).await.unwrap();
        if rewards.teams.len() > 6 {
            picked = Some((standing.clone(), rewards));
            break;
        }
    }
    let (standing, rewards) = picked.expect("a platinum clan with a long reward history");
    let facts = ClanFacts::from_standing(&standing);
    let counted = TeamFacts::counted(&rewards);
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    let popup = page.table.open_clan_by_name(&facts.name).await.unwrap();
    assert_eq!(popup.clan_name().await.unwrap(), facts.title);
    assert_eq!(popup.clan_points().await.unwrap(), facts.points);
    assert_eq!(popup.clan_efficiency().await.unwrap(), facts.efficiency);
    assert_eq!(popup.rows().count().await.unwrap(), 6);

    popup.expand_rewards(Duration::from_secs(5)).await.unwrap();
    assert_eq!(popup.rows().count().await.unwrap(), rewards.teams.len());
    assert_eq!(popup.counted_rows().count().await.unwrap(), counted.len());

    assert_eq!(popup.team_tournament(1).await.unwrap(), counted[0].tournament);
    assert_eq!(popup.team_title(1).await.unwrap(), counted[0].title);
    assert_eq!(popup.team_points(1).await.unwrap(), counted[0].points);
    assert_eq!(popup.team_efficiency(1).await.unwrap(), counted[0].efficiency);

    popup.close().await.unwrap();
    assert!(!popup.root().is_available().await.unwrap());

    session.close().await.unwrap();
}

#[tokio::test]
#[serial]
async fn test_switching_season_reloads_table() {
    let server = server::ensure_server().await;
    let titles = data(server).season_titles().await.unwrap();
    let Some(session) = common::browser_session().await else {
        return;
    };
    let page = open_page(&session, server).await;

    page.switch_season(titles.last().unwrap()).await.unwrap();
    assert_eq!(page.table.rows().count().await.unwrap(), 8);

    session.close().await.unwrap();
}
