use anyhow::{Context, Result};
use tracing::info;

use crate::element::Element;
use crate::fixtures::{self, EMPTY_SEARCH_NOTICE, Echelon};
use crate::page::Page;
use crate::pages::clan_popup::{ClanPopup, parse_points};
use crate::pages::cookie_banner::CookieBanner;
use crate::pages::social::SocialBlock;
use crate::session::Session;
use crate::types::{ScrollAlignment, Selector};

const TABLE_ROOT: &str = "table[class *= leaderboard-table]";
const CAROUSEL_ROOT: &str = "[class = leaderboard-carousel]";
const SEARCH_ROOT: &str = "[class *= search_form]";

/// The leaderboard page composite: navigation plus every component on the
/// page.
pub struct LeaderboardPage {
    page: Page,
    session: Session,
    pub cookie_banner: CookieBanner,
    pub carousel: Carousel,
    pub social: SocialBlock,
    pub search: SearchForm,
    pub table: LeaderboardTable,
}

impl LeaderboardPage {
    /// Page object over the default deployment URL.
    pub fn new(session: &Session) -> Self {
        Self::at(session, fixtures::leaderboard_url())
    }

    /// Page object with an explicit page URL.
    pub fn at(session: &Session, url: impl Into<String>) -> Self {
        LeaderboardPage {
            page: Page::new(
                session,
                Selector::infer("main[class *= leaderboard]"),
                "Leaderboard page",
                url,
            ),
            session: session.clone(),
            cookie_banner: CookieBanner::new(session),
            carousel: Carousel::new(session),
            social: SocialBlock::new(session),
            search: SearchForm::new(session),
            table: LeaderboardTable::new(session),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Open the page at its default URL and wait for readiness.
    pub async fn open(&self) -> Result<&Self> {
        self.page.open().await?;
        Ok(self)
    }

    /// Open the page at the given URL and wait for readiness.
    pub async fn open_at(&self, url: &str) -> Result<&Self> {
        self.page.open_at(url).await?;
        Ok(self)
    }

    /// Block until the table spinner settles.
    pub async fn wait_table_loaded(&self) -> Result<&Self> {
        self.table.spinner().wait_until_hidden(false).await?;
        Ok(self)
    }

    pub fn season_select_arrow(&self) -> Element {
        Element::new(&self.session, "[class *= season-select_arrow]")
            .named("season select arrow")
    }

    pub fn season_select_menu(&self) -> Element {
        Element::new(&self.session, "[class *= season-select_menu]").named("season select menu")
    }

    pub fn season_item(&self, title: &str) -> Element {
        Element::new(
            &self.session,
            format!(
                "//*[contains(@class, \"season-select_menu\")]\
                 //*[contains(@class, \"season-select_item\") and contains(., \"{title}\")]"
            ),
        )
        .named(format!("season item: {title}"))
    }

    /// Pick a season from the dropdown and wait for the table to reload.
    pub async fn switch_season(&self, title: &str) -> Result<&Self> {
        info!("Switching season to \"{}\"", title);
        self.season_select_arrow().click().await?;
        self.season_select_menu().wait_until_present(true).await?;
        self.season_item(title).click().await?;
        self.wait_table_loaded().await
    }
}

/// Moves the echelon carousel understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselMove {
    /// Click a tier's medal directly.
    Echelon(Echelon),
    /// Click the next (right) medal.
    Next,
    /// Click the previous (left) medal.
    Prev,
}

/// The three-medal echelon carousel above the table.
#[derive(Clone)]
pub struct Carousel {
    session: Session,
}

impl Carousel {
    pub fn new(session: &Session) -> Self {
        Carousel {
            session: session.clone(),
        }
    }

    pub fn root(&self) -> Element {
        Element::new(&self.session, CAROUSEL_ROOT).named("leaderboard carousel")
    }

    pub fn next_medal(&self) -> Element {
        Element::new(
            &self.session,
            format!("{CAROUSEL_ROOT} [class *= swiper-slide-next]"),
        )
        .named("next echelon medal")
    }

    pub fn prev_medal(&self) -> Element {
        Element::new(
            &self.session,
            format!("{CAROUSEL_ROOT} [class *= swiper-slide-prev]"),
        )
        .named("previous echelon medal")
    }

    pub fn unselected_medals(&self) -> Element {
        Element::new(&self.session, "[class *= swiper-slide]:not([class *= active])")
            .named("unselected echelon medals")
    }

    /// A tier's medal, located through its background style.
    pub fn medal(&self, echelon: Echelon) -> Element {
        Element::new(
            &self.session,
            format!("{CAROUSEL_ROOT} [class *= swiper-slide] [style *= {echelon}]"),
        )
        .named(format!("{echelon} echelon medal"))
    }

    /// The carousel with the given slide title active.
    pub fn slide_with_title(&self, title: &str) -> Element {
        Element::new(
            &self.session,
            format!(
                "//*[@class=\"leaderboard-carousel\" and \
                 .//*[contains(@class, \"swiper-slide-active\")] and contains(., \"{title}\")]"
            ),
        )
        .named(format!("active slide titled: {title}"))
    }

    /// Perform a carousel move and wait until the table has refetched.
    ///
    /// Direct tier selection additionally waits for that tier's slide title
    /// to become active before watching the spinner.
    pub async fn select(&self, mv: CarouselMove) -> Result<&Self> {
        info!("Selecting carousel move: {:?}", mv);
        match mv {
            CarouselMove::Echelon(echelon) => {
                self.medal(echelon).click().await?;
                self.slide_with_title(echelon.title())
                    .wait_until_present(true)
                    .await?;
            }
            CarouselMove::Next => {
                self.next_medal().click().await?;
            }
            CarouselMove::Prev => {
                self.prev_medal().click().await?;
            }
        }
        LeaderboardTable::new(&self.session)
            .spinner()
            .wait_until_hidden(false)
            .await?;
        Ok(self)
    }

    /// Number of medals not currently selected.
    pub async fn unselected_count(&self) -> Result<usize> {
        Ok(self.unselected_medals().count().await?)
    }
}

/// The live-search form above the table.
#[derive(Clone)]
pub struct SearchForm {
    session: Session,
}

impl SearchForm {
    pub fn new(session: &Session) -> Self {
        SearchForm {
            session: session.clone(),
        }
    }

    pub fn root(&self) -> Element {
        Element::new(&self.session, SEARCH_ROOT).named("search form")
    }

    pub fn input(&self) -> Element {
        Element::new(
            &self.session,
            format!("{SEARCH_ROOT} input[class *= search_input]"),
        )
        .named("search input")
    }

    /// Clear control, only rendered while the input has content.
    pub fn clear_button(&self) -> Element {
        Element::new(
            &self.session,
            format!("{SEARCH_ROOT} button[class *= search_clear__show]"),
        )
        .named("clear search button")
    }

    /// Candidate list entry whose text contains the clan name.
    pub fn item_by_name(&self, clan_name: &str) -> Element {
        Element::new(
            &self.session,
            format!(
                "//button[contains(@class, \"search-list_item\") and contains(., \"{clan_name}\")]"
            ),
        )
        .named(format!("search item: {clan_name}"))
    }

    /// Tag badge inside the candidate entry matching the clan name.
    pub fn tag_by_name(&self, clan_name: &str) -> Element {
        Element::new(
            &self.session,
            format!(
                "//button[contains(@class, \"search-list_item\") and \
                 .//*[contains(., \"{clan_name}\")]]//*[contains(@class, \"tag\")]"
            ),
        )
        .named(format!("search item tag: {clan_name}"))
    }

    pub fn any_item(&self) -> Element {
        Element::new(&self.session, "//button[contains(@class, \"search-list_item\")]")
            .named("any search item")
    }

    /// The "nothing found" notice under the input.
    pub fn empty_result(&self) -> Element {
        Element::new(
            &self.session,
            format!(
                "//*[@class=\"search_result\" and .//*[.=\"{EMPTY_SEARCH_NOTICE}\"]]"
            ),
        )
        .named("empty search result")
    }

    /// Search a clan by name and pick it from the live candidates: click
    /// the input, type character by character, click the matching
    /// candidate, then wait for the candidate list to fold away.
    pub async fn search_and_select(&self, clan_name: &str) -> Result<&Self> {
        info!("Searching and selecting clan \"{}\"", clan_name);
        self.input().click().await?;
        self.input().type_slowly(clan_name).await?;
        let item = self.item_by_name(clan_name);
        item.click().await?;
        item.wait_until_hidden(false).await?;
        Ok(self)
    }
}

/// The ranked-clans table, or its search-results variant.
#[derive(Clone)]
pub struct LeaderboardTable {
    session: Session,
    root: String,
}

impl LeaderboardTable {
    /// The regular table body (infinite-scroll container).
    pub fn new(session: &Session) -> Self {
        LeaderboardTable {
            session: session.clone(),
            root: format!("{TABLE_ROOT} tbody[infinite-scroll-disabled]"),
        }
    }

    /// The table as it renders search results, without the infinite-scroll
    /// container.
    pub fn search_results(session: &Session) -> Self {
        LeaderboardTable {
            session: session.clone(),
            root: TABLE_ROOT.to_string(),
        }
    }

    fn row_root(&self) -> String {
        format!("{} [class *= table_tr]", self.root)
    }

    pub fn root_element(&self) -> Element {
        Element::new(&self.session, self.root.clone()).named("leaderboard table")
    }

    pub fn rows(&self) -> Element {
        Element::new(&self.session, self.row_root()).named("all table rows")
    }

    pub fn spinner(&self) -> Element {
        Element::new(&self.session, format!("{} [class *= waiting_spinner]", self.root))
            .named("leaderboard table spinner")
    }

    /// Shown in place of the table after a search that matched nothing.
    pub fn back_button(&self) -> Element {
        Element::new(&self.session, "[class = leaderboard-button-back]")
            .named("back to table button")
    }

    pub fn row(&self, row: usize) -> Element {
        Element::new(&self.session, format!("{}:nth-child({row})", self.row_root()))
            .named(format!("table row {row}"))
    }

    pub fn place_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{}:nth-child({row}) td[class *= place]", self.row_root()),
        )
        .named(format!("place in row {row}"))
    }

    /// Wrapper whose class carries the rank when the cell renders a medal
    /// icon instead of a number.
    pub fn wrapped_place(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{}:nth-child({row}) [class *= \"place place\"]", self.row_root()),
        )
        .named(format!("wrapped place in row {row}"))
    }

    pub fn tag_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{}:nth-child({row}) [class *= clan-tag]", self.row_root()),
        )
        .named(format!("clan tag in row {row}"))
    }

    pub fn name_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!(
                "{}:nth-child({row}) [class *= participant_name]",
                self.row_root()
            ),
        )
        .named(format!("clan name in row {row}"))
    }

    pub fn efficiency_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{}:nth-child({row}) [class *= efficient]", self.row_root()),
        )
        .named(format!("clan efficiency in row {row}"))
    }

    pub fn points_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{}:nth-child({row}) [class *= points]", self.row_root()),
        )
        .named(format!("clan points in row {row}"))
    }

    pub fn row_by_name(&self, clan_name: &str) -> Element {
        Element::new(
            &self.session,
            format!(
                "//tr[contains(@class, \"leaderboard-table\") and \
                 .//*[contains(., \"{clan_name}\")]]"
            ),
        )
        .named(format!("row of clan: {clan_name}"))
    }

    /// Clan rank as the row displays it.
    ///
    /// Top rows render a medal icon with an empty place cell; the rank then
    /// comes from the `place place__<N>` wrapper class. The text read is
    /// primary, the class read is the fallback.
    pub async fn clan_rank(&self, row: usize) -> Result<u32> {
        let text = self.place_cell(row).text().await?;
        let text = text.trim().to_string();
        if !text.is_empty() {
            return text
                .parse()
                .with_context(|| format!("place text {text:?} is not a number"));
        }
        let class = self
            .wrapped_place(row)
            .attr("class")
            .await?
            .unwrap_or_default();
        let digits: String = class
            .split("place__")
            .nth(1)
            .unwrap_or("")
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits
            .parse()
            .with_context(|| format!("no rank in place wrapper class {class:?}"))
    }

    /// Clan title as displayed, `"[TAG] Name"` joined from the two cells.
    pub async fn clan_title(&self, row: usize) -> Result<String> {
        let tag = self.tag_cell(row).text().await?;
        let name = self.name_cell(row).text().await?;
        Ok(format!("{tag} {name}"))
    }

    /// Clan points with the display whitespace grouping stripped.
    pub async fn clan_points(&self, row: usize) -> Result<u64> {
        parse_points(&self.points_cell(row).text().await?)
    }

    pub async fn clan_efficiency(&self, row: usize) -> Result<f64> {
        let text = self.efficiency_cell(row).text().await?;
        text.parse()
            .with_context(|| format!("efficiency text {text:?} is not a number"))
    }

    /// Open a clan's popup from its row, located by clan name.
    pub async fn open_clan_by_name(&self, clan_name: &str) -> Result<ClanPopup> {
        self.open_clan(self.row_by_name(clan_name)).await
    }

    /// Open a clan's popup from its row, located by row number.
    pub async fn open_clan_by_row(&self, row: usize) -> Result<ClanPopup> {
        self.open_clan(self.row(row)).await
    }

    async fn open_clan(&self, row: Element) -> Result<ClanPopup> {
        info!("Opening clan popup from \"{}\"", row.name());
        row.scroll_into_view(ScrollAlignment::Center).await?;
        row.click().await?;
        let popup = ClanPopup::new(&self.session);
        popup.root().wait_until_present(true).await?;
        Ok(popup)
    }

    /// Scroll the table into view and let the spinner settle.
    pub async fn scroll_to_table(&self) -> Result<&Self> {
        self.root_element()
            .scroll_into_view(ScrollAlignment::Start)
            .await?;
        self.spinner().wait_until_hidden(false).await?;
        Ok(self)
    }
}

#[cfg(test)]
#[path = "leaderboard_test.rs"]
mod leaderboard_test;
