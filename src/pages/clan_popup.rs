use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::Instant;
use tracing::info;

use crate::element::Element;
use crate::errors::Error;
use crate::session::Session;

const ROOT: &str = "[class = popup] [class *= p-leaderboard-detail]";
const ROW: &str = "tr[class *= p-leaderboard-team]";

/// The reward-details popup opened by clicking a table row.
///
/// The header carries the clan title, points and efficiency; the body lists
/// one row per rewarded team, collapsed behind a "show more" control when
/// the history is long.
#[derive(Clone, Debug)]
pub struct ClanPopup {
    session: Session,
}

impl ClanPopup {
    pub fn new(session: &Session) -> Self {
        ClanPopup {
            session: session.clone(),
        }
    }

    pub fn root(&self) -> Element {
        Element::new(&self.session, ROOT).named("clan rewards popup")
    }

    pub fn header(&self) -> Element {
        Element::new(&self.session, "[class *= p-leaderboard-detail_heading]")
            .named("popup header")
    }

    /// Header figures in display order: points first, then efficiency.
    pub fn header_items(&self) -> Element {
        Element::new(&self.session, "[class *= info-value]").named("popup header items")
    }

    pub fn close_button(&self) -> Element {
        Element::new(&self.session, "button[class *= popup_button]").named("close popup button")
    }

    pub fn expand_button(&self) -> Element {
        Element::new(&self.session, "button[class *= button-more]").named("expand rewards button")
    }

    pub fn table(&self) -> Element {
        Element::new(&self.session, "table[class *= p-table_table]").named("popup table")
    }

    pub fn rows(&self) -> Element {
        Element::new(&self.session, ROW).named("popup reward rows")
    }

    /// Reward rows that count toward the clan total.
    pub fn counted_rows(&self) -> Element {
        Element::new(&self.session, format!("{ROW}:not([class *= uncounted])"))
            .named("counted popup reward rows")
    }

    pub fn tournament_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{ROW}:nth-child({row}) [class *= title]"),
        )
        .named(format!("team tournament in row {row}"))
    }

    pub fn title_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{ROW}:nth-child({row}) [class *= participant_name]"),
        )
        .named(format!("team title in row {row}"))
    }

    pub fn efficiency_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{ROW}:nth-child({row}) [class *= team_te]"),
        )
        .named(format!("team efficiency in row {row}"))
    }

    pub fn points_cell(&self, row: usize) -> Element {
        Element::new(
            &self.session,
            format!("{ROW}:nth-child({row}) [class *= team_cups]"),
        )
        .named(format!("team points in row {row}"))
    }

    /// Clan title from the popup header, `"[TAG] Name"`.
    pub async fn clan_name(&self) -> Result<String> {
        Ok(self.header().text().await?)
    }

    pub async fn clan_efficiency(&self) -> Result<f64> {
        let items = self.header_items().texts().await?;
        let text = items
            .get(1)
            .context("popup header has no efficiency value")?;
        text.parse()
            .with_context(|| format!("efficiency text {text:?} is not a number"))
    }

    pub async fn clan_points(&self) -> Result<u64> {
        let items = self.header_items().texts().await?;
        let text = items.first().context("popup header has no points value")?;
        parse_points(text)
    }

    pub async fn team_tournament(&self, row: usize) -> Result<String> {
        Ok(self.tournament_cell(row).text().await?)
    }

    pub async fn team_title(&self, row: usize) -> Result<String> {
        Ok(self.title_cell(row).text().await?)
    }

    pub async fn team_efficiency(&self, row: usize) -> Result<f64> {
        let text = self.efficiency_cell(row).text().await?;
        text.parse()
            .with_context(|| format!("efficiency text {text:?} is not a number"))
    }

    pub async fn team_points(&self, row: usize) -> Result<u64> {
        parse_points(&self.points_cell(row).text().await?)
    }

    /// Click "show more" until every reward row is loaded.
    ///
    /// The control reappears after each batch, so this keeps clicking while
    /// it is available, bounded by `timeout`. The control must be gone at
    /// the end or the expansion counts as failed.
    pub async fn expand_rewards(&self, timeout: Duration) -> Result<&Self> {
        info!("Expanding all popup rewards");
        let button = self.expand_button();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline && button.is_available().await? {
            button.click().await?;
        }
        if button.is_available().await? {
            return Err(Error::WaitTimeout {
                condition: "element still available",
                name: button.name().to_string(),
                selector: button.selector().raw().to_string(),
            }
            .into());
        }
        Ok(self)
    }

    /// Close the popup and wait for it to leave the page.
    pub async fn close(&self) -> Result<&Self> {
        self.close_button().click().await?;
        self.root().wait_until_hidden(false).await?;
        Ok(self)
    }
}

pub(crate) fn parse_points(text: &str) -> Result<u64> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    digits
        .parse()
        .with_context(|| format!("points text {text:?} is not a number"))
}

#[cfg(test)]
#[path = "clan_popup_test.rs"]
mod clan_popup_test;
