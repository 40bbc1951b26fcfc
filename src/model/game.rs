//! One scheduled game as listed on a monthly schedule page

use crate::error::{Result, ScrapeError};

/// Seasons ending after 2000 list a game start time on the schedule page;
/// earlier seasons do not. The extra column is dropped during parsing so
/// the downstream schema is uniform.
pub fn is_modern(season: u16) -> bool {
    season > 2000
}

/// One played game from a schedule page. Scores are kept as published
/// strings; the date keeps the source format (e.g. "Fri, Nov 3, 1989").
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub date: String,
    pub away_team: String,
    pub away_points: String,
    pub home_team: String,
    pub home_points: String,
    /// Published overtime marker: "", "OT", "2OT", ...
    pub overtime: String,
    /// Absolute URL to the game's box-score page.
    pub box_score_url: String,
}

impl GameRecord {
    /// Validate that the box-score locator is a well-formed absolute URL.
    /// A record without one is unusable downstream.
    pub fn validate(&self) -> Result<()> {
        if self.box_score_url.is_empty() {
            return Err(ScrapeError::ParseIntegrity(format!(
                "Game {} at {} on {} has no box score link",
                self.away_team, self.home_team, self.date
            )));
        }
        url::Url::parse(&self.box_score_url)?;
        Ok(())
    }

    /// Short human-readable description for log and error messages.
    pub fn describe(&self) -> String {
        format!(
            "{} at {} on {}",
            self.away_team, self.home_team, self.date
        )
    }
}
