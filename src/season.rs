//! Pipeline orchestration: schedules, box scores, and the final CSV
//!
//! Failures are contained per unit of work. A month page with no games is
//! a routine skip; a failed box score drops that one game from the output
//! with its context logged for manual follow-up.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};

use crate::error::{Result, ScrapeError};
use crate::model::{GameRecord, OutputTable};
use crate::schedule::MonthPage;
use crate::{boxscore, net, output, schedule};

/// Run configuration, threaded explicitly through the pipeline.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// First season of the range, named by its ending calendar year.
    pub start_year: u16,
    /// Last season of the range, inclusive.
    pub end_year: u16,
    pub output_dir: PathBuf,
    /// Optional fixed pause between box-score requests.
    pub delay: Option<Duration>,
}

impl ScrapeConfig {
    pub fn new(start_year: u16, end_year: u16) -> Self {
        Self {
            start_year,
            end_year,
            output_dir: PathBuf::from("Output"),
            delay: None,
        }
    }
}

/// Scrape every game of every season in the configured range into one
/// CSV file. Returns the path of the written file.
pub fn scrape_seasons(config: &ScrapeConfig) -> Result<PathBuf> {
    let client = net::create_client()?;

    let games = scrape_schedules(&client, config.start_year, config.end_year)?;
    info!(
        "Found {} games across seasons {}-{}",
        games.len(),
        config.start_year,
        config.end_year
    );

    let table = scrape_box_scores(&client, &games, config.delay);

    let path = output::output_path(&config.output_dir, config.start_year, config.end_year);
    output::write_csv(&table, &path)?;
    info!("Wrote {} player lines to {}", table.len(), path.display());
    Ok(path)
}

/// Collect game records from every monthly schedule page in the range.
/// Months without a schedule table are skipped quietly; other failures
/// are logged with the failing URL and the month is skipped.
pub fn scrape_schedules(
    client: &reqwest::blocking::Client,
    start_year: u16,
    end_year: u16,
) -> Result<Vec<GameRecord>> {
    let mut games = Vec::new();
    for page in schedule::season_urls(start_year, end_year) {
        info!("Scraping schedule page {}", page.url);
        collect_month(&mut games, &page, schedule::fetch_month(client, &page));
    }
    Ok(games)
}

/// Fold one month's fetch result into the game list. A missing schedule
/// table means no games that month; any other failure is logged with the
/// failing URL and the month contributes nothing.
fn collect_month(games: &mut Vec<GameRecord>, page: &MonthPage, result: Result<Vec<GameRecord>>) {
    match result {
        Ok(month_games) => {
            info!(
                "Found {} games for {}-{:02}",
                month_games.len(),
                page.year,
                page.month
            );
            games.extend(month_games);
        }
        Err(ScrapeError::TableNotFound { url }) => {
            // No games this month (common for summer months).
            info!("No schedule table at {}, skipping month", url);
        }
        Err(e) => {
            warn!("FAILED {}: {}", page.url, e);
        }
    }
}

/// Scrape the box score of every game, pausing between requests when a
/// politeness delay is configured. A game whose page cannot be fetched
/// or parsed is logged and omitted.
pub fn scrape_box_scores(
    client: &reqwest::blocking::Client,
    games: &[GameRecord],
    delay: Option<Duration>,
) -> OutputTable {
    let mut table = OutputTable::new();
    for (i, game) in games.iter().enumerate() {
        if i > 0 {
            if let Some(pause) = delay {
                thread::sleep(pause);
            }
        }
        info!("Scraping data for game {}", game.describe());
        match boxscore::fetch_game(client, game) {
            Ok(lines) => table.extend(lines),
            Err(e) => {
                error!(
                    "Skipping game {} ({}): {}",
                    game.describe(),
                    game.box_score_url,
                    e
                );
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month_page() -> MonthPage {
        MonthPage {
            year: 1989,
            month: 7,
            url: "https://www.basketball-reference.com/leagues/NBA_1989_games-july.html"
                .to_string(),
        }
    }

    fn game() -> GameRecord {
        GameRecord {
            date: "Fri, Nov 3, 1989".to_string(),
            away_team: "Boston Celtics".to_string(),
            away_points: "111".to_string(),
            home_team: "Milwaukee Bucks".to_string(),
            home_points: "106".to_string(),
            overtime: String::new(),
            box_score_url: "https://www.basketball-reference.com/boxscores/198911030MIL.html"
                .to_string(),
        }
    }

    #[test]
    fn test_empty_month_contributes_zero_rows() {
        let page = month_page();
        let mut games = vec![game()];
        collect_month(
            &mut games,
            &page,
            Err(ScrapeError::TableNotFound {
                url: page.url.clone(),
            }),
        );
        assert_eq!(games.len(), 1);
    }

    #[test]
    fn test_failed_month_skipped_without_aborting() {
        let mut games = Vec::new();
        collect_month(
            &mut games,
            &month_page(),
            Err(ScrapeError::ParseIntegrity("layout drift".to_string())),
        );
        assert!(games.is_empty());
    }

    #[test]
    fn test_parsed_month_extends_game_list() {
        let mut games = Vec::new();
        collect_month(&mut games, &month_page(), Ok(vec![game(), game()]));
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn test_default_config() {
        let config = ScrapeConfig::new(1989, 1989);
        assert_eq!(config.output_dir, PathBuf::from("Output"));
        assert!(config.delay.is_none());
    }

    #[test]
    #[ignore] // Requires network access; scrapes a full season
    fn test_scrape_single_season_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScrapeConfig {
            start_year: 1989,
            end_year: 1989,
            output_dir: dir.path().to_path_buf(),
            delay: Some(Duration::from_secs(5)),
        };

        let path = scrape_seasons(&config).unwrap();
        assert_eq!(path.file_name().unwrap(), "1989.csv");

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        for column in ["Player", "MP", "Team", "Opposing Team", "Home", "Date", "Game Link", "OT"] {
            assert!(header.contains(column), "missing column {}", column);
        }
        // Every line after the header is one player appearance.
        assert!(text.lines().count() > 1);
    }
}
