use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use nba_scrape::model::GameRecord;
use nba_scrape::{boxscore, minutes, net, output, season};

#[derive(Parser)]
#[command(name = "nba-scrape")]
#[command(about = "Scrape NBA schedules and box scores into per-player CSV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape all games for a season range into one CSV file
    Scrape {
        /// First season of the range, named by its ending year (1990 = the 1989-90 season)
        start_year: u16,

        /// Last season of the range; defaults to the start year
        end_year: Option<u16>,

        /// Directory for the output file
        #[arg(short, long, default_value = "Output")]
        output_dir: PathBuf,

        /// Pause this many seconds between box-score requests
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Scrape only the schedule stage for a season and print the games
    Schedule {
        /// Season, named by its ending year
        year: u16,
    },

    /// Scrape a single game's box score from its page URL
    Game {
        /// Box-score page URL
        url: String,

        /// Game date as shown on the schedule page
        #[arg(long)]
        date: String,

        /// Home team name
        #[arg(long)]
        home: String,

        /// Away team name
        #[arg(long)]
        away: String,

        /// Overtime marker ("OT", "2OT", ...), empty for regulation
        #[arg(long, default_value = "")]
        ot: String,
    },

    /// Re-normalize the MP column of an existing output CSV
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            start_year,
            end_year,
            output_dir,
            delay,
        } => {
            scrape(start_year, end_year.unwrap_or(start_year), output_dir, delay)?;
        }
        Commands::Schedule { year } => {
            schedule(year)?;
        }
        Commands::Game {
            url,
            date,
            home,
            away,
            ot,
        } => {
            game(url, date, home, away, ot)?;
        }
        Commands::Clean { input, output } => {
            let rows = minutes::clean_csv(&input, &output)
                .context("Failed to clean minutes column")?;
            println!("Cleaned {} rows into {}", rows, output.display());
        }
    }

    Ok(())
}

fn scrape(
    start_year: u16,
    end_year: u16,
    output_dir: PathBuf,
    delay: Option<u64>,
) -> Result<()> {
    anyhow::ensure!(
        start_year <= end_year,
        "Start year {} is after end year {}",
        start_year,
        end_year
    );

    let config = season::ScrapeConfig {
        start_year,
        end_year,
        output_dir,
        delay: delay.map(Duration::from_secs),
    };

    println!(
        "Scraping seasons {}-{} to {}",
        start_year,
        end_year,
        config.output_dir.display()
    );
    let started = Instant::now();

    let path = season::scrape_seasons(&config).context("Scrape failed")?;

    println!("Wrote {}", path.display());
    println!("Scrape completed in {:.1?}", started.elapsed());
    Ok(())
}

fn schedule(year: u16) -> Result<()> {
    let client = net::create_client().context("Failed to create HTTP client")?;
    let games = season::scrape_schedules(&client, year, year)?;

    println!("Found {} games for the {} season", games.len(), year);
    for game in &games {
        println!(
            "{}: {} {} at {} {} {}",
            game.date,
            game.away_team,
            game.away_points,
            game.home_team,
            game.home_points,
            game.overtime
        );
    }
    Ok(())
}

fn game(url: String, date: String, home: String, away: String, ot: String) -> Result<()> {
    let record = GameRecord {
        date,
        away_team: away,
        away_points: String::new(),
        home_team: home,
        home_points: String::new(),
        overtime: ot,
        box_score_url: url,
    };
    record
        .validate()
        .context("Box score URL must be absolute")?;

    let client = net::create_client().context("Failed to create HTTP client")?;
    let lines = boxscore::fetch_game(&client, &record)
        .with_context(|| format!("Failed to scrape {}", record.describe()))?;

    println!("Found {} player lines", lines.len());
    let mut table = nba_scrape::OutputTable::new();
    table.extend(lines);
    output::write_csv_to(&table, std::io::stdout())?;
    Ok(())
}
