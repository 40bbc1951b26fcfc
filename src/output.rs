//! CSV output for the final per-player, per-game table

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::minutes;
use crate::model::OutputTable;

/// Output file name for a season range: `{year}.csv` for a single season,
/// `{start}_{end}.csv` for a range.
pub fn output_path(dir: &Path, start_year: u16, end_year: u16) -> PathBuf {
    if start_year == end_year {
        dir.join(format!("{}.csv", start_year))
    } else {
        dir.join(format!("{}_{}.csv", start_year, end_year))
    }
}

/// Write the table as CSV to a file, one row per player-game line.
pub fn write_csv(table: &OutputTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_csv_to(table, std::fs::File::create(path)?)
}

/// Write the table as CSV. The stat columns are the union across all rows
/// (games from different eras publish slightly different columns); a row
/// missing a column gets "0".
pub fn write_csv_to<W: std::io::Write>(table: &OutputTable, out: W) -> Result<()> {
    let stat_columns = table.stat_columns();

    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = vec!["Player", "MP"];
    header.extend(stat_columns.iter().map(String::as_str));
    header.extend([
        "Team",
        "Opposing Team",
        "Home",
        "Date",
        "Game Link",
        "OT",
        "PlayerNotes",
    ]);
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(row.player.clone());
        record.push(minutes::format_minutes(row.minutes));
        for col in &stat_columns {
            record.push(row.stat(col).unwrap_or("0").to_string());
        }
        record.push(row.team.clone());
        record.push(row.opponent.clone());
        record.push(if row.home { "Y" } else { "N" }.to_string());
        record.push(row.date.clone());
        record.push(row.game_link.clone());
        record.push(row.overtime.clone());
        record.push(row.player_note.clone().unwrap_or_default());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlayerGameLine;

    fn line(player: &str, home: bool, stats: &[(&str, &str)]) -> PlayerGameLine {
        PlayerGameLine {
            player: player.to_string(),
            team: "Boston Celtics".to_string(),
            opponent: "Milwaukee Bucks".to_string(),
            home,
            minutes: 39.5,
            player_note: None,
            date: "Fri, Nov 3, 1989".to_string(),
            overtime: String::new(),
            game_link: "https://www.basketball-reference.com/boxscores/198911030MIL.html"
                .to_string(),
            stats: stats
                .iter()
                .map(|(c, v)| (c.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_single_season_file_name() {
        assert_eq!(
            output_path(Path::new("Output"), 1989, 1989),
            PathBuf::from("Output/1989.csv")
        );
    }

    #[test]
    fn test_multi_season_file_name() {
        assert_eq!(
            output_path(Path::new("Output"), 1989, 1992),
            PathBuf::from("Output/1989_1992.csv")
        );
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut table = OutputTable::new();
        table.extend(vec![
            line("Larry Bird", false, &[("FG", "10"), ("PTS", "26")]),
            line("Jay Humphries", true, &[("FG", "7"), ("3P", "1")]),
        ]);

        write_csv(&table, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Player,MP,FG,PTS,3P,Team,Opposing Team,Home,Date,Game Link,OT,PlayerNotes"
        );
        let bird = lines.next().unwrap();
        assert!(bird.starts_with("Larry Bird,39.5,10,26,0,"));
        assert!(bird.contains(",N,"));
        let humphries = lines.next().unwrap();
        // PTS missing from the second row's stats: zero-filled.
        assert!(humphries.starts_with("Jay Humphries,39.5,7,0,1,"));
        assert!(humphries.contains(",Y,"));
    }

    #[test]
    fn test_write_csv_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("1989.csv");
        write_csv(&OutputTable::new(), &path).unwrap();
        assert!(path.exists());
    }
}
