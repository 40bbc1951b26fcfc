//! Normalization of the published minutes-played field
//!
//! Box scores report time on court as "MM:SS", but the same column also
//! carries placeholder text for players who did not appear ("Did Not
//! Play", "Did Not Dress", "Player Suspended") and, in re-read output
//! files, values that were already converted to a float.

use std::path::Path;

use crate::error::{Result, ScrapeError};

/// Convert one raw minutes value to a float of minutes plus an optional
/// note holding the original text when it was not a clock reading.
///
/// Already-numeric input passes through unchanged, so applying this twice
/// gives the same result as applying it once.
pub fn normalize(raw: &str) -> (f64, Option<String>) {
    let trimmed = raw.trim();

    // Previously-normalized value ("39.5") or a bare integer other than 0.
    // A bare "0" means zero recorded minutes and is handled as "0:0".
    if let Ok(v) = trimmed.parse::<f64>() {
        if trimmed != "0" {
            return (v, None);
        }
    }

    // Placeholder text (DNP and friends): keep the original as a note and
    // treat the minutes as zero.
    let first_numeric = trimmed
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);
    let note = if trimmed.is_empty() || first_numeric {
        None
    } else {
        Some(trimmed.to_string())
    };

    // First 5 chars cover "MM:SS"; anything past that is trailing garbage.
    let mut clock: String = trimmed.chars().take(5).collect();
    if clock.is_empty() || clock == "0" {
        clock = "0:0".to_string();
    }

    let minutes = parse_clock(&clock).unwrap_or(0.0);
    (minutes, note)
}

fn parse_clock(clock: &str) -> Option<f64> {
    let (mm, ss) = clock.split_once(':')?;
    let mm: f64 = mm.parse().ok()?;
    let ss: f64 = ss.parse().ok()?;
    Some(mm + ss / 60.0)
}

/// Re-normalize the MP column of an existing output CSV, rewriting the
/// PlayerNotes column alongside it. Mirrors scraping-time normalization
/// for files produced before the MP conversion existed.
pub fn clean_csv(input: &Path, output: &Path) -> Result<usize> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let mp_idx = headers.iter().position(|h| h == "MP").ok_or_else(|| {
        ScrapeError::ParseIntegrity(format!("No MP column in {}", input.display()))
    })?;
    let notes_idx = headers.iter().position(|h| h == "PlayerNotes");

    let mut writer = csv::Writer::from_path(output)?;
    let mut out_headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    if notes_idx.is_none() {
        out_headers.push("PlayerNotes".to_string());
    }
    writer.write_record(&out_headers)?;

    let mut count = 0;
    for record in reader.records() {
        let record = record?;
        let (mp, note) = normalize(record.get(mp_idx).unwrap_or(""));

        let mut fields: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        fields[mp_idx] = format_minutes(mp);
        // An already-numeric MP yields no note; any note recorded by an
        // earlier cleaning pass must survive the re-run.
        match (notes_idx, note) {
            (Some(i), Some(n)) => fields[i] = n,
            (Some(_), None) => {}
            (None, note) => fields.push(note.unwrap_or_default()),
        }
        writer.write_record(&fields)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Render minutes without trailing float noise: whole values print as
/// integers, fractional values keep their precision.
pub fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{}", minutes as i64)
    } else {
        format!("{}", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_clock_to_minutes() {
        assert_eq!(normalize("5:30"), (5.5, None));
        assert_eq!(normalize("39:45"), (39.75, None));
        assert_eq!(normalize("12:00"), (12.0, None));
    }

    #[test]
    fn test_bare_zero_is_zero_minutes() {
        // "0" means zero recorded time, not a malformed clock.
        assert_eq!(normalize("0"), (0.0, None));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(normalize(""), (0.0, None));
    }

    #[test]
    fn test_dnp_sets_note() {
        let (mp, note) = normalize("Did Not Play");
        assert_eq!(mp, 0.0);
        assert_eq!(note.as_deref(), Some("Did Not Play"));

        let (mp, note) = normalize("Player Suspended");
        assert_eq!(mp, 0.0);
        assert_eq!(note.as_deref(), Some("Player Suspended"));
    }

    #[test]
    fn test_already_numeric_is_idempotent() {
        let (first, _) = normalize("5:30");
        let (second, note) = normalize(&first.to_string());
        assert_eq!(first, second);
        assert_eq!(note, None);
    }

    #[test]
    fn test_trailing_garbage_truncated() {
        let (mp, note) = normalize("12:34abc");
        assert!((mp - (12.0 + 34.0 / 60.0)).abs() < 1e-9);
        assert_eq!(note, None);
    }

    #[test]
    fn test_malformed_clock_is_zero() {
        assert_eq!(normalize(":").0, 0.0);
        assert_eq!(normalize("4:").0, 0.0);
    }

    #[test]
    fn test_clean_csv_rewrites_mp_and_notes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("clean.csv");

        let mut f = std::fs::File::create(&input).unwrap();
        writeln!(f, "Player,MP,PTS").unwrap();
        writeln!(f, "Larry Bird,39:30,26").unwrap();
        writeln!(f, "Bench Guy,Did Not Play,0").unwrap();
        drop(f);

        let n = clean_csv(&input, &output).unwrap();
        assert_eq!(n, 2);

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Player,MP,PTS,PlayerNotes");
        assert_eq!(lines.next().unwrap(), "Larry Bird,39.5,26,");
        assert_eq!(lines.next().unwrap(), "Bench Guy,0,0,Did Not Play");
    }

    #[test]
    fn test_clean_csv_twice_preserves_notes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let once = dir.path().join("once.csv");
        let twice = dir.path().join("twice.csv");

        let mut f = std::fs::File::create(&input).unwrap();
        writeln!(f, "Player,MP,PTS").unwrap();
        writeln!(f, "Larry Bird,39:30,26").unwrap();
        writeln!(f, "Bench Guy,Did Not Play,0").unwrap();
        drop(f);

        clean_csv(&input, &once).unwrap();
        clean_csv(&once, &twice).unwrap();

        let first = std::fs::read_to_string(&once).unwrap();
        let second = std::fs::read_to_string(&twice).unwrap();
        assert_eq!(first, second);
        assert!(second.contains("Bench Guy,0,0,Did Not Play"));
    }

    #[test]
    fn test_clean_csv_requires_mp_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        std::fs::write(&input, "Player,PTS\nLarry Bird,26\n").unwrap();
        assert!(clean_csv(&input, &dir.path().join("out.csv")).is_err());
    }
}
