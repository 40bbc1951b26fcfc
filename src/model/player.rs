//! Per-player, per-game statistical lines and the final output table

/// One player's line within one game, tagged with the game context it was
/// scraped from. Stat columns beyond the player name and minutes vary by
/// era (older box scores lack 3P and rebound splits), so they travel as
/// (column, value) pairs in page order rather than fixed fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerGameLine {
    pub player: String,
    pub team: String,
    pub opponent: String,
    pub home: bool,
    /// Minutes played, normalized from the published "MM:SS" string.
    pub minutes: f64,
    /// Original minutes-field text when it was a non-clock placeholder
    /// such as "Did Not Play"; None for a standard clock reading.
    pub player_note: Option<String>,
    pub date: String,
    pub overtime: String,
    pub game_link: String,
    pub stats: Vec<(String, String)>,
}

impl PlayerGameLine {
    pub fn stat(&self, column: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered concatenation of every player line across all scraped games.
#[derive(Debug, Default)]
pub struct OutputTable {
    pub rows: Vec<PlayerGameLine>,
}

impl OutputTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn extend(&mut self, rows: Vec<PlayerGameLine>) {
        self.rows.extend(rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of stat columns across all rows, in first-seen order. Games
    /// from different eras publish slightly different columns; the CSV
    /// header has to cover them all.
    pub fn stat_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for (col, _) in &row.stats {
                if !columns.iter().any(|c| c == col) {
                    columns.push(col.clone());
                }
            }
        }
        columns
    }
}
