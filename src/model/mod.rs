pub mod game;
pub mod player;

pub use game::{is_modern, GameRecord};
pub use player::{OutputTable, PlayerGameLine};
