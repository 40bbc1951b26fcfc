pub mod boxscore;
pub mod error;
pub mod minutes;
pub mod model;
pub mod net;
pub mod output;
pub mod schedule;
pub mod season;

pub use error::{Result, ScrapeError};
pub use model::*;
