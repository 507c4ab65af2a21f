pub mod fixtures;
pub mod format;
pub mod odds_feed;
pub mod persist;
pub mod search;
pub mod state;
pub mod stats;
pub mod theme;
