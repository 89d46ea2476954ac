//! Terminal front end: an interactive player and lint/dump reports

pub mod logger;
pub mod play;
pub mod report;
