//! CLI command implementations.

pub mod scrape;
pub mod show;
pub mod track;

pub use scrape::ScrapeCommand;
pub use show::ShowCommand;
pub use track::TrackCommand;
