//! Pipeline entry points for crawler operations.
//!
//! - `run_scrape`: Scrape every entity kind and persist a snapshot
//! - `run_validate`: Check configuration before a run

pub mod scrape;
pub mod validate;

pub use scrape::run_scrape;
pub use validate::run_validate;
