//! Pipeline entry points.
//!
//! - `run_generator`: Fetch the listing, extract exhibitions, write the feed

pub mod generate;

pub use generate::{GenerationReport, run_generator};
