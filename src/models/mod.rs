// src/models/mod.rs

//! Domain models for the feed generator.

mod config;
mod exhibition;

pub use config::{
    Config, ExtractionConfig, FallbackConfig, FeedMetadata, LocatorConfig, LoggingConfig,
    SiteConfig,
};
pub use exhibition::ExhibitionRecord;
