//! Feed document sinks.
//!
//! The generator hands a finished document to a [`FeedSink`]; where it ends
//! up is the sink's concern.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

pub use local::LocalFeedStorage;

/// Destination for serialized feed documents.
#[async_trait]
pub trait FeedSink: Send + Sync {
    /// Persist `document` under `file_name` as UTF-8.
    ///
    /// Returns a human-readable location of the written feed.
    async fn write_feed(&self, file_name: &str, document: &str) -> Result<String>;
}
