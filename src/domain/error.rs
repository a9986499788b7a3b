//! Error types for the reel feed.
//!
//! This module defines the centralized error type [`ReelFeedError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with `thiserror`.
//!
//! Note that [`ReelFeedError::PlaybackStartRejected`] never leaves the playback
//! controller: it is constructed for logging and then absorbed.

use thiserror::Error;

/// The main error type for reel feed operations.
#[derive(Debug, Error)]
pub enum ReelFeedError {
    /// The media backend refused to start playback.
    ///
    /// Typically an autoplay policy rejection or a transient decode failure. The
    /// controller logs this and stays paused; it is never propagated to the host.
    #[error("Playback start rejected: {0}")]
    PlaybackStartRejected(String),

    /// A media backend command could not be carried out.
    ///
    /// Raised by backends, for example when addressing a resource that was
    /// never bound or was already released. The runtime logs and continues.
    #[error("Media error: {0}")]
    Media(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A reel list or theme file could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A feed operation referenced a reel index past the end of the feed.
    #[error("Reel index {index} out of range (feed has {len} reels)")]
    ReelOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of reels in the feed.
        len: usize,
    },

    /// A feed was constructed without any reels.
    #[error("Feed has no reels")]
    EmptyFeed,
}

impl From<toml::de::Error> for ReelFeedError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for ReelFeedError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// A specialized `Result` type for reel feed operations.
pub type Result<T> = std::result::Result<T, ReelFeedError>;
