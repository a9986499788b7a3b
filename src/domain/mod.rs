//! Domain layer for the reel feed.
//!
//! Core types independent of any media backend or rendering surface.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`reel`]: Reel record model and reel list loading

pub mod error;
pub mod reel;

pub use error::{ReelFeedError, Result};
pub use reel::{load_reels, ReelRecord, CURRENCY_SIGN};
