//! Feed host coordinating one controller per rendered reel.
//!
//! The feed owns the ordered reel sequence and the single active index. It is
//! the only place that drives the active signal of each controller, which keeps
//! exactly one reel playing at a time.
//!
//! # Modules
//!
//! - [`events`]: Feed events, tagged actions, controller identities
//! - [`host`]: The [`Feed`] itself

pub mod events;
pub mod host;

pub use events::{ControllerId, FeedAction, FeedEvent};
pub use host::{Feed, FeedOptions};
