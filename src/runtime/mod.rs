//! Host runtime executing controller actions.
//!
//! The controllers only describe effects. This module carries them out against
//! a media backend and a virtual clock, and routes the asynchronous results
//! back to the feed.
//!
//! # Modules
//!
//! - `media`: [`MediaBackend`] capability trait
//! - `simulated`: In-memory backend with autoplay policy and call log
//! - `timers`: Single-shot timer queue on a virtual clock
//! - `executor`: The [`Runtime`] event loop

pub mod executor;
pub mod media;
pub mod simulated;
pub mod timers;

pub use executor::Runtime;
pub use media::MediaBackend;
pub use simulated::{AutoplayPolicy, MediaCall, SimulatedMedia};
pub use timers::TimerQueue;
