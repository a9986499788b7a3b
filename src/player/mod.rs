//! Reel playback controller.
//!
//! One [`ReelController`] owns the play, mute and indicator state of a single
//! reel. It follows a unidirectional data flow:
//!
//! ```text
//! Host input → Event → handle_event → State mutation → Actions → Runtime
//!                          ↑                                        ↓
//!                          └──── start completion, timer, end ──────┘
//! ```
//!
//! The controller is pure: it never blocks, never calls the media backend and
//! never reads a clock. Every effect is an [`Action`], and every asynchronous
//! result comes back as an [`Event`].
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands and correlation handles
//! - [`handler`]: Event processing and transition rules
//! - [`modes`]: State axes and input zones
//! - [`state`]: Controller state container and lifecycle

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::{Action, MediaSource, StartTicket, TimerHandle};
pub use handler::{handle_event, Event};
pub use modes::{IndicatorState, InputZone, MuteState, PlayState};
pub use state::{ControllerOptions, PlaybackState, ReelController, DEFAULT_INDICATOR_DELAY};
