//! Feed-level events and actions.
//!
//! The feed wraps controller [`Event`]s and [`Action`]s with the identity of the
//! controller they belong to, so a single runtime can drive every mounted reel.

use crate::player::{Action, Event, InputZone};
use std::fmt;

/// Identity of one mounted controller instance.
///
/// Never reused: a reel that is unmounted and mounted again gets a fresh id, so
/// late notifications addressed to the old instance cannot reach the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControllerId(pub u64);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller#{}", self.0)
    }
}

/// Events accepted by the feed host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// Makes the reel at this index the active one.
    Activate(usize),
    /// Moves to the next reel. No-op on the last reel.
    Next,
    /// Moves to the previous reel. No-op on the first reel.
    Previous,
    /// A tap on one input zone of the reel at `reel`. Media-surface taps only
    /// reach the active reel.
    Tap {
        /// Index of the tapped reel.
        reel: usize,
        /// Zone that received the tap.
        zone: InputZone,
    },
    /// An asynchronous notification addressed to a specific controller.
    Player {
        /// Target controller.
        controller: ControllerId,
        /// Notification payload.
        event: Event,
    },
}

/// A controller action tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedAction {
    /// Controller that emitted the action.
    pub controller: ControllerId,
    /// Feed index of that controller's reel.
    pub reel: usize,
    /// The action itself.
    pub action: Action,
}
