//! Actions representing side effects requested by the playback controller.
//!
//! The controller never touches the media resource or the clock directly. Every
//! effect is returned as an [`Action`] for the host runtime to execute, in order.
//! Results of asynchronous effects (start completion, timer expiry, end of
//! stream) come back as [`Event`](super::Event)s.

use std::fmt;
use std::time::Duration;

/// Handle of an indicator auto-hide timer.
///
/// Unique within one controller instance. A fired handle that no longer
/// matches the controller's pending timer is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Correlates a playback start request with its completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartTicket(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

impl fmt::Display for StartTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "start#{}", self.0)
    }
}

/// Media resource a controller binds to on mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Media URL.
    pub url: String,
    /// Poster image shown while paused.
    pub poster: String,
    /// Whether the resource restarts at end of stream instead of ending.
    pub looping: bool,
}

/// Commands representing side effects to be executed by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Attaches the controller to its exclusively owned media resource.
    BindMedia(MediaSource),

    /// Starts or resumes playback from the current position.
    ///
    /// Fire-and-forget: the runtime answers later with
    /// [`Event::StartResolved`](super::Event::StartResolved) or
    /// [`Event::StartRejected`](super::Event::StartRejected) carrying the same ticket.
    StartPlayback {
        /// Ticket echoed back in the completion event.
        ticket: StartTicket,
    },

    /// Halts playback, keeping the current position.
    StopPlayback,

    /// Seeks the media back to its start.
    ResetPosition,

    /// Applies the mute state to the media resource.
    ApplyMute {
        /// Whether audio should be muted.
        muted: bool,
    },

    /// Schedules a single-shot indicator timer.
    ArmIndicatorTimer {
        /// Handle echoed back in [`Event::IndicatorTimerFired`](super::Event::IndicatorTimerFired).
        handle: TimerHandle,
        /// Delay until the timer fires.
        after: Duration,
    },

    /// Cancels a previously armed indicator timer.
    CancelIndicatorTimer {
        /// Handle of the timer to cancel.
        handle: TimerHandle,
    },

    /// Releases the media resource. Emitted once, on unmount.
    ReleaseMedia,

    /// The reel finished playing a non-looping stream.
    NotifyReelEnd,
}
