//! Event handling and state transition logic for one reel.
//!
//! # Transitions
//!
//! | Event | Effect |
//! |---|---|
//! | `SetActive(true)` on a rising edge | request start; `Playing` once resolved |
//! | `SetActive(false)` on a falling edge | stop, rewind, `Paused` |
//! | `MediaSurfaceTap` | `Playing` → stop (keep position); `Paused` → start |
//! | `VolumeControlTap` | toggle mute, show indicator, re-arm hide timer |
//! | `IndicatorTimerFired` | hide indicator if the handle is still current |
//! | `StartResolved` / `StartRejected` | settle the current start ticket |
//! | `MediaEnded` | ignored when looping, otherwise pause and notify the host |
//!
//! Repeated `SetActive` values with no change are no-ops, so a host may send the
//! active flag on every render.

use super::actions::{Action, StartTicket, TimerHandle};
use super::modes::{IndicatorState, PlayState};
use super::state::ReelController;
use crate::domain::ReelFeedError;

/// Events delivered to a reel controller by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Current value of the externally owned active signal.
    SetActive(bool),
    /// Tap on the media surface.
    MediaSurfaceTap,
    /// Tap on the volume control.
    VolumeControlTap,
    /// The media backend started playback for `ticket`.
    StartResolved(StartTicket),
    /// The media backend refused to start playback for `ticket`.
    StartRejected {
        /// Ticket of the refused request.
        ticket: StartTicket,
        /// Backend-provided reason, kept for logging only.
        reason: String,
    },
    /// The indicator timer armed with this handle expired.
    IndicatorTimerFired(TimerHandle),
    /// The media reached the end of a stream.
    MediaEnded,
}

/// Processes an event, mutates the controller and returns the actions to run.
///
/// The boolean is `true` when the visible state changed and the reel should be
/// re-rendered. Playback start failures are absorbed here and never surface.
///
/// ```
/// use reelfeed::player::{handle_event, ControllerOptions, Event, ReelController};
/// use reelfeed::ReelRecord;
///
/// let (mut controller, _) =
///     ReelController::mount(ReelRecord::sample("a"), false, ControllerOptions::default());
/// let (render, _actions) = handle_event(&mut controller, &Event::VolumeControlTap);
/// assert!(render);
/// assert!(!controller.state().is_muted());
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(controller: &mut ReelController, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", url = %controller.reel.url, event_type = ?event).entered();

    match event {
        Event::SetActive(active) => {
            if *active == controller.active {
                return (false, vec![]);
            }
            controller.active = *active;

            let mut actions = vec![];
            if *active {
                tracing::debug!("activation edge, requesting playback");
                controller.request_start(&mut actions);
                (false, actions)
            } else {
                tracing::debug!("deactivation edge, stopping and rewinding");
                let was_playing = controller.state.is_playing();
                controller.halt(true, &mut actions);
                (was_playing, actions)
            }
        }
        Event::MediaSurfaceTap => {
            let mut actions = vec![];
            if controller.state.is_playing() || controller.pending_start.is_some() {
                tracing::debug!("media tap, pausing");
                controller.halt(false, &mut actions);
            } else {
                tracing::debug!("media tap, resuming");
                controller.state.play = PlayState::Playing;
                controller.request_start(&mut actions);
            }
            (true, actions)
        }
        Event::VolumeControlTap => {
            controller.state.mute = controller.state.mute.toggled();
            tracing::debug!(muted = controller.state.is_muted(), "volume toggled");

            let mut actions = vec![Action::ApplyMute {
                muted: controller.state.is_muted(),
            }];
            controller.show_indicator(&mut actions);
            (true, actions)
        }
        Event::IndicatorTimerFired(handle) => {
            if controller.pending_timer != Some(*handle) {
                tracing::debug!(handle = %handle, "stale indicator timer ignored");
                return (false, vec![]);
            }
            controller.pending_timer = None;

            if controller.state.indicator == IndicatorState::Shown {
                controller.state.indicator = IndicatorState::Hidden;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::StartResolved(ticket) => {
            if controller.pending_start != Some(*ticket) {
                tracing::debug!(ticket = %ticket, "stale start completion");
                // The media may have started after we asked it to stop.
                if controller.state.is_playing() || controller.pending_start.is_some() {
                    return (false, vec![]);
                }
                if controller.active {
                    return (false, vec![Action::StopPlayback]);
                }
                return (false, vec![Action::StopPlayback, Action::ResetPosition]);
            }
            controller.pending_start = None;

            let changed = !controller.state.is_playing();
            controller.state.play = PlayState::Playing;
            tracing::debug!(ticket = %ticket, "playback started");
            (changed, vec![])
        }
        Event::StartRejected { ticket, reason } => {
            if controller.pending_start != Some(*ticket) {
                tracing::debug!(ticket = %ticket, "stale start rejection");
                return (false, vec![]);
            }
            controller.pending_start = None;

            let error = ReelFeedError::PlaybackStartRejected(reason.clone());
            tracing::debug!(ticket = %ticket, error = %error, "playback start absorbed");

            let changed = controller.state.is_playing();
            controller.state.play = PlayState::Paused;
            (changed, vec![])
        }
        Event::MediaEnded => {
            if controller.options.looping {
                tracing::warn!("ended notification from looping media ignored");
                return (false, vec![]);
            }

            let changed = controller.state.is_playing();
            controller.pending_start = None;
            controller.state.play = PlayState::Paused;
            tracing::debug!("reel playback ended");
            (changed, vec![Action::NotifyReelEnd])
        }
    }
}
