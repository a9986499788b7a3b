//! Playback controller state and lifecycle.
//!
//! [`ReelController`] is the single owner of one reel's [`PlaybackState`], its
//! pending indicator timer and its outstanding start request. Hosts create it
//! with [`ReelController::mount`], feed it events through
//! [`handle_event`](super::handle_event) and tear it down with
//! [`ReelController::unmount`]. None of its fields are writable from outside
//! this module tree.

use super::actions::{Action, MediaSource, StartTicket, TimerHandle};
use super::modes::{IndicatorState, MuteState, PlayState};
use crate::domain::ReelRecord;
use crate::ui::viewmodel::{ActionButton, ButtonKind, Labels, ReelViewModel, VolumeIcon};
use std::time::Duration;

/// Default delay before the mute indicator hides itself.
pub const DEFAULT_INDICATOR_DELAY: Duration = Duration::from_millis(3000);

/// The three UI flags owned by one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub(super) play: PlayState,
    pub(super) mute: MuteState,
    pub(super) indicator: IndicatorState,
}

impl PlaybackState {
    /// Play axis.
    #[must_use]
    pub const fn play(&self) -> PlayState {
        self.play
    }

    /// Mute axis.
    #[must_use]
    pub const fn mute(&self) -> MuteState {
        self.mute
    }

    /// Indicator axis.
    #[must_use]
    pub const fn indicator(&self) -> IndicatorState {
        self.indicator
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.play, PlayState::Playing)
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.mute.is_muted()
    }

    #[must_use]
    pub const fn shows_mute_indicator(&self) -> bool {
        matches!(self.indicator, IndicatorState::Shown)
    }
}

/// Per-instance options supplied by the host at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Marks the first reel of the feed. Only affects the scroll hint overlay.
    pub is_first: bool,
    /// Whether the media restarts at end of stream. When set, end-of-stream
    /// notifications are ignored and [`Action::NotifyReelEnd`] is never emitted.
    pub looping: bool,
    /// Lifetime of the mute indicator after each entry into the shown state.
    pub indicator_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            is_first: false,
            looping: true,
            indicator_delay: DEFAULT_INDICATOR_DELAY,
        }
    }
}

/// Playback controller for a single reel.
#[derive(Debug)]
pub struct ReelController {
    pub(super) reel: ReelRecord,
    pub(super) options: ControllerOptions,
    pub(super) state: PlaybackState,
    /// Last observed value of the active signal, used for edge detection.
    pub(super) active: bool,
    /// At most one armed indicator timer.
    pub(super) pending_timer: Option<TimerHandle>,
    /// Newest start request still awaiting completion.
    pub(super) pending_start: Option<StartTicket>,
    next_token: u64,
}

impl ReelController {
    /// Creates a controller for `reel` and returns the actions that bind it.
    ///
    /// State starts as paused, muted, indicator shown. The returned actions bind
    /// the media, apply the initial mute, arm the indicator timer and then
    /// either request a start (`is_active`) or stop and rewind the media.
    ///
    /// ```
    /// use reelfeed::player::{Action, ControllerOptions, ReelController};
    /// use reelfeed::ReelRecord;
    ///
    /// let (controller, actions) =
    ///     ReelController::mount(ReelRecord::sample("a"), false, ControllerOptions::default());
    /// assert!(!controller.state().is_playing());
    /// assert!(controller.state().is_muted());
    /// assert!(actions.contains(&Action::ResetPosition));
    /// ```
    #[must_use]
    pub fn mount(reel: ReelRecord, is_active: bool, options: ControllerOptions) -> (Self, Vec<Action>) {
        let mut controller = Self {
            reel,
            options,
            state: PlaybackState::default(),
            active: false,
            pending_timer: None,
            pending_start: None,
            next_token: 0,
        };

        let mut actions = vec![
            Action::BindMedia(MediaSource {
                url: controller.reel.url.clone(),
                poster: controller.reel.thumbnail.clone(),
                looping: controller.options.looping,
            }),
            Action::ApplyMute {
                muted: controller.state.is_muted(),
            },
        ];
        controller.show_indicator(&mut actions);

        if is_active {
            controller.active = true;
            controller.request_start(&mut actions);
        } else {
            controller.halt(true, &mut actions);
        }

        tracing::debug!(
            url = %controller.reel.url,
            is_active,
            is_first = controller.options.is_first,
            "reel controller mounted"
        );

        (controller, actions)
    }

    /// Tears the controller down.
    ///
    /// Cancels the pending indicator timer, stops and releases the media. The
    /// controller is consumed, so no event can reach it afterwards.
    #[must_use]
    pub fn unmount(mut self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(3);
        if let Some(handle) = self.pending_timer.take() {
            actions.push(Action::CancelIndicatorTimer { handle });
        }
        actions.push(Action::StopPlayback);
        actions.push(Action::ReleaseMedia);

        tracing::debug!(url = %self.reel.url, "reel controller unmounted");
        actions
    }

    /// The reel this controller plays.
    #[must_use]
    pub const fn reel(&self) -> &ReelRecord {
        &self.reel
    }

    /// Current playback state snapshot.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Last observed value of the active signal.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.options.is_first
    }

    /// Handle of the armed indicator timer, if any.
    #[must_use]
    pub const fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending_timer
    }

    /// Ticket of the outstanding start request, if any.
    #[must_use]
    pub const fn pending_start(&self) -> Option<StartTicket> {
        self.pending_start
    }

    #[must_use]
    pub const fn options(&self) -> &ControllerOptions {
        &self.options
    }

    fn next_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Issues a new start ticket, superseding any outstanding one.
    pub(super) fn request_start(&mut self, actions: &mut Vec<Action>) {
        let ticket = StartTicket(self.next_token());
        self.pending_start = Some(ticket);
        actions.push(Action::StartPlayback { ticket });
    }

    /// Stops playback and drops any outstanding start request.
    pub(super) fn halt(&mut self, reset_position: bool, actions: &mut Vec<Action>) {
        self.pending_start = None;
        self.state.play = PlayState::Paused;
        actions.push(Action::StopPlayback);
        if reset_position {
            actions.push(Action::ResetPosition);
        }
    }

    /// Enters the shown indicator state and re-arms the single auto-hide timer.
    pub(super) fn show_indicator(&mut self, actions: &mut Vec<Action>) {
        if let Some(handle) = self.pending_timer.take() {
            actions.push(Action::CancelIndicatorTimer { handle });
        }
        let handle = TimerHandle(self.next_token());
        self.pending_timer = Some(handle);
        self.state.indicator = IndicatorState::Shown;
        actions.push(Action::ArmIndicatorTimer {
            handle,
            after: self.options.indicator_delay,
        });
    }

    /// Computes the overlay view model for this reel.
    #[must_use]
    pub fn compute_viewmodel(&self, labels: &Labels) -> ReelViewModel {
        let muted = self.state.is_muted();

        let mute_indicator = self.state.shows_mute_indicator().then(|| {
            if muted {
                labels.muted_indicator.clone()
            } else {
                labels.unmuted_indicator.clone()
            }
        });

        let scroll_hint =
            (self.options.is_first && self.active).then(|| labels.scroll_hint.clone());

        ReelViewModel {
            username: self.reel.username.clone(),
            seller_label: labels.seller.clone(),
            avatar: self.reel.avatar.clone(),
            title: self.reel.title.clone(),
            price: self.reel.price_text(),
            poster: (!self.state.is_playing()).then(|| self.reel.thumbnail.clone()),
            volume_icon: if muted { VolumeIcon::Muted } else { VolumeIcon::Unmuted },
            mute_indicator,
            scroll_hint,
            buttons: vec![
                ActionButton {
                    kind: ButtonKind::Like,
                    caption: self.reel.likes.to_string(),
                },
                ActionButton {
                    kind: ButtonKind::Comment,
                    caption: self.reel.comments.to_string(),
                },
                ActionButton {
                    kind: ButtonKind::Share,
                    caption: labels.share.clone(),
                },
                ActionButton {
                    kind: ButtonKind::Buy,
                    caption: labels.buy.clone(),
                },
            ],
        }
    }
}
