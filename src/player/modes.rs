//! State axes of the playback controller.
//!
//! The controller state is the product of three independent axes:
//!
//! - **Play**: [`PlayState::Paused`] or [`PlayState::Playing`] (initial: paused)
//! - **Mute**: [`MuteState::Muted`] or [`MuteState::Unmuted`] (initial: muted)
//! - **Indicator**: [`IndicatorState::Shown`] or [`IndicatorState::Hidden`] (initial: shown)
//!
//! Input is split into two addressable zones, see [`InputZone`].

use super::handler::Event;

/// Play axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// Media is stopped. Also the fallback after a rejected start.
    #[default]
    Paused,
    /// Media is playing.
    Playing,
}

/// Mute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MuteState {
    /// Audio is muted. Reels mount muted so autoplay is permitted.
    #[default]
    Muted,
    /// Audio is audible.
    Unmuted,
}

impl MuteState {
    /// Returns the opposite mute state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Muted => Self::Unmuted,
            Self::Unmuted => Self::Muted,
        }
    }

    /// Whether audio is muted.
    #[must_use]
    pub const fn is_muted(self) -> bool {
        matches!(self, Self::Muted)
    }
}

/// Visibility of the transient mute indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndicatorState {
    /// Indicator is on screen; an auto-hide timer is pending.
    #[default]
    Shown,
    /// Indicator has expired.
    Hidden,
}

/// Independently addressable input zones of a reel.
///
/// A tap lands in exactly one zone and produces exactly one event, so a tap on
/// the volume control can never be read as a tap on the media surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputZone {
    /// The video area. Toggles play/pause.
    MediaSurface,
    /// The volume button. Toggles mute.
    VolumeControl,
}

impl InputZone {
    /// The controller event a tap in this zone produces.
    #[must_use]
    pub const fn tap_event(self) -> Event {
        match self {
            Self::MediaSurface => Event::MediaSurfaceTap,
            Self::VolumeControl => Event::VolumeControlTap,
        }
    }
}
