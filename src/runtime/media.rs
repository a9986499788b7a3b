//! Media playback capability consumed by the runtime.
//!
//! This module defines the [`MediaBackend`] trait that abstracts over the
//! platform player (a decoder pipeline, a web media element, a test double).
//! Each mounted controller owns exactly one media resource, addressed by its
//! [`ControllerId`].
//!
//! Start is asynchronous: [`MediaBackend::start`] returns immediately and its
//! outcome is reported later through [`MediaBackend::drain_notifications`] as an
//! [`Event::StartResolved`] or [`Event::StartRejected`]. End of stream is
//! reported the same way as [`Event::MediaEnded`].

use crate::domain::Result;
use crate::feed::ControllerId;
use crate::player::{Event, MediaSource, StartTicket};
use std::time::Duration;

/// Abstraction over the platform media player.
///
/// # Errors
///
/// Every command returns an error when `id` has no bound resource. The runtime
/// logs such errors and carries on.
pub trait MediaBackend {
    /// Creates the media resource for `id`.
    fn bind(&mut self, id: ControllerId, source: &MediaSource) -> Result<()>;

    /// Starts or resumes playback. The outcome is reported asynchronously.
    fn start(&mut self, id: ControllerId, ticket: StartTicket) -> Result<()>;

    /// Halts playback, keeping the position.
    fn stop(&mut self, id: ControllerId) -> Result<()>;

    /// Seeks to the start of the media.
    fn reset_position(&mut self, id: ControllerId) -> Result<()>;

    fn set_muted(&mut self, id: ControllerId, muted: bool) -> Result<()>;

    /// Destroys the media resource for `id`.
    fn release(&mut self, id: ControllerId) -> Result<()>;

    /// Whether the resource is paused. Unknown ids report `true`.
    fn is_paused(&self, id: ControllerId) -> bool;

    /// Current playback position, if `id` is bound.
    fn position(&self, id: ControllerId) -> Option<Duration>;

    /// Lets `elapsed` of wall time pass for every playing resource.
    fn advance(&mut self, elapsed: Duration);

    /// Takes all notifications produced since the last call, in order.
    fn drain_notifications(&mut self) -> Vec<(ControllerId, Event)>;
}
