//! In-memory media backend.
//!
//! [`SimulatedMedia`] behaves like a browser media element without decoding
//! anything: playing resources advance their position with the virtual clock,
//! looping resources wrap, non-looping resources pause and report end of stream.
//! Starting an ended resource plays it again from the beginning.
//! Start outcomes follow an [`AutoplayPolicy`]. Every command is recorded in a
//! call log so hosts and tests can inspect what the controllers asked for.

use super::media::MediaBackend;
use crate::domain::{ReelFeedError, Result};
use crate::feed::ControllerId;
use crate::player::{Event, MediaSource, StartTicket};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

/// Length assumed for sources without an explicit duration.
const DEFAULT_MEDIA_LENGTH: Duration = Duration::from_secs(15);

/// Decides whether a start request is honoured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoplayPolicy {
    /// Reject starts while the resource is unmuted.
    pub require_muted: bool,
    /// Sources whose starts are always rejected.
    pub blocked_sources: HashSet<String>,
}

/// A recorded backend command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCall {
    Bind(ControllerId),
    Start(ControllerId, StartTicket),
    Stop(ControllerId),
    ResetPosition(ControllerId),
    SetMuted(ControllerId, bool),
    Release(ControllerId),
}

#[derive(Debug, Clone)]
struct SimPlayer {
    source: MediaSource,
    paused: bool,
    muted: bool,
    position: Duration,
    length: Duration,
}

/// In-memory [`MediaBackend`].
#[derive(Debug, Default)]
pub struct SimulatedMedia {
    players: HashMap<ControllerId, SimPlayer>,
    lengths: HashMap<String, Duration>,
    policy: AutoplayPolicy,
    notifications: VecDeque<(ControllerId, Event)>,
    calls: Vec<MediaCall>,
}

impl SimulatedMedia {
    #[must_use]
    pub fn new(policy: AutoplayPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Sets the length of the media at `url`.
    #[must_use]
    pub fn with_length(mut self, url: impl Into<String>, length: Duration) -> Self {
        self.lengths.insert(url.into(), length);
        self
    }

    /// Every command received so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[MediaCall] {
        &self.calls
    }

    /// Commands received for one controller.
    #[must_use]
    pub fn calls_for(&self, id: ControllerId) -> Vec<MediaCall> {
        self.calls
            .iter()
            .filter(|call| call.controller() == id)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Whether `id` currently has a bound resource.
    #[must_use]
    pub fn is_bound(&self, id: ControllerId) -> bool {
        self.players.contains_key(&id)
    }

    #[must_use]
    pub fn is_muted(&self, id: ControllerId) -> Option<bool> {
        self.players.get(&id).map(|player| player.muted)
    }

    /// Ids of every resource that is currently playing.
    #[must_use]
    pub fn playing(&self) -> Vec<ControllerId> {
        let mut ids: Vec<ControllerId> = self
            .players
            .iter()
            .filter(|(_, player)| !player.paused)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    fn player_mut(&mut self, id: ControllerId) -> Result<&mut SimPlayer> {
        self.players
            .get_mut(&id)
            .ok_or_else(|| ReelFeedError::Media(format!("no media bound for {id}")))
    }

    fn rejection_reason(&self, player: &SimPlayer) -> Option<String> {
        if self.policy.blocked_sources.contains(&player.source.url) {
            Some(format!("source {} is not playable", player.source.url))
        } else if self.policy.require_muted && !player.muted {
            Some("autoplay of unmuted media is not allowed".to_string())
        } else {
            None
        }
    }
}

impl MediaCall {
    /// Controller the command was addressed to.
    #[must_use]
    pub const fn controller(&self) -> ControllerId {
        match self {
            Self::Bind(id)
            | Self::Start(id, _)
            | Self::Stop(id)
            | Self::ResetPosition(id)
            | Self::SetMuted(id, _)
            | Self::Release(id) => *id,
        }
    }
}

impl MediaBackend for SimulatedMedia {
    fn bind(&mut self, id: ControllerId, source: &MediaSource) -> Result<()> {
        self.calls.push(MediaCall::Bind(id));
        let length = self
            .lengths
            .get(&source.url)
            .copied()
            .unwrap_or(DEFAULT_MEDIA_LENGTH);
        self.players.insert(
            id,
            SimPlayer {
                source: source.clone(),
                paused: true,
                muted: true,
                position: Duration::ZERO,
                length,
            },
        );
        Ok(())
    }

    fn start(&mut self, id: ControllerId, ticket: StartTicket) -> Result<()> {
        self.calls.push(MediaCall::Start(id, ticket));
        let snapshot = self.player_mut(id)?.clone();

        if let Some(reason) = self.rejection_reason(&snapshot) {
            tracing::debug!(controller = %id, ticket = %ticket, reason = %reason, "simulated start rejected");
            self.notifications
                .push_back((id, Event::StartRejected { ticket, reason }));
        } else {
            let player = self.player_mut(id)?;
            // Playing an ended resource starts it over.
            if player.position >= player.length {
                player.position = Duration::ZERO;
            }
            player.paused = false;
            self.notifications.push_back((id, Event::StartResolved(ticket)));
        }
        Ok(())
    }

    fn stop(&mut self, id: ControllerId) -> Result<()> {
        self.calls.push(MediaCall::Stop(id));
        self.player_mut(id)?.paused = true;
        Ok(())
    }

    fn reset_position(&mut self, id: ControllerId) -> Result<()> {
        self.calls.push(MediaCall::ResetPosition(id));
        self.player_mut(id)?.position = Duration::ZERO;
        Ok(())
    }

    fn set_muted(&mut self, id: ControllerId, muted: bool) -> Result<()> {
        self.calls.push(MediaCall::SetMuted(id, muted));
        self.player_mut(id)?.muted = muted;
        Ok(())
    }

    fn release(&mut self, id: ControllerId) -> Result<()> {
        self.calls.push(MediaCall::Release(id));
        self.players
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ReelFeedError::Media(format!("no media bound for {id}")))
    }

    fn is_paused(&self, id: ControllerId) -> bool {
        self.players.get(&id).map_or(true, |player| player.paused)
    }

    fn position(&self, id: ControllerId) -> Option<Duration> {
        self.players.get(&id).map(|player| player.position)
    }

    fn advance(&mut self, elapsed: Duration) {
        let mut ids: Vec<ControllerId> = self.players.keys().copied().collect();
        ids.sort();

        for id in ids {
            let Some(player) = self.players.get_mut(&id) else {
                continue;
            };
            if player.paused || player.length.is_zero() {
                continue;
            }

            let position = player.position + elapsed;
            if position < player.length {
                player.position = position;
            } else if player.source.looping {
                let wrapped = position.as_nanos() % player.length.as_nanos();
                player.position = Duration::from_nanos(u64::try_from(wrapped).unwrap_or(0));
            } else {
                player.position = player.length;
                player.paused = true;
                self.notifications.push_back((id, Event::MediaEnded));
            }
        }
    }

    fn drain_notifications(&mut self) -> Vec<(ControllerId, Event)> {
        self.notifications.drain(..).collect()
    }
}
