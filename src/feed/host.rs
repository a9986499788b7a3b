//! Feed host owning the reel sequence and the active index.
//!
//! Only the reels inside the render window (`active ± window_radius`) have a
//! mounted [`ReelController`]. Moving the active index deactivates the old
//! reel first, then unmounts reels that left the window, activates the new
//! reel and mounts reels that entered the window.

use super::events::{ControllerId, FeedAction, FeedEvent};
use crate::domain::{ReelFeedError, ReelRecord, Result};
use crate::player::{handle_event, Action, ControllerOptions, Event, InputZone, ReelController};
use crate::ui::viewmodel::{Labels, ReelViewModel};
use crate::Config;
use std::collections::BTreeMap;
use std::time::Duration;

/// Feed behaviour options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOptions {
    /// Number of reels mounted on each side of the active one.
    pub window_radius: usize,
    /// Advance to the next reel when a non-looping reel ends.
    pub auto_advance: bool,
    /// Whether reel media loops.
    pub looping: bool,
    /// Mute indicator lifetime.
    pub indicator_delay: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            window_radius: 1,
            auto_advance: false,
            looping: true,
            indicator_delay: crate::player::DEFAULT_INDICATOR_DELAY,
        }
    }
}

impl From<&Config> for FeedOptions {
    fn from(config: &Config) -> Self {
        Self {
            window_radius: config.window_radius,
            auto_advance: config.auto_advance,
            looping: config.loop_playback,
            indicator_delay: Duration::from_millis(config.indicator_hide_ms),
        }
    }
}

#[derive(Debug)]
struct Slot {
    id: ControllerId,
    controller: ReelController,
}

/// Ordered reel feed with a single active reel.
#[derive(Debug)]
pub struct Feed {
    reels: Vec<ReelRecord>,
    active: usize,
    options: FeedOptions,
    slots: BTreeMap<usize, Slot>,
    next_id: u64,
}

impl Feed {
    /// Creates a feed positioned on the first reel.
    ///
    /// Returns the mount actions of every reel in the initial window.
    ///
    /// # Errors
    ///
    /// Returns [`ReelFeedError::EmptyFeed`] if `reels` is empty.
    pub fn new(reels: Vec<ReelRecord>, options: FeedOptions) -> Result<(Self, Vec<FeedAction>)> {
        if reels.is_empty() {
            return Err(ReelFeedError::EmptyFeed);
        }

        let mut feed = Self {
            reels,
            active: 0,
            options,
            slots: BTreeMap::new(),
            next_id: 0,
        };

        let mut out = vec![];
        let (lo, hi) = feed.window();
        for index in lo..=hi {
            feed.mount(index, index == feed.active, &mut out);
        }

        tracing::debug!(
            reels = feed.reels.len(),
            window_radius = feed.options.window_radius,
            "feed created"
        );
        Ok((feed, out))
    }

    /// Processes a feed event and returns the resulting actions.
    ///
    /// The boolean is `true` when something visible changed. Media-surface
    /// taps on any reel other than the active one are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReelFeedError::ReelOutOfRange`] for an `Activate` or `Tap`
    /// index past the end of the feed.
    pub fn handle(&mut self, event: &FeedEvent) -> Result<(bool, Vec<FeedAction>)> {
        let _span = tracing::debug_span!("feed_event", event_type = ?event, active = self.active).entered();

        match event {
            FeedEvent::Activate(index) => {
                self.check_index(*index)?;
                Ok(self.activate(*index))
            }
            FeedEvent::Next => {
                if self.active + 1 < self.reels.len() {
                    Ok(self.activate(self.active + 1))
                } else {
                    Ok((false, vec![]))
                }
            }
            FeedEvent::Previous => {
                if self.active > 0 {
                    Ok(self.activate(self.active - 1))
                } else {
                    Ok((false, vec![]))
                }
            }
            FeedEvent::Tap { reel, zone } => {
                self.check_index(*reel)?;
                if !self.slots.contains_key(reel) {
                    tracing::debug!(reel, "tap on unmounted reel ignored");
                    return Ok((false, vec![]));
                }
                // Only the active reel may hold a start request.
                if *zone == InputZone::MediaSurface && *reel != self.active {
                    tracing::debug!(reel, active = self.active, "media tap on inactive reel ignored");
                    return Ok((false, vec![]));
                }
                let mut out = vec![];
                let render = self.dispatch(*reel, &zone.tap_event(), &mut out);
                Ok((render, out))
            }
            FeedEvent::Player { controller, event } => {
                let Some(index) = self.index_of(*controller) else {
                    tracing::debug!(controller = %controller, "event for unmounted controller dropped");
                    return Ok((false, vec![]));
                };

                let mut out = vec![];
                let mut render = self.dispatch(index, event, &mut out);

                let ended = out.iter().any(|a| a.action == Action::NotifyReelEnd);
                if ended && self.options.auto_advance && index == self.active && index + 1 < self.reels.len() {
                    tracing::debug!(reel = index, "reel ended, advancing");
                    let (advanced, more) = self.activate(index + 1);
                    render |= advanced;
                    out.extend(more);
                }
                Ok((render, out))
            }
        }
    }

    /// Index of the active reel.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Number of reels in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reels.len()
    }

    /// Always `false`: empty feeds are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    #[must_use]
    pub fn reels(&self) -> &[ReelRecord] {
        &self.reels
    }

    /// Controller of the reel at `index`, if mounted.
    #[must_use]
    pub fn controller(&self, index: usize) -> Option<&ReelController> {
        self.slots.get(&index).map(|slot| &slot.controller)
    }

    /// Identity of the controller mounted for `index`.
    #[must_use]
    pub fn controller_id(&self, index: usize) -> Option<ControllerId> {
        self.slots.get(&index).map(|slot| slot.id)
    }

    /// Indices of the mounted reels in ascending order.
    #[must_use]
    pub fn mounted(&self) -> Vec<usize> {
        self.slots.keys().copied().collect()
    }

    /// Overlay view model of the active reel.
    #[must_use]
    pub fn active_viewmodel(&self, labels: &Labels) -> Option<ReelViewModel> {
        self.controller(self.active)
            .map(|controller| controller.compute_viewmodel(labels))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.reels.len() {
            Ok(())
        } else {
            Err(ReelFeedError::ReelOutOfRange {
                index,
                len: self.reels.len(),
            })
        }
    }

    fn window(&self) -> (usize, usize) {
        let lo = self.active.saturating_sub(self.options.window_radius);
        let hi = self
            .active
            .saturating_add(self.options.window_radius)
            .min(self.reels.len() - 1);
        (lo, hi)
    }

    fn index_of(&self, id: ControllerId) -> Option<usize> {
        self.slots
            .iter()
            .find_map(|(index, slot)| (slot.id == id).then_some(*index))
    }

    fn activate(&mut self, target: usize) -> (bool, Vec<FeedAction>) {
        if target == self.active {
            return (false, vec![]);
        }

        let mut out = vec![];
        let previous = self.active;
        if self.slots.contains_key(&previous) {
            self.dispatch(previous, &Event::SetActive(false), &mut out);
        }

        self.active = target;
        tracing::debug!(from = previous, to = target, "active reel changed");

        let (lo, hi) = self.window();
        let leaving: Vec<usize> = self
            .slots
            .keys()
            .copied()
            .filter(|index| *index < lo || *index > hi)
            .collect();
        for index in leaving {
            if let Some(slot) = self.slots.remove(&index) {
                out.extend(slot.controller.unmount().into_iter().map(|action| FeedAction {
                    controller: slot.id,
                    reel: index,
                    action,
                }));
            }
        }

        if self.slots.contains_key(&target) {
            self.dispatch(target, &Event::SetActive(true), &mut out);
        }

        for index in lo..=hi {
            if !self.slots.contains_key(&index) {
                self.mount(index, index == target, &mut out);
            }
        }

        (true, out)
    }

    fn mount(&mut self, index: usize, is_active: bool, out: &mut Vec<FeedAction>) {
        self.next_id += 1;
        let id = ControllerId(self.next_id);
        let options = ControllerOptions {
            is_first: index == 0,
            looping: self.options.looping,
            indicator_delay: self.options.indicator_delay,
        };

        let (controller, actions) = ReelController::mount(self.reels[index].clone(), is_active, options);
        out.extend(actions.into_iter().map(|action| FeedAction {
            controller: id,
            reel: index,
            action,
        }));
        self.slots.insert(index, Slot { id, controller });
    }

    fn dispatch(&mut self, index: usize, event: &Event, out: &mut Vec<FeedAction>) -> bool {
        let Some(slot) = self.slots.get_mut(&index) else {
            return false;
        };
        let (render, actions) = handle_event(&mut slot.controller, event);
        let id = slot.id;
        out.extend(actions.into_iter().map(|action| FeedAction {
            controller: id,
            reel: index,
            action,
        }));
        render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::InputZone;

    fn reels(n: usize) -> Vec<ReelRecord> {
        (0..n).map(|i| ReelRecord::sample(&format!("reel-{i}"))).collect()
    }

    fn starts_for(actions: &[FeedAction]) -> Vec<usize> {
        actions
            .iter()
            .filter(|a| matches!(a.action, Action::StartPlayback { .. }))
            .map(|a| a.reel)
            .collect()
    }

    #[test]
    fn empty_feed_is_rejected() {
        let err = Feed::new(vec![], FeedOptions::default()).unwrap_err();
        assert!(matches!(err, ReelFeedError::EmptyFeed));
    }

    #[test]
    fn initial_window_mounts_neighbours_and_starts_first() {
        let (feed, actions) = Feed::new(reels(5), FeedOptions::default()).unwrap();

        assert_eq!(feed.mounted(), vec![0, 1]);
        assert_eq!(starts_for(&actions), vec![0]);
        assert!(feed.controller(0).unwrap().is_first());
        assert!(!feed.controller(1).unwrap().is_first());
    }

    #[test]
    fn next_deactivates_before_activating() {
        let (mut feed, _) = Feed::new(reels(5), FeedOptions::default()).unwrap();
        let (render, actions) = feed.handle(&FeedEvent::Next).unwrap();

        assert!(render);
        assert_eq!(feed.active_index(), 1);
        assert_eq!(feed.mounted(), vec![0, 1, 2]);

        let stop_old = actions
            .iter()
            .position(|a| a.reel == 0 && a.action == Action::ResetPosition)
            .unwrap();
        let start_new = actions
            .iter()
            .position(|a| a.reel == 1 && matches!(a.action, Action::StartPlayback { .. }))
            .unwrap();
        assert!(stop_old < start_new);
        assert_eq!(starts_for(&actions), vec![1]);
    }

    #[test]
    fn jump_unmounts_window_and_mounts_target_active() {
        let (mut feed, _) = Feed::new(reels(10), FeedOptions::default()).unwrap();
        let old_id = feed.controller_id(0).unwrap();

        let (_, actions) = feed.handle(&FeedEvent::Activate(7)).unwrap();
        assert_eq!(feed.mounted(), vec![6, 7, 8]);
        assert!(actions
            .iter()
            .any(|a| a.controller == old_id && a.action == Action::ReleaseMedia));
        assert_eq!(starts_for(&actions), vec![7]);
        assert!(feed.controller(7).unwrap().is_active());
    }

    #[test]
    fn edges_saturate() {
        let (mut feed, _) = Feed::new(reels(2), FeedOptions::default()).unwrap();
        let (render, actions) = feed.handle(&FeedEvent::Previous).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        feed.handle(&FeedEvent::Next).unwrap();
        let (render, _) = feed.handle(&FeedEvent::Next).unwrap();
        assert!(!render);
        assert_eq!(feed.active_index(), 1);
    }

    #[test]
    fn out_of_range_activation_is_an_error() {
        let (mut feed, _) = Feed::new(reels(3), FeedOptions::default()).unwrap();
        let err = feed.handle(&FeedEvent::Activate(3)).unwrap_err();
        assert!(matches!(err, ReelFeedError::ReelOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn events_for_unmounted_controllers_are_dropped() {
        let (mut feed, _) = Feed::new(reels(10), FeedOptions::default()).unwrap();
        let old_id = feed.controller_id(0).unwrap();
        feed.handle(&FeedEvent::Activate(5)).unwrap();

        let (render, actions) = feed
            .handle(&FeedEvent::Player {
                controller: old_id,
                event: Event::MediaSurfaceTap,
            })
            .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn volume_tap_routes_to_tapped_reel_only() {
        let (mut feed, _) = Feed::new(reels(3), FeedOptions::default()).unwrap();
        let (_, actions) = feed
            .handle(&FeedEvent::Tap {
                reel: 0,
                zone: InputZone::VolumeControl,
            })
            .unwrap();

        assert!(actions.iter().all(|a| a.reel == 0));
        assert!(!feed.controller(0).unwrap().state().is_muted());
        assert!(feed.controller(1).unwrap().state().is_muted());
    }

    #[test]
    fn media_tap_on_neighbour_is_ignored() {
        let (mut feed, _) = Feed::new(reels(3), FeedOptions::default()).unwrap();
        let (render, actions) = feed
            .handle(&FeedEvent::Tap {
                reel: 1,
                zone: InputZone::MediaSurface,
            })
            .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert!(!feed.controller(1).unwrap().state().is_playing());
        assert!(feed.controller(1).unwrap().pending_start().is_none());
    }

    #[test]
    fn ended_reel_auto_advances_when_enabled() {
        let options = FeedOptions {
            auto_advance: true,
            looping: false,
            ..FeedOptions::default()
        };
        let (mut feed, _) = Feed::new(reels(3), options).unwrap();
        let id = feed.controller_id(0).unwrap();

        let (_, actions) = feed
            .handle(&FeedEvent::Player {
                controller: id,
                event: Event::MediaEnded,
            })
            .unwrap();
        assert!(actions.iter().any(|a| a.action == Action::NotifyReelEnd));
        assert_eq!(feed.active_index(), 1);
    }
}
