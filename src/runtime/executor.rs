//! Action execution and the host event loop.
//!
//! [`Runtime`] is the single-threaded event loop around a [`Feed`]. It executes
//! [`FeedAction`]s against a [`MediaBackend`] and a [`TimerQueue`], then feeds
//! every resulting notification (start completion, end of stream, timer expiry)
//! back into the feed, in delivery order, until nothing is left to process.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use reelfeed::feed::{Feed, FeedEvent, FeedOptions};
//! use reelfeed::runtime::{Runtime, SimulatedMedia};
//! use reelfeed::ReelRecord;
//!
//! let reels = vec![ReelRecord::sample("a"), ReelRecord::sample("b")];
//! let (mut feed, actions) = Feed::new(reels, FeedOptions::default())?;
//! let mut runtime = Runtime::new(SimulatedMedia::default());
//! runtime.pump(&mut feed, actions)?;
//! assert!(feed.controller(0).unwrap().state().is_playing());
//!
//! runtime.dispatch(&mut feed, &FeedEvent::Next)?;
//! assert!(feed.controller(1).unwrap().state().is_playing());
//!
//! runtime.advance(&mut feed, Duration::from_millis(3000))?;
//! assert!(!feed.controller(1).unwrap().state().shows_mute_indicator());
//! # Ok::<(), reelfeed::ReelFeedError>(())
//! ```

use super::media::MediaBackend;
use super::timers::TimerQueue;
use crate::domain::Result;
use crate::feed::{ControllerId, Feed, FeedAction, FeedEvent};
use crate::player::{Action, Event};
use std::collections::VecDeque;
use std::time::Duration;

type ReelEndHook = Box<dyn FnMut(usize)>;

/// Single-threaded host loop driving a feed.
pub struct Runtime<M: MediaBackend> {
    media: M,
    timers: TimerQueue,
    queue: VecDeque<(ControllerId, Event)>,
    ended: Vec<usize>,
    on_reel_end: Option<ReelEndHook>,
}

impl<M: MediaBackend> Runtime<M> {
    #[must_use]
    pub fn new(media: M) -> Self {
        Self {
            media,
            timers: TimerQueue::new(),
            queue: VecDeque::new(),
            ended: vec![],
            on_reel_end: None,
        }
    }

    /// Registers the callback invoked with the feed index of each reel whose
    /// non-looping media reached its end.
    #[must_use]
    pub fn with_reel_end_hook(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.on_reel_end = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub const fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    #[must_use]
    pub const fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Feed indices of reels that reported their end, oldest first.
    pub fn take_ended(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.ended)
    }

    /// Delivers a host event to the feed and runs everything it triggers.
    ///
    /// Returns `true` if any step asked for a re-render.
    ///
    /// # Errors
    ///
    /// Propagates feed errors such as an out-of-range reel index.
    pub fn dispatch(&mut self, feed: &mut Feed, event: &FeedEvent) -> Result<bool> {
        let (render, actions) = feed.handle(event)?;
        Ok(self.pump(feed, actions)? || render)
    }

    /// Executes `actions`, then processes notifications until quiescent.
    ///
    /// # Errors
    ///
    /// Propagates feed errors raised while handling notifications.
    pub fn pump(&mut self, feed: &mut Feed, actions: Vec<FeedAction>) -> Result<bool> {
        self.execute(actions);

        let mut render = false;
        loop {
            self.queue.extend(self.media.drain_notifications());
            let Some((controller, event)) = self.queue.pop_front() else {
                break;
            };

            let (changed, actions) = feed.handle(&FeedEvent::Player { controller, event })?;
            render |= changed;
            self.execute(actions);
        }
        Ok(render)
    }

    /// Lets `elapsed` pass on the virtual clock.
    ///
    /// Media positions and timers advance together; each timer fires at its own
    /// deadline and its consequences are processed before later deadlines.
    ///
    /// # Errors
    ///
    /// Propagates feed errors raised while handling notifications.
    pub fn advance(&mut self, feed: &mut Feed, elapsed: Duration) -> Result<bool> {
        let target = self.timers.now() + elapsed;
        let mut render = false;

        while let Some(deadline) = self.timers.next_deadline().filter(|d| *d <= target) {
            self.media.advance(deadline.saturating_sub(self.timers.now()));
            for (controller, handle) in self.timers.advance_to(deadline) {
                self.queue.push_back((controller, Event::IndicatorTimerFired(handle)));
            }
            render |= self.pump(feed, vec![])?;
        }

        self.media.advance(target.saturating_sub(self.timers.now()));
        self.timers.advance_to(target);
        render |= self.pump(feed, vec![])?;
        Ok(render)
    }

    fn execute(&mut self, actions: Vec<FeedAction>) {
        for FeedAction { controller, reel, action } in actions {
            tracing::trace!(controller = %controller, reel, action = ?action, "executing action");

            let outcome = match action {
                Action::BindMedia(source) => self.media.bind(controller, &source),
                Action::StartPlayback { ticket } => self.media.start(controller, ticket),
                Action::StopPlayback => self.media.stop(controller),
                Action::ResetPosition => self.media.reset_position(controller),
                Action::ApplyMute { muted } => self.media.set_muted(controller, muted),
                Action::ReleaseMedia => self.media.release(controller),
                Action::ArmIndicatorTimer { handle, after } => {
                    self.timers.arm(controller, handle, after);
                    Ok(())
                }
                Action::CancelIndicatorTimer { handle } => {
                    self.timers.cancel(controller, handle);
                    Ok(())
                }
                Action::NotifyReelEnd => {
                    self.ended.push(reel);
                    if let Some(hook) = self.on_reel_end.as_mut() {
                        hook(reel);
                    }
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                tracing::warn!(controller = %controller, reel, error = %e, "media command failed");
            }
        }
    }
}

impl<M: MediaBackend + std::fmt::Debug> std::fmt::Debug for Runtime<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("media", &self.media)
            .field("timers", &self.timers)
            .field("queued", &self.queue.len())
            .field("ended", &self.ended)
            .finish_non_exhaustive()
    }
}
