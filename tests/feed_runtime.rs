//! Feed windowing, controller identity and end-of-reel handling.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use reelfeed::feed::{ControllerId, Feed, FeedEvent, FeedOptions};
use reelfeed::player::{Event, InputZone};
use reelfeed::runtime::{MediaBackend, MediaCall, Runtime, SimulatedMedia};
use reelfeed::{Labels, ReelFeedError, ReelRecord};

fn reels(n: usize) -> Vec<ReelRecord> {
    (0..n).map(|i| ReelRecord::sample(&format!("reel-{i}"))).collect()
}

#[test]
fn window_follows_active_reel() {
    let (mut feed, actions) = Feed::new(reels(6), FeedOptions::default()).unwrap();
    let mut runtime = Runtime::new(SimulatedMedia::default());
    runtime.pump(&mut feed, actions).unwrap();
    assert_eq!(feed.mounted(), vec![0, 1]);

    let old: Vec<ControllerId> = [0, 1].iter().map(|i| feed.controller_id(*i).unwrap()).collect();
    runtime.dispatch(&mut feed, &FeedEvent::Activate(4)).unwrap();

    assert_eq!(feed.mounted(), vec![3, 4, 5]);
    for id in old {
        assert!(!runtime.media().is_bound(id));
        assert!(runtime.media().calls_for(id).contains(&MediaCall::Release(id)));
        assert_eq!(runtime.timers().pending_for(id), 0);
    }
    assert_eq!(runtime.media().playing(), vec![feed.controller_id(4).unwrap()]);
}

#[test]
fn remounted_reel_gets_a_fresh_identity() {
    let (mut feed, actions) = Feed::new(reels(4), FeedOptions::default()).unwrap();
    let mut runtime = Runtime::new(SimulatedMedia::default());
    runtime.pump(&mut feed, actions).unwrap();

    let before = feed.controller_id(0).unwrap();
    runtime.dispatch(&mut feed, &FeedEvent::Activate(3)).unwrap();
    runtime.dispatch(&mut feed, &FeedEvent::Activate(0)).unwrap();
    let after = feed.controller_id(0).unwrap();
    assert_ne!(before, after);

    // A late notification for the old instance is dropped.
    let (render, actions) = feed
        .handle(&FeedEvent::Player { controller: before, event: Event::MediaEnded })
        .unwrap();
    assert!(!render);
    assert!(actions.is_empty());
}

#[test]
fn at_most_one_reel_plays_while_scrolling() {
    let (mut feed, actions) = Feed::new(reels(5), FeedOptions { window_radius: 2, ..FeedOptions::default() }).unwrap();
    let mut runtime = Runtime::new(SimulatedMedia::default());
    runtime.pump(&mut feed, actions).unwrap();

    let moves = [FeedEvent::Next, FeedEvent::Next, FeedEvent::Previous, FeedEvent::Activate(4), FeedEvent::Next];
    for event in &moves {
        runtime.dispatch(&mut feed, event).unwrap();
        runtime.advance(&mut feed, Duration::from_millis(700)).unwrap();

        let playing = runtime.media().playing();
        assert_eq!(playing, vec![feed.controller_id(feed.active_index()).unwrap()]);
    }
}

#[test]
fn non_looping_reel_reports_end_and_advances() {
    let options = FeedOptions { looping: false, auto_advance: true, ..FeedOptions::default() };
    let (mut feed, actions) = Feed::new(reels(3), options).unwrap();

    let ended = Rc::new(RefCell::new(vec![]));
    let sink = Rc::clone(&ended);
    let media = SimulatedMedia::default().with_length(ReelRecord::sample("reel-0").url, Duration::from_secs(5));
    let mut runtime = Runtime::new(media).with_reel_end_hook(move |reel| sink.borrow_mut().push(reel));
    runtime.pump(&mut feed, actions).unwrap();

    runtime.advance(&mut feed, Duration::from_millis(4999)).unwrap();
    assert_eq!(feed.active_index(), 0);

    runtime.advance(&mut feed, Duration::from_millis(1)).unwrap();
    assert_eq!(*ended.borrow(), vec![0]);
    assert_eq!(runtime.take_ended(), vec![0]);
    assert_eq!(feed.active_index(), 1);
    assert!(feed.controller(1).unwrap().state().is_playing());
    assert!(!feed.controller(0).unwrap().state().is_playing());
}

#[test]
fn ended_reel_replays_on_tap() {
    let options = FeedOptions { looping: false, ..FeedOptions::default() };
    let (mut feed, actions) = Feed::new(reels(2), options).unwrap();

    let ended = Rc::new(RefCell::new(vec![]));
    let sink = Rc::clone(&ended);
    let media = SimulatedMedia::default().with_length(ReelRecord::sample("reel-0").url, Duration::from_secs(5));
    let mut runtime = Runtime::new(media).with_reel_end_hook(move |reel| sink.borrow_mut().push(reel));
    runtime.pump(&mut feed, actions).unwrap();
    let first = feed.controller_id(0).unwrap();

    runtime.advance(&mut feed, Duration::from_secs(5)).unwrap();
    assert_eq!(runtime.take_ended(), vec![0]);
    assert!(!feed.controller(0).unwrap().state().is_playing());

    runtime
        .dispatch(&mut feed, &FeedEvent::Tap { reel: 0, zone: InputZone::MediaSurface })
        .unwrap();
    runtime.advance(&mut feed, Duration::from_millis(10)).unwrap();

    assert_eq!(runtime.media().position(first), Some(Duration::from_millis(10)));
    assert_eq!(runtime.media().playing(), vec![first]);
    assert!(feed.controller(0).unwrap().state().is_playing());
    assert!(runtime.take_ended().is_empty());
    assert_eq!(*ended.borrow(), vec![0]);
}

#[test]
fn media_tap_on_neighbour_keeps_single_playback() {
    let (mut feed, actions) = Feed::new(reels(3), FeedOptions::default()).unwrap();
    let mut runtime = Runtime::new(SimulatedMedia::default());
    runtime.pump(&mut feed, actions).unwrap();

    runtime
        .dispatch(&mut feed, &FeedEvent::Tap { reel: 1, zone: InputZone::MediaSurface })
        .unwrap();

    assert_eq!(feed.active_index(), 0);
    assert_eq!(runtime.media().playing(), vec![feed.controller_id(0).unwrap()]);
    assert!(!feed.controller(1).unwrap().state().is_playing());
}

#[test]
fn looping_reel_never_ends() {
    let (mut feed, actions) = Feed::new(reels(2), FeedOptions { auto_advance: true, ..FeedOptions::default() }).unwrap();
    let media = SimulatedMedia::default().with_length(ReelRecord::sample("reel-0").url, Duration::from_secs(2));
    let mut runtime = Runtime::new(media);
    runtime.pump(&mut feed, actions).unwrap();

    runtime.advance(&mut feed, Duration::from_secs(7)).unwrap();
    let first = feed.controller_id(0).unwrap();

    assert!(runtime.take_ended().is_empty());
    assert_eq!(feed.active_index(), 0);
    assert_eq!(runtime.media().position(first), Some(Duration::from_secs(1)));
}

#[test]
fn scroll_hint_only_on_first_reel() {
    let (mut feed, actions) = Feed::new(reels(2), FeedOptions::default()).unwrap();
    let mut runtime = Runtime::new(SimulatedMedia::default());
    runtime.pump(&mut feed, actions).unwrap();
    let labels = Labels::default();

    assert_eq!(feed.active_viewmodel(&labels).unwrap().scroll_hint.as_deref(), Some("Aşağı sürüşdür"));

    runtime.dispatch(&mut feed, &FeedEvent::Next).unwrap();
    assert_eq!(feed.active_viewmodel(&labels).unwrap().scroll_hint, None);
}

#[test]
fn invalid_feed_input_is_reported() {
    assert!(matches!(Feed::new(vec![], FeedOptions::default()), Err(ReelFeedError::EmptyFeed)));

    let (mut feed, _) = Feed::new(reels(2), FeedOptions::default()).unwrap();
    let err = feed
        .handle(&FeedEvent::Tap { reel: 9, zone: InputZone::MediaSurface })
        .unwrap_err();
    assert!(matches!(err, ReelFeedError::ReelOutOfRange { index: 9, len: 2 }));
}
