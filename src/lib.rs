//! Reelfeed: a short-video commerce feed with deterministic playback control.
//!
//! Reelfeed provides:
//! - A per-reel playback controller (play, mute, self-hiding mute indicator)
//!   driven by an edge-triggered "active" signal and two input zones
//! - A feed host that keeps a window of mounted controllers around the active
//!   reel and guarantees a single live playback session
//! - A single-threaded runtime that executes controller actions against a
//!   media backend and a virtual-clock timer queue
//! - The navbar shell with its modal sheets and notification category rows
//! - ANSI rendering with TOML themes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal demo host (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Event loop
//! │  - Media backend seam                               │
//! │  - Timer queue                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Feed host (feed/)                                  │  ← Active index
//! │  - Render window                                    │
//! │  - Controller identity                              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Player        │   │ Shell         │   │ UI            │
//! │ (player/)     │   │ (shell/)      │   │ (ui/)         │
//! │ - Event/action│   │ - Navbar      │   │ - View models │
//! │ - State axes  │   │ - Sheets      │   │ - Rendering   │
//! │ - Timers      │   │ - Categories  │   │ - Theming     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, infrastructure, observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`player`]: Reel playback controller with event/action model
//! - [`feed`]: Feed host and controller identity
//! - [`runtime`]: Action execution, media backends and timers
//! - [`shell`]: Navbar, sheets, notification categories
//! - [`domain`]: Reel records and errors
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Platform paths
//! - `observability`: OpenTelemetry tracing to a rotating OTLP file
//!
//! # Configuration
//!
//! Keys, as `key=value` host arguments or a TOML file:
//!
//! ```toml
//! indicator_hide_ms = 3000
//! loop_playback = true
//! auto_advance = false
//! window_radius = 1
//! theme = "midnight"
//! trace_level = "info"
//!
//! [labels]
//! buy = "Buy"
//! ```
//!
//! # Example
//!
//! ```rust
//! use reelfeed::feed::{Feed, FeedEvent, FeedOptions};
//! use reelfeed::player::InputZone;
//! use reelfeed::runtime::{Runtime, SimulatedMedia};
//! use reelfeed::{Config, ReelRecord};
//!
//! let config = Config::default();
//! let reels = vec![ReelRecord::sample("scarf"), ReelRecord::sample("lamp")];
//!
//! let (mut feed, actions) = Feed::new(reels, FeedOptions::from(&config))?;
//! let mut runtime = Runtime::new(SimulatedMedia::default());
//! runtime.pump(&mut feed, actions)?;
//!
//! runtime.dispatch(&mut feed, &FeedEvent::Tap { reel: 0, zone: InputZone::VolumeControl })?;
//! assert!(!feed.controller(0).unwrap().state().is_muted());
//! # Ok::<(), reelfeed::ReelFeedError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Pure controllers
//!
//! Controllers never touch media or clocks. They return [`player::Action`]s and
//! receive completions as [`player::Event`]s, so every transition is testable
//! without a player.
//!
//! ## Correlated completions
//!
//! Start requests carry a ticket and timers carry a handle. Completions for a
//! superseded ticket or handle are ignored, which keeps at most one pending
//! timer per controller and makes late autoplay results harmless.

pub mod domain;
pub mod feed;
pub mod infrastructure;
pub mod player;
pub mod runtime;
pub mod shell;

pub mod ui;

pub mod observability;

pub use domain::{load_reels, ReelFeedError, ReelRecord, Result};
pub use feed::{ControllerId, Feed, FeedAction, FeedEvent, FeedOptions};
pub use player::{handle_event, Action, Event, InputZone, ReelController};
pub use ui::{Labels, Theme};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Application configuration.
///
/// ```toml
/// indicator_hide_ms = 1500
/// theme_file = "~/.config/reelfeed/theme.toml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mute indicator lifetime in milliseconds. Default: 3000
    pub indicator_hide_ms: u64,

    /// Loop reel media. When off, a reel that ends pauses and reports the end
    /// to the feed. Default: `true`
    pub loop_playback: bool,

    /// Move to the next reel when a non-looping reel ends. Default: `false`
    pub auto_advance: bool,

    /// Reels mounted on each side of the active one. Default: 1
    pub window_radius: usize,

    /// Built-in theme name: `midnight` or `daylight`. Ignored if `theme_file`
    /// is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Overlay strings.
    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indicator_hide_ms: 3000,
            loop_playback: true,
            auto_advance: false,
            window_radius: 1,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            labels: Labels::default(),
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Values that fail to parse fall back to their defaults. Label keys use a
    /// `label.` prefix (`label.buy=Buy`).
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reelfeed::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("indicator_hide_ms".to_string(), "1200".to_string());
    /// map.insert("loop_playback".to_string(), "maybe".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.indicator_hide_ms, 1200);
    /// assert!(config.loop_playback);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let mut labels = defaults.labels;
        for (key, value) in config {
            let Some(name) = key.strip_prefix("label.") else {
                continue;
            };
            let slot = match name {
                "muted_indicator" => &mut labels.muted_indicator,
                "unmuted_indicator" => &mut labels.unmuted_indicator,
                "scroll_hint" => &mut labels.scroll_hint,
                "seller" => &mut labels.seller,
                "share" => &mut labels.share,
                "buy" => &mut labels.buy,
                "search_placeholder" => &mut labels.search_placeholder,
                _ => {
                    tracing::debug!(key = %key, "unknown label key ignored");
                    continue;
                }
            };
            slot.clone_from(value);
        }

        Self {
            indicator_hide_ms: parse_or(config, "indicator_hide_ms", defaults.indicator_hide_ms),
            loop_playback: parse_or(config, "loop_playback", defaults.loop_playback),
            auto_advance: parse_or(config, "auto_advance", defaults.auto_advance),
            window_radius: parse_or(config, "window_radius", defaults.window_radius),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
            labels,
        }
    }

    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ReelFeedError::Config`] if the file cannot be read or parsed.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ReelFeedError::Config(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ReelFeedError::Config(format!("failed to parse {}: {e}", path.display())))
    }
}

fn parse_or<T: FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    config
        .get(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Resolves the theme for `config`: theme file first, then theme name, then
/// the default. Load failures are logged and fall back to the default.
#[must_use]
pub fn initialize(config: &Config) -> Theme {
    tracing::debug!("initializing reelfeed");

    config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_overrides_labels_and_keeps_defaults() {
        let mut map = BTreeMap::new();
        map.insert("label.buy".to_string(), "Buy".to_string());
        map.insert("window_radius".to_string(), "2".to_string());
        map.insert("indicator_hide_ms".to_string(), "soon".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.labels.buy, "Buy");
        assert_eq!(config.labels.share, "Paylaş");
        assert_eq!(config.window_radius, 2);
        assert_eq!(config.indicator_hide_ms, 3000);
    }

    #[test]
    fn toml_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "loop_playback = false\ntheme = \"daylight\"\n\n[labels]\nseller = \"Seller\"").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert!(!config.loop_playback);
        assert_eq!(config.theme_name.as_deref(), Some("daylight"));
        assert_eq!(config.labels.seller, "Seller");
        assert_eq!(config.labels.buy, "Al");
        assert_eq!(config.indicator_hide_ms, 3000);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window_radius = \"wide\"").unwrap();

        assert!(matches!(Config::from_toml_file(file.path()), Err(ReelFeedError::Config(_))));
        assert!(matches!(Config::from_toml_file("/nonexistent/reelfeed.toml"), Err(ReelFeedError::Config(_))));
    }

    #[test]
    fn theme_resolution_falls_back() {
        let config = Config { theme_name: Some("daylight".to_string()), ..Config::default() };
        assert_eq!(initialize(&config).name, "daylight");

        let config = Config {
            theme_name: Some("daylight".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).name, "midnight");
    }
}
