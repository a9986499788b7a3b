//! Terminal demo host.
//!
//! Drives a feed with the simulated media backend and renders each frame as
//! ANSI text. Commands are read from stdin, one per line:
//!
//! - `n` / `p`: Next / previous reel
//! - `g <index>`: Go to a reel
//! - `t`: Tap the media surface of the active reel
//! - `v`: Tap the volume control of the active reel
//! - `w <ms>`: Let time pass
//! - `h` / `r`: Home / reels route
//! - `s` / `c` / `b` / `a`: Search, create-post, notifications, account
//! - `x`: Close the open sheet
//! - `q`: Quit
//!
//! # Usage
//!
//! ```text
//! reelfeed [REELS_FILE] [--config FILE] [key=value ...]
//! ```
//!
//! Without a reels file a built-in sample feed is shown. `key=value` pairs use
//! the same keys as the configuration file and are ignored when `--config` is
//! given.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use reelfeed::feed::{Feed, FeedEvent, FeedOptions};
use reelfeed::player::InputZone;
use reelfeed::runtime::{Runtime, SimulatedMedia};
use reelfeed::shell::{NavBar, NavTarget, NotificationCategory, Sheet, StaticAuth};
use reelfeed::ui::{render, Frame};
use reelfeed::{load_reels, Config, ReelFeedError, ReelRecord, Result, Theme};

/// Parsed command line.
#[derive(Debug, Default)]
struct Args {
    reels_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    settings: BTreeMap<String, String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            if arg == "--config" {
                let path = args
                    .next()
                    .ok_or_else(|| ReelFeedError::Config("--config needs a file".to_string()))?;
                parsed.config_file = Some(PathBuf::from(path));
            } else if let Some((key, value)) = arg.split_once('=') {
                parsed.settings.insert(key.trim().to_string(), value.trim().to_string());
            } else if parsed.reels_file.is_none() {
                parsed.reels_file = Some(PathBuf::from(arg));
            } else {
                return Err(ReelFeedError::Config(format!("unexpected argument: {arg}")));
            }
        }

        Ok(parsed)
    }

    fn config(&self) -> Result<Config> {
        match &self.config_file {
            Some(path) => {
                if !self.settings.is_empty() {
                    tracing::warn!("key=value settings ignored because --config was given");
                }
                Config::from_toml_file(path)
            }
            None => Ok(Config::from_map(&self.settings)),
        }
    }
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Feed(FeedCommand),
    Wait(Duration),
    Nav(NavTarget),
    CloseSheet,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedCommand {
    Next,
    Previous,
    Goto(usize),
    Tap(InputZone),
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let command = match (parts.next()?, parts.next()) {
        ("n", None) => Command::Feed(FeedCommand::Next),
        ("p", None) => Command::Feed(FeedCommand::Previous),
        ("g", Some(index)) => Command::Feed(FeedCommand::Goto(index.parse().ok()?)),
        ("t", None) => Command::Feed(FeedCommand::Tap(InputZone::MediaSurface)),
        ("v", None) => Command::Feed(FeedCommand::Tap(InputZone::VolumeControl)),
        ("w", Some(ms)) => Command::Wait(Duration::from_millis(ms.parse().ok()?)),
        ("h", None) => Command::Nav(NavTarget::Home),
        ("r", None) => Command::Nav(NavTarget::Reels),
        ("s", None) => Command::Nav(NavTarget::Search),
        ("c", None) => Command::Nav(NavTarget::CreatePost),
        ("b", None) => Command::Nav(NavTarget::Notifications),
        ("a", None) => Command::Nav(NavTarget::Account),
        ("x", None) => Command::CloseSheet,
        ("q", None) => Command::Quit,
        _ => return None,
    };
    parts.next().is_none().then_some(command)
}

/// Host state: feed, runtime and shell.
struct App {
    feed: Feed,
    runtime: Runtime<SimulatedMedia>,
    nav: NavBar,
    auth: StaticAuth,
    notifications: Vec<NotificationCategory>,
    theme: Theme,
    config: Config,
}

impl App {
    fn new(reels: Vec<ReelRecord>, config: Config) -> Result<Self> {
        let theme = reelfeed::initialize(&config);
        let (mut feed, actions) = Feed::new(reels, FeedOptions::from(&config))?;
        let mut runtime = Runtime::new(SimulatedMedia::default());
        runtime.pump(&mut feed, actions)?;

        Ok(Self {
            feed,
            runtime,
            nav: NavBar::new(),
            auth: StaticAuth::default(),
            notifications: NotificationCategory::samples(),
            theme,
            config,
        })
    }

    /// Applies one command; returns `false` to quit.
    fn apply(&mut self, command: Command) -> Result<bool> {
        let _span = tracing::debug_span!("command", ?command).entered();

        match command {
            Command::Feed(feed_command) => {
                let event = match feed_command {
                    FeedCommand::Next => FeedEvent::Next,
                    FeedCommand::Previous => FeedEvent::Previous,
                    FeedCommand::Goto(index) => FeedEvent::Activate(index),
                    FeedCommand::Tap(zone) => FeedEvent::Tap { reel: self.feed.active_index(), zone },
                };
                self.runtime.dispatch(&mut self.feed, &event)?;
            }
            Command::Wait(elapsed) => {
                self.runtime.advance(&mut self.feed, elapsed)?;
            }
            Command::Nav(target) => {
                if let Some(route) = self.nav.tap(target, &mut self.auth) {
                    println!("→ {}", route.path());
                }
            }
            Command::CloseSheet => self.nav.close_top(&mut self.auth),
            Command::Quit => return Ok(false),
        }

        for index in self.runtime.take_ended() {
            println!("reel {index} ended");
        }
        Ok(true)
    }

    fn frame(&self, cols: usize) -> String {
        let nav = self.nav.compute_viewmodel(&self.auth, &self.config.labels);
        let reel = self.feed.active_viewmodel(&self.config.labels);
        let rows: Vec<_> = self
            .notifications
            .iter()
            .map(NotificationCategory::compute_viewmodel)
            .collect();
        let notifications = self
            .nav
            .is_open(Sheet::Notifications, &self.auth)
            .then_some(rows.as_slice());

        render(
            &Frame {
                nav: &nav,
                reel: reel.as_ref(),
                notifications,
            },
            &self.theme,
            cols,
        )
    }
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse().ok())
        .filter(|cols| *cols > 0)
        .unwrap_or(48)
}

fn run() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let config = args.config()?;
    reelfeed::observability::init_tracing(&config);

    let reels = match &args.reels_file {
        Some(path) => load_reels(path)?,
        None => ["scarf", "lamp", "sneakers"].iter().map(|name| ReelRecord::sample(name)).collect(),
    };
    tracing::debug!(reels = reels.len(), "starting feed");

    let mut app = App::new(reels, config)?;
    let cols = terminal_width();
    let mut stdout = io::stdout();

    write!(stdout, "{}", app.frame(cols))?;
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(command) = parse_command(&line) else {
            eprintln!("unknown command: {line}");
            continue;
        };

        match app.apply(command) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("{e}"),
        }

        write!(stdout, "{}", app.frame(cols))?;
        stdout.flush()?;
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("reelfeed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("g 2"), Some(Command::Feed(FeedCommand::Goto(2))));
        assert_eq!(parse_command("w 3000"), Some(Command::Wait(Duration::from_millis(3000))));
        assert_eq!(parse_command("v"), Some(Command::Feed(FeedCommand::Tap(InputZone::VolumeControl))));
        assert_eq!(parse_command("n extra"), None);
        assert_eq!(parse_command("g two"), None);
    }

    #[test]
    fn parses_arguments() {
        let args = Args::parse(
            ["reels.toml", "loop_playback=false", "--config", "cfg.toml"]
                .into_iter()
                .map(String::from),
        )
        .unwrap();

        assert_eq!(args.reels_file, Some(PathBuf::from("reels.toml")));
        assert_eq!(args.config_file, Some(PathBuf::from("cfg.toml")));
        assert_eq!(args.settings.get("loop_playback").map(String::as_str), Some("false"));
        assert!(Args::parse(["--config".to_string()].into_iter()).is_err());
    }

    #[test]
    fn app_renders_notifications_sheet() {
        let reels = vec![ReelRecord::sample("scarf")];
        let mut app = App::new(reels, Config::default()).unwrap();

        assert!(app.apply(Command::Nav(NavTarget::Notifications)).unwrap());
        assert!(app.frame(48).contains("Sifarişlər"));

        app.apply(Command::CloseSheet).unwrap();
        assert!(app.frame(48).contains("scarf"));
        assert!(!app.apply(Command::Quit).unwrap());
    }
}
