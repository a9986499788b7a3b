//! Reel domain model.
//!
//! A [`ReelRecord`] is one short-form video with its seller identity, product
//! price and engagement counts. Records are supplied by an external data source
//! and are never mutated by the player.

use super::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Currency sign used in front of reel prices.
pub const CURRENCY_SIGN: char = '₼';

/// A single short-form video feed item with commerce metadata.
///
/// All fields are expected to be present for a renderable reel. The playback
/// controller performs no validation on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelRecord {
    /// Media source URL.
    pub url: String,
    /// Poster image shown while the reel is paused.
    pub thumbnail: String,
    /// Seller avatar image.
    pub avatar: String,
    /// Seller display name.
    pub username: String,
    /// Product title.
    pub title: String,
    /// Product price, formatted with [`ReelRecord::price_text`].
    pub price: f64,
    /// Like count.
    pub likes: u64,
    /// Comment count.
    pub comments: u64,
}

impl ReelRecord {
    /// Returns the price as shown on the reel overlay.
    ///
    /// Whole amounts are printed without a fractional part.
    ///
    /// ```
    /// use reelfeed::ReelRecord;
    ///
    /// let mut reel = ReelRecord::sample("a");
    /// reel.price = 45.0;
    /// assert_eq!(reel.price_text(), "₼45");
    /// reel.price = 12.5;
    /// assert_eq!(reel.price_text(), "₼12.5");
    /// ```
    #[must_use]
    pub fn price_text(&self) -> String {
        format!("{CURRENCY_SIGN}{}", self.price)
    }

    /// Builds a placeholder reel keyed by `name`, useful for demos and tests.
    #[must_use]
    pub fn sample(name: &str) -> Self {
        Self {
            url: format!("https://cdn.example.com/reels/{name}.mp4"),
            thumbnail: format!("https://cdn.example.com/reels/{name}.jpg"),
            avatar: format!("https://cdn.example.com/avatars/{name}.png"),
            username: name.to_string(),
            title: format!("{name} listing"),
            price: 10.0,
            likes: 0,
            comments: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReelFile {
    #[serde(default)]
    reels: Vec<ReelRecord>,
}

/// Loads an ordered reel list from a TOML (`[[reels]]`) or JSON file.
///
/// JSON files may hold either a bare array or an object with a `reels` array.
///
/// # Errors
///
/// Returns [`ReelFeedError::Io`](super::ReelFeedError::Io) if the file cannot be
/// read and [`ReelFeedError::Parse`](super::ReelFeedError::Parse) if it cannot be
/// decoded.
pub fn load_reels(path: &Path) -> Result<Vec<ReelRecord>> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let reels = if is_json {
        if content.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<ReelRecord>>(&content)?
        } else {
            serde_json::from_str::<ReelFile>(&content)?.reels
        }
    } else {
        toml::from_str::<ReelFile>(&content)?.reels
    };

    tracing::debug!(path = %path.display(), count = reels.len(), "loaded reels");
    Ok(reels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn price_text_drops_trailing_zero_fraction() {
        let mut reel = ReelRecord::sample("x");
        reel.price = 1200.0;
        assert_eq!(reel.price_text(), "₼1200");
        reel.price = 0.99;
        assert_eq!(reel.price_text(), "₼0.99");
    }

    #[test]
    fn loads_toml_reel_list() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[[reels]]
url = "a.mp4"
thumbnail = "a.jpg"
avatar = "a.png"
username = "aysel"
title = "Leather bag"
price = 45
likes = 120
comments = 8
"#
        )
        .unwrap();

        let reels = load_reels(file.path()).unwrap();
        assert_eq!(reels.len(), 1);
        assert_eq!(reels[0].username, "aysel");
        assert_eq!(reels[0].price_text(), "₼45");
    }

    #[test]
    fn loads_bare_json_array() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let reels = vec![ReelRecord::sample("a"), ReelRecord::sample("b")];
        write!(file, "{}", serde_json::to_string(&reels).unwrap()).unwrap();

        let loaded = load_reels(file.path()).unwrap();
        assert_eq!(loaded, reels);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[[reels]]\nurl = 5").unwrap();

        let err = load_reels(file.path()).unwrap_err();
        assert!(matches!(err, crate::ReelFeedError::Parse(_)));
    }
}
