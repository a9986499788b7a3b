//! Path utilities for configuration and trace files.

use std::env;
use std::path::PathBuf;

/// Returns the data directory for reelfeed files (trace export).
///
/// Resolution order: `$XDG_DATA_HOME/reelfeed`, then
/// `$HOME/.local/share/reelfeed`, then `<temp dir>/reelfeed`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    let base = env::var_os("XDG_DATA_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env::var_os("HOME")
                .filter(|home| !home.is_empty())
                .map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .unwrap_or_else(env::temp_dir);

    base.join("reelfeed")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or any path when `HOME` is unset, are returned
/// unchanged.
///
/// ```
/// use reelfeed::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~"), "relative/~");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) else {
        return path.to_string();
    };
    let home = home.to_string_lossy();

    if path == "~" {
        home.into_owned()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_crate_name() {
        assert!(get_data_dir().ends_with("reelfeed"));
    }

    #[test]
    fn tilde_expands_against_home() {
        if let Some(home) = env::var_os("HOME").filter(|home| !home.is_empty()) {
            let home = home.to_string_lossy().trim_end_matches('/').to_string();
            assert_eq!(expand_tilde("~/themes/a.toml"), format!("{home}/themes/a.toml"));
        }
    }
}
