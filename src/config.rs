//! Resolved runtime settings shared by the CLI modes.

use std::path::PathBuf;

const STATE_FILE_NAME: &str = "state.json";
const FALLBACK_STATE_PATH: &str = ".outline-tree.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the last input and option.
    pub state_path: PathBuf,
    pub append_slash: bool,
    pub literal_root: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            append_slash: false,
            literal_root: false,
        }
    }
}

/// `~/.config/outline-tree/state.json`, or a dotfile in the working
/// directory when no home directory is known.
pub fn default_state_path() -> PathBuf {
    state_path_under(dirs::home_dir())
}

fn state_path_under(home: Option<PathBuf>) -> PathBuf {
    home.map(|h| h.join(".config").join("outline-tree").join(STATE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STATE_PATH))
}
