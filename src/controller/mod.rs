mod clipboard;
mod context;
mod defaults;
mod editing;
mod scroll;
mod store;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use context::{Pane, UiController, COPIED_STATUS, INPUT_KEY, SLASH_KEY};
pub use defaults::{DEFAULT_APPEND_SLASH, DEFAULT_OUTLINE};
pub use editing::insert_newline;
pub use scroll::{sync_input_to_output, sync_output_to_input, sync_scroll, ScrollMetrics, ScrollPanes};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

use crate::config::Config;

/// Controller for an interactive session: state restored from the configured
/// file, with `--slash` forcing the separator on.
pub fn open_session(config: &Config) -> UiController<JsonFileStore, SystemClipboard> {
    let mut ui = UiController::new(JsonFileStore::new(&config.state_path), SystemClipboard)
        .with_literal_root(config.literal_root);
    ui.load();
    if config.append_slash && !ui.append_slash() {
        ui.set_append_slash(true);
    }
    ui
}
