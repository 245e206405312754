use super::clipboard::{Clipboard, ClipboardError};
use super::defaults::{DEFAULT_APPEND_SLASH, DEFAULT_OUTLINE};
use super::editing;
use super::scroll::{sync_input_to_output, sync_output_to_input, ScrollMetrics, ScrollPanes};
use super::store::KeyValueStore;
use crate::render::{render_with, RenderOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const INPUT_KEY: &str = "outline-tree.input";
pub const SLASH_KEY: &str = "outline-tree.slash";

pub const COPIED_STATUS: &str = "Copied!";

/// Which pane a scroll report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    Input,
    Output,
}

impl Pane {
    pub fn other(self) -> Self {
        match self {
            Pane::Input => Pane::Output,
            Pane::Output => Pane::Input,
        }
    }
}

/// Owns everything the outline editor shows: the raw input, the separator
/// option, the rendered output, a transient status line and the scroll
/// state of both panes. Storage and clipboard are injected.
pub struct UiController<S, C> {
    store: S,
    clipboard: C,
    input: String,
    options: RenderOptions,
    output: String,
    status: Option<String>,
    panes: ScrollPanes,
    scroll_lock: bool,
}

impl<S: KeyValueStore, C: Clipboard> UiController<S, C> {
    pub fn new(store: S, clipboard: C) -> Self {
        Self {
            store,
            clipboard,
            input: String::new(),
            options: RenderOptions::with_slash(DEFAULT_APPEND_SLASH),
            output: String::new(),
            status: None,
            panes: ScrollPanes::default(),
            scroll_lock: false,
        }
    }

    pub fn with_literal_root(mut self, literal_root: bool) -> Self {
        self.options.literal_root = literal_root;
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn append_slash(&self) -> bool {
        self.options.append_slash
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Status messages are shown once; the caller clears them by taking.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    pub fn panes(&self) -> &ScrollPanes {
        &self.panes
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Restore the last session. Missing or blank input falls back to the
    /// example outline; the option is on only when stored as `"true"`.
    pub fn load(&mut self) {
        let saved = match self.store.get(INPUT_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("failed to read saved input: {e}");
                self.status = Some(format!("Could not restore input: {e}"));
                None
            }
        };
        self.input = match saved {
            Some(text) if !text.trim().is_empty() => text,
            _ => DEFAULT_OUTLINE.to_string(),
        };

        self.options.append_slash = match self.store.get(SLASH_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!("failed to read saved option: {e}");
                DEFAULT_APPEND_SLASH
            }
        };

        self.update();
    }

    /// Re-render and persist. A storage failure leaves a status message but
    /// the output is always refreshed.
    pub fn update(&mut self) {
        self.output = render_with(&self.input, &self.options);
        debug!(
            input_bytes = self.input.len(),
            output_lines = self.output.lines().count(),
            append_slash = self.options.append_slash,
            "rendered outline"
        );

        let slash = if self.options.append_slash { "true" } else { "false" };
        let saved = self
            .store
            .set(INPUT_KEY, &self.input)
            .and_then(|()| self.store.set(SLASH_KEY, slash));
        if let Err(e) = saved {
            warn!("failed to save state: {e}");
            self.status = Some(format!("Could not save state: {e}"));
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.update();
    }

    pub fn set_append_slash(&mut self, append_slash: bool) {
        self.options.append_slash = append_slash;
        self.update();
    }

    pub fn toggle_append_slash(&mut self) {
        self.set_append_slash(!self.options.append_slash);
    }

    /// Add one raw line to the end of the input, leading whitespace intact.
    pub fn append_line(&mut self, line: &str) {
        if !self.input.is_empty() && !self.input.ends_with('\n') {
            self.input.push('\n');
        }
        self.input.push_str(line);
        self.update();
    }

    /// Enter-key auto-indent at `cursor`; returns the new cursor.
    pub fn insert_newline(&mut self, cursor: usize) -> usize {
        let (text, cursor) = editing::insert_newline(&self.input, cursor);
        self.input = text;
        self.update();
        cursor
    }

    pub fn copy(&mut self) -> Result<(), ClipboardError> {
        match self.clipboard.write(&self.output) {
            Ok(()) => {
                self.status = Some(COPIED_STATUS.to_string());
                Ok(())
            }
            Err(e) => {
                warn!("copy failed: {e}");
                self.status = Some(format!("Copy failed: {e}"));
                Err(e)
            }
        }
    }

    /// Forget the saved session and go back to the example outline.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("failed to clear saved state: {e}");
            self.status = Some(format!("Could not clear saved state: {e}"));
        }
        self.input = DEFAULT_OUTLINE.to_string();
        self.options.append_slash = DEFAULT_APPEND_SLASH;
        self.update();
    }

    pub fn set_metrics(&mut self, pane: Pane, metrics: ScrollMetrics) {
        match pane {
            Pane::Input => self.panes.input = metrics,
            Pane::Output => self.panes.output = metrics,
        }
    }

    /// Record a scroll of `pane` and drag the other pane along. Returns the
    /// other pane's new top, or `None` when the report was an echo of a
    /// sync already in progress.
    pub fn scroll(&mut self, pane: Pane, top: f64) -> Option<f64> {
        match pane {
            Pane::Input => {
                self.panes.input.scroll_top = top;
                sync_input_to_output(&mut self.panes, &mut self.scroll_lock)
                    .then_some(self.panes.output.scroll_top)
            }
            Pane::Output => {
                self.panes.output.scroll_top = top;
                sync_output_to_input(&mut self.panes, &mut self.scroll_lock)
                    .then_some(self.panes.input.scroll_top)
            }
        }
    }
}
