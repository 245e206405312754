//! Proportional scroll linking between the input and output panes.

use serde::{Deserialize, Serialize};

/// Geometry of one scrollable pane, in pixels or rows; only ratios matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPanes {
    pub input: ScrollMetrics,
    pub output: ScrollMetrics,
}

/// Move `to` so it sits at the same relative position as `from`.
pub fn sync_scroll(from: &ScrollMetrics, to: &mut ScrollMetrics) {
    let max_from = match from.max_scroll() {
        m if m == 0.0 || m.is_nan() => 1.0,
        m => m,
    };
    let ratio = from.scroll_top / max_from;
    to.scroll_top = ratio * to.max_scroll();
}

/// Follow an input scroll with the output pane. Returns false when a sync is
/// already in progress (the scroll was caused by the other direction).
pub fn sync_input_to_output(panes: &mut ScrollPanes, lock: &mut bool) -> bool {
    if *lock {
        return false;
    }
    *lock = true;
    sync_scroll(&panes.input, &mut panes.output);
    *lock = false;
    true
}

/// Follow an output scroll with the input pane.
pub fn sync_output_to_input(panes: &mut ScrollPanes, lock: &mut bool) -> bool {
    if *lock {
        return false;
    }
    *lock = true;
    sync_scroll(&panes.output, &mut panes.input);
    *lock = false;
    true
}
