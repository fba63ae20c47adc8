//! Loading indicator shared between the UI loop and fetch tasks
//!
//! A single visibility flag. There is no reference counting: overlapping
//! fetches leave it in whatever state the last writer chose.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle to the shared loading flag; clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    visible: Arc<AtomicBool>,
}

impl LoadingIndicator {
    /// Creates a hidden indicator
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Shows the indicator until the returned guard is dropped
    pub fn acquire(&self) -> LoadingGuard {
        self.set_loading(true);
        LoadingGuard {
            indicator: self.clone(),
        }
    }
}

/// Hides the indicator when dropped
#[derive(Debug)]
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.set_loading(false);
    }
}
