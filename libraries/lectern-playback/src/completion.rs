//! Completion reporting
//!
//! Turns an `Ended` transition into the single externally observable effect
//! of the engine. The reporter keeps no completion history; deduplication
//! across sessions belongs to whoever tracks course progress.

use lectern_core::MaterialId;
use std::fmt;

/// Callback invoked with the identifier of an item that played to its end
pub type CompletionCallback = Box<dyn FnMut(MaterialId)>;

/// Sink for natural end-of-playback notifications
#[derive(Default)]
pub struct CompletionReporter {
    callback: Option<CompletionCallback>,
    reported: u64,
}

impl CompletionReporter {
    pub fn new(callback: impl FnMut(MaterialId) + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
            reported: 0,
        }
    }

    /// Reporter without a callback; completions are only counted
    pub fn silent() -> Self {
        Self::default()
    }

    /// Fire the callback for a finished item
    pub fn report(&mut self, id: MaterialId) {
        self.reported += 1;
        if let Some(callback) = self.callback.as_mut() {
            callback(id);
        }
    }

    /// Number of completions reported so far
    pub fn reported(&self) -> u64 {
        self.reported
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for CompletionReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionReporter")
            .field("has_callback", &self.has_callback())
            .field("reported", &self.reported)
            .finish()
    }
}
