//! Generation fencing for overlapping refreshes.
//!
//! Every refresh takes a generation number before its request goes out.
//! When the response arrives it may only be rendered if nothing newer has
//! been rendered already, so a slow response cannot overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RefreshFence {
    issued: AtomicU64,
    rendered: AtomicU64,
}

impl RefreshFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next generation number. Generations start at 1.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Claim the render slot for `generation`.
    ///
    /// Returns false when an equal or newer generation was already rendered.
    /// Callers must hold the render target lock across admit and render.
    pub fn admit(&self, generation: u64) -> bool {
        self.rendered.fetch_max(generation, Ordering::SeqCst) < generation
    }

    /// Most recent generation handed out.
    pub fn latest_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Most recent generation rendered.
    pub fn latest_rendered(&self) -> u64 {
        self.rendered.load(Ordering::SeqCst)
    }
}
