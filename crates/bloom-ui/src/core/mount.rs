//! Mount tracking for controllers.
//!
//! A controller owns a [`MountHandle`]; views clone it and call
//! [`MountHandle::unmount`] when they go away. Controllers check the flag after
//! every await and drop late results instead of touching state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable flag shared between a controller and its owner.
#[derive(Clone, Debug)]
pub struct MountHandle {
    mounted: Arc<AtomicBool>,
}

impl MountHandle {
    /// New handle in the mounted state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the owner is still mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Mark the owner as gone. Idempotent.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}

impl Default for MountHandle {
    fn default() -> Self {
        Self::new()
    }
}
