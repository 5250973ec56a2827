use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifetime of one rendered view. Results that arrive after the scope is
/// dropped (or closed) must not be applied to the view's state.
pub struct ViewScope {
    live: Arc<AtomicBool>,
}

/// Cheap handle checked by controllers before applying a fetch result.
#[derive(Clone)]
pub struct ScopeGuard {
    live: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        ViewScope {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn guard(&self) -> ScopeGuard {
        ScopeGuard {
            live: self.live.clone(),
        }
    }

    pub fn close(&self) {
        self.live.store(false, Ordering::Release);
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.close();
    }
}

impl ScopeGuard {
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}
