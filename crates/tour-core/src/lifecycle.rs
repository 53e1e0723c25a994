//! Teardown bookkeeping for listeners, frame callbacks and GPU resources.
//!
//! Each subscription registers a cancel action. `teardown` runs every action
//! exactly once, newest first; calling it again, or from inside one of the
//! actions, does nothing.

type Cancel = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct Lifecycle {
    subscriptions: Vec<(&'static str, Cancel)>,
    torn_down: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cancel action. After teardown the action runs immediately so
    /// nothing outlives the instance that created it.
    pub fn register(&mut self, label: &'static str, cancel: impl FnOnce() + 'static) {
        if self.torn_down {
            log::warn!("[lifecycle] '{label}' registered after teardown; cancelling now");
            cancel();
            return;
        }
        self.subscriptions.push((label, Box::new(cancel)));
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Cancel everything; returns how many actions ran.
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        let subscriptions = std::mem::take(&mut self.subscriptions);
        let count = subscriptions.len();
        for (label, cancel) in subscriptions.into_iter().rev() {
            log::debug!("[lifecycle] cancelling '{label}'");
            cancel();
        }
        log::info!("[lifecycle] teardown complete ({count} subscriptions)");
        count
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.teardown();
    }
}
