//! Animation scheduler
//!
//! Keeps track of started animations so they can be disposed individually
//! or all at once (when a view is torn down, for example).

use crate::animation::{Animation, AnimationHandle};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct AnimationId;
}

/// Registry of running animations
pub struct AnimationScheduler {
    running: SlotMap<AnimationId, AnimationHandle>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            running: SlotMap::with_key(),
        }
    }

    /// Start `animation` on the current tokio runtime and track it
    pub fn start(&mut self, animation: &Animation) -> AnimationId {
        self.running.insert(animation.start())
    }

    /// Track an animation that was started elsewhere
    pub fn track(&mut self, handle: AnimationHandle) -> AnimationId {
        self.running.insert(handle)
    }

    /// Stop tracking an animation without cancelling it
    pub fn release(&mut self, id: AnimationId) -> Option<AnimationHandle> {
        self.running.remove(id)
    }

    /// Cancel one animation
    ///
    /// Returns `false` if the id is unknown (already disposed or pruned).
    pub fn dispose(&mut self, id: AnimationId) -> bool {
        match self.running.remove(id) {
            Some(handle) => {
                handle.dispose();
                true
            }
            None => false,
        }
    }

    /// Cancel every tracked animation
    pub fn dispose_all(&mut self) {
        let count = self.running.len();
        for (_, handle) in self.running.drain() {
            handle.dispose();
        }
        if count > 0 {
            tracing::debug!(count, "disposed all animations");
        }
    }

    /// Forget animations that have finished; returns how many were removed
    pub fn prune_finished(&mut self) -> usize {
        let before = self.running.len();
        self.running.retain(|_, handle| !handle.is_finished());
        before - self.running.len()
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running
            .get(id)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Check if any tracked animation is still running
    pub fn has_active_animations(&self) -> bool {
        self.running.values().any(|handle| !handle.is_finished())
    }

    /// Number of tracked animations that are still running
    pub fn active_count(&self) -> usize {
        self.running
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
