//! Manual navigation detection.
//!
//! Orbit controls report a change both when the user drags the camera and
//! when a transition moves it. The arbiter separates the two: changes during
//! an animation are ignored, changes shortly after one ends are treated as
//! controls settling, and anything else is debounced before being reported
//! as a manual interaction.
//!
//! Time is passed in by the caller, so tests can walk a synthetic timeline.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Default quiet period after an animation ends during which control
/// changes are not treated as user input.
pub const DEFAULT_SETTLE_AFTER_ANIMATION: Duration = Duration::from_millis(300);

/// Default debounce delay before reporting a manual interaction.
pub const DEFAULT_INTERACTION_DEBOUNCE: Duration = Duration::from_millis(200);

/// Configuration for interaction arbitration.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    /// Changes must arrive more than this long after the last animation ended.
    pub settle_after_animation: Duration,

    /// Delay between the last accepted change and the notification.
    pub debounce: Duration,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            settle_after_animation: DEFAULT_SETTLE_AFTER_ANIMATION,
            debounce: DEFAULT_INTERACTION_DEBOUNCE,
        }
    }
}

/// A restartable one-shot deadline.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Create a disarmed timer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm the timer to fire `delay` after `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` once when `now` has reached the deadline, disarming the timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Decides when manual navigation should reopen the zoom gate.
#[derive(Debug, Clone)]
pub struct InteractionArbiter {
    config: InteractionConfig,
    timer: DebounceTimer,
    last_animation_end: Option<Instant>,
}

impl InteractionArbiter {
    /// Create an arbiter with the given configuration.
    pub fn new(config: InteractionConfig) -> Self {
        let timer = DebounceTimer::new(config.debounce);
        Self {
            config,
            timer,
            last_animation_end: None,
        }
    }

    /// Handle a "navigation controls changed" signal.
    ///
    /// # Returns
    ///
    /// `true` if the change (re)armed the debounce timer.
    pub fn on_manual_change(&mut self, now: Instant, animating: bool) -> bool {
        if animating {
            trace!("Control change during animation ignored");
            return false;
        }

        let settled = self.last_animation_end.map_or(true, |ended| {
            now.saturating_duration_since(ended) > self.config.settle_after_animation
        });
        if !settled {
            trace!("Control change while settling after animation ignored");
            return false;
        }

        self.timer.arm(now);
        true
    }

    /// Record when the last animation finished.
    pub fn on_animation_finished(&mut self, at: Instant) {
        self.last_animation_end = Some(at);
    }

    /// Check the debounce timer.
    ///
    /// # Returns
    ///
    /// `true` if a manual interaction should be reported now. A timer that
    /// expires while an animation is running is dropped.
    pub fn poll(&mut self, now: Instant, animating: bool) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        if animating {
            trace!("Interaction debounce expired during animation, dropped");
            return false;
        }

        debug!("Manual interaction detected");
        true
    }

    /// Whether a notification is pending.
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Get the current configuration.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }
}

impl Default for InteractionArbiter {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}
