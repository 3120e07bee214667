//! One-shot timers keyed by kind
//!
//! The screen never needs more than one pending timer of each kind, so a
//! timer is just an optional deadline. Arming a slot overwrites whatever
//! was there before; the overwritten deadline is gone and can never fire.

use std::time::Duration;

/// The two timers the screen runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Delay before the egg starts shaking.
    ShakeArm,
    /// Delay before the toast hides itself.
    ToastDismiss,
}

impl TimerKind {
    pub fn name(&self) -> &'static str {
        match self {
            TimerKind::ShakeArm => "shake-arm",
            TimerKind::ToastDismiss => "toast-dismiss",
        }
    }
}

/// A single pending deadline, measured from the screen's time origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSlot {
    kind: TimerKind,
    deadline: Option<Duration>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self { kind, deadline: None }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Start the timer to fire `delay` after `now`, replacing any prior deadline.
    /// A deadline past `Duration::MAX` is clamped there and never fires.
    pub fn arm(&mut self, now: Duration, delay: Duration) -> Duration {
        let deadline = now.saturating_add(delay);
        if let Some(old) = self.deadline.replace(deadline) {
            log::trace!("{} timer re-armed, dropped deadline {:?}", self.kind.name(), old);
        }
        deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Consume the deadline if it has passed. Returns the deadline that fired.
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        match self.deadline {
            Some(at) if at <= now => self.deadline.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_fire() {
        let mut slot = TimerSlot::new(TimerKind::ToastDismiss);
        assert_eq!(slot.deadline(), None);
        slot.arm(Duration::from_secs(1), Duration::from_secs(2));
        assert_eq!(slot.deadline(), Some(Duration::from_secs(3)));
        assert_eq!(slot.take_due(Duration::from_millis(2999)), None);
        assert_eq!(slot.take_due(Duration::from_secs(3)), Some(Duration::from_secs(3)));
        assert_eq!(slot.deadline(), None);
        // fired once only
        assert_eq!(slot.take_due(Duration::from_secs(10)), None);
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut slot = TimerSlot::new(TimerKind::ShakeArm);
        slot.arm(Duration::ZERO, Duration::from_secs(2));
        slot.arm(Duration::from_millis(500), Duration::from_secs(2));
        // the first deadline (2s) is gone
        assert_eq!(slot.take_due(Duration::from_secs(2)), None);
        assert_eq!(slot.take_due(Duration::from_millis(2500)), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_cancel() {
        let mut slot = TimerSlot::new(TimerKind::ShakeArm);
        slot.arm(Duration::ZERO, Duration::from_secs(4));
        slot.cancel();
        assert_eq!(slot.take_due(Duration::from_secs(60)), None);
    }

    #[test]
    fn test_arm_saturates_instead_of_overflowing() {
        let mut slot = TimerSlot::new(TimerKind::ShakeArm);
        let deadline = slot.arm(Duration::from_secs(1), Duration::from_secs(u64::MAX));
        assert_eq!(deadline, Duration::MAX);
        assert_eq!(slot.take_due(Duration::from_secs(u64::MAX)), None);
    }
}
