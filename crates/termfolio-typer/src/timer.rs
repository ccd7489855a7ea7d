//! Single pending timer, advanced by host ticks.

/// At most one pending deadline, measured in milliseconds from now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerSlot {
    remaining_ms: Option<u32>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the slot to fire after `delay_ms`, replacing any pending
    /// deadline.
    pub fn arm(&mut self, delay_ms: u32) {
        self.remaining_ms = Some(delay_ms);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining_ms.is_some()
    }

    /// Milliseconds until the slot fires.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Advance time by `dt_ms`. When the deadline passes the slot disarms
    /// and returns the unused part of `dt_ms`.
    pub fn advance(&mut self, dt_ms: u32) -> Option<u32> {
        let remaining = self.remaining_ms?;
        if dt_ms >= remaining {
            self.remaining_ms = None;
            Some(dt_ms - remaining)
        } else {
            self.remaining_ms = Some(remaining - dt_ms);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_never_fires() {
        let mut slot = TimerSlot::new();
        assert!(!slot.is_armed());
        assert_eq!(slot.advance(1_000), None);
    }

    #[test]
    fn fires_once_with_leftover() {
        let mut slot = TimerSlot::new();
        slot.arm(10);
        assert_eq!(slot.advance(4), None);
        assert_eq!(slot.remaining_ms(), Some(6));
        assert_eq!(slot.advance(9), Some(3));
        assert!(!slot.is_armed());
        assert_eq!(slot.advance(100), None);
    }

    #[test]
    fn exact_deadline_fires() {
        let mut slot = TimerSlot::new();
        slot.arm(5);
        assert_eq!(slot.advance(5), Some(0));
    }

    #[test]
    fn cancel_disarms() {
        let mut slot = TimerSlot::new();
        slot.arm(5);
        slot.cancel();
        assert_eq!(slot.advance(10), None);
    }

    #[test]
    fn rearm_replaces_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(100);
        slot.arm(2);
        assert_eq!(slot.advance(2), Some(0));
    }
}
