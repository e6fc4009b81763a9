use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use shared_resources::notification::LiftId;

/// Phase deadlines of the lifts on a virtual clock. Entries due at the same
/// instant fire in the order they were started.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    deadlines: BinaryHeap<Reverse<(Duration, u64, LiftId)>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn timer_start(&mut self, lift_id: LiftId, duration: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.deadlines.push(Reverse((self.now + duration, seq, lift_id)));
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadlines.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    /// Pops the earliest entry if it is due at or before `limit`, moving the
    /// clock to its deadline.
    pub fn pop_due(&mut self, limit: Duration) -> Option<LiftId> {
        match self.next_deadline() {
            Some(deadline) if deadline <= limit => {
                let Reverse((deadline, _, lift_id)) = self.deadlines.pop()?;
                self.now = deadline;
                Some(lift_id)
            }
            _ => None,
        }
    }

    /// Moves the clock forward to `time`. Never moves it backwards.
    pub fn set_now(&mut self, time: Duration) {
        if time > self.now {
            self.now = time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.timer_start(1, Duration::from_millis(300));
        timers.timer_start(2, Duration::from_millis(100));
        timers.timer_start(3, Duration::from_millis(200));
        let limit = Duration::from_secs(1);
        assert_eq!(timers.pop_due(limit), Some(2));
        assert_eq!(timers.now(), Duration::from_millis(100));
        assert_eq!(timers.pop_due(limit), Some(3));
        assert_eq!(timers.pop_due(limit), Some(1));
        assert_eq!(timers.pop_due(limit), None);
    }

    #[test]
    fn equal_deadlines_fire_in_start_order() {
        let mut timers = TimerQueue::new();
        timers.timer_start(2, Duration::from_millis(50));
        timers.timer_start(1, Duration::from_millis(50));
        assert_eq!(timers.pop_due(Duration::from_millis(50)), Some(2));
        assert_eq!(timers.pop_due(Duration::from_millis(50)), Some(1));
    }

    #[test]
    fn entries_past_limit_stay_queued() {
        let mut timers = TimerQueue::new();
        timers.timer_start(1, Duration::from_millis(500));
        assert_eq!(timers.pop_due(Duration::from_millis(499)), None);
        assert_eq!(timers.now(), Duration::ZERO);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut timers = TimerQueue::new();
        timers.set_now(Duration::from_millis(10));
        timers.set_now(Duration::from_millis(5));
        assert_eq!(timers.now(), Duration::from_millis(10));
    }
}
