//! Deadline-ordered queue of scheduled tasks
//!
//! Tasks are keyed by `(deadline, token)`. Tokens are handed out in
//! increasing order, so tasks sharing a deadline fire in the order they were
//! scheduled.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(pub u64);

/// A queue of tasks waiting for their deadline
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: BTreeMap<(Duration, TimerToken), T>,
    /// Reverse lookup so tokens can be cancelled without a scan
    deadlines: BTreeMap<TimerToken, Duration>,
    next_token: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            deadlines: BTreeMap::new(),
            next_token: 0,
        }
    }

    /// Schedule `task` to fire once the clock reaches `deadline`
    pub fn schedule(&mut self, deadline: Duration, task: T) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending.insert((deadline, token), task);
        self.deadlines.insert(token, deadline);
        token
    }

    /// Drop a scheduled task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, token: TimerToken) -> Option<T> {
        let deadline = self.deadlines.remove(&token)?;
        self.pending.remove(&(deadline, token))
    }

    /// Pop the earliest task whose deadline is at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerToken, T)> {
        let (&(deadline, token), _) = self.pending.first_key_value()?;
        if deadline > now {
            return None;
        }
        let task = self.pending.remove(&(deadline, token))?;
        self.deadlines.remove(&token);
        Some((deadline, token, task))
    }

    /// The earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn is_scheduled(&self, token: TimerToken) -> bool {
        self.deadlines.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
