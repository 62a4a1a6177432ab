//! Cancelable scheduled tasks
//!
//! Replaces raw browser timers. The host advances time; due tasks are popped
//! in due-time order (ties in scheduling order). While a task is being
//! handled, the cursor sits at its due time, so follow-up tasks are timed
//! from when the previous one was due rather than from when the frame landed.

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_ms: u64,
    id: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    /// Current time cursor (ms since scheduler creation)
    now_ms: u64,
    /// Time the host has advanced to
    target_ms: u64,
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            target_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to fire `delay_ms` after the current cursor
    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Scheduled {
            due_ms: self.now_ms + delay_ms,
            id,
            task,
        });
    }

    /// Drop every pending task
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Canceled {} pending task(s)", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the host clock forward. Call [`Scheduler::pop_due`] until it
    /// returns `None` to fire everything that came due.
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.target_ms = self.target_ms.max(self.now_ms) + elapsed_ms;
    }

    /// Pop the earliest task due at or before the advanced time
    pub fn pop_due(&mut self) -> Option<T> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= self.target_ms)
            .min_by_key(|(_, s)| (s.due_ms, s.id))
            .map(|(i, _)| i);

        match idx {
            Some(i) => {
                let scheduled = self.pending.swap_remove(i);
                self.now_ms = scheduled.due_ms;
                Some(scheduled.task)
            }
            None => {
                self.now_ms = self.target_ms;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_all(scheduler: &mut Scheduler<&'static str>) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due() {
            fired.push(task);
        }
        fired
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, "late");
        scheduler.schedule(100, "early");
        scheduler.schedule(100, "early-second");

        scheduler.advance(99);
        assert!(fire_all(&mut scheduler).is_empty());

        scheduler.advance(1);
        assert_eq!(fire_all(&mut scheduler), vec!["early", "early-second"]);

        scheduler.advance(500);
        assert_eq!(fire_all(&mut scheduler), vec!["late"]);
        assert_eq!(scheduler.now_ms(), 600);
    }

    #[test]
    fn test_chained_task_timed_from_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(100, 1u32);
        // One big frame covers both the first task and its follow-up
        scheduler.advance(250);

        let first = scheduler.pop_due();
        assert_eq!(first, Some(1));
        assert_eq!(scheduler.now_ms(), 100);
        scheduler.schedule(100, 2);

        assert_eq!(scheduler.pop_due(), Some(2));
        assert_eq!(scheduler.now_ms(), 200);
        assert_eq!(scheduler.pop_due(), None);
        assert_eq!(scheduler.now_ms(), 250);
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, "a");
        scheduler.schedule(20, "b");
        assert_eq!(scheduler.pending(), 2);
        scheduler.cancel_all();
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(100);
        assert!(fire_all(&mut scheduler).is_empty());
    }
}
