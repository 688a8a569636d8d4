//! Per-frame repeating tasks that can be cancelled at any time.
//!
//! A task stays live from [`FrameScheduler::start`] until it is cancelled and
//! is advanced once per rendered frame by [`FrameScheduler::frame`]. Each
//! task is keyed by the thing it animates; starting a task for a key that
//! still has a live one cancels the old one first, so a key never has two
//! generations running at once.

use std::collections::BTreeMap;
use std::fmt;

use iced::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Running totals, useful to check that nothing leaks across relayouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub started: u64,
    pub cancelled: u64,
}

impl SchedulerStats {
    pub fn live(&self) -> u64 {
        self.started - self.cancelled
    }
}

#[derive(Debug)]
struct Task<K> {
    key: K,
    /// Timestamp of the first frame the task saw.
    origin: Option<Instant>,
}

/// One step of a live task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep<K> {
    pub id: TaskId,
    pub key: K,
    /// Time since the task's first frame.
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct FrameScheduler<K> {
    next_id: u64,
    tasks: BTreeMap<TaskId, Task<K>>,
    stats: SchedulerStats,
}

impl<K> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: BTreeMap::new(),
            stats: SchedulerStats::default(),
        }
    }
}

impl<K: Copy + PartialEq + fmt::Debug> FrameScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, key: K) -> TaskId {
        let stale: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.key == key)
            .map(|(id, _)| *id)
            .collect();

        for id in stale {
            self.cancel(id);
        }

        let id = TaskId(self.next_id);
        self.next_id += 1;

        self.tasks.insert(id, Task { key, origin: None });
        self.stats.started += 1;

        log::trace!("started {id} for {key:?}");
        id
    }

    /// Stops a task. Cancelling an unknown or already cancelled task is a
    /// no-op and returns `false`.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if self.tasks.remove(&id).is_some() {
            self.stats.cancelled += 1;
            true
        } else {
            false
        }
    }

    /// Stops every live task, returning how many were stopped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        self.stats.cancelled += count as u64;
        count
    }

    pub fn is_live(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Advances every live task by one frame at `now`.
    pub fn frame(&mut self, now: Instant) -> Vec<FrameStep<K>> {
        self.tasks
            .iter_mut()
            .map(|(id, task)| {
                let origin = *task.origin.get_or_insert(now);

                FrameStep {
                    id: *id,
                    key: task.key,
                    elapsed: now.saturating_duration_since(origin),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.start("a");

        assert!(scheduler.is_live(id));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(!scheduler.is_live(id));
        assert_eq!(scheduler.stats(), SchedulerStats { started: 1, cancelled: 1 });
    }

    #[test]
    fn test_restarting_a_key_replaces_its_task() {
        let mut scheduler = FrameScheduler::new();
        let first = scheduler.start(7);
        let second = scheduler.start(7);

        assert_ne!(first, second);
        assert!(!scheduler.is_live(first));
        assert_eq!(scheduler.live_count(), 1);
        assert_eq!(scheduler.stats().live(), 1);
    }

    #[test]
    fn test_elapsed_counts_from_first_frame() {
        let mut scheduler = FrameScheduler::new();
        scheduler.start('x');

        let t0 = Instant::now();
        let steps = scheduler.frame(t0);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].elapsed, Duration::ZERO);

        let steps = scheduler.frame(t0 + Duration::from_millis(250));
        assert_eq!(steps[0].elapsed, Duration::from_millis(250));
        assert_eq!(steps[0].key, 'x');
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = FrameScheduler::new();
        for key in 0..4 {
            scheduler.start(key);
        }

        assert_eq!(scheduler.cancel_all(), 4);
        assert_eq!(scheduler.cancel_all(), 0);
        assert!(scheduler.frame(Instant::now()).is_empty());
        assert_eq!(scheduler.stats().live(), 0);
    }
}
