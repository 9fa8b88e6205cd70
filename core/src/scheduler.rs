use alloc::collections::BTreeMap;
use web_time::Instant;

use crate::*;

/// Handle for cancelling a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId {
    due: Instant,
    seq: u64,
}

impl TaskId {
    pub fn due(&self) -> Instant {
        self.due
    }
}

/// A task taken off the queue because its fire time was reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    pub due: Instant,
    pub round: RoundId,
    pub task: T,
}

#[derive(Clone, Debug)]
struct Scheduled<T> {
    round: RoundId,
    task: T,
}

/// Single threaded queue of deferred callbacks. Tasks come out ordered by fire time, tasks with
/// the same fire time in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<TaskId, Scheduled<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, round: RoundId, task: T) -> TaskId {
        let id = TaskId {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(id, Scheduled { round, task });
        id
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.queue.remove(&id).is_some()
    }

    /// Drops every pending task belonging to `round`, returns how many were dropped.
    pub fn cancel_round(&mut self, round: RoundId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, scheduled| scheduled.round != round);
        before - self.queue.len()
    }

    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<T>> {
        let entry = self.queue.first_entry()?;
        if entry.key().due > now {
            return None;
        }
        let (id, Scheduled { round, task }) = entry.remove_entry();
        Some(Fired {
            due: id.due,
            round,
            task,
        })
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.keys().next().map(TaskId::due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
