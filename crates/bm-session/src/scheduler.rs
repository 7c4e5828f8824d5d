//! Cancellable one-shot and repeating timers.
//!
//! Nothing runs on its own: the owner asks for the tasks that are due at a
//! given time and handles them. Repeating tasks that missed several periods
//! fire once and resume on their original cadence.

use bm_core::SessionId;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Work a timer can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Show the next question of a session after a correct answer.
    Advance {
        /// The session the advance belongs to.
        session: SessionId,
        /// Index of the question to show next.
        next_index: usize,
    },
    /// Refresh the total-session clock display.
    TotalClock,
    /// Refresh the per-question clock display.
    QuestionClock,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TaskId,
    due_ms: u64,
    every_ms: Option<u64>,
    task: TimerTask,
}

/// A set of pending timers.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay_ms` after `now_ms`.
    pub fn once(&mut self, now_ms: u64, delay_ms: u64, task: TimerTask) -> TaskId {
        self.push(now_ms + delay_ms, None, task)
    }

    /// Run `task` every `interval_ms`, first at `now_ms + interval_ms`.
    pub fn every(&mut self, now_ms: u64, interval_ms: u64, task: TimerTask) -> TaskId {
        let interval = interval_ms.max(1);
        self.push(now_ms + interval, Some(interval), task)
    }

    /// Cancel a task. Returns true if it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() < before
    }

    /// Cancel every task.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Whether a task is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// When a pending task is next due.
    pub fn due_at(&self, id: TaskId) -> Option<u64> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.due_ms)
    }

    /// The earliest due time across all tasks.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Collect the tasks due at `now_ms`, earliest first.
    ///
    /// One-shot tasks are removed; repeating tasks are rescheduled past
    /// `now_ms`.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TimerTask> {
        let mut due: Vec<(u64, TaskId, TimerTask)> = self
            .timers
            .iter()
            .filter(|t| t.due_ms <= now_ms)
            .map(|t| (t.due_ms, t.id, t.task))
            .collect();
        due.sort_by_key(|(at, id, _)| (*at, id.0));

        self.timers.retain_mut(|t| {
            if t.due_ms > now_ms {
                return true;
            }
            match t.every_ms {
                Some(every) => {
                    let missed = (now_ms - t.due_ms) / every;
                    t.due_ms += every * (missed + 1);
                    true
                }
                None => false,
            }
        });

        due.into_iter().map(|(_, _, task)| task).collect()
    }

    fn push(&mut self, due_ms: u64, every_ms: Option<u64>, task: TimerTask) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            due_ms,
            every_ms,
            task,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_fires_once() {
        let mut s = Scheduler::new();
        s.once(0, 2000, TimerTask::TotalClock);
        assert!(s.take_due(1999).is_empty());
        assert_eq!(s.take_due(2000), vec![TimerTask::TotalClock]);
        assert!(s.take_due(5000).is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn every_repeats_and_coalesces() {
        let mut s = Scheduler::new();
        let id = s.every(0, 100, TimerTask::QuestionClock);
        assert_eq!(s.take_due(100).len(), 1);
        assert_eq!(s.due_at(id), Some(200));
        // Missed 200..=450: fires once, then resumes at 500.
        assert_eq!(s.take_due(450).len(), 1);
        assert_eq!(s.due_at(id), Some(500));
    }

    #[test]
    fn cancel_removes_task() {
        let mut s = Scheduler::new();
        let id = s.every(0, 1000, TimerTask::TotalClock);
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.take_due(10_000).is_empty());
    }

    #[test]
    fn due_tasks_in_time_order() {
        let mut s = Scheduler::new();
        s.once(0, 300, TimerTask::QuestionClock);
        s.once(0, 100, TimerTask::TotalClock);
        assert_eq!(
            s.take_due(300),
            vec![TimerTask::TotalClock, TimerTask::QuestionClock]
        );
    }

    #[test]
    fn next_due_is_earliest() {
        let mut s = Scheduler::new();
        assert_eq!(s.next_due(), None);
        s.once(10, 50, TimerTask::TotalClock);
        s.every(10, 20, TimerTask::QuestionClock);
        assert_eq!(s.next_due(), Some(30));
        s.clear();
        assert_eq!(s.len(), 0);
    }
}
