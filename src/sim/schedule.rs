//! Single-threaded task scheduler in virtual milliseconds
//!
//! Holds the repeating tick and any one-shot actions (the Slow restoration).
//! The host advances it; nothing here sleeps or spawns threads.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

/// What a task does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Advance the session one step
    Tick,
    /// Put the tick interval back to nominal after a Slow power-up
    RestoreInterval { epoch: u32, token: u32 },
}

/// A task that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TaskId,
    pub due_ms: u64,
    pub task: Task,
}

#[derive(Debug, Clone)]
struct Entry {
    id: TaskId,
    due_ms: u64,
    /// Repeating tasks re-arm with this period
    period_ms: Option<u64>,
    suspended: bool,
    task: Task,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, due_ms: u64, period_ms: Option<u64>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms,
            period_ms,
            suspended: false,
            task,
        });
        id
    }

    /// Fire `task` every `period_ms`, first at `now + period_ms`
    pub fn schedule_repeating(&mut self, period_ms: u64, task: Task) -> TaskId {
        let period_ms = period_ms.max(1);
        self.push(self.now_ms + period_ms, Some(period_ms), task)
    }

    /// Fire `task` once, `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: u64, task: Task) -> TaskId {
        self.push(self.now_ms + delay_ms, None, task)
    }

    /// Change a repeating task's period; the next firing is re-armed from now
    pub fn set_period(&mut self, id: TaskId, period_ms: u64) {
        let now = self.now_ms;
        if let Some(entry) = self.entry_mut(id) {
            let period_ms = period_ms.max(1);
            entry.period_ms = Some(period_ms);
            entry.due_ms = now + period_ms;
        }
    }

    pub fn period_ms(&self, id: TaskId) -> Option<u64> {
        self.entries.iter().find(|e| e.id == id).and_then(|e| e.period_ms)
    }

    /// Stop a task from firing without forgetting it
    pub fn suspend(&mut self, id: TaskId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.suspended = true;
        }
    }

    /// Resume a suspended task; repeating tasks restart a full period from now
    pub fn resume(&mut self, id: TaskId) {
        let now = self.now_ms;
        if let Some(entry) = self.entry_mut(id) {
            if entry.suspended {
                entry.suspended = false;
                if let Some(period) = entry.period_ms {
                    entry.due_ms = now + period;
                }
            }
        }
    }

    /// Drop a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id && !e.suspended)
    }

    /// Earliest due time among live tasks
    pub fn next_due(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| !e.suspended)
            .map(|e| e.due_ms)
            .min()
    }

    /// Pop the earliest task due at or before `until_ms`, advancing the
    /// scheduler's clock to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.suspended && e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id.0))
            .map(|(i, _)| i)?;

        let entry = &self.entries[index];
        let fired = Fired {
            id: entry.id,
            due_ms: entry.due_ms,
            task: entry.task,
        };
        let period_ms = entry.period_ms;
        self.now_ms = self.now_ms.max(fired.due_ms);

        match period_ms {
            Some(period) => self.entries[index].due_ms += period,
            None => {
                let _ = self.entries.remove(index);
            }
        }
        Some(fired)
    }

    /// Move the clock forward once all due tasks have been popped
    pub fn settle(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn entry_mut(&mut self, id: TaskId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(sched: &mut Scheduler, until: u64) -> Vec<(u64, Task)> {
        let mut out = Vec::new();
        while let Some(f) = sched.pop_due(until) {
            out.push((f.due_ms, f.task));
        }
        sched.settle(until);
        out
    }

    #[test]
    fn test_repeating_fires_on_period() {
        let mut sched = Scheduler::new(0);
        let _ = sched.schedule_repeating(100, Task::Tick);
        let fired = drain(&mut sched, 350);
        assert_eq!(fired.iter().map(|f| f.0).collect::<Vec<_>>(), vec![100, 200, 300]);
        assert_eq!(sched.next_due(), Some(400));
    }

    #[test]
    fn test_one_shot_ordering() {
        let mut sched = Scheduler::new(0);
        let _ = sched.schedule_repeating(100, Task::Tick);
        let restore = Task::RestoreInterval { epoch: 0, token: 1 };
        let _ = sched.schedule_once(100, restore);
        let fired = drain(&mut sched, 100);
        assert_eq!(fired, vec![(100, Task::Tick), (100, restore)]);
        assert!(drain(&mut sched, 150).is_empty());
    }

    #[test]
    fn test_suspend_keeps_one_shots() {
        let mut sched = Scheduler::new(0);
        let tick = sched.schedule_repeating(100, Task::Tick);
        let restore = Task::RestoreInterval { epoch: 0, token: 1 };
        let _ = sched.schedule_once(250, restore);
        sched.suspend(tick);
        assert_eq!(drain(&mut sched, 400), vec![(250, restore)]);

        sched.resume(tick);
        assert_eq!(sched.next_due(), Some(500));
    }

    #[test]
    fn test_cancel() {
        let mut sched = Scheduler::new(0);
        let id = sched.schedule_once(50, Task::RestoreInterval { epoch: 0, token: 1 });
        assert!(sched.cancel(id));
        assert!(!sched.cancel(id));
        assert!(drain(&mut sched, 100).is_empty());
    }

    #[test]
    fn test_set_period_rearms_from_now() {
        let mut sched = Scheduler::new(0);
        let tick = sched.schedule_repeating(80, Task::Tick);
        let _ = drain(&mut sched, 80);
        sched.set_period(tick, 128);
        assert_eq!(sched.period_ms(tick), Some(128));
        assert_eq!(sched.next_due(), Some(208));
    }
}
