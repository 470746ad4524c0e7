//! Platform abstraction layer
//!
//! Handles host concerns around the pure simulation:
//! - Wall-clock time
//! - Driving the session from a [`Scheduler`]
//! - Recording finished games to a [`ScoreSink`]

use std::time::{SystemTime, UNIX_EPOCH};

use crate::highscores::Scoreboard;
use crate::persistence::{ScoreRecord, ScoreSink};
use crate::settings::effective_name;
use crate::sim::{Direction, GameEvent, GameSession, Scheduler, Snapshot, Task, TaskId};

/// Milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Binds a session to a scheduler and a score sink
pub struct Driver<S: ScoreSink> {
    session: GameSession,
    scheduler: Scheduler,
    sink: S,
    player_name: String,
    tick_task: TaskId,
    /// Outstanding one-shot restorations
    pending: Vec<TaskId>,
    snapshot: Snapshot,
}

impl<S: ScoreSink> Driver<S> {
    /// Arm the repeating tick at the session's interval, starting from `now_ms`
    pub fn new(session: GameSession, sink: S, player_name: Option<&str>, now_ms: u64) -> Self {
        let mut scheduler = Scheduler::new(now_ms);
        let tick_task = scheduler.schedule_repeating(session.tick_delay_ms(), Task::Tick);
        let snapshot = session.snapshot(now_ms);
        Self {
            session,
            scheduler,
            sink,
            player_name: effective_name(player_name),
            tick_task,
            pending: Vec::new(),
            snapshot,
        }
    }

    /// Fire every task due up to `now_ms` and return the latest snapshot
    pub fn advance_to(&mut self, now_ms: u64) -> &Snapshot {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.task {
                Task::Tick => {
                    self.snapshot = self.session.tick(fired.due_ms);
                }
                Task::RestoreInterval { epoch, token } => {
                    self.pending.retain(|id| *id != fired.id);
                    let _ = self.session.restore_interval(epoch, token);
                }
            }
            self.handle_events();
        }
        self.scheduler.settle(now_ms);
        &self.snapshot
    }

    /// Due time of the next scheduled task
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn turn(&mut self, dir: Direction) {
        self.session.turn(dir);
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
        self.handle_events();
        self.snapshot = self.session.snapshot(self.scheduler.now_ms());
    }

    pub fn restart(&mut self) {
        self.session.restart(self.scheduler.now_ms());
        self.handle_events();
        self.snapshot = self.session.snapshot(self.scheduler.now_ms());
    }

    fn handle_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::IntervalChanged { delay_ms } => {
                    self.scheduler.set_period(self.tick_task, delay_ms);
                }
                GameEvent::RestoreScheduled {
                    delay_ms,
                    epoch,
                    token,
                } => {
                    let id = self
                        .scheduler
                        .schedule_once(delay_ms, Task::RestoreInterval { epoch, token });
                    self.pending.push(id);
                }
                GameEvent::Paused => self.scheduler.suspend(self.tick_task),
                GameEvent::Resumed => self.scheduler.resume(self.tick_task),
                GameEvent::Restarted { .. } => {
                    for id in self.pending.drain(..) {
                        let _ = self.scheduler.cancel(id);
                    }
                    self.scheduler.resume(self.tick_task);
                }
                GameEvent::GameOver { score, .. } => {
                    self.scheduler.suspend(self.tick_task);
                    self.record_score(score);
                }
                _ => {}
            }
        }
    }

    /// One write per finished game; failures are logged, never retried
    fn record_score(&mut self, score: u64) {
        let record = ScoreRecord::new(now_ms(), &self.player_name, score);
        if let Err(e) = self.sink.append(&record) {
            log::error!("Failed to save score {} for {}: {}", score, record.name, e);
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::load(&self.sink)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_scheduled(self.tick_task)
    }
}
