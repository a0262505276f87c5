//! Deferred tasks measured in simulation ticks
//!
//! Every task is stamped with the round that scheduled it; tasks from an
//! earlier round are dropped instead of fired.

use super::bubble::BubbleId;

/// Work to run once its delay has elapsed
#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    /// Speak the target word
    Speak { text: String, lang: String },
    /// Drop a popped bubble's view after its animation
    RemoveView { id: BubbleId },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_tick: u64,
    round_id: u32,
    task: TimerTask,
}

/// Pending deferred tasks, ordered by scheduling time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire `delay` ticks after `now`
    ///
    /// A new `Speak` replaces any `Speak` still waiting.
    pub fn schedule(&mut self, now: u64, delay: u32, round_id: u32, task: TimerTask) {
        if matches!(task, TimerTask::Speak { .. }) {
            self.cancel_speech();
        }
        self.pending.push(Scheduled {
            due_tick: now + u64::from(delay),
            round_id,
            task,
        });
    }

    /// Remove and return tasks due at `now` that belong to `round_id`
    ///
    /// Due tasks from other rounds are discarded.
    pub fn take_due(&mut self, now: u64, round_id: u32) -> Vec<TimerTask> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.due_tick <= now);
        self.pending = pending;
        due.into_iter()
            .filter(|s| {
                let current = s.round_id == round_id;
                if !current {
                    log::debug!("Dropping stale timer from round {}", s.round_id);
                }
                current
            })
            .map(|s| s.task)
            .collect()
    }

    pub fn cancel_speech(&mut self) {
        self.pending
            .retain(|s| !matches!(s.task, TimerTask::Speak { .. }));
    }

    /// Cancel everything, returning what was pending
    pub fn cancel_all(&mut self) -> Vec<TimerTask> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|s| s.task)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
