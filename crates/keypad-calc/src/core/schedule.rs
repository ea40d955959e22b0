//! Delayed annotation clearing
//!
//! A completed evaluation leaves its trace (`"5 + 3 ="`) on screen for a
//! fixed delay. The delay runs on a logical millisecond clock that the host
//! advances, so nothing here spawns timers or threads.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Whether later activity cancels a scheduled annotation clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationClearPolicy {
    /// Fires unconditionally and blanks whatever annotation is showing,
    /// even one written after the evaluation that scheduled it
    #[default]
    Detached,
    /// Fires only if the annotation is unchanged since scheduling
    Superseded,
}

impl std::str::FromStr for AnnotationClearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detached" => Ok(Self::Detached),
            "superseded" => Ok(Self::Superseded),
            other => Err(format!("unknown annotation policy: {other}")),
        }
    }
}

/// A pending annotation clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledClear {
    /// Logical time at which the clear fires
    pub due_ms: u64,
    /// Annotation revision current when the clear was scheduled
    pub revision: u64,
}

/// Queue of annotation clears ordered by due time
#[derive(Debug, Clone)]
pub struct AnnotationScheduler {
    policy: AnnotationClearPolicy,
    delay_ms: u64,
    now_ms: u64,
    pending: VecDeque<ScheduledClear>,
}

impl Default for AnnotationScheduler {
    fn default() -> Self {
        Self::new(AnnotationClearPolicy::default(), Self::DEFAULT_DELAY)
    }
}

impl AnnotationScheduler {
    /// Delay between an evaluation and the clearing of its trace
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    /// Creates a scheduler with the given policy and delay
    #[must_use]
    pub fn new(policy: AnnotationClearPolicy, delay: Duration) -> Self {
        Self {
            policy,
            delay_ms: delay.as_millis() as u64,
            now_ms: 0,
            pending: VecDeque::new(),
        }
    }

    /// Returns the active policy
    #[must_use]
    pub fn policy(&self) -> AnnotationClearPolicy {
        self.policy
    }

    /// Returns the configured delay
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Current logical time
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of clears not yet fired
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Schedules a clear one delay from now
    pub fn schedule(&mut self, revision: u64) -> ScheduledClear {
        let task = ScheduledClear {
            due_ms: self.now_ms.saturating_add(self.delay_ms),
            revision,
        };
        // Constant delay keeps the queue sorted by due time.
        self.pending.push_back(task);
        task
    }

    /// Moves the clock forward, never backward, and drains due tasks.
    ///
    /// `current_revision` decides which tasks survive under
    /// [`AnnotationClearPolicy::Superseded`]. Returns how many clears fire.
    pub fn advance_to(&mut self, now_ms: u64, current_revision: u64) -> usize {
        self.now_ms = self.now_ms.max(now_ms);
        let mut fired = 0;
        while let Some(task) = self.pending.front().copied() {
            if task.due_ms > self.now_ms {
                break;
            }
            self.pending.pop_front();
            let live = match self.policy {
                AnnotationClearPolicy::Detached => true,
                AnnotationClearPolicy::Superseded => task.revision == current_revision,
            };
            if live {
                fired += 1;
            } else {
                tracing::trace!(due_ms = task.due_ms, "annotation clear superseded");
            }
        }
        fired
    }
}
