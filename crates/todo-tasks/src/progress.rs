use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Completion summary of an active list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            completed: tasks.iter().filter(|t| t.completed).count(),
            total: tasks.len(),
        }
    }

    /// Completed share rounded to the nearest whole percent; 0 for an empty list.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u8
    }

    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
