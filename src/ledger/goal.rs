use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A savings target with manually-incremented progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    pub deadline: NaiveDate,
    pub created: NaiveDate,
}

impl Goal {
    pub fn new(name: impl Into<String>, target: f64, deadline: NaiveDate, created: NaiveDate) -> Self {
        Self {
            name: name.into(),
            target,
            current: 0.0,
            deadline,
            created,
        }
    }

    /// Adds funds toward the goal. Progress only ever increases; non-positive
    /// amounts are ignored.
    pub fn add_progress(&mut self, amount: f64) {
        if amount > 0.0 {
            self.current += amount;
        }
    }
}
