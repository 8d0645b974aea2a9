//! Goal and progress records.

use serde::{Deserialize, Serialize};

use crate::users::UserId;
use crate::vocabulary::selection_index;

/// Row id of a goal.
pub type GoalId = i64;

/// Row id of a progress entry.
pub type ProgressId = i64;

/// A user-defined target tracked over time.
///
/// Dates are kept as entered (`YYYY-MM-DD` is expected but not enforced) and
/// the status is free text; the store never checks it against the configured
/// status list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Generated identifier
    pub id: GoalId,
    /// User who owns this goal
    pub user_id: UserId,
    /// Kind of goal, e.g. "Distance" or "Poids"
    pub goal_type: String,
    /// Value to reach
    pub target_value: f64,
    /// First day of the goal
    pub start_date: String,
    /// Last day of the goal
    pub end_date: String,
    /// Current status label
    pub status: String,
}

impl Goal {
    /// Position of this goal's status in a selection list, if it is listed.
    pub fn status_index(&self, statuses: &[String]) -> Option<usize> {
        selection_index(statuses, &self.status)
    }

    /// Replace every editable field with the ones from `input`.
    ///
    /// The owner is not editable.
    pub fn apply(&mut self, input: &NewGoal) {
        self.goal_type = input.goal_type.clone();
        self.target_value = input.target_value;
        self.start_date = input.start_date.clone();
        self.end_date = input.end_date.clone();
        self.status = input.status.clone();
    }
}

/// Fields for creating a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub user_id: UserId,
    pub goal_type: String,
    pub target_value: f64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl NewGoal {
    /// Attach a generated id.
    pub fn into_goal(self, id: GoalId) -> Goal {
        Goal {
            id,
            user_id: self.user_id,
            goal_type: self.goal_type,
            target_value: self.target_value,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        }
    }
}

/// A dated measurement recorded against a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Generated identifier
    pub id: ProgressId,
    /// Goal this measurement belongs to
    pub goal_id: GoalId,
    /// Measured value
    pub value: f64,
    /// Measurement date, free text
    pub date: String,
}
