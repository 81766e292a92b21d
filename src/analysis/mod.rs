/*! Response-time analysis of HW-tasks contending for an interconnect tree

The analysis bounds the response time of every HW-task of a topology
by following the chain of interconnects from the task's attachment
point down to the root. At each crossed interconnect, it bounds the
number of interfering transactions by the *minimum* of

- a rate-based bound (`phi`): how many transactions the directly
  contending tasks and sub-trees can inject per transaction already
  in flight, and
- an arrival-based bound (`eta`): how many transactions the tasks
  whose traffic crosses the interconnect can issue within one period
  of the task under analysis,

and charges each interfering transaction the no-contention crossing
delay of that level. The resulting bound is a closed formula; no
fixed-point iteration is needed.

The main entry point is [System].
*/

use thiserror::Error;

use crate::model::TaskId;
use crate::topology::TopologyError;

/// Error type returned when the analysis cannot be carried out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The topology is structurally broken.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// A task is not attached to any interconnect.
    #[error("task {task} is not attached to any interconnect")]
    UnassignedTask { task: TaskId },
}

/// Outcome of a feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Every task's response-time bound is within its period.
    Feasible,
    /// The lowest-indexed task whose bound exceeds its period.
    Infeasible { first_violation: TaskId },
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }

    pub fn first_violation(&self) -> Option<TaskId> {
        match self {
            Feasibility::Feasible => None,
            Feasibility::Infeasible { first_violation } => Some(*first_violation),
        }
    }
}

mod no_contention;
mod rta;
mod system;

pub use rta::LevelInterference;
pub use no_contention::{no_contention_read, no_contention_write};
pub use system::System;
