/*! Trees of AXI interconnects and the placement of HW-tasks on them

A topology is a tree of interconnects rooted at index 0. The root sits
at the *bottom* of the hierarchy: it is the interconnect attached to
the memory controller of the processing system. Edges point from each
child down to its parent, so walking "below" an interconnect means
walking towards the root, and everything "above" it is the sub-tree
whose transactions funnel through it.

This module provides the central query interface, [TopologyQueries],
a validated tree representation, [Hierarchy], and the [binary_even]
generator that lays out interconnects as a binary tree.
*/

use auto_impl::auto_impl;
use thiserror::Error;

use crate::model::{Interconnect, TaskId, Workload};

/// Index of an interconnect within a topology; the root is 0.
pub type InterconnectId = usize;

/// The root interconnect, attached to the processing system.
pub const ROOT: InterconnectId = 0;

/// Structural problems detected while building or walking a topology.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("a topology needs at least one interconnect")]
    NoInterconnects,
    #[error("{tasks} tasks cannot fill {interconnects} interconnects (need at least {required})")]
    TooFewTasks {
        tasks: usize,
        interconnects: usize,
        required: usize,
    },
    #[error("{records} interconnect records given for {nodes} tree nodes")]
    InterconnectCountMismatch { records: usize, nodes: usize },
    #[error("interconnect {child} names non-existent parent {parent}")]
    ParentOutOfRange {
        child: InterconnectId,
        parent: InterconnectId,
    },
    #[error("adjacency is not lower-triangular: edge {child} -> {parent}")]
    NotTriangular {
        child: InterconnectId,
        parent: InterconnectId,
    },
    #[error("interconnect {interconnect} has {edges} outgoing edges")]
    NotATree {
        interconnect: InterconnectId,
        edges: usize,
    },
    #[error("assignment covers {assigned} tasks, but the workload has {tasks}")]
    AssignmentLengthMismatch { assigned: usize, tasks: usize },
    #[error("task {task} is assigned to non-existent interconnect {interconnect}")]
    UnknownInterconnect {
        task: TaskId,
        interconnect: InterconnectId,
    },
    #[error("task {task} has a zero period")]
    ZeroPeriod { task: TaskId },
    #[error("interconnect {interconnect} has no tasks attached")]
    InterconnectWithoutTasks { interconnect: InterconnectId },
    #[error("path from interconnect {start} does not reach the root within {limit} steps")]
    MalformedChain { start: InterconnectId, limit: usize },
}

/// The read-only queries the analysis needs from a topology.
///
/// Interconnect indices passed to these methods must be smaller than
/// [TopologyQueries::num_interconnects]; implementations may panic
/// otherwise, just like slice indexing. Task ids handed out by
/// [TopologyQueries::tasks_by_interconnect] that are missing from the
/// workload are reported by the analysis as unassigned tasks.
#[auto_impl(&, Box, Rc, Arc)]
pub trait TopologyQueries {
    /// The tasks placed on this topology, in index order.
    fn workload(&self) -> &Workload;

    /// The timing parameters of an interconnect.
    fn interconnect(&self, id: InterconnectId) -> &Interconnect;

    fn num_interconnects(&self) -> usize;

    fn num_tasks(&self) -> usize {
        self.workload().len()
    }

    /// The interconnect a task is attached to, if any.
    fn interconnect_of(&self, task: TaskId) -> Option<InterconnectId>;

    /// All tasks directly attached to an interconnect.
    fn tasks_by_interconnect(&self, id: InterconnectId) -> &[TaskId];

    /// The path from `id` down to the root, excluding `id` itself and
    /// including the root (empty for the root).
    fn interconnects_below(&self, id: InterconnectId) -> Result<Vec<InterconnectId>, TopologyError>;

    /// Every interconnect in the sub-tree above `id` (excluding `id`).
    fn interconnects_above(&self, id: InterconnectId) -> Vec<InterconnectId>;

    /// The interconnects with a direct edge into `id`, i.e., its children.
    fn interconnects_above_direct(&self, id: InterconnectId) -> Vec<InterconnectId>;

    /// Whether `to` lies in the sub-tree above `from`.
    fn reaches(&self, from: InterconnectId, to: InterconnectId) -> bool;

    /// Hierarchical level of an interconnect: 1 for the root, 2 for
    /// its children, and so on.
    fn depth(&self, id: InterconnectId) -> Result<usize, TopologyError> {
        Ok(self.interconnects_below(id)?.len() + 1)
    }
}

mod binary;
mod hierarchy;
mod matrix;

pub use binary::{binary_even, parent_map, Packing};
pub use hierarchy::Hierarchy;
pub use matrix::BitMatrix;
