use super::{Hierarchy, InterconnectId, TopologyError};
use crate::config::AxiConfig;
use crate::model::Workload;

/// The order in which interconnects are filled with tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packing {
    /// Start with the root (index 0) and move up the tree in level
    /// order, so the first tasks of the workload sit closest to the PS.
    #[default]
    BottomUp,
    /// Start with the highest-indexed interconnect and move down
    /// towards the root.
    TopDown,
}

impl Packing {
    fn sequence(self, num_interconnects: usize) -> Vec<InterconnectId> {
        match self {
            Packing::BottomUp => (0..num_interconnects).collect(),
            Packing::TopDown => (0..num_interconnects).rev().collect(),
        }
    }
}

/// The parent of every interconnect of a binary tree with
/// `num_interconnects` nodes, numbered in level order.
///
/// Entry `k` of the result is the parent of interconnect `k + 1`.
/// Level `L` contributes `2^L` parents, which adopt children pairwise
/// in *descending* index order, e.g., for seven interconnects:
/// `1, 2 -> 0`, `3, 4 -> 2`, and `5, 6 -> 1`.
pub fn parent_map(num_interconnects: usize) -> Vec<InterconnectId> {
    let needed = num_interconnects.saturating_sub(1);
    let mut parents = Vec::with_capacity(needed + 1);
    let mut level_start = 0;
    let mut level_width = 1;
    while parents.len() < needed {
        for parent in (level_start..level_start + level_width).rev() {
            parents.push(parent);
            parents.push(parent);
        }
        level_start += level_width;
        level_width *= 2;
    }
    parents.truncate(needed);
    parents
}

/// Lay out `num_interconnects` interconnects as a binary tree and
/// distribute the (already ordered) tasks of `workload` evenly over
/// them.
///
/// Tasks are assigned in workload order in chunks of
/// `ceil(tasks / interconnects)`, visiting interconnects in the order
/// given by `packing`. Every interconnect instantiates the template
/// in `config`.
pub fn binary_even(
    workload: Workload,
    num_interconnects: usize,
    packing: Packing,
    config: &AxiConfig,
) -> Result<Hierarchy, TopologyError> {
    if num_interconnects == 0 {
        return Err(TopologyError::NoInterconnects);
    }
    let num_tasks = workload.len();
    let required = 2 * num_interconnects;
    if num_tasks < required {
        return Err(TopologyError::TooFewTasks {
            tasks: num_tasks,
            interconnects: num_interconnects,
            required,
        });
    }

    let parents = parent_map(num_interconnects);
    log::debug!("binary layout of {} interconnects: parents {:?}", num_interconnects, parents);

    let sequence = packing.sequence(num_interconnects);
    let chunk = (num_tasks + num_interconnects - 1) / num_interconnects;
    let assignment: Vec<InterconnectId> = (0..num_tasks).map(|t| sequence[t / chunk]).collect();
    log::debug!("{:?} assignment of {} tasks: {:?}", packing, num_tasks, assignment);

    let interconnects = vec![config.interconnect.clone(); num_interconnects];
    Hierarchy::from_parents(workload, interconnects, &parents, assignment)
}
