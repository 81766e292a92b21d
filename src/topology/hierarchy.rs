use std::fmt;

use itertools::Itertools;

use super::{BitMatrix, InterconnectId, TopologyError, TopologyQueries, ROOT};
use crate::model::{Interconnect, TaskId, Workload};

/// A validated tree of interconnects together with the placement of
/// every task of a workload.
///
/// Besides the adjacency relation (edge `child -> parent`), the
/// hierarchy precomputes the reachability relation, i.e., the
/// transitive closure of the reversed edges, so that sub-tree queries
/// never need to re-walk the tree.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    workload: Workload,
    interconnects: Vec<Interconnect>,
    adjacency: BitMatrix,
    reachability: BitMatrix,
    assignment: Vec<InterconnectId>,
    tasks_by_inter: Vec<Vec<TaskId>>,
}

impl Hierarchy {
    /// Build a hierarchy from an explicit parent relation.
    ///
    /// `parents[k]` is the parent of interconnect `k + 1`; interconnect
    /// 0 is the root. `assignment[t]` is the interconnect task `t` is
    /// attached to.
    pub fn from_parents(
        workload: Workload,
        interconnects: Vec<Interconnect>,
        parents: &[InterconnectId],
        assignment: Vec<InterconnectId>,
    ) -> Result<Hierarchy, TopologyError> {
        let n = parents.len() + 1;
        if interconnects.len() != n {
            return Err(TopologyError::InterconnectCountMismatch {
                records: interconnects.len(),
                nodes: n,
            });
        }

        let mut adjacency = BitMatrix::new(n);
        for (k, &parent) in parents.iter().enumerate() {
            let child = k + 1;
            if parent >= n {
                return Err(TopologyError::ParentOutOfRange { child, parent });
            }
            adjacency.set(child, parent, true);
        }

        Hierarchy::from_adjacency(workload, interconnects, adjacency, assignment)
    }

    /// Build a hierarchy from an adjacency matrix with edges pointing
    /// from child to parent.
    pub fn from_adjacency(
        workload: Workload,
        interconnects: Vec<Interconnect>,
        adjacency: BitMatrix,
        assignment: Vec<InterconnectId>,
    ) -> Result<Hierarchy, TopologyError> {
        let n = adjacency.dim();
        if n == 0 {
            return Err(TopologyError::NoInterconnects);
        }
        if interconnects.len() != n {
            return Err(TopologyError::InterconnectCountMismatch {
                records: interconnects.len(),
                nodes: n,
            });
        }
        check_tree(&adjacency)?;

        if assignment.len() != workload.len() {
            return Err(TopologyError::AssignmentLengthMismatch {
                assigned: assignment.len(),
                tasks: workload.len(),
            });
        }
        let mut tasks_by_inter = vec![Vec::new(); n];
        for (task, &inter) in assignment.iter().enumerate() {
            if inter >= n {
                return Err(TopologyError::UnknownInterconnect {
                    task,
                    interconnect: inter,
                });
            }
            tasks_by_inter[inter].push(task);
        }
        if let Some(task) = workload.tasks().iter().position(|t| t.period.is_zero()) {
            return Err(TopologyError::ZeroPeriod { task });
        }
        if let Some(interconnect) = tasks_by_inter.iter().position(Vec::is_empty) {
            return Err(TopologyError::InterconnectWithoutTasks { interconnect });
        }

        let reachability = adjacency.transposed().transitive_closure();

        Ok(Hierarchy {
            workload,
            interconnects,
            adjacency,
            reachability,
            assignment,
            tasks_by_inter,
        })
    }

    /// The interconnect each task is attached to, in task order.
    pub fn assignment(&self) -> &[InterconnectId] {
        &self.assignment
    }

    /// The parent of a non-root interconnect.
    pub fn parent(&self, id: InterconnectId) -> Option<InterconnectId> {
        self.adjacency.row_ones(id).next()
    }
}

/// Every non-root row must have exactly one edge to a smaller index,
/// and the root none.
fn check_tree(adjacency: &BitMatrix) -> Result<(), TopologyError> {
    if let Some((child, parent)) = adjacency.first_non_lower_entry() {
        return Err(TopologyError::NotTriangular { child, parent });
    }
    for i in 0..adjacency.dim() {
        let edges = adjacency.count_row(i);
        let expected = if i == ROOT { 0 } else { 1 };
        if edges != expected {
            return Err(TopologyError::NotATree {
                interconnect: i,
                edges,
            });
        }
    }
    Ok(())
}

impl TopologyQueries for Hierarchy {
    fn workload(&self) -> &Workload {
        &self.workload
    }

    fn interconnect(&self, id: InterconnectId) -> &Interconnect {
        &self.interconnects[id]
    }

    fn num_interconnects(&self) -> usize {
        self.interconnects.len()
    }

    fn interconnect_of(&self, task: TaskId) -> Option<InterconnectId> {
        self.assignment.get(task).copied()
    }

    fn tasks_by_interconnect(&self, id: InterconnectId) -> &[TaskId] {
        &self.tasks_by_inter[id]
    }

    fn interconnects_below(
        &self,
        id: InterconnectId,
    ) -> Result<Vec<InterconnectId>, TopologyError> {
        let limit = self.num_interconnects();
        let mut below = Vec::new();
        let mut current = id;
        while current != ROOT {
            if below.len() >= limit {
                return Err(TopologyError::MalformedChain { start: id, limit });
            }
            match self.parent(current) {
                Some(parent) => {
                    below.push(parent);
                    current = parent;
                }
                None => return Err(TopologyError::MalformedChain { start: id, limit }),
            }
        }
        Ok(below)
    }

    fn interconnects_above(&self, id: InterconnectId) -> Vec<InterconnectId> {
        self.reachability.row_ones(id).collect()
    }

    fn interconnects_above_direct(&self, id: InterconnectId) -> Vec<InterconnectId> {
        self.adjacency.column_ones(id).collect()
    }

    fn reaches(&self, from: InterconnectId, to: InterconnectId) -> bool {
        self.reachability.get(from, to)
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inter\tTasks")?;
        for (i, tasks) in self.tasks_by_inter.iter().enumerate() {
            writeln!(f, "{}\t{}: [{}]", i, tasks.len(), tasks.iter().format(", "))?;
        }
        Ok(())
    }
}
