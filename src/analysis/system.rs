use std::sync::OnceLock;

use super::rta::{bound_response_time, walk_chain};
use super::{AnalysisError, Feasibility, LevelInterference};
use crate::config::{AxiConfig, PsLatency};
use crate::model::TaskId;
use crate::time::Duration;
use crate::topology::TopologyQueries;

/// An AXI system: a hierarchy of interconnects populated with
/// HW-tasks, plus the processing system serving their transactions.
///
/// Response-time bounds are computed on first use and cached for the
/// lifetime of the `System`. The cache is written at most once, so a
/// `System` over a `Sync` topology can be queried from several threads.
#[derive(Debug)]
pub struct System<T: TopologyQueries> {
    topology: T,
    ps: PsLatency,
    cache: OnceLock<Vec<Duration>>,
}

impl<T: TopologyQueries> System<T> {
    /// Analyze `topology` with the PS latencies from `config`.
    pub fn new(topology: T, config: &AxiConfig) -> System<T> {
        System::with_ps_latency(topology, config.ps)
    }

    pub fn with_ps_latency(topology: T, ps: PsLatency) -> System<T> {
        System {
            topology,
            ps,
            cache: OnceLock::new(),
        }
    }

    pub fn topology(&self) -> &T {
        &self.topology
    }

    pub fn ps_latency(&self) -> PsLatency {
        self.ps
    }

    /// Response-time bounds of all tasks, in task index order.
    pub fn response_times(&self) -> Result<&[Duration], AnalysisError> {
        if let Some(cached) = self.cache.get() {
            return Ok(cached);
        }
        let computed = (0..self.topology.num_tasks())
            .map(|task| bound_response_time(&self.topology, &self.ps, task))
            .collect::<Result<Vec<_>, _>>()?;
        // if another thread got here first, its result is kept; both
        // are identical
        Ok(self.cache.get_or_init(|| computed))
    }

    /// Response-time bound of a single task.
    pub fn response_time(&self, task: TaskId) -> Result<Duration, AnalysisError> {
        self.response_times()?
            .get(task)
            .copied()
            .ok_or(AnalysisError::UnassignedTask { task })
    }

    /// Check whether every task completes within its period.
    pub fn check_feasible(&self) -> Result<Feasibility, AnalysisError> {
        let bounds = self.response_times()?;
        let tasks = self.topology.workload().tasks();
        match bounds.iter().zip(tasks).position(|(r, t)| *r > t.period) {
            Some(task) => {
                log::info!(
                    "task {} misses its period: response time {} > {}",
                    task,
                    bounds[task],
                    tasks[task].period
                );
                Ok(Feasibility::Infeasible {
                    first_violation: task,
                })
            }
            None => Ok(Feasibility::Feasible),
        }
    }

    /// The per-interconnect interference bounds of one task, from its
    /// attachment point down to the root.
    pub fn interference_breakdown(
        &self,
        task: TaskId,
    ) -> Result<Vec<LevelInterference>, AnalysisError> {
        walk_chain(&self.topology, &self.ps, task)
    }
}
