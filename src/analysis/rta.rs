use std::collections::BTreeSet;
use std::iter;

use super::no_contention::{no_contention_read, no_contention_write};
use super::AnalysisError;
use crate::config::PsLatency;
use crate::model::{HwTask, TaskId};
use crate::time::Duration;
use crate::topology::{InterconnectId, TopologyQueries};

/// The interference bounds computed for one task at one crossed
/// interconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelInterference {
    /// The interconnect being crossed.
    pub interconnect: InterconnectId,
    /// Its hierarchical level (1 for the root).
    pub depth: usize,
    /// Other tasks attached directly to this interconnect.
    pub tasks_phi: Vec<TaskId>,
    /// Tasks whose traffic crosses this interconnect and that have not
    /// been accounted for at a lower level.
    pub tasks_eta: Vec<TaskId>,
    /// Rate bound: interfering transactions per transaction in flight.
    pub phi_acc: u64,
    /// Arrival bound on interfering reads within one period.
    pub eta_r: u64,
    /// Arrival bound on interfering writes within one period.
    pub eta_w: u64,
    /// Interfering reads charged at this level.
    pub y_r: u64,
    /// Interfering writes charged at this level.
    pub y_w: u64,
    pub delay_r: Duration,
    pub delay_w: Duration,
}

fn task_under_analysis<T>(
    topology: &T,
    task: TaskId,
) -> Result<(InterconnectId, &HwTask), AnalysisError>
where
    T: TopologyQueries + ?Sized,
{
    let unassigned = AnalysisError::UnassignedTask { task };
    let home = topology.interconnect_of(task).ok_or_else(|| unassigned.clone())?;
    let record = topology.workload().task(task).ok_or(unassigned)?;
    Ok((home, record))
}

/// Look up a task that a topology query returned.
fn record<T>(topology: &T, task: TaskId) -> Result<&HwTask, AnalysisError>
where
    T: TopologyQueries + ?Sized,
{
    topology
        .workload()
        .task(task)
        .ok_or(AnalysisError::UnassignedTask { task })
}

/// Walk from the interconnect of task `task_id` down to the root and
/// bound the interference incurred at every level.
pub(crate) fn walk_chain<T>(
    topology: &T,
    ps: &PsLatency,
    task_id: TaskId,
) -> Result<Vec<LevelInterference>, AnalysisError>
where
    T: TopologyQueries + ?Sized,
{
    let (home, task) = task_under_analysis(topology, task_id)?;
    log::debug!("task {} attached to interconnect {}", task_id, home);

    // transactions of the task under analysis plus those interfering so far
    let mut n_r = task.trans_r;
    let mut n_w = task.trans_w;
    // tasks already charged at a lower level
    let mut counted: BTreeSet<TaskId> = BTreeSet::new();
    let mut levels = Vec::new();

    for inter_id in iter::once(home).chain(topology.interconnects_below(home)?) {
        let inter = topology.interconnect(inter_id);

        let tasks_phi: Vec<TaskId> = topology
            .tasks_by_interconnect(inter_id)
            .iter()
            .copied()
            .filter(|&e| e != task_id)
            .collect();

        let tasks_eta: Vec<TaskId> = iter::once(inter_id)
            .chain(topology.interconnects_above(inter_id))
            .flat_map(|k| topology.tasks_by_interconnect(k).iter().copied())
            .filter(|e| *e != task_id && !counted.contains(e))
            .collect();
        debug_assert!(tasks_phi.iter().all(|e| tasks_eta.contains(e)));

        // directly attached tasks are throttled by the arbiter, whole
        // sub-trees enter through a single port
        let mut phi_acc: u64 = 0;
        for &e in &tasks_phi {
            phi_acc = phi_acc.saturating_add(record(topology, e)?.phi.min(inter.phi));
        }
        for c in topology.interconnects_above_direct(inter_id) {
            phi_acc = phi_acc.saturating_add(topology.interconnect(c).phi);
        }

        let (mut eta_r, mut eta_w) = (0u64, 0u64);
        for &e in &tasks_eta {
            let other = record(topology, e)?;
            let jobs = other.activations_within(task.period);
            eta_r = eta_r.saturating_add(jobs.saturating_mul(other.trans_r));
            eta_w = eta_w.saturating_add(jobs.saturating_mul(other.trans_w));
        }

        let y_r = n_r.saturating_mul(phi_acc).min(eta_r);
        let y_w = n_w.saturating_mul(phi_acc).min(eta_w);

        let depth = topology.depth(inter_id)?;
        let delay_r = no_contention_read(depth as u64, inter, ps, task).saturating_mul(y_r);
        let delay_w = no_contention_write(depth as u64, inter, ps, task).saturating_mul(y_w);

        log::trace!(
            "task {} @ interconnect {} (level {}): phi={} eta=({}, {}) y=({}, {}) delay=({}, {})",
            task_id,
            inter_id,
            depth,
            phi_acc,
            eta_r,
            eta_w,
            y_r,
            y_w,
            delay_r,
            delay_w
        );

        counted.extend(tasks_eta.iter().copied());
        n_r = n_r.saturating_add(y_r);
        n_w = n_w.saturating_add(y_w);

        levels.push(LevelInterference {
            interconnect: inter_id,
            depth,
            tasks_phi,
            tasks_eta,
            phi_acc,
            eta_r,
            eta_w,
            y_r,
            y_w,
            delay_r,
            delay_w,
        });
    }

    Ok(levels)
}

/// Bound the response time of task `task_id`: its own transactions at
/// no-contention cost, plus all interference charged on the way to the
/// root, plus its computation time.
pub(crate) fn bound_response_time<T>(
    topology: &T,
    ps: &PsLatency,
    task_id: TaskId,
) -> Result<Duration, AnalysisError>
where
    T: TopologyQueries + ?Sized,
{
    let levels = walk_chain(topology, ps, task_id)?;
    let (home, task) = task_under_analysis(topology, task_id)?;
    let depth = topology.depth(home)? as u64;
    let inter = topology.interconnect(home);

    let own_r = no_contention_read(depth, inter, ps, task).saturating_mul(task.trans_r);
    let own_w = no_contention_write(depth, inter, ps, task).saturating_mul(task.trans_w);

    // bounds clamp at the largest representable duration
    Ok(levels
        .iter()
        .flat_map(|l| [l.delay_r, l.delay_w])
        .fold(own_r.saturating_add(own_w), Duration::saturating_add)
        .saturating_add(task.c_time))
}
