/*! The entity model: HW-tasks, interconnects, and workloads

These are plain data records. A [Workload] is populated by whoever
generates the task set and is treated as read-only by the topology and
by the analysis. */

use std::cmp::Reverse;
use std::fmt;

use crate::config::AxiConfig;
use crate::time::{divide_with_ceil, Duration};

/// Index of a HW-task within its [Workload].
pub type TaskId = usize;

/// A hardware accelerator issuing periodic read/write transactions
/// in addition to its internal computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HwTask {
    /// Maximum number of transactions the task can inject per unit of
    /// accumulated interference opportunity.
    pub phi: u64,
    /// AXI burst length (beats per transaction).
    pub burst_size: u64,
    /// Read transactions per activation.
    pub trans_r: u64,
    /// Write transactions per activation.
    pub trans_w: u64,
    /// Pure computation time per activation.
    pub c_time: Duration,
    /// Activation period, which is also the task's deadline.
    pub period: Duration,
}

impl HwTask {
    /// A task with the platform's default `phi` and burst size.
    pub fn new(
        config: &AxiConfig,
        c_time: Duration,
        period: Duration,
        trans_r: u64,
        trans_w: u64,
    ) -> HwTask {
        HwTask {
            phi: config.task_phi,
            burst_size: config.burst_size,
            trans_r,
            trans_w,
            c_time,
            period,
        }
    }

    /// A task that has not been populated yet.
    pub fn empty(config: &AxiConfig) -> HwTask {
        HwTask::new(config, Duration::zero(), Duration::zero(), 0, 0)
    }

    pub fn slack(&self) -> Duration {
        self.period.saturating_sub(self.c_time)
    }

    pub fn total_transactions(&self) -> u64 {
        self.trans_r.saturating_add(self.trans_w)
    }

    /// The number of whole transactions of the platform's nominal
    /// transaction length that fit into the computation time.
    pub fn max_transactions(&self, config: &AxiConfig) -> u64 {
        if config.transaction_time.is_zero() {
            0
        } else {
            self.c_time.cycles() / config.transaction_time.cycles()
        }
    }

    /// Upper bound on the number of activations of `self` that can
    /// overlap a window of length `window`, under arbitrary phasing.
    pub(crate) fn activations_within(&self, window: Duration) -> u64 {
        divide_with_ceil(window, self.period).saturating_add(1)
    }
}

impl fmt::Display for HwTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C: {: <12} T: {: <12} S: {: <12} TR: {: <8} TW: {: <8}",
            self.c_time.cycles(),
            self.period.cycles(),
            self.slack().cycles(),
            self.trans_r,
            self.trans_w
        )
    }
}

/// An AXI interconnect: an arbitration node with its own handshake
/// timing and interference-rate cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interconnect {
    /// Arbitration-imposed bound on the transactions a single input
    /// port may inject per unit of interference opportunity.
    pub phi: u64,
    /// Propagation delay of the address phase.
    pub d_addr: Duration,
    /// Propagation delay of the data phase.
    pub d_data: Duration,
    /// Propagation delay of the write-response phase.
    pub d_bresp: Duration,
    pub t_hold_addr: Duration,
    pub t_hold_data: Duration,
    pub t_hold_bresp: Duration,
}

impl Default for Interconnect {
    fn default() -> Self {
        Interconnect {
            phi: 1,
            d_addr: Duration::from(10),
            d_data: Duration::from(10),
            d_bresp: Duration::from(10),
            t_hold_addr: Duration::from(1),
            t_hold_data: Duration::from(1),
            t_hold_bresp: Duration::from(1),
        }
    }
}

/// Orders in which a workload can be arranged before its tasks are
/// assigned to interconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrdering {
    SlackAscending,
    SlackDescending,
    TransactionsAscending,
    TransactionsDescending,
}

/// An ordered set of HW-tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    tasks: Vec<HwTask>,
}

impl Workload {
    pub fn new(tasks: Vec<HwTask>) -> Workload {
        Workload { tasks }
    }

    /// A workload of `num_tasks` empty tasks with default parameters.
    pub fn with_default_tasks(num_tasks: usize, config: &AxiConfig) -> Workload {
        Workload {
            tasks: (0..num_tasks).map(|_| HwTask::empty(config)).collect(),
        }
    }

    pub fn tasks(&self) -> &[HwTask] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&HwTask> {
        self.tasks.get(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Reorder the tasks. The sort is stable, so ties keep their
    /// relative order.
    pub fn sort(&mut self, ordering: TaskOrdering) {
        match ordering {
            TaskOrdering::SlackAscending => self.tasks.sort_by_key(|t| t.slack()),
            TaskOrdering::SlackDescending => self.tasks.sort_by_key(|t| Reverse(t.slack())),
            TaskOrdering::TransactionsAscending => {
                self.tasks.sort_by_key(|t| t.total_transactions())
            }
            TaskOrdering::TransactionsDescending => {
                self.tasks.sort_by_key(|t| Reverse(t.total_transactions()))
            }
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tasks")?;
        for (i, task) in self.tasks.iter().enumerate() {
            writeln!(f, "{}:\t{}", i, task)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{d, task};

    #[test]
    fn task_defaults_follow_config() {
        let cfg = AxiConfig::default();
        let t = HwTask::empty(&cfg);
        assert_eq!(t.phi, 6);
        assert_eq!(t.burst_size, 16);
        assert_eq!(t.total_transactions(), 0);
    }

    #[test]
    fn slack_and_transaction_budget() {
        let mut cfg = AxiConfig::default();
        let t = task(1, 2, 400, 1000);
        assert_eq!(t.slack(), d(600));
        assert_eq!(t.total_transactions(), 3);
        // 400 cycles hold two transactions of 150
        assert_eq!(t.max_transactions(&cfg), 2);
        cfg.transaction_time = d(100);
        assert_eq!(t.max_transactions(&cfg), 4);
        cfg.transaction_time = d(0);
        assert_eq!(t.max_transactions(&cfg), 0);
        assert_eq!(task(0, 0, 2000, 1000).slack(), d(0));
    }

    #[test]
    fn default_tasks_are_empty_records() {
        let cfg = AxiConfig {
            task_phi: 2,
            burst_size: 8,
            ..AxiConfig::default()
        };
        let w = Workload::with_default_tasks(3, &cfg);
        assert_eq!(w.len(), 3);
        assert!(!w.is_empty());
        for t in w.tasks() {
            assert_eq!(t, &HwTask::empty(&cfg));
            assert_eq!((t.phi, t.burst_size), (2, 8));
            assert_eq!(t.total_transactions(), 0);
            assert_eq!(t.period, d(0));
        }
        assert!(Workload::with_default_tasks(0, &cfg).is_empty());
    }

    #[test]
    fn activations_within_window() {
        let t = task(1, 0, 0, 1000);
        assert_eq!(t.activations_within(d(1000)), 2);
        assert_eq!(t.activations_within(d(1001)), 3);
        assert_eq!(t.activations_within(d(10)), 2);
    }

    #[test]
    fn activations_saturate_for_huge_windows() {
        let t = task(1, 0, 0, 1);
        assert_eq!(t.activations_within(d(u64::MAX)), u64::MAX);
        let slow = task(1, 0, 0, u64::MAX);
        assert_eq!(slow.activations_within(d(1)), 2);
        assert_eq!(task(u64::MAX, 5, 0, 1).total_transactions(), u64::MAX);
    }

    #[test]
    fn sort_by_slack_and_transactions() {
        let mut w = Workload::new(vec![
            task(5, 5, 100, 1000),
            task(1, 0, 900, 1000),
            task(2, 2, 500, 1000),
        ]);
        w.sort(TaskOrdering::SlackAscending);
        let slacks: Vec<_> = w.tasks().iter().map(|t| t.slack().cycles()).collect();
        assert_eq!(slacks, vec![100, 500, 900]);

        w.sort(TaskOrdering::SlackDescending);
        assert_eq!(w.task(0).map(|t| t.slack()), Some(d(900)));

        w.sort(TaskOrdering::TransactionsDescending);
        let trans: Vec<_> = w.tasks().iter().map(|t| t.total_transactions()).collect();
        assert_eq!(trans, vec![10, 4, 1]);

        w.sort(TaskOrdering::TransactionsAscending);
        assert_eq!(w.task(0).map(|t| t.total_transactions()), Some(1));
    }

    #[test]
    fn workload_display_lists_every_task() {
        let w = Workload::new(vec![task(1, 1, 10, 100), task(2, 0, 20, 200)]);
        let out = w.to_string();
        assert!(out.starts_with("Tasks\n"));
        assert!(out.contains("0:\tC: 10"));
        assert!(out.contains("1:\tC: 20"));
        assert_eq!(out.lines().count(), 3);
    }
}
