/*! Timing parameters of the AXI platform

All defaults live in [AxiConfig], which is passed explicitly to the
topology generator, to the task constructors, and to the analysis. */

use crate::model::Interconnect;
use crate::time::Duration;

/// Latencies of the processing-system side (i.e., the memory
/// controller behind the root interconnect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PsLatency {
    /// Time for the PS to serve a read request.
    pub read: Duration,
    /// Time for the PS to serve a write request.
    pub write: Duration,
}

impl Default for PsLatency {
    fn default() -> Self {
        PsLatency {
            read: Duration::from(25),
            write: Duration::from(25),
        }
    }
}

/// Platform-wide defaults for HW-tasks, interconnects, and the PS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxiConfig {
    /// Default interference-rate bound of a HW-task.
    pub task_phi: u64,
    /// Default AXI burst length (in beats) of a HW-task.
    pub burst_size: u64,
    /// Template from which every interconnect of a generated topology
    /// is instantiated.
    pub interconnect: Interconnect,
    pub ps: PsLatency,
    /// Nominal duration of a single transaction, used to bound how
    /// many transactions fit into a task's computation time.
    pub transaction_time: Duration,
}

impl Default for AxiConfig {
    fn default() -> Self {
        AxiConfig {
            task_phi: 6,
            burst_size: 16,
            interconnect: Interconnect::default(),
            ps: PsLatency::default(),
            transaction_time: Duration::from(150),
        }
    }
}
