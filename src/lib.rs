/*! Bus-contention analysis for hardware accelerators in FPGA SoCs

This crate bounds the worst-case response time of periodic HW-tasks
(hardware accelerators) that reach a shared memory controller through
a tree of AXI interconnects, and decides whether every task completes
within its period.

- [model] holds the plain records describing tasks and interconnects,
- [topology] describes the interconnect tree and task placement,
- [analysis] computes the response-time bounds and the feasibility
  verdict, and
- [config] and [time] provide the platform parameters and the time
  model.

```
use axi_response_time_analysis::{analysis, config, model, time, topology};

let cfg = config::AxiConfig::default();
let tasks = (0..8)
    .map(|_| {
        let (c_time, period) = (time::Duration::from(100), time::Duration::from(5000));
        model::HwTask::new(&cfg, c_time, period, 1, 1)
    })
    .collect();
let workload = model::Workload::new(tasks);
let topo = topology::binary_even(workload, 4, topology::Packing::BottomUp, &cfg)?;
let system = analysis::System::new(topo, &cfg);
assert!(system.check_feasible()?.is_feasible());
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod analysis;
pub mod config;
pub mod model;
pub mod time;
pub mod topology;
