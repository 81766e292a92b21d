use crate::config::PsLatency;
use crate::model::{HwTask, Interconnect};
use crate::time::Duration;

/// Delay of a single read transaction of `task` that crosses `depth`
/// cascaded interconnects, each with the timing of `inter`, in the
/// absence of any contention.
///
/// The address travels up to the PS through every stage, the PS
/// serves the request, and the data beats travel back, the last one
/// trailing the first by the burst length.
pub fn no_contention_read(
    depth: u64,
    inter: &Interconnect,
    ps: &PsLatency,
    task: &HwTask,
) -> Duration {
    address_phase(depth, inter)
        .saturating_add(ps.read)
        .saturating_add(inter.d_data.saturating_mul(depth))
        .saturating_add(Duration::from(task.burst_size))
}

/// Delay of a single write transaction of `task` that crosses `depth`
/// cascaded interconnects, each with the timing of `inter`, in the
/// absence of any contention.
///
/// Unlike a read, the write data is pushed beat by beat through the
/// interconnect and the transaction only completes once the write
/// response has travelled back.
pub fn no_contention_write(
    depth: u64,
    inter: &Interconnect,
    ps: &PsLatency,
    task: &HwTask,
) -> Duration {
    address_phase(depth, inter)
        .saturating_add(inter.t_hold_data.saturating_mul(task.burst_size))
        .saturating_add(ps.write)
        .saturating_add(
            inter
                .d_data
                .saturating_add(inter.d_bresp)
                .saturating_mul(depth),
        )
}

fn address_phase(depth: u64, inter: &Interconnect) -> Duration {
    inter
        .t_hold_addr
        .saturating_add(inter.d_addr)
        .saturating_mul(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxiConfig;
    use crate::tests::{d, task};

    #[test]
    fn defaults_at_the_root() {
        let cfg = AxiConfig::default();
        let t = task(1, 1, 0, 1000);
        // 1 * (1 + 10) + 25 + 1 * 10 + 16
        assert_eq!(no_contention_read(1, &cfg.interconnect, &cfg.ps, &t), d(62));
        // 1 * (1 + 10) + 16 * 1 + 25 + 1 * (10 + 10)
        assert_eq!(no_contention_write(1, &cfg.interconnect, &cfg.ps, &t), d(72));
    }

    #[test]
    fn deeper_levels_cost_more() {
        let cfg = AxiConfig::default();
        let t = task(1, 1, 0, 1000);
        assert_eq!(no_contention_read(2, &cfg.interconnect, &cfg.ps, &t), d(83));
        assert_eq!(no_contention_write(2, &cfg.interconnect, &cfg.ps, &t), d(103));
        assert_eq!(no_contention_read(3, &cfg.interconnect, &cfg.ps, &t), d(104));
        assert_eq!(no_contention_write(3, &cfg.interconnect, &cfg.ps, &t), d(134));
    }

    #[test]
    fn burst_length_and_ps_latency() {
        let cfg = AxiConfig::default();
        let mut t = task(1, 1, 0, 1000);
        t.burst_size = 4;
        let ps = PsLatency {
            read: d(100),
            write: d(50),
        };
        // 11 + 100 + 10 + 4
        assert_eq!(no_contention_read(1, &cfg.interconnect, &ps, &t), d(125));
        // 11 + 4 + 50 + 20
        assert_eq!(no_contention_write(1, &cfg.interconnect, &ps, &t), d(85));
    }

    #[test]
    fn huge_bursts_clamp_instead_of_wrapping() {
        let cfg = AxiConfig::default();
        let mut t = task(1, 1, 0, 1000);
        t.burst_size = u64::MAX;
        let inter = Interconnect {
            t_hold_data: d(2),
            ..Interconnect::default()
        };
        assert_eq!(no_contention_read(1, &inter, &cfg.ps, &t), d(u64::MAX));
        assert_eq!(no_contention_write(1, &inter, &cfg.ps, &t), d(u64::MAX));
    }
}
