use std::collections::HashSet;

use axi_response_time_analysis::analysis::System;
use axi_response_time_analysis::config::AxiConfig;
use axi_response_time_analysis::model::{HwTask, Workload};
use axi_response_time_analysis::time::Duration;
use axi_response_time_analysis::topology::{binary_even, Hierarchy, Packing, TopologyQueries, ROOT};
use proptest::prelude::*;

fn arb_task() -> impl Strategy<Value = HwTask> {
    (0u64..6, 0u64..6, 0u64..2_000, 1u64..20_000).prop_map(|(r, w, c, t)| {
        HwTask::new(
            &AxiConfig::default(),
            Duration::from(c),
            Duration::from(t),
            r,
            w,
        )
    })
}

/// Between one and six interconnects with two to four tasks each, so
/// the binary generator never leaves an interconnect empty.
fn arb_setup() -> impl Strategy<Value = (Vec<HwTask>, usize, Packing)> {
    (1usize..=6, 2usize..=4, any::<bool>()).prop_flat_map(|(inters, per_inter, top_down)| {
        let packing = if top_down {
            Packing::TopDown
        } else {
            Packing::BottomUp
        };
        (
            prop::collection::vec(arb_task(), inters * per_inter),
            Just(inters),
            Just(packing),
        )
    })
}

fn build(tasks: Vec<HwTask>, inters: usize, packing: Packing) -> Hierarchy {
    binary_even(Workload::new(tasks), inters, packing, &AxiConfig::default())
        .expect("valid binary topology")
}

proptest! {
    #[test]
    fn assignment_partitions_all_tasks((tasks, inters, packing) in arb_setup()) {
        let n = tasks.len();
        let topo = build(tasks, inters, packing);
        let mut seen = HashSet::new();
        for i in 0..topo.num_interconnects() {
            prop_assert!(!topo.tasks_by_interconnect(i).is_empty());
            for &t in topo.tasks_by_interconnect(i) {
                prop_assert!(seen.insert(t), "task {} attached twice", t);
                prop_assert_eq!(topo.interconnect_of(t), Some(i));
            }
        }
        prop_assert_eq!(seen.len(), n);
    }

    #[test]
    fn chains_reach_the_root((tasks, inters, packing) in arb_setup()) {
        let topo = build(tasks, inters, packing);
        let m = topo.num_interconnects();
        prop_assert!(topo.interconnects_below(ROOT).unwrap().is_empty());
        for i in 1..m {
            let below = topo.interconnects_below(i).unwrap();
            prop_assert!(below.len() <= m);
            prop_assert_eq!(below.last().copied(), Some(ROOT));
            prop_assert!(topo.reaches(ROOT, i));
        }
    }

    #[test]
    fn reachability_is_transitively_closed((tasks, inters, packing) in arb_setup()) {
        let topo = build(tasks, inters, packing);
        let m = topo.num_interconnects();
        for a in 0..m {
            for b in topo.interconnects_above(a) {
                for c in topo.interconnects_above(b) {
                    prop_assert!(topo.reaches(a, c));
                }
            }
            for child in topo.interconnects_above_direct(a) {
                prop_assert!(topo.reaches(a, child));
            }
        }
    }

    #[test]
    fn phi_tasks_are_eta_tasks((tasks, inters, packing) in arb_setup()) {
        let cfg = AxiConfig::default();
        let system = System::new(build(tasks, inters, packing), &cfg);
        for t in 0..system.topology().num_tasks() {
            let mut charged = HashSet::new();
            for level in system.interference_breakdown(t).unwrap() {
                for e in &level.tasks_phi {
                    prop_assert!(level.tasks_eta.contains(e));
                }
                for e in &level.tasks_eta {
                    prop_assert!(*e != t);
                    prop_assert!(charged.insert(*e), "task {} charged twice", e);
                }
            }
        }
    }

    #[test]
    fn more_transactions_never_shrink_bounds(
        (tasks, inters, packing) in arb_setup(),
        pick in any::<prop::sample::Index>(),
        extra_r in 0u64..4,
        extra_w in 0u64..4,
    ) {
        let cfg = AxiConfig::default();
        let j = pick.index(tasks.len());
        let mut heavier = tasks.clone();
        heavier[j].trans_r += extra_r;
        heavier[j].trans_w += extra_w;

        let before = System::new(build(tasks, inters, packing), &cfg);
        let after = System::new(build(heavier, inters, packing), &cfg);
        let before = before.response_times().unwrap();
        let after = after.response_times().unwrap();
        for (b, a) in before.iter().zip(after) {
            prop_assert!(a >= b);
        }
    }

    #[test]
    fn bounds_are_deterministic((tasks, inters, packing) in arb_setup()) {
        let cfg = AxiConfig::default();
        let first = System::new(build(tasks.clone(), inters, packing), &cfg);
        let second = System::new(build(tasks.clone(), inters, packing), &cfg);
        let a = first.response_times().unwrap().to_vec();
        prop_assert_eq!(&a[..], first.response_times().unwrap());
        prop_assert_eq!(&a[..], second.response_times().unwrap());
        for (r, t) in a.iter().zip(&tasks) {
            prop_assert!(*r >= t.c_time);
        }
    }
}
