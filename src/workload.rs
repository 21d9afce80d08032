use std::fmt::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::process::{Process, Ticks};

/// Knobs for the random workload generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadParams {
    pub count: usize,
    pub seed: u64,
    pub max_arrival: Ticks,
    /// Bursts are drawn from `1..=max_burst`.
    pub max_burst: Ticks,
}

impl Default for WorkloadParams {
    fn default() -> WorkloadParams {
        WorkloadParams { count: 10, seed: 0, max_arrival: 20, max_burst: 10 }
    }
}

/// Draws `count` processes named `P1..Pn`. Same seed, same workload.
pub fn generate(params: &WorkloadParams) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let max_burst = params.max_burst.max(1);
    (1..=params.count)
        .filter_map(|i| {
            let arrival = rng.gen_range(0..=params.max_arrival);
            let burst = rng.gen_range(1..=max_burst);
            Process::new(format!("P{}", i), arrival, burst)
        })
        .collect()
}

/// Renders processes in the input file format.
pub fn to_input(procs: &[Process]) -> String {
    let mut out = String::new();
    for p in procs {
        let _ = writeln!(out, "{} {} {}", p.pid, p.arrival_time, p.burst_time);
    }
    out
}
