//! Round-Robin CPU scheduling simulator.
//!
//! Given processes with arrival and burst times and a fixed quantum,
//! [`simulation::run`] produces the execution timeline and the finished
//! processes; [`metrics::Metrics`] reduces them to averages.

pub mod config;
pub mod cpu;
pub mod error;
pub mod event;
pub mod loader;
pub mod metrics;
pub mod process;
pub mod ready_queue;
pub mod report;
pub mod simulation;
pub mod workload;

pub use config::{Command, OutputFormat, SimConfig};
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use process::{FinishedProcess, Process, Ticks};
pub use simulation::{run, Quantum, Schedule, TimelineEntry};

/// Loads the input, simulates and computes metrics for one configured run.
pub fn simulate(config: &SimConfig) -> Result<(Schedule, Metrics)> {
    let procs = loader::load(&config.input)?;
    let n = procs.len();
    let schedule = simulation::run(procs, config.quantum);
    let metrics = Metrics::from_processes(&schedule.processes)?
        .with_cpu(&schedule.cpu, &schedule.timeline, n);
    Ok((schedule, metrics))
}
