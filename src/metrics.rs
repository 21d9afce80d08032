use thiserror::Error;

use crate::cpu::CpuStats;
use crate::process::{FinishedProcess, Ticks};
use crate::simulation::TimelineEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("no processes to average over")]
    NoProcesses,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub cpu_utilization: f64,
    /// Completed processes per tick of makespan.
    pub throughput: f64,
    pub context_switches: usize,
}

fn mean<I: Iterator<Item = Ticks>>(values: I, n: usize) -> f64 {
    values.fold(0.0, |sum, v| sum + v as f64) / n as f64
}

impl Metrics {
    /// Averages over finished processes. The CPU-level figures stay zero
    /// until [`Metrics::with_cpu`] fills them in.
    pub fn from_processes(procs: &[FinishedProcess]) -> Result<Metrics, MetricsError> {
        let n = procs.len();
        if n == 0 {
            return Err(MetricsError::NoProcesses);
        }
        Ok(Metrics {
            avg_turnaround: mean(procs.iter().map(|p| p.turnaround_time), n),
            avg_waiting: mean(procs.iter().map(|p| p.waiting_time), n),
            avg_response: mean(procs.iter().map(|p| p.response_time), n),
            cpu_utilization: 0.0,
            throughput: 0.0,
            context_switches: 0,
        })
    }

    pub fn with_cpu(mut self, cpu: &CpuStats, timeline: &[TimelineEntry], n_procs: usize) -> Metrics {
        if cpu.makespan > 0 {
            self.cpu_utilization = cpu.busy_time as f64 / cpu.makespan as f64;
            self.throughput = n_procs as f64 / cpu.makespan as f64;
        }
        self.context_switches = timeline.windows(2).filter(|w| w[0].pid != w[1].pid).count();
        self
    }
}
