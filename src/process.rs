/// Simulated time, in abstract ticks.
pub type Ticks = u64;

/// Immutable description of one schedulable unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Process {
    /// Returns `None` for a zero burst; every process needs some CPU time.
    pub fn new<S: Into<String>>(pid: S, arrival_time: Ticks, burst_time: Ticks) -> Option<Process> {
        if burst_time == 0 {
            return None;
        }
        Some(Process { pid: pid.into(), arrival_time: arrival_time, burst_time: burst_time })
    }
}

/// Latest time a run over `procs` can reach: the last arrival plus all the
/// work. `None` if that does not fit the clock.
pub fn horizon(procs: &[Process]) -> Option<Ticks> {
    let last_arrival = procs.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    procs.iter().try_fold(last_arrival, |t, p| t.checked_add(p.burst_time))
}

/// Per-run mutable state of a process. Only the scheduler touches it.
#[derive(Debug)]
pub struct RunState {
    pub remaining_time: Ticks,
    pub response_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl RunState {
    pub fn new(process: &Process) -> RunState {
        RunState { remaining_time: process.burst_time, response_time: None, completion_time: None }
    }

    /// Records first-touch latency. Later dispatches leave it alone.
    pub fn dispatched(&mut self, process: &Process, now: Ticks) {
        if self.response_time.is_none() {
            debug_assert!(now >= process.arrival_time, "{} dispatched before arrival", process.pid);
            self.response_time = Some(now - process.arrival_time);
        }
    }

    /// Charges `slice` ticks of service and returns the remaining time.
    pub fn consume(&mut self, slice: Ticks) -> Ticks {
        debug_assert!(slice <= self.remaining_time);
        self.remaining_time -= slice;
        self.remaining_time
    }

    pub fn complete(&mut self, now: Ticks) {
        debug_assert_eq!(self.remaining_time, 0);
        debug_assert!(self.completion_time.is_none(), "process completed twice");
        self.completion_time = Some(now);
    }
}

/// A process after the run is over, with its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedProcess {
    pub process: Process,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub response_time: Ticks,
}

impl FinishedProcess {
    /// Freezes a completed run state. `None` if the process never finished.
    pub fn freeze(process: Process, state: &RunState) -> Option<FinishedProcess> {
        let completion_time = state.completion_time?;
        let response_time = state.response_time?;
        let turnaround_time = completion_time - process.arrival_time;
        let waiting_time = turnaround_time - process.burst_time;
        Some(FinishedProcess {
            process: process,
            completion_time: completion_time,
            turnaround_time: turnaround_time,
            waiting_time: waiting_time,
            response_time: response_time,
        })
    }

    pub fn pid(&self) -> &str {
        &self.process.pid
    }
}
