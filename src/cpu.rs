use crate::process::Ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    Idle, Busy(usize)
}

/// The single simulated CPU. Tracks who is running and for how long it was busy.
#[derive(Debug)]
pub struct Cpu {
    pub state: CpuState,
    pub quantum_start: Ticks,
    pub total_busy_time: Ticks,
    pub total_idle_time: Ticks,
}

/// Busy/idle totals at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuStats {
    pub busy_time: Ticks,
    pub idle_time: Ticks,
    /// Simulated time at which the last process completed.
    pub makespan: Ticks,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu { state: CpuState::Idle, quantum_start: 0, total_busy_time: 0, total_idle_time: 0 }
    }

    pub fn start(&mut self, idx: usize, now: Ticks) {
        debug_assert_eq!(self.state, CpuState::Idle, "CPU should have been idle");
        self.state = CpuState::Busy(idx);
        self.quantum_start = now;
    }

    /// Ends the current slice at `now` and returns the process that held the CPU.
    pub fn stop(&mut self, now: Ticks) -> Option<usize> {
        match self.state {
            CpuState::Busy(idx) => {
                self.total_busy_time += now - self.quantum_start;
                self.state = CpuState::Idle;
                Some(idx)
            },
            CpuState::Idle => None,
        }
    }

    pub fn idle(&mut self, from: Ticks, until: Ticks) {
        debug_assert_eq!(self.state, CpuState::Idle);
        self.total_idle_time += until - from;
    }

    pub fn stats(&self, makespan: Ticks) -> CpuStats {
        CpuStats { busy_time: self.total_busy_time, idle_time: self.total_idle_time, makespan: makespan }
    }
}
