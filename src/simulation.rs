use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use log::{debug, trace};

use crate::cpu::{Cpu, CpuStats};
use crate::error::Error;
use crate::event::{Event, EventType};
use crate::process::{FinishedProcess, Process, RunState, Ticks};
use crate::ready_queue::{EmptyQueue, ReadyQueue};

/// Fixed maximum slice granted per dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantum(NonZeroU64);

impl Quantum {
    pub fn new(ticks: Ticks) -> Option<Quantum> {
        NonZeroU64::new(ticks).map(Quantum)
    }

    pub fn get(self) -> Ticks {
        self.0.get()
    }
}

impl FromStr for Quantum {
    type Err = Error;

    /// Accepts any positive integer that fits in `Ticks`.
    fn from_str(s: &str) -> Result<Quantum, Error> {
        let invalid = || Error::InvalidQuantum(s.to_string());
        let t = s.trim();
        if t.starts_with('-') {
            return Err(invalid());
        }
        let n: Ticks = t.parse().map_err(|_| invalid())?;
        Quantum::new(n).ok_or_else(invalid)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One contiguous execution slice on the CPU, `[start_time, end_time)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub pid: String,
    pub start_time: Ticks,
    pub end_time: Ticks,
}

impl TimelineEntry {
    pub fn duration(&self) -> Ticks {
        self.end_time - self.start_time
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub timeline: Vec<TimelineEntry>,
    /// Finished processes in arrival order.
    pub processes: Vec<FinishedProcess>,
    pub events: Vec<Event>,
    pub cpu: CpuStats,
}

struct Scheduler<'a> {
    procs: &'a [Process],
    states: Vec<RunState>,
    ready: ReadyQueue,
    cpu: Cpu,
    quantum: Ticks,
    now: Ticks,
    // Index of the first process not yet admitted; `procs` is sorted by arrival.
    next_unadmitted: usize,
    timeline: Vec<TimelineEntry>,
    events: Vec<Event>,
}

impl<'a> Scheduler<'a> {
    fn new(procs: &'a [Process], quantum: Quantum) -> Scheduler<'a> {
        Scheduler {
            procs: procs,
            states: procs.iter().map(RunState::new).collect(),
            ready: ReadyQueue::with_capacity(procs.len()),
            cpu: Cpu::new(),
            quantum: quantum.get(),
            now: 0,
            next_unadmitted: 0,
            timeline: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queues every process that has arrived by `now`, in arrival order.
    fn admit(&mut self) {
        let procs = self.procs;
        while let Some(p) = procs.get(self.next_unadmitted) {
            if p.arrival_time > self.now {
                break;
            }
            trace!("T={} admit {} (arrived T={})", self.now, p.pid, p.arrival_time);
            self.events.push(Event::new(EventType::Arrival(p.pid.clone()), p.arrival_time));
            self.ready.enqueue(self.next_unadmitted);
            self.next_unadmitted += 1;
        }
    }

    fn next_arrival(&self) -> Option<Ticks> {
        self.procs.get(self.next_unadmitted).map(|p| p.arrival_time)
    }

    fn run(&mut self) {
        loop {
            self.admit();
            let idx = match self.ready.dequeue() {
                Ok(idx) => idx,
                Err(EmptyQueue) => match self.next_arrival() {
                    Some(arrival) => {
                        debug!("T={} CPU idle until {}", self.now, arrival);
                        self.events.push(Event::new(EventType::Idle { until: arrival }, self.now));
                        self.cpu.idle(self.now, arrival);
                        self.now = arrival;
                        continue;
                    },
                    None => break,
                },
            };
            self.execute(idx);
        }
    }

    fn execute(&mut self, idx: usize) {
        let procs = self.procs;
        let p = &procs[idx];
        let state = &mut self.states[idx];
        state.dispatched(p, self.now);
        self.cpu.start(idx, self.now);
        self.events.push(Event::new(EventType::Dispatch(p.pid.clone()), self.now));

        let slice = self.quantum.min(state.remaining_time);
        let start = self.now;
        self.now += slice;
        let remaining = state.consume(slice);
        let ran = self.cpu.stop(self.now);
        debug_assert_eq!(ran, Some(idx));
        debug!("T={} ran {} for {} ({} left)", start, p.pid, slice, remaining);
        self.timeline.push(TimelineEntry { pid: p.pid.clone(), start_time: start, end_time: self.now });

        // Arrivals during the slice go ahead of the preempted process.
        self.admit();

        if remaining > 0 {
            self.events.push(Event::new(EventType::QuantumOver(p.pid.clone()), self.now));
            self.ready.enqueue(idx);
        } else {
            self.states[idx].complete(self.now);
            self.events.push(Event::new(EventType::Departure(p.pid.clone()), self.now));
        }
    }

    fn finish(self) -> Schedule {
        let makespan = self.now;
        let processes = self.procs.iter()
            .zip(&self.states)
            .filter_map(|(p, st)| FinishedProcess::freeze(p.clone(), st))
            .collect::<Vec<_>>();
        debug_assert_eq!(processes.len(), self.procs.len(), "every process must complete");
        Schedule { timeline: self.timeline, processes: processes, events: self.events, cpu: self.cpu.stats(makespan) }
    }
}

/// Simulates Round-Robin over `processes`. They are stably sorted by arrival
/// first, so equal arrivals keep their input order. The processes must fit
/// the clock (see [`process::horizon`]); [`loader::parse`] checks this.
///
/// [`process::horizon`]: crate::process::horizon
/// [`loader::parse`]: crate::loader::parse
pub fn run(mut processes: Vec<Process>, quantum: Quantum) -> Schedule {
    debug_assert!(crate::process::horizon(&processes).is_some(), "process times overflow the clock");
    processes.sort_by_key(|p| p.arrival_time);
    debug!("simulating {} processes with quantum {}", processes.len(), quantum);
    let mut sched = Scheduler::new(&processes, quantum);
    sched.run();
    sched.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn procs(table: &[(&str, Ticks, Ticks)]) -> Vec<Process> {
        table.iter().map(|&(pid, a, b)| Process::new(pid, a, b).unwrap()).collect()
    }

    fn slices(s: &Schedule) -> Vec<(&str, Ticks, Ticks)> {
        s.timeline.iter().map(|e| (e.pid.as_str(), e.start_time, e.end_time)).collect()
    }

    #[test]
    fn quantum_parsing() {
        assert_eq!("3".parse::<Quantum>().unwrap().get(), 3);
        assert_eq!(" 10 ".parse::<Quantum>().unwrap().get(), 10);
        assert_eq!("18446744073709551615".parse::<Quantum>().unwrap().get(), u64::MAX);
        for bad in &["0", "-0", "-2", "1.5", "two", "", "18446744073709551616"] {
            match bad.parse::<Quantum>() {
                Err(Error::InvalidQuantum(v)) => assert_eq!(v, *bad),
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn arrivals_during_slice_precede_requeue() {
        // B arrives exactly when A's first slice ends; it must run before A again.
        let s = run(procs(&[("A", 0, 4), ("B", 2, 2)]), Quantum::new(2).unwrap());
        assert_eq!(slices(&s), vec![("A", 0, 2), ("B", 2, 4), ("A", 4, 6)]);
    }

    #[test]
    fn idle_gap_leaves_no_entry() {
        let s = run(procs(&[("A", 0, 1), ("B", 5, 2)]), Quantum::new(4).unwrap());
        assert_eq!(slices(&s), vec![("A", 0, 1), ("B", 5, 7)]);
        assert_eq!(s.cpu, CpuStats { busy_time: 3, idle_time: 4, makespan: 7 });
        assert!(s.events.contains(&Event::new(EventType::Idle { until: 5 }, 1)));
        assert_eq!(s.processes[1].response_time, 0);
    }

    #[test]
    fn leading_gap_is_idle_time() {
        let s = run(procs(&[("A", 3, 2)]), Quantum::new(1).unwrap());
        assert_eq!(slices(&s), vec![("A", 3, 4), ("A", 4, 5)]);
        assert_eq!(s.cpu.idle_time, 3);
        assert_eq!(s.processes[0].response_time, 0);
    }

    #[test]
    fn equal_arrivals_keep_input_order() {
        let s = run(procs(&[("Z", 1, 1), ("Y", 0, 1), ("X", 1, 1)]), Quantum::new(5).unwrap());
        assert_eq!(slices(&s), vec![("Y", 0, 1), ("Z", 1, 2), ("X", 2, 3)]);
        let order: Vec<&str> = s.processes.iter().map(|p| p.pid()).collect();
        assert_eq!(order, vec!["Y", "Z", "X"]);
    }

    #[test]
    fn empty_input_gives_empty_schedule() {
        let s = run(Vec::new(), Quantum::new(3).unwrap());
        assert!(s.timeline.is_empty());
        assert!(s.processes.is_empty());
        assert_eq!(s.cpu, CpuStats::default());
    }

    #[test]
    fn arrival_events_carry_arrival_time() {
        // P2 arrives mid-slice but is only admitted when the slice ends.
        let s = run(procs(&[("P1", 0, 4), ("P2", 1, 1)]), Quantum::new(2).unwrap());
        let trace: Vec<String> = s.events.iter().map(|e| e.to_string()).collect();
        assert_eq!(&trace[..4], &["T=0 Arrival(P1)", "T=0 Dispatch(P1)", "T=1 Arrival(P2)", "T=2 QuantumOver(P1)"]);
    }

    #[test]
    fn event_trace_for_preemption() {
        let s = run(procs(&[("A", 0, 3)]), Quantum::new(2).unwrap());
        let trace: Vec<String> = s.events.iter().map(|e| e.to_string()).collect();
        assert_eq!(trace, vec![
            "T=0 Arrival(A)",
            "T=0 Dispatch(A)",
            "T=2 QuantumOver(A)",
            "T=2 Dispatch(A)",
            "T=3 Departure(A)",
        ]);
    }
}
