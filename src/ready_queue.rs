use std::collections::VecDeque;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dequeue from an empty ready queue")]
pub struct EmptyQueue;

/// FIFO of process indices waiting for the CPU.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    procs: VecDeque<usize>,
}

impl ReadyQueue {
    pub fn new() -> ReadyQueue {
        ReadyQueue { procs: VecDeque::new() }
    }

    pub fn with_capacity(cap: usize) -> ReadyQueue {
        ReadyQueue { procs: VecDeque::with_capacity(cap) }
    }

    pub fn enqueue(&mut self, idx: usize) {
        debug_assert!(!self.procs.contains(&idx), "process {} queued twice", idx);
        self.procs.push_back(idx);
    }

    pub fn dequeue(&mut self) -> Result<usize, EmptyQueue> {
        self.procs.pop_front().ok_or(EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }
}
