use std::fmt;

use crate::process::Ticks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    /// The process entered the ready queue.
    Arrival(String),
    Dispatch(String),
    /// Slice used up with work left; the process goes to the back of the queue.
    QuantumOver(String),
    Departure(String),
    /// CPU had nothing to run until the given time.
    Idle { until: Ticks },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub _type: EventType,
    pub timestamp: Ticks,
}

impl Event {
    pub fn new(_type: EventType, timestamp: Ticks) -> Event {
        Event { _type: _type, timestamp: timestamp }
    }

    pub fn pid(&self) -> Option<&str> {
        use self::EventType::*;
        match self._type {
            Arrival(ref pid) | Dispatch(ref pid) | QuantumOver(ref pid) | Departure(ref pid) => Some(pid.as_str()),
            Idle { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::EventType::*;
        write!(f, "T={} ", self.timestamp)?;
        match self._type {
            Arrival(ref pid) => write!(f, "Arrival({})", pid),
            Dispatch(ref pid) => write!(f, "Dispatch({})", pid),
            QuantumOver(ref pid) => write!(f, "QuantumOver({})", pid),
            Departure(ref pid) => write!(f, "Departure({})", pid),
            Idle { until } => write!(f, "Idle(until T={})", until),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_pid() {
        let e = Event::new(EventType::QuantumOver("P1".to_string()), 4);
        assert_eq!(e.to_string(), "T=4 QuantumOver(P1)");
        assert_eq!(e.pid(), Some("P1"));
        let idle = Event::new(EventType::Idle { until: 9 }, 6);
        assert_eq!(idle.to_string(), "T=6 Idle(until T=9)");
        assert_eq!(idle.pid(), None);
    }
}
