use std::collections::BTreeMap;
use std::fmt::Write;

use rustc_serialize::json::{Json, ToJson};

use crate::event::{Event, EventType};
use crate::metrics::Metrics;
use crate::process::FinishedProcess;
use crate::simulation::{Schedule, TimelineEntry};

/// `P1|P2|P1|`, one symbol per slice.
pub fn gantt_symbols(timeline: &[TimelineEntry]) -> String {
    timeline.iter().map(|e| format!("{}|", e.pid)).collect()
}

/// `0 P1 2 P2 4 -- 6 P3 7`; idle gaps show as `--`.
pub fn gantt_times(timeline: &[TimelineEntry]) -> String {
    let mut out = String::new();
    let mut last_end = None;
    for e in timeline {
        match last_end {
            None => { let _ = write!(out, "{}", e.start_time); },
            Some(end) if end < e.start_time => { let _ = write!(out, " -- {}", e.start_time); },
            Some(_) => {},
        }
        let _ = write!(out, " {} {}", e.pid, e.end_time);
        last_end = Some(e.end_time);
    }
    out
}

pub fn text(schedule: &Schedule, metrics: &Metrics, trace: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, schedule, metrics, trace);
    out
}

fn write_text(out: &mut String, schedule: &Schedule, metrics: &Metrics, trace: bool) -> std::fmt::Result {
    writeln!(out, "Gantt Chart:")?;
    writeln!(out, "{}", gantt_symbols(&schedule.timeline))?;
    writeln!(out, "{}", gantt_times(&schedule.timeline))?;
    writeln!(out)?;
    writeln!(out, "{:<10}{:<15}{:<12}{:<17}{:<20}{:<15}{:<15}",
             "Process", "Arrival Time", "Burst Time", "Completion Time",
             "Turnaround Time", "Waiting Time", "Response Time")?;
    for p in &schedule.processes {
        writeln!(out, "{:<10}{:<15}{:<12}{:<17}{:<20}{:<15}{:<15}",
                 p.pid(), p.process.arrival_time, p.process.burst_time, p.completion_time,
                 p.turnaround_time, p.waiting_time, p.response_time)?;
    }
    writeln!(out)?;
    writeln!(out, "Average Response Time: {:.2}", metrics.avg_response)?;
    writeln!(out, "Average Waiting Time: {:.2}", metrics.avg_waiting)?;
    writeln!(out, "Average Turnaround Time: {:.2}", metrics.avg_turnaround)?;
    writeln!(out, "CPU Utilization: {:.2}%", metrics.cpu_utilization * 100.0)?;
    writeln!(out, "Throughput: {:.2} processes/tick", metrics.throughput)?;
    writeln!(out, "Context Switches: {}", metrics.context_switches)?;
    if trace {
        writeln!(out)?;
        writeln!(out, "Event Trace:")?;
        for e in &schedule.events {
            writeln!(out, "{}", e)?;
        }
    }
    Ok(())
}

fn object(fields: Vec<(&str, Json)>) -> Json {
    Json::Object(fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect::<BTreeMap<_, _>>())
}

impl ToJson for TimelineEntry {
    fn to_json(&self) -> Json {
        object(vec![
            ("pid", self.pid.to_json()),
            ("start", self.start_time.to_json()),
            ("end", self.end_time.to_json()),
        ])
    }
}

impl ToJson for FinishedProcess {
    fn to_json(&self) -> Json {
        object(vec![
            ("pid", self.process.pid.to_json()),
            ("arrival_time", self.process.arrival_time.to_json()),
            ("burst_time", self.process.burst_time.to_json()),
            ("completion_time", self.completion_time.to_json()),
            ("turnaround_time", self.turnaround_time.to_json()),
            ("waiting_time", self.waiting_time.to_json()),
            ("response_time", self.response_time.to_json()),
        ])
    }
}

impl ToJson for Metrics {
    fn to_json(&self) -> Json {
        object(vec![
            ("avg_turnaround", self.avg_turnaround.to_json()),
            ("avg_waiting", self.avg_waiting.to_json()),
            ("avg_response", self.avg_response.to_json()),
            ("cpu_utilization", self.cpu_utilization.to_json()),
            ("throughput", self.throughput.to_json()),
            ("context_switches", (self.context_switches as u64).to_json()),
        ])
    }
}

impl ToJson for Event {
    fn to_json(&self) -> Json {
        let kind = match self._type {
            EventType::Arrival(_) => "arrival",
            EventType::Dispatch(_) => "dispatch",
            EventType::QuantumOver(_) => "quantum_over",
            EventType::Departure(_) => "departure",
            EventType::Idle { .. } => "idle",
        };
        let mut fields = vec![("time", self.timestamp.to_json()), ("type", kind.to_json())];
        match self._type {
            EventType::Idle { until } => fields.push(("until", until.to_json())),
            _ => fields.push(("pid", self.pid().map(|p| p.to_string()).to_json())),
        }
        object(fields)
    }
}

pub fn json(schedule: &Schedule, metrics: &Metrics, trace: bool) -> Json {
    let mut fields = vec![
        ("timeline", schedule.timeline.to_json()),
        ("processes", schedule.processes.to_json()),
        ("metrics", metrics.to_json()),
    ];
    if trace {
        fields.push(("events", schedule.events.to_json()));
    }
    object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;
    use crate::simulation::{self, Quantum};

    fn sample() -> (Schedule, Metrics) {
        let procs = vec![
            Process::new("P1", 0, 5).unwrap(),
            Process::new("P2", 1, 3).unwrap(),
            Process::new("P3", 2, 1).unwrap(),
        ];
        let s = simulation::run(procs, Quantum::new(2).unwrap());
        let m = Metrics::from_processes(&s.processes).unwrap()
            .with_cpu(&s.cpu, &s.timeline, s.processes.len());
        (s, m)
    }

    fn entry(pid: &str, start: u64, end: u64) -> TimelineEntry {
        TimelineEntry { pid: pid.to_string(), start_time: start, end_time: end }
    }

    #[test]
    fn gantt_lines() {
        let (s, _) = sample();
        assert_eq!(gantt_symbols(&s.timeline), "P1|P2|P3|P1|P2|P1|");
        assert_eq!(gantt_times(&s.timeline), "0 P1 2 P2 4 P3 5 P1 7 P2 8 P1 9");
        let gapped = vec![entry("A", 1, 2), entry("B", 5, 6)];
        assert_eq!(gantt_times(&gapped), "1 A 2 -- 5 B 6");
        assert_eq!(gantt_times(&[]), "");
    }

    #[test]
    fn text_report() {
        let (s, m) = sample();
        let out = text(&s, &m, false);
        assert!(out.starts_with("Gantt Chart:\nP1|P2|P3|P1|P2|P1|\n"));
        assert!(out.contains("Average Response Time: 1.00\n"));
        assert!(out.contains("Average Waiting Time: 3.33\n"));
        assert!(out.contains("Average Turnaround Time: 6.33\n"));
        assert!(out.lines().any(|l| l.split_whitespace().collect::<Vec<_>>() == ["P2", "1", "3", "8", "7", "4", "1"]));
        assert!(out.lines().any(|l| l.split_whitespace().collect::<Vec<_>>() == ["P1", "0", "5", "9", "9", "4", "0"]));
        assert!(!out.contains("Event Trace:"));
        assert!(text(&s, &m, true).contains("T=2 QuantumOver(P1)"));
    }

    #[test]
    fn json_report() {
        let (s, m) = sample();
        let j = json(&s, &m, true);
        let timeline = j.find("timeline").and_then(|t| t.as_array()).unwrap();
        assert_eq!(timeline.len(), 6);
        assert_eq!(timeline[2].find("pid").and_then(|p| p.as_string()), Some("P3"));
        let p1 = &j.find("processes").and_then(|p| p.as_array()).unwrap()[0];
        assert_eq!(p1.find("completion_time").and_then(|c| c.as_u64()), Some(9));
        assert_eq!(j.find_path(&["metrics", "context_switches"]).and_then(|c| c.as_u64()), Some(5));
        assert!(j.find("events").is_some());
        assert!(json(&s, &m, false).find("events").is_none());
    }
}
