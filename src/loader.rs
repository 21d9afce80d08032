use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, ParseErrorKind, Result};
use crate::process::{self, Process, Ticks};

fn parse_line(line_no: usize, line: &str) -> Result<Process> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let parse_err = |kind| Error::Parse { line: line_no, kind: kind };
    if fields.len() != 3 {
        return Err(parse_err(ParseErrorKind::FieldCount(fields.len())));
    }
    let int = |field: &'static str, value: &str| {
        value.parse::<i64>().map_err(|_| parse_err(ParseErrorKind::NotAnInteger {
            field: field,
            value: value.to_string(),
        }))
    };
    let arrival = int("arrival time", fields[1])?;
    let burst = int("burst time", fields[2])?;
    if arrival < 0 {
        return Err(parse_err(ParseErrorKind::NotAnInteger {
            field: "arrival time",
            value: fields[1].to_string(),
        }));
    }
    if burst <= 0 {
        return Err(parse_err(ParseErrorKind::NonPositiveBurst(burst)));
    }
    Process::new(fields[0], arrival as Ticks, burst as Ticks)
        .ok_or_else(|| parse_err(ParseErrorKind::NonPositiveBurst(burst)))
}

/// Parses `pid arrival burst` lines. Blank lines and `#` comments are skipped.
/// The whole set must fit the simulation clock.
pub fn parse(text: &str) -> Result<Vec<Process>> {
    let procs = text.lines()
        .enumerate()
        .filter(|&(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| parse_line(i + 1, line))
        .collect::<Result<Vec<_>>>()?;
    if process::horizon(&procs).is_none() {
        return Err(Error::TimeOverflow);
    }
    Ok(procs)
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Process>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Io { path: path.to_path_buf(), source: e })?;
    let procs = parse(&text)?;
    info!("loaded {} processes from {}", procs.len(), path.display());
    Ok(procs)
}
