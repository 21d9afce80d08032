use std::fs;
use std::path::{Path, PathBuf};

use rustc_serialize::json::Json;

use crate::error::{Error, Result};
use crate::simulation::Quantum;
use crate::workload::WorkloadParams;

pub const USAGE: &str = "\
usage: rrsim [--json] [--trace] <processes-file> <quantum>
       rrsim --config <run.json>
       rrsim generate [--count N] [--seed S] [--max-arrival A] [--max-burst B]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text, Json
}

/// A validated simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub input: PathBuf,
    pub quantum: Quantum,
    pub format: OutputFormat,
    /// Also print the scheduler event trace.
    pub trace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Simulate(SimConfig),
    Generate(WorkloadParams),
    Help,
}

fn usage<S: Into<String>>(msg: S) -> Error {
    Error::Usage(format!("{}\n{}", msg.into(), USAGE))
}

fn config_err<S: Into<String>>(msg: S) -> Error {
    Error::Config(msg.into())
}

impl SimConfig {
    /// Decodes `{"input": ..., "quantum": ..., "format": ..., "trace": ...}`.
    /// Relative `input` paths are resolved against `base`.
    pub fn from_json(text: &str, base: &Path) -> Result<SimConfig> {
        let json = Json::from_str(text).map_err(|e| config_err(format!("{:?}", e)))?;
        let input = json.find("input")
            .and_then(|j| j.as_string())
            .ok_or_else(|| config_err("`input` must be a string"))?;
        let quantum = match json.find("quantum") {
            Some(&Json::I64(n)) => n.to_string().parse()?,
            Some(&Json::U64(n)) => n.to_string().parse()?,
            Some(other) => return Err(Error::InvalidQuantum(other.to_string())),
            None => return Err(config_err("missing `quantum`")),
        };
        let format = match json.find("format") {
            None => OutputFormat::Text,
            Some(j) => match j.as_string() {
                Some("text") => OutputFormat::Text,
                Some("json") => OutputFormat::Json,
                _ => return Err(config_err(format!("unknown format {}", j))),
            },
        };
        let trace = match json.find("trace") {
            None => false,
            Some(j) => j.as_boolean().ok_or_else(|| config_err("`trace` must be a boolean"))?,
        };
        Ok(SimConfig { input: base.join(input), quantum: quantum, format: format, trace: trace })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SimConfig> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Io { path: path.to_path_buf(), source: e })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        SimConfig::from_json(&text, base)
    }
}

fn flag_value<'a, I: Iterator<Item = &'a String>>(flag: &str, args: &mut I) -> Result<&'a str> {
    args.next().map(|s| s.as_str()).ok_or_else(|| usage(format!("{} needs a value", flag)))
}

fn number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| usage(format!("{} expects a non-negative integer, got `{}`", flag, value)))
}

fn parse_generate(args: &[String]) -> Result<Command> {
    let mut params = WorkloadParams::default();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--count" => params.count = number(arg, flag_value(arg, &mut it)?)?,
            "--seed" => params.seed = number(arg, flag_value(arg, &mut it)?)?,
            "--max-arrival" => params.max_arrival = number(arg, flag_value(arg, &mut it)?)?,
            "--max-burst" => {
                params.max_burst = number(arg, flag_value(arg, &mut it)?)?;
                if params.max_burst == 0 {
                    return Err(usage("--max-burst must be positive"));
                }
            },
            other => return Err(usage(format!("unexpected argument `{}`", other))),
        }
    }
    Ok(Command::Generate(params))
}

/// Parses command-line arguments, program name excluded.
pub fn parse_args(args: &[String]) -> Result<Command> {
    if args.first().map(|s| s.as_str()) == Some("generate") {
        return parse_generate(&args[1..]);
    }
    let mut format = OutputFormat::Text;
    let mut trace = false;
    let mut config = None;
    let mut positional = Vec::new();
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--json" => format = OutputFormat::Json,
            "--trace" => trace = true,
            "--config" => config = Some(flag_value(arg, &mut it)?),
            s if s.starts_with("--") => return Err(usage(format!("unknown flag `{}`", s))),
            s => positional.push(s),
        }
    }
    if let Some(path) = config {
        if !positional.is_empty() {
            return Err(usage("--config takes no positional arguments"));
        }
        let mut cfg = SimConfig::load(path)?;
        if format == OutputFormat::Json {
            cfg.format = format;
        }
        cfg.trace |= trace;
        return Ok(Command::Simulate(cfg));
    }
    match positional[..] {
        [input, quantum] => Ok(Command::Simulate(SimConfig {
            input: PathBuf::from(input),
            quantum: quantum.parse()?,
            format: format,
            trace: trace,
        })),
        _ => Err(usage("expected <processes-file> <quantum>")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn positional_run() {
        let cmd = parse_args(&args("--trace procs.txt 3")).unwrap();
        assert_eq!(cmd, Command::Simulate(SimConfig {
            input: PathBuf::from("procs.txt"),
            quantum: Quantum::new(3).unwrap(),
            format: OutputFormat::Text,
            trace: true,
        }));
        match parse_args(&args("procs.txt 2 --json")).unwrap() {
            Command::Simulate(cfg) => assert_eq!(cfg.format, OutputFormat::Json),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn bad_quantum_is_rejected_up_front() {
        for q in &["0", "-1", "abc"] {
            match parse_args(&args(&format!("procs.txt {}", q))) {
                Err(Error::InvalidQuantum(v)) => assert_eq!(v, *q),
                other => panic!("{:?}", other),
            }
        }
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(parse_args(&args("procs.txt")), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args("a b c")), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args("--bogus a 1")), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args("--config")), Err(Error::Usage(_))));
        assert_eq!(parse_args(&args("--help")).unwrap(), Command::Help);
    }

    #[test]
    fn generate_args() {
        let cmd = parse_args(&args("generate --count 4 --seed 9 --max-burst 2")).unwrap();
        assert_eq!(cmd, Command::Generate(WorkloadParams { count: 4, seed: 9, max_arrival: 20, max_burst: 2 }));
        assert!(matches!(parse_args(&args("generate --count -3")), Err(Error::Usage(_))));
        assert!(matches!(parse_args(&args("generate --max-burst 0")), Err(Error::Usage(_))));
    }

    #[test]
    fn json_config() {
        let cfg = SimConfig::from_json(
            r#"{"input": "procs.txt", "quantum": 4, "format": "json", "trace": true}"#,
            Path::new("/runs"),
        ).unwrap();
        assert_eq!(cfg, SimConfig {
            input: PathBuf::from("/runs/procs.txt"),
            quantum: Quantum::new(4).unwrap(),
            format: OutputFormat::Json,
            trace: true,
        });
        let minimal = SimConfig::from_json(r#"{"input": "p", "quantum": 1}"#, Path::new("")).unwrap();
        assert_eq!(minimal.format, OutputFormat::Text);
        assert!(!minimal.trace);
    }

    #[test]
    fn json_config_errors() {
        let base = Path::new("");
        assert!(matches!(SimConfig::from_json(r#"{"input": "p", "quantum": 0}"#, base),
                         Err(Error::InvalidQuantum(_))));
        assert!(matches!(SimConfig::from_json(r#"{"input": "p", "quantum": -2}"#, base),
                         Err(Error::InvalidQuantum(_))));
        assert!(matches!(SimConfig::from_json(r#"{"input": "p", "quantum": 1.5}"#, base),
                         Err(Error::InvalidQuantum(_))));
        assert!(matches!(SimConfig::from_json(r#"{"quantum": 2}"#, base), Err(Error::Config(_))));
        assert!(matches!(SimConfig::from_json(r#"{"input": "p"}"#, base), Err(Error::Config(_))));
        assert!(matches!(SimConfig::from_json(r#"{"input": "p", "quantum": 2, "format": "xml"}"#, base),
                         Err(Error::Config(_))));
        assert!(matches!(SimConfig::from_json("not json", base), Err(Error::Config(_))));
    }
}
