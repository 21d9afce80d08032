use std::env;
use std::process;

use log::info;

use rrsim::config::{self, Command, OutputFormat};
use rrsim::{report, workload};

fn run(args: &[String]) -> rrsim::Result<()> {
    match config::parse_args(args)? {
        Command::Help => println!("{}", config::USAGE),
        Command::Generate(params) => {
            info!("generating workload {:?}", params);
            print!("{}", workload::to_input(&workload::generate(&params)));
        },
        Command::Simulate(cfg) => {
            info!("running {} with quantum {}", cfg.input.display(), cfg.quantum);
            let (schedule, metrics) = rrsim::simulate(&cfg)?;
            match cfg.format {
                OutputFormat::Text => print!("{}", report::text(&schedule, &metrics, cfg.trace)),
                OutputFormat::Json => println!("{}", report::json(&schedule, &metrics, cfg.trace).pretty()),
            }
        },
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("rrsim: {}", e);
        process::exit(1);
    }
}
