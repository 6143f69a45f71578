//! carrier-runner: one entry point per stage of the R-Mobile demo dataset.
//!
//! Usage:
//!   carrier-runner plans     [--config FILE]
//!   carrier-runner customers [--config FILE] [--count 500] [--seed 42]
//!   carrier-runner calls     [--config FILE] [--seed 42]
//!   carrier-runner load      [--config FILE] [--db r_mobile.db]
//!   carrier-runner serve     [--config FILE] [--db r_mobile.db] [--port 8000]
//!   carrier-runner agent     [--config FILE] <question...>

mod server;

use anyhow::{bail, Result};
use carrier_core::{
    agent::SupportAgent, config::CarrierConfig, loader, pipeline, tabular::SaveOutcome,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        bail!("missing command");
    };
    let mut config = match flag_value(&args, "--config") {
        Some(path) => CarrierConfig::load(path)?,
        None => CarrierConfig::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    match command {
        "plans" => report(pipeline::export_plans(&config.generator)?),
        "customers" => report(pipeline::generate_customers(&config.generator)?),
        "calls" => {
            let now = chrono::Local::now().naive_local();
            report(pipeline::generate_call_records(&config.generator, now)?);
        }
        "load" => {
            let summary = loader::load_files(&config.loader)?;
            println!("=== LOAD SUMMARY ===");
            println!("  database:     {}", config.loader.db_path);
            println!("  plans:        {}", summary.plans);
            println!("  customers:    {}", summary.customers);
            println!("  call records: {}", summary.call_records);
        }
        "serve" => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config.server))?;
        }
        "agent" => {
            let question = positional_text(&args[2..]);
            if question.is_empty() {
                bail!("agent: expected a question");
            }
            let agent = SupportAgent::new(config.agent);
            let runtime = tokio::runtime::Runtime::new()?;
            let reply = runtime.block_on(agent.run(&question))?;
            println!("{}", reply.output_text);
        }
        other => {
            print_usage();
            bail!("unknown command: {other}");
        }
    }
    Ok(())
}

fn apply_overrides(config: &mut CarrierConfig, args: &[String]) {
    let g = &mut config.generator;
    g.seed = parse_arg(args, "--seed", g.seed);
    g.customer_count = parse_arg(args, "--count", g.customer_count);
    if let Some(db) = flag_value(args, "--db") {
        config.loader.db_path = db.to_string();
        config.server.db_path = db.to_string();
    }
    config.server.port = parse_arg(args, "--port", config.server.port);
}

fn report(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Written { path, rows } => println!("Saved {rows} rows to {path}."),
        SaveOutcome::Skipped => println!("Nothing to save."),
    }
}

/// Words after the command that are not flags or flag values.
fn positional_text(rest: &[String]) -> String {
    let mut words = Vec::new();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            words.push(arg.as_str());
        }
    }
    words.join(" ")
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn print_usage() {
    eprintln!("usage: carrier-runner <plans|customers|calls|load|serve|agent> [--config FILE] [flags]");
}
