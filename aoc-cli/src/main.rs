//! AOC CLI - runs registered Advent of Code solvers on local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logger;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{RegistryBuilder, SolverRegistry};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use input::InputStore;
use log::{debug, warn};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    logger::init(config.log_level)?;

    let registry = build_registry(&config.tags)?;
    debug!("{} solver(s) registered", registry.len());

    let inline_input = match &config.input_override {
        Some(source) => {
            let text = source.read()?;
            if config.save_input {
                let store = InputStore::new(config.input_dir.clone());
                store.put(source.year, source.day, &text)?;
                debug!(
                    "saved input to {}",
                    store.input_path(source.year, source.day).display()
                );
            }
            Some(text)
        }
        None => None,
    };

    let executor = Executor::new(registry, &config, inline_input)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing = executor.missing_inputs(&work_items);
    if !missing.is_empty() {
        warn!(
            "missing {} input file(s) in {}",
            missing.len(),
            executor.input_dir().display()
        );
        for (year, day) in &missing {
            warn!("  - {}_day{:02}.txt", year, day);
        }
    }

    let expected_keys: Vec<ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();

    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }
    run_executor(executor, expected_keys, config.quiet)
}

/// Run the executor on a background thread, printing results in order
fn run_executor(
    executor: Executor,
    expected_keys: Vec<ResultKey>,
    quiet: bool,
) -> Result<(), CliError> {
    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        for key in aggregator.missing() {
            warn!(
                "no result received for {}/{:02} part {}",
                key.year, key.day, key.part
            );
        }
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    Ok(())
}

/// Registry of every linked solver carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
