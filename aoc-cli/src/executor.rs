//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// `None` when the input never reached a parser
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Input given on the command line for a single year/day
struct InlineInput {
    year: u16,
    day: u8,
    text: String,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// State shared by every worker; only read during execution
struct SyncExecutorConfig {
    registry: SolverRegistry,
    store: InputStore,
    inline_input: Option<InlineInput>,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// `inline_input` replaces the stored input of the year/day the config
    /// names in its input override
    pub fn new(
        registry: SolverRegistry,
        config: &Config,
        inline_input: Option<String>,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        let inline_input = config
            .input_override
            .as_ref()
            .zip(inline_input)
            .map(|(o, text)| InlineInput {
                year: o.year,
                day: o.day,
                text,
            });

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                store: InputStore::new(config.input_dir.clone()),
                inline_input,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Year/day pairs among `work_items` with no input available
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        let cfg = &self.sync_executor_config;
        work_items
            .iter()
            .filter(|w| !cfg.has_inline_input(w.year, w.day) && !cfg.store.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    pub fn input_dir(&self) -> &std::path::Path {
        self.sync_executor_config.store.dir()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;
        info!(
            "running {} solver(s), parallelized by {:?}",
            work_items.len(),
            cfg.parallelize_by
        );

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, cfg) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each item in run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_work_item(&work, tx, cfg).err())
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err)
        })
    }

    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    items
                        .iter()
                        .map(|work| run_work_item(work, tx, cfg).err())
                        .fold(None, merge_errors)
                })
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err)
        })
    }
}

impl SyncExecutorConfig {
    fn has_inline_input(&self, year: u16, day: u8) -> bool {
        self.inline_input
            .as_ref()
            .is_some_and(|i| (i.year, i.day) == (year, day))
    }

    /// Inline input if it targets this year/day, otherwise the stored file
    fn load_input(&self, year: u16, day: u8) -> Result<Option<String>, ExecutorError> {
        if let Some(inline) = self
            .inline_input
            .as_ref()
            .filter(|i| (i.year, i.day) == (year, day))
        {
            return Ok(Some(inline.text.clone()));
        }

        self.store
            .get(year, day)
            .map_err(|source| ExecutorError::InputRead { year, day, source })
    }
}

fn merge_errors(
    left: Option<ArcExecutorError>,
    right: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (left, right) {
        (Some(l), Some(r)) => Some(ArcExecutorError::combine(l, r)),
        (l, r) => l.or(r),
    }
}

/// Requested parts limited to what the solver implements
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

/// Load input for one item and solve its parts, sending one result per part.
///
/// Missing inputs and parse failures become per-part error results; only
/// read failures and a closed channel are reported as executor errors.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match cfg.load_input(year, day) {
        Ok(Some(input)) => input,
        Ok(None) => {
            let path = cfg.store.input_path(year, day);
            for part in work.parts.clone() {
                let message = format!("no input file at {}", path.display());
                send(tx, error_result(year, day, part, ParseError::MissingData(message)))?;
            }
            return Ok(());
        }
        Err(e) => {
            let message = e.to_string();
            for part in work.parts.clone() {
                let error = ParseError::Other(message.clone());
                send(tx, error_result(year, day, part, error))?;
            }
            return Err(e.into());
        }
    };
    debug!("{year}/{day:02}: loaded {} bytes of input", input.len());

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &cfg.registry)
    } else {
        run_parts_sequential(work, &input, tx, &cfg.registry)
    }
}

/// Parse once, then solve each part in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    match registry.create_solver(year, day, input) {
        Ok(mut solver) => {
            for part in work.parts.clone() {
                send(tx, solve_part(year, day, part, &mut *solver))?;
            }
        }
        Err(e) => {
            for part in work.parts.clone() {
                send(tx, setup_failure(year, day, part, &e))?;
            }
        }
    }
    Ok(())
}

/// Each part parses its own copy of the input and solves on the pool.
///
/// Results are buffered so the item's parts still leave in order.
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => setup_failure(year, day, part, &e),
        })
        .collect();

    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

fn error_result(year: u16, day: u8, part: u8, error: ParseError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(SolverError::ParseError(error)),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

/// Per-part copy of an error raised before any part could run
fn setup_failure(year: u16, day: u8, part: u8, error: &SolverError) -> SolverResult {
    let answer = match error {
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::NotFound(y, d) => SolverError::NotFound(*y, *d),
        SolverError::InvalidYearDay(y, d) => SolverError::InvalidYearDay(*y, *d),
        SolverError::SolveError(e) => SolverError::ParseError(ParseError::Other(e.to_string())),
    };
    SolverResult {
        year,
        day,
        part,
        answer: Err(answer),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (Err(e.into()), TimeDelta::zero()),
    };

    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration: Some(solver.parse_duration()),
        solve_duration,
    }
}
