//! Configuration resolution from CLI args and environment

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use log::LevelFilter;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `--input-dir` is not given
pub const INPUT_DIR_ENV: &str = "AOC_INPUT_DIR";
const DEFAULT_INPUT_DIR: &str = "~/.cache/aoc_solver";

/// Where an explicitly supplied input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// Input given on the command line for exactly one year/day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOverride {
    pub year: u16,
    pub day: u8,
    pub source: InputSource,
}

impl InputOverride {
    pub fn read(&self) -> Result<String, CliError> {
        match &self.source {
            InputSource::Stdin => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                Ok(input)
            }
            InputSource::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    pub tags: Vec<String>,
    pub input_dir: PathBuf,
    pub input_override: Option<InputOverride>,
    /// Store the override's text in `input_dir`
    pub save_input: bool,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let input_dir = resolve_input_dir(args.input_dir, std::env::var_os(INPUT_DIR_ENV));
        let input_override = resolve_input_override(args.input, args.year, args.day)?;
        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".into())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_dir,
            input_override,
            save_input: args.save_input,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        })
    }
}

/// `--input-dir`, then the environment, then the default; `~` expanded
fn resolve_input_dir(arg: Option<PathBuf>, env: Option<std::ffi::OsString>) -> PathBuf {
    let dir = arg
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    expand_tilde(&dir)
}

fn resolve_input_override(
    input: Option<PathBuf>,
    year: Option<u16>,
    day: Option<u8>,
) -> Result<Option<InputOverride>, CliError> {
    let Some(path) = input else {
        return Ok(None);
    };
    let (Some(year), Some(day)) = (year, day) else {
        return Err(CliError::Config(
            "--input needs both --year and --day".to_string(),
        ));
    };

    let source = if path.as_os_str() == "-" {
        InputSource::Stdin
    } else {
        InputSource::File(path)
    };
    Ok(Some(InputOverride { year, day, source }))
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let plain = PathBuf::from("/tmp/inputs");
        assert_eq!(expand_tilde(&plain), plain);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~")), home);
            assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
        }
    }

    #[test]
    fn test_input_dir_precedence() {
        let arg = Some(PathBuf::from("/from/arg"));
        let env = Some("/from/env".into());

        assert_eq!(
            resolve_input_dir(arg, env.clone()),
            PathBuf::from("/from/arg")
        );
        assert_eq!(resolve_input_dir(None, env), PathBuf::from("/from/env"));
        assert_eq!(
            resolve_input_dir(None, Some("".into())),
            expand_tilde(Path::new(DEFAULT_INPUT_DIR))
        );
    }

    #[test]
    fn test_input_override() {
        assert_eq!(resolve_input_override(None, Some(2023), None).unwrap(), None);

        let stdin = resolve_input_override(Some("-".into()), Some(2023), Some(3)).unwrap();
        assert_eq!(
            stdin,
            Some(InputOverride {
                year: 2023,
                day: 3,
                source: InputSource::Stdin
            })
        );

        let file = resolve_input_override(Some("in.txt".into()), Some(2023), Some(1)).unwrap();
        assert_eq!(
            file.map(|o| o.source),
            Some(InputSource::File("in.txt".into()))
        );

        assert!(matches!(
            resolve_input_override(Some("-".into()), None, Some(3)),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_input_override_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("day3.txt");
        std::fs::write(&path, "1*1\n").unwrap();

        let source = InputOverride {
            year: 2023,
            day: 3,
            source: InputSource::File(path),
        };
        assert_eq!(source.read().unwrap(), "1*1\n");
    }

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(7), LevelFilter::Trace);
    }
}
