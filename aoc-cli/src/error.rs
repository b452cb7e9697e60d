//! Error types for the CLI

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Solver error: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    #[error("Failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    #[error("Failed to read input for {year}/{day:02}: {source}")]
    InputRead {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    #[error("Solver execution failed: {0}")]
    Solver(#[from] aoc_solver::SolverError),

    #[error("Channel send error")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening either side that
    /// already is one and keeping `first`'s errors ahead of `second`'s
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                v1.iter().chain(v2).cloned().collect()
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first.clone()];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second.clone());
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Errors reading or writing the local input store
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory creation failed: {0}")]
    DirCreation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(message: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(message.to_string()).into()
    }

    fn messages(err: &ArcExecutorError) -> Vec<String> {
        match err.inner() {
            ExecutorError::Multiple(v) => v.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_two_singles() {
        let combined = ArcExecutorError::combine(single("a"), single("b"));
        assert_eq!(combined.to_string(), "Multiple errors occurred (2 total)");
        assert_eq!(
            messages(&combined),
            vec![
                "Thread pool creation failed: a",
                "Thread pool creation failed: b"
            ]
        );
    }

    #[test]
    fn test_combine_flattens_multiples_in_order() {
        let left = ArcExecutorError::combine(single("a"), single("b"));
        let right = ArcExecutorError::combine(single("c"), single("d"));

        let both = ArcExecutorError::combine(left.clone(), right.clone());
        assert_eq!(messages(&both).len(), 4);
        assert!(messages(&both)[0].ends_with(": a"));
        assert!(messages(&both)[3].ends_with(": d"));

        let prepended = ArcExecutorError::combine(single("z"), right);
        assert!(messages(&prepended)[0].ends_with(": z"));
        assert_eq!(messages(&prepended).len(), 3);

        let appended = ArcExecutorError::combine(left, single("z"));
        assert!(messages(&appended)[2].ends_with(": z"));
    }

    #[test]
    fn test_combine_opt() {
        let only = ArcExecutorError::combine_opt(None, single("a"));
        assert_eq!(messages(&only), vec!["Thread pool creation failed: a"]);

        let merged = ArcExecutorError::combine_opt(Some(only), single("b"));
        assert_eq!(messages(&merged).len(), 2);
    }
}
