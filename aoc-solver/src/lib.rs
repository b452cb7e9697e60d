//! Advent of Code solver framework
//!
//! Solvers are plain types implementing [`AocParser`] plus one
//! [`PartSolver<N>`] per part. `#[derive(AocSolver)]` turns those into a
//! [`Solver`] and `#[derive(AutoRegisterSolver)]` submits it to a global
//! plugin list that [`RegistryBuilder::register_all_plugins`] picks up.
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, RegistryBuilder, SolveError};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Floors;
//!
//! impl AocParser for Floors {
//!     type SharedData<'a> = &'a str;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         Ok(input.trim())
//!     }
//! }
//!
//! impl PartSolver<1> for Floors {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         let floor: i64 = shared.chars().map(|c| if c == '(' { 1 } else { -1 }).sum();
//!         Ok(floor.to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Floors {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.len().to_string())
//!     }
//! }
//!
//! let mut builder = RegistryBuilder::new();
//! aoc_solver::register_solver!(builder, Floors, 2015, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2015, 1, "(()(").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! assert_eq!(solver.solve(2).unwrap().answer, "4");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    create_instance, FactoryInfo, RegisterableSolver, RegistryBuilder, SolverFactory,
    SolverPlugin, SolverRegistry, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code generated from `AutoRegisterSolver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
