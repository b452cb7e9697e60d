//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AutoRegisterSolver`,
//! so linking this crate is enough to make it discoverable through
//! `RegistryBuilder::register_all_plugins`.

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
