//! Day 3: Gear Ratios
//!
//! Numbers in an engine schematic count as part numbers when any
//! neighbouring cell (diagonals included) holds a symbol. A `*` next to
//! exactly two numbers is a gear whose ratio is their product.

mod adjacency;
mod schematic;

pub use adjacency::{
    adjacent_tokens, gear_ratio, is_part_number, sum_adjacent_part_numbers, sum_gear_ratios,
};
pub use schematic::{
    GearCandidate, MalformedGridError, NumericToken, Schematic, TokenKey, BLANK, GEAR_MARKER,
};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input.lines().collect();
        let schematic =
            Schematic::parse(&lines).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        debug!(
            "parsed {}x{} schematic: {} numbers, {} gear candidates",
            schematic.width(),
            schematic.height(),
            schematic.tokens().len(),
            schematic.gear_candidates().len()
        );
        Ok(schematic)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_adjacent_part_numbers(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_gear_ratios(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn test_solves_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "4361");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "467835");
    }

    #[test]
    fn test_malformed_grid_is_parse_error() {
        assert!(matches!(
            Solver::parse("...\n.."),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(Solver::parse(""), Err(ParseError::InvalidFormat(_))));
    }
}
