//! Day 1: Trebuchet?!
//!
//! Each line's calibration value is its first and last digit read as a
//! two-digit number. Part 2 also accepts digits spelled out as words.

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "parsing"])]
pub struct Solver;

const SPELLED: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.lines().filter(|line| !line.is_empty()).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, |line, i| digit_at(line, i))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, |line, i| {
            digit_at(line, i).or_else(|| spelled_digit_at(line, i))
        })
    }
}

fn digit_at(line: &str, index: usize) -> Option<u32> {
    line.as_bytes()
        .get(index)
        .filter(|b| b.is_ascii_digit())
        .map(|b| u32::from(b - b'0'))
}

/// Spelled digits may overlap (`eightwo` holds both 8 and 2), so every
/// starting offset is checked independently.
fn spelled_digit_at(line: &str, index: usize) -> Option<u32> {
    let rest = line.get(index..)?;
    SPELLED
        .iter()
        .position(|word| rest.starts_with(word))
        .map(|d| d as u32)
}

fn calibration_value(line: &str, digit: impl Fn(&str, usize) -> Option<u32>) -> Option<u32> {
    let first = (0..line.len()).find_map(|i| digit(line, i))?;
    let last = (0..line.len()).rev().find_map(|i| digit(line, i))?;
    Some(first * 10 + last)
}

fn calibration_sum(
    lines: &[&str],
    digit: impl Fn(&str, usize) -> Option<u32> + Copy,
) -> Result<String, SolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            calibration_value(line, digit)
                .map(u64::from)
                .ok_or_else(|| anyhow!("(line {}) no digit found in {:?}", idx + 1, line))
        })
        .sum::<Result<u64, _>>()
        .map(|sum| sum.to_string())
        .map_err(|e| SolveError::SolveFailed(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    #[test]
    fn test_part_one_example() {
        let input = "1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "142");
    }

    #[test]
    fn test_part_two_example() {
        let input = "two1nine\neightwothree\nabcone2threexyz\nxtwone3four\n\
                     4nineeightseven2\nzoneight234\n7pqrstsixteen";
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "281");
    }

    #[test]
    fn test_overlapping_words_both_count() {
        assert_eq!(
            calibration_value("eightwo", |l, i| spelled_digit_at(l, i)),
            Some(82)
        );
        assert_eq!(
            calibration_value("xtwone", |l, i| spelled_digit_at(l, i)),
            Some(21)
        );
    }

    #[test]
    fn test_single_digit_is_both_ends() {
        assert_eq!(calibration_value("treb7uchet", digit_at), Some(77));
    }

    #[test]
    fn test_line_without_digits_fails() {
        let mut shared = Solver::parse("one\n12").unwrap();
        assert!(matches!(
            Solver::solve_part(&mut shared, 1),
            Err(SolveError::SolveFailed(_))
        ));
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "23");

        let mut shared = Solver::parse("abc").unwrap();
        assert!(Solver::solve_part(&mut shared, 2).is_err());
    }

    #[test]
    fn test_empty_input_sums_to_zero() {
        let mut shared = Solver::parse("").unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "0");
    }
}
