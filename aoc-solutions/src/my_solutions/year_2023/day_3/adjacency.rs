//! Part-number and gear-ratio queries over a parsed [`Schematic`]

use super::schematic::{BLANK, GearCandidate, NumericToken, Schematic, TokenKey};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

/// `[start - 1, end + 1]` clamped to `0..len`
fn clamped_span(start: usize, end: usize, len: usize) -> RangeInclusive<usize> {
    start.saturating_sub(1)..=(end + 1).min(len - 1)
}

/// Whether `byte` marks a part: anything except digits and the background
fn is_symbol(byte: u8) -> bool {
    !byte.is_ascii_digit() && byte != BLANK
}

/// Whether any cell in the token's clamped bounding box is a symbol.
///
/// The box covers the token's own cells too; those are digits and never
/// qualify, so only the surrounding ring can make a part number.
pub fn is_part_number(schematic: &Schematic, token: &NumericToken) -> bool {
    let rows = clamped_span(token.row(), token.row(), schematic.height());
    let columns = clamped_span(token.start_column(), token.end_column(), schematic.width());

    rows.into_iter().any(|row| {
        columns
            .clone()
            .any(|column| is_symbol(schematic.cell(row, column)))
    })
}

/// Sum of every numeric token adjacent to a symbol, each token counted once
pub fn sum_adjacent_part_numbers(schematic: &Schematic) -> u64 {
    let parts: HashMap<TokenKey, u32> = schematic
        .tokens()
        .iter()
        .filter(|token| is_part_number(schematic, token))
        .map(|token| (token.key(), token.value()))
        .collect();

    parts.values().copied().map(u64::from).sum()
}

/// Distinct tokens touching any of the 8 neighbours of `candidate`
pub fn adjacent_tokens<'s>(
    schematic: &'s Schematic,
    candidate: &GearCandidate,
) -> HashSet<&'s NumericToken> {
    let rows = clamped_span(candidate.row, candidate.row, schematic.height());
    let columns = clamped_span(candidate.column, candidate.column, schematic.width());

    let mut found = HashSet::new();
    for row in rows {
        for column in columns.clone() {
            if (row, column) == (candidate.row, candidate.column) {
                continue;
            }
            found.extend(
                schematic
                    .tokens_in_row(row)
                    .iter()
                    .filter(|token| token.includes(row, column)),
            );
        }
    }
    found
}

/// Product of the two adjacent tokens if `candidate` is a gear
pub fn gear_ratio(schematic: &Schematic, candidate: &GearCandidate) -> Option<u64> {
    let tokens = adjacent_tokens(schematic, candidate);
    let mut iter = tokens.into_iter();
    match (iter.next(), iter.next(), iter.next()) {
        (Some(a), Some(b), None) => Some(a * b),
        _ => None,
    }
}

/// Sum of the ratios of every candidate with exactly two adjacent tokens
pub fn sum_gear_ratios(schematic: &Schematic) -> u64 {
    schematic
        .gear_candidates()
        .iter()
        .filter_map(|candidate| gear_ratio(schematic, candidate))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..";

    fn parse(input: &str) -> Schematic {
        let lines: Vec<&str> = input.lines().collect();
        Schematic::parse(&lines).unwrap()
    }

    #[test]
    fn test_example_part_numbers() {
        assert_eq!(sum_adjacent_part_numbers(&parse(EXAMPLE)), 4361);
    }

    #[test]
    fn test_example_gear_ratios() {
        assert_eq!(sum_gear_ratios(&parse(EXAMPLE)), 467835);
    }

    #[test]
    fn test_example_non_parts() {
        let schematic = parse(EXAMPLE);
        let excluded: Vec<u32> = schematic
            .tokens()
            .iter()
            .filter(|t| !is_part_number(&schematic, t))
            .map(NumericToken::value)
            .collect();
        assert_eq!(excluded, vec![114, 58]);
    }

    #[test]
    fn test_no_symbols_means_no_parts() {
        let schematic = parse("123");
        assert_eq!(sum_adjacent_part_numbers(&schematic), 0);
        assert_eq!(sum_gear_ratios(&schematic), 0);
    }

    #[test]
    fn test_digits_never_count_as_symbols() {
        let schematic = parse("12.\n..3");
        assert_eq!(sum_adjacent_part_numbers(&schematic), 0);
    }

    #[test]
    fn test_diagonal_adjacency() {
        assert_eq!(sum_adjacent_part_numbers(&parse("5..\n.#.\n..7")), 12);
    }

    #[test]
    fn test_part_touched_by_two_symbols_counted_once() {
        assert_eq!(sum_adjacent_part_numbers(&parse("#42$")), 42);
    }

    #[test]
    fn test_equal_values_at_different_places_both_count() {
        assert_eq!(sum_adjacent_part_numbers(&parse("8+8")), 16);
    }

    #[test]
    fn test_tokens_at_grid_edges() {
        let schematic = parse("99.\n..%\n1..");
        assert_eq!(sum_adjacent_part_numbers(&schematic), 99);
    }

    #[test]
    fn test_adjacent_pair_forms_gear() {
        assert_eq!(sum_gear_ratios(&parse("1*1")), 1);
    }

    #[test]
    fn test_gear_needs_exactly_two_tokens() {
        assert_eq!(sum_gear_ratios(&parse("2*.")), 0);
        assert_eq!(sum_gear_ratios(&parse("2.3\n.*.\n4..")), 0);
        assert_eq!(sum_gear_ratios(&parse("2.3\n.*.\n...")), 6);
    }

    #[test]
    fn test_long_token_touching_gear_twice_counts_once() {
        let schematic = parse("123\n.*.\n..4");
        let candidate = schematic.gear_candidates()[0];
        assert_eq!(adjacent_tokens(&schematic, &candidate).len(), 2);
        assert_eq!(gear_ratio(&schematic, &candidate), Some(492));
    }

    #[test]
    fn test_non_gear_symbols_are_ignored_for_ratios() {
        assert_eq!(sum_gear_ratios(&parse("3#5")), 0);
        assert_eq!(sum_adjacent_part_numbers(&parse("3#5")), 8);
    }

    #[test]
    fn test_queries_are_repeatable() {
        let schematic = parse(EXAMPLE);
        assert_eq!(
            sum_adjacent_part_numbers(&schematic),
            sum_adjacent_part_numbers(&schematic)
        );
        assert_eq!(sum_gear_ratios(&schematic), sum_gear_ratios(&schematic));
    }
}
