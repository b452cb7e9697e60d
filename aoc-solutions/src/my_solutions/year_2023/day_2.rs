//! Day 2: Cube Conundrum

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::sync::LazyLock;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023", "parsing"])]
pub struct Solver;

/// Bag contents that part 1 checks each game against
const BAG: CubeCounts = CubeCounts {
    red: 12,
    green: 13,
    blue: 14,
};

static GAME_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Game (\d+):(.*)$").expect("valid game header regex"));
static CUBES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) (red|green|blue)").expect("valid cube regex"));

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CubeCounts {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl CubeCounts {
    fn max(self, other: Self) -> Self {
        Self {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_in(&self, bag: &Self) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    /// Colours never drawn count as 1
    fn power(&self) -> u64 {
        [self.red, self.green, self.blue]
            .into_iter()
            .map(|n| u64::from(n.max(1)))
            .product()
    }
}

/// One game: its id and the largest count of each colour over all draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub id: u32,
    pub max: CubeCounts,
}

fn parse_draw(draw: &str) -> anyhow::Result<CubeCounts> {
    let mut counts = CubeCounts::default();
    for caps in CUBES.captures_iter(draw) {
        let n: u32 = caps[1].parse().context("cube count too large")?;
        match &caps[2] {
            "red" => counts.red += n,
            "green" => counts.green += n,
            _ => counts.blue += n,
        }
    }
    Ok(counts)
}

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let caps = GAME_HEADER
        .captures(line)
        .ok_or_else(|| anyhow!("expected `Game <id>: ...`"))?;
    let id = caps[1].parse().context("game id too large")?;
    let max = caps[2]
        .split(';')
        .map(parse_draw)
        .try_fold(CubeCounts::default(), |acc, draw| draw.map(|d| acc.max(d)))?;
    Ok(Game { id, max })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_game(line.trim())
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {}", idx + 1, e)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .iter()
            .filter(|game| game.max.fits_in(&BAG))
            .map(|game| u64::from(game.id))
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared.iter().map(|game| game.max.power()).sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn test_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "8");
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "2286");
    }

    #[test]
    fn test_game_maxima() {
        let game = parse_game("Game 7: 1 red, 2 blue; 5 red; 3 green").unwrap();
        assert_eq!(
            game,
            Game {
                id: 7,
                max: CubeCounts {
                    red: 5,
                    green: 3,
                    blue: 2
                }
            }
        );
    }

    #[test]
    fn test_repeated_colour_in_one_draw_is_summed() {
        let counts = parse_draw(" 2 red, 3 red, 1 blue").unwrap();
        assert_eq!(counts.red, 5);
        assert_eq!(counts.blue, 1);
    }

    #[test]
    fn test_missing_colour_counts_as_one_for_power() {
        let game = parse_game("Game 1: 4 red; 2 blue").unwrap();
        assert_eq!(game.max.power(), 8);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        match Solver::parse("Game 1: 1 red\nnot a game") {
            Err(ParseError::InvalidFormat(msg)) => assert!(msg.starts_with("(line 2)")),
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }
}
