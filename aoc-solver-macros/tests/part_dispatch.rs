use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug, Default)]
struct Readings {
    values: Vec<i64>,
    total: Option<i64>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct Sensor;

impl AocParser for Sensor {
    type SharedData<'a> = Readings;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let values = input
            .split_whitespace()
            .map(|w| {
                w.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {w}")))
            })
            .collect::<Result<_, _>>()?;
        Ok(Readings {
            values,
            total: None,
        })
    }
}

impl PartSolver<1> for Sensor {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.values.iter().sum();
        shared.total = Some(total);
        Ok(total.to_string())
    }
}

// Depends on the total cached by part 1
impl PartSolver<2> for Sensor {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared
            .total
            .ok_or_else(|| SolveError::SolveFailed("part 1 has not run".into()))?;
        Ok((total * 2).to_string())
    }
}

impl PartSolver<3> for Sensor {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .values
            .iter()
            .max()
            .map(ToString::to_string)
            .ok_or_else(|| SolveError::SolveFailed("no readings".into()))
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<Sensor as Solver>::PARTS, 3);
}

#[test]
fn test_dispatch_reaches_each_part() {
    let mut shared = Sensor::parse("4 -1 7").unwrap();
    assert_eq!(Sensor::solve_part(&mut shared, 1).unwrap(), "10");
    assert_eq!(Sensor::solve_part(&mut shared, 2).unwrap(), "20");
    assert_eq!(Sensor::solve_part(&mut shared, 3).unwrap(), "7");
}

#[test]
fn test_dependent_part_fails_without_earlier_part() {
    let mut shared = Sensor::parse("4 -1 7").unwrap();
    assert!(matches!(
        Sensor::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = Readings::default();
    for part in [0u8, 4, 200] {
        match Sensor::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => assert_eq!(p, part),
            other => panic!("expected PartNotImplemented for {part}, got {other:?}"),
        }
    }
}

#[test]
fn test_part_error_is_returned() {
    let mut shared = Readings::default();
    assert!(Sensor::solve_part(&mut shared, 3).is_err());
}
