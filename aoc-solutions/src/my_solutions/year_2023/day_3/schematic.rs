//! Engine schematic grid: numeric tokens, gear candidates and the row scanner

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Mul, Range};
use thiserror::Error;

/// Background byte that never qualifies a part number
pub const BLANK: u8 = b'.';
/// Marker of cells that may form a gear
pub const GEAR_MARKER: u8 = b'*';

/// Structural problems found while parsing a schematic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGridError {
    #[error("schematic is empty")]
    Empty,
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("number at row {row}, columns {start_column}..={end_column} does not fit in 32 bits")]
    ValueOutOfRange {
        row: usize,
        start_column: usize,
        end_column: usize,
    },
}

/// Position of a token in the grid; two tokens are the same token iff their keys match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKey {
    pub row: usize,
    pub start_column: usize,
    pub end_column: usize,
}

/// A maximal horizontal run of digits and its decimal value.
///
/// Equality and hashing only look at [`TokenKey`]; two runs holding the
/// same number in different places are different tokens.
#[derive(Debug, Clone, Copy)]
pub struct NumericToken {
    value: u32,
    key: TokenKey,
}

impl NumericToken {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn key(&self) -> TokenKey {
        self.key
    }

    pub fn row(&self) -> usize {
        self.key.row
    }

    pub fn start_column(&self) -> usize {
        self.key.start_column
    }

    /// Inclusive
    pub fn end_column(&self) -> usize {
        self.key.end_column
    }

    /// Whether the token covers cell `(row, column)`
    pub fn includes(&self, row: usize, column: usize) -> bool {
        self.key.row == row && (self.key.start_column..=self.key.end_column).contains(&column)
    }
}

impl PartialEq for NumericToken {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for NumericToken {}

impl Hash for NumericToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for NumericToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {}, {})",
            self.value, self.key.row, self.key.start_column, self.key.end_column
        )
    }
}

/// Gear ratio of two tokens
impl Mul for &NumericToken {
    type Output = u64;

    fn mul(self, rhs: Self) -> u64 {
        u64::from(self.value) * u64::from(rhs.value)
    }
}

/// Cell holding the gear marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GearCandidate {
    pub row: usize,
    pub column: usize,
}

/// Scanner state for the digit run currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigitRun {
    Idle,
    Open { start: usize },
}

impl DigitRun {
    /// Feed the byte at `column`; returns the span of a run that just closed
    fn step(&mut self, column: usize, byte: u8) -> Option<Range<usize>> {
        match (*self, byte.is_ascii_digit()) {
            (DigitRun::Idle, true) => {
                *self = DigitRun::Open { start: column };
                None
            }
            (DigitRun::Open { start }, false) => {
                *self = DigitRun::Idle;
                Some(start..column)
            }
            _ => None,
        }
    }

    /// End of row: close a run still open after the last column
    fn flush(&mut self, width: usize) -> Option<Range<usize>> {
        match std::mem::replace(self, DigitRun::Idle) {
            DigitRun::Open { start } => Some(start..width),
            DigitRun::Idle => None,
        }
    }
}

/// A parsed engine schematic.
///
/// Rows are kept verbatim; tokens are stored in row-major scan order with
/// `row_tokens[r]` giving the slice of tokens that lie on row `r`.
#[derive(Debug, Clone)]
pub struct Schematic {
    width: usize,
    height: usize,
    rows: Vec<String>,
    tokens: Vec<NumericToken>,
    row_tokens: Vec<Range<usize>>,
    gear_candidates: Vec<GearCandidate>,
}

impl Schematic {
    /// Parse rows using `*` as the gear marker
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, MalformedGridError> {
        Self::parse_with_marker(lines, GEAR_MARKER)
    }

    /// Parse rows, recording every `marker` cell as a [`GearCandidate`].
    ///
    /// Rows must be non-empty and share the first row's byte length.
    pub fn parse_with_marker<S: AsRef<str>>(
        lines: &[S],
        marker: u8,
    ) -> Result<Self, MalformedGridError> {
        let first = lines.first().ok_or(MalformedGridError::Empty)?;
        let width = first.as_ref().len();
        if width == 0 {
            return Err(MalformedGridError::Empty);
        }

        let mut rows = Vec::with_capacity(lines.len());
        let mut tokens = Vec::new();
        let mut row_tokens = Vec::with_capacity(lines.len());
        let mut gear_candidates = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != width {
                return Err(MalformedGridError::RaggedRow {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }

            let row_start = tokens.len();
            let mut run = DigitRun::Idle;
            for (column, &byte) in line.as_bytes().iter().enumerate() {
                if byte == marker {
                    gear_candidates.push(GearCandidate { row, column });
                }
                if let Some(span) = run.step(column, byte) {
                    tokens.push(make_token(line, row, span)?);
                }
            }
            if let Some(span) = run.flush(width) {
                tokens.push(make_token(line, row, span)?);
            }

            row_tokens.push(row_start..tokens.len());
            rows.push(line.to_owned());
        }

        Ok(Self {
            width,
            height: rows.len(),
            rows,
            tokens,
            row_tokens,
            gear_candidates,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Byte at `(row, column)`; panics outside the grid
    pub fn cell(&self, row: usize, column: usize) -> u8 {
        self.rows[row].as_bytes()[column]
    }

    pub fn tokens(&self) -> &[NumericToken] {
        &self.tokens
    }

    /// Tokens lying on `row`, left to right; empty outside the grid
    pub fn tokens_in_row(&self, row: usize) -> &[NumericToken] {
        match self.row_tokens.get(row) {
            Some(range) => &self.tokens[range.clone()],
            None => &[],
        }
    }

    pub fn gear_candidates(&self) -> &[GearCandidate] {
        &self.gear_candidates
    }
}

impl fmt::Display for Schematic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows.join("\n"))
    }
}

fn make_token(line: &str, row: usize, span: Range<usize>) -> Result<NumericToken, MalformedGridError> {
    let key = TokenKey {
        row,
        start_column: span.start,
        end_column: span.end - 1,
    };
    let value = line[span]
        .parse()
        .map_err(|_| MalformedGridError::ValueOutOfRange {
            row,
            start_column: key.start_column,
            end_column: key.end_column,
        })?;
    Ok(NumericToken { value, key })
}
