use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

use crate::cell::Cell;
use crate::grid::Grid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern contains no rows")]
    Empty,

    #[error("Unexpected character '{got}' at line {line}, column {column}")]
    UnexpectedChar {
        line: usize,
        column: usize,
        got: char,
    },

    #[error("A {rows}x{cols} pattern at ({row}, {col}) does not fit in a {grid_rows}x{grid_cols} grid")]
    OutOfBounds {
        rows: usize,
        cols: usize,
        row: usize,
        col: usize,
        grid_rows: usize,
        grid_cols: usize,
    },
}

/// An explicit initial configuration of cells.
///
/// # Format
///
/// One line per row. `.` is a dead cell, `#` or `O` is a live cell. Short lines are padded with
/// dead cells up to the longest line, and blank lines before the first row and after the last
/// one are ignored.
///
/// ```notrust
/// .#.
/// ..#
/// ###
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    grid: Grid,
}

impl Pattern {
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Live cells relative to the pattern's top-left corner.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.grid.iter_alive()
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Top-left corner that centers this pattern in a `rows x cols` grid, if it fits at all.
    pub fn centered_in(&self, rows: usize, cols: usize) -> Option<(usize, usize)> {
        let dr = rows.checked_sub(self.rows())?;
        let dc = cols.checked_sub(self.cols())?;

        Some((dr / 2, dc / 2))
    }

    /// Check that the pattern fits when its top-left corner sits at `origin`.
    pub fn check_fits(
        &self,
        origin: (usize, usize),
        grid_rows: usize,
        grid_cols: usize,
    ) -> Result<(), PatternError> {
        let (row, col) = origin;
        let fits = row
            .checked_add(self.rows())
            .zip(col.checked_add(self.cols()))
            .is_some_and(|(r, c)| r <= grid_rows && c <= grid_cols);

        if fits {
            Ok(())
        } else {
            Err(PatternError::OutOfBounds {
                rows: self.rows(),
                cols: self.cols(),
                row,
                col,
                grid_rows,
                grid_cols,
            })
        }
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim_end).collect();

        let Some(first) = lines.iter().position(|l| !l.is_empty()) else {
            return Err(PatternError::Empty);
        };
        let last = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(first);
        let lines = &lines[first..=last];

        let rows = lines.len();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if cols == 0 {
            return Err(PatternError::Empty);
        }

        let mut grid = Grid::new(rows, cols);

        for (r, line) in lines.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                match ch {
                    '.' => {}
                    '#' | 'O' => grid.set(r, c, Cell::Alive),
                    got => {
                        return Err(PatternError::UnexpectedChar {
                            line: first + r + 1,
                            column: c + 1,
                            got,
                        });
                    }
                }
            }
        }

        Ok(Pattern { grid })
    }
}

/// Well known small patterns.
///
/// See: https://conwaylife.com/wiki/
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 2x2 still life
    Block,
    /// Period 2 oscillator
    Blinker,
    /// Period 2 oscillator
    Toad,
    /// Period 2 oscillator
    Beacon,
    /// Moves one cell diagonally every 4 generations
    Glider,
    /// Methuselah that stabilizes after 1103 generations on an unbounded plane
    RPentomino,
}

impl Preset {
    fn text(self) -> &'static str {
        match self {
            Preset::Block => "##\n##",
            Preset::Blinker => "###",
            Preset::Toad => ".###\n###.",
            Preset::Beacon => "##..\n##..\n..##\n..##",
            Preset::Glider => ".#.\n..#\n###",
            Preset::RPentomino => ".##\n##.\n.#.",
        }
    }

    pub fn pattern(self) -> Pattern {
        match self.text().parse() {
            Ok(pattern) => pattern,
            Err(e) => unreachable!("preset {self:?} is malformed: {e}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Pattern;
    use super::PatternError;
    use super::Preset;
    use clap::ValueEnum;

    #[test]
    fn parse_glider() {
        let pattern: Pattern = ".#.\n..#\n###\n".parse().unwrap();

        assert_eq!((pattern.rows(), pattern.cols()), (3, 3));
        assert_eq!(
            pattern.iter_alive().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn ragged_lines_and_blank_margins() {
        let pattern: Pattern = "\n\nO\n..O\n\n".parse().unwrap();

        assert_eq!((pattern.rows(), pattern.cols()), (2, 3));
        assert_eq!(pattern.population(), 2);
    }

    #[test]
    fn empty() {
        assert_eq!("".parse::<Pattern>(), Err(PatternError::Empty));
        assert_eq!("\n  \n".parse::<Pattern>(), Err(PatternError::Empty));
    }

    #[test]
    fn unexpected_char() {
        let err = "\n..#\n.x.".parse::<Pattern>().unwrap_err();

        assert_eq!(
            err,
            PatternError::UnexpectedChar {
                line: 3,
                column: 2,
                got: 'x'
            }
        );
    }

    #[test]
    fn centering() {
        let pattern = Preset::Blinker.pattern();

        assert_eq!(pattern.centered_in(5, 5), Some((2, 1)));
        assert_eq!(pattern.centered_in(1, 3), Some((0, 0)));
        assert_eq!(pattern.centered_in(1, 2), None);
    }

    #[test]
    fn fits() {
        let pattern = Preset::Glider.pattern();

        assert!(pattern.check_fits((0, 0), 3, 3).is_ok());
        assert!(pattern.check_fits((1, 0), 3, 3).is_err());
        assert!(pattern.check_fits((0, usize::MAX), 3, 3).is_err());
    }

    #[test]
    fn presets_parse() {
        for preset in Preset::value_variants() {
            assert!(preset.pattern().population() > 0, "{preset:?}");
        }
    }
}
