//! IQ-Stix: ten pegged sticks laid into the rows and columns of a 5x5 grid.
//!
//! Every stick goes into one row or one column, either way round. A solution
//! uses each stick once, fills each of the ten row and column slots once and
//! puts exactly one peg on every grid cell. Columns are the ten sticks, then
//! the five row slots, the five column slots and the 25 cells in row-major
//! order.
//!
//! Puzzle cards pre-place some sticks. Those become the pre-selected rows
//! handed to [`DancingLinks::solve_with`].

use crate::cs::combinatorial::dancing_links::{DancingLinks, Matrix};
use crate::cs::error::{Error, Result};
use log::debug;

pub const SIZE: usize = 5;
pub const STICKS: usize = 10;

const SLOT_BASE: usize = STICKS;
const CELL_BASE: usize = STICKS + 2 * SIZE;
const NUM_COLS: usize = CELL_BASE + SIZE * SIZE;

/// Peg layout of each stick, read along its length.
pub const PEGS: [[u8; SIZE]; STICKS] = [
    [0, 1, 1, 1, 1],
    [0, 1, 1, 0, 1],
    [0, 0, 1, 1, 1],
    [0, 1, 0, 1, 1],
    [1, 0, 0, 1, 1],
    [0, 0, 0, 1, 1],
    [0, 0, 1, 0, 1],
    [0, 0, 1, 1, 0],
    [0, 1, 0, 0, 0],
    [1, 0, 0, 0, 1],
];

/// A grid row or column, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    fn slot(self) -> usize {
        match self {
            Line::Row(i) => SLOT_BASE + i,
            Line::Column(i) => SLOT_BASE + SIZE + i,
        }
    }

    /// Grid cell at position `k` along the line.
    fn cell(self, k: usize) -> (usize, usize) {
        match self {
            Line::Row(i) => (i, k),
            Line::Column(i) => (k, i),
        }
    }

    fn index(self) -> usize {
        match self {
            Line::Row(i) | Line::Column(i) => i,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stick {
    pub piece: usize,
    pub flipped: bool,
    pub line: Line,
}

impl Stick {
    /// Reads a stick the way puzzle cards label them. Letters `A`..`T` lay a
    /// stick along row `line`, numbers `1`..`20` down column `line`, with
    /// `line` counted from 1. Labels go in pairs per stick, the second of
    /// each pair being the stick turned round.
    ///
    /// # Example
    /// ```
    /// use dlx::puzzles::iq_stix::{Line, Stick};
    ///
    /// let stick = Stick::from_label("D", 2).unwrap();
    /// assert_eq!((stick.piece, stick.flipped, stick.line), (1, true, Line::Row(1)));
    ///
    /// let stick = Stick::from_label("5", 3).unwrap();
    /// assert_eq!((stick.piece, stick.flipped, stick.line), (2, false, Line::Column(2)));
    /// assert!(Stick::from_label("21", 1).is_err());
    /// ```
    pub fn from_label(label: &str, line: usize) -> Result<Self> {
        if !(1..=SIZE).contains(&line) {
            return Err(Error::InvalidInput(format!(
                "row or column number must be in 1..={}, got {}",
                SIZE, line
            )));
        }
        let index = line - 1;
        let bad_label = || Error::InvalidInput(format!("unknown stick label '{}'", label));

        let mut chars = label.chars();
        let (code, line) = match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_ascii_alphabetic() => {
                let code = (ch.to_ascii_uppercase() as u8 - b'A') as usize;
                (code, Line::Row(index))
            }
            _ => {
                let number: usize = label.parse().map_err(|_| bad_label())?;
                (number.checked_sub(1).ok_or_else(bad_label)?, Line::Column(index))
            }
        };
        if code >= 2 * STICKS {
            return Err(bad_label());
        }

        Ok(Stick {
            piece: code / 2,
            flipped: code % 2 == 1,
            line,
        })
    }

    /// Peg pattern in the direction the stick is laid.
    pub fn pegs(&self) -> [u8; SIZE] {
        let mut pegs = PEGS[self.piece];
        if self.flipped {
            pegs.reverse();
        }
        pegs
    }

    /// Grid cells receiving a peg.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        self.pegs()
            .iter()
            .enumerate()
            .filter(|&(_, &peg)| peg == 1)
            .map(|(k, _)| self.line.cell(k))
            .collect()
    }

    fn columns(&self) -> Vec<usize> {
        let mut cols = vec![self.piece, self.line.slot()];
        cols.extend(self.cells().iter().map(|&(r, c)| CELL_BASE + r * SIZE + c));
        cols
    }
}

#[derive(Debug, Clone)]
pub struct IqStix {
    matrix: Matrix,
    sticks: Vec<Stick>,
}

impl IqStix {
    pub fn new() -> Result<Self> {
        let mut sticks = Vec::new();
        for (piece, pegs) in PEGS.iter().enumerate() {
            let symmetric = pegs.iter().eq(pegs.iter().rev());
            let turns: &[bool] = if symmetric { &[false] } else { &[false, true] };
            for &flipped in turns {
                let lines = (0..SIZE).map(Line::Row).chain((0..SIZE).map(Line::Column));
                sticks.extend(lines.map(|line| Stick {
                    piece,
                    flipped,
                    line,
                }));
            }
        }

        let rows: Vec<Vec<usize>> = sticks.iter().map(Stick::columns).collect();
        let matrix = Matrix::from_sparse(NUM_COLS, &rows)?;
        debug!("iq-stix matrix has {} placements", matrix.num_rows());
        Ok(IqStix { matrix, sticks })
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Every placement, indexed like the matrix rows.
    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    /// Matrix row placing `stick`. A symmetric stick turned round resolves
    /// to the same row as its unturned placement.
    pub fn row_of(&self, stick: &Stick) -> Result<usize> {
        if stick.piece >= STICKS || stick.line.index() >= SIZE {
            return Err(Error::InvalidInput(format!("{:?} is off the board", stick)));
        }
        let cols = stick.columns();
        self.matrix
            .rows_covering(stick.piece)
            .into_iter()
            .find(|&r| {
                let row = self.matrix.row(r);
                row.count_ones() == cols.len() && cols.iter().all(|&c| row[c])
            })
            .ok_or_else(|| Error::InvalidInput(format!("no placement matches {:?}", stick)))
    }

    fn given_rows(&self, given: &[Stick]) -> Result<Vec<usize>> {
        given.iter().map(|s| self.row_of(s)).collect()
    }

    /// A full layout containing the `given` sticks, ordered by matrix row.
    ///
    /// # Errors
    /// Fails if a given stick is off the board or two of them overlap.
    pub fn solve(&self, given: &[Stick]) -> Result<Option<Vec<Stick>>> {
        let rows = self.given_rows(given)?;
        let solution = DancingLinks::new(self.matrix.clone()).solve_with(&rows)?;
        Ok(solution.map(|rows| rows.into_iter().map(|r| self.sticks[r]).collect()))
    }

    pub fn count_solutions(&self, given: &[Stick]) -> Result<usize> {
        let rows = self.given_rows(given)?;
        DancingLinks::new(self.matrix.clone()).count_solutions_with(&rows)
    }

    /// Stick number holding the peg on each cell.
    pub fn grid(solution: &[Stick]) -> [[Option<usize>; SIZE]; SIZE] {
        let mut grid = [[None; SIZE]; SIZE];
        for stick in solution {
            for (r, c) in stick.cells() {
                grid[r][c] = Some(stick.piece);
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_valid_layout(solution: &[Stick]) {
        assert_eq!(solution.len(), STICKS);
        let pieces: HashSet<usize> = solution.iter().map(|s| s.piece).collect();
        assert_eq!(pieces.len(), STICKS);
        let lines: HashSet<Line> = solution.iter().map(|s| s.line).collect();
        assert_eq!(lines.len(), 2 * SIZE);

        let grid = IqStix::grid(solution);
        assert!(grid.iter().flatten().all(Option::is_some));
        let pegs: usize = solution.iter().map(|s| s.cells().len()).sum();
        assert_eq!(pegs, SIZE * SIZE);
    }

    #[test]
    fn test_matrix_shape() {
        let puzzle = IqStix::new().unwrap();
        let m = puzzle.matrix();
        assert_eq!(m.num_cols(), 45);
        // The last stick reads the same both ways round
        assert_eq!(m.num_rows(), 190);
        assert_eq!(m.rows_covering(9).len(), 10);

        // First row: stick 0 along the top row
        assert_eq!(m.row(0).iter_ones().collect::<Vec<_>>(), vec![0, 10, 21, 22, 23, 24]);
        // Row 26: stick 1 unturned down the second column
        assert_eq!(m.row(26).iter_ones().collect::<Vec<_>>(), vec![1, 16, 26, 31, 41]);
    }

    #[test]
    fn test_labels() {
        let a = Stick::from_label("A", 1).unwrap();
        assert_eq!(
            a,
            Stick {
                piece: 0,
                flipped: false,
                line: Line::Row(0)
            }
        );
        assert_eq!(Stick::from_label("t", 5).unwrap().piece, 9);
        assert!(Stick::from_label("20", 5).unwrap().flipped);

        for (label, line) in [("U", 1), ("0", 1), ("A", 0), ("A", 6), ("", 1), ("AB", 1)] {
            assert!(
                matches!(Stick::from_label(label, line), Err(Error::InvalidInput(_))),
                "{:?} should be rejected",
                (label, line)
            );
        }
    }

    #[test]
    fn test_row_lookup() {
        let puzzle = IqStix::new().unwrap();
        assert_eq!(puzzle.row_of(&Stick::from_label("A", 1).unwrap()).unwrap(), 0);
        assert_eq!(puzzle.row_of(&Stick::from_label("3", 2).unwrap()).unwrap(), 26);
        assert_eq!(puzzle.row_of(&Stick::from_label("H", 4).unwrap()).unwrap(), 73);

        // Both labels of the symmetric stick land on one row
        let s = puzzle.row_of(&Stick::from_label("S", 3).unwrap()).unwrap();
        let t = puzzle.row_of(&Stick::from_label("T", 3).unwrap()).unwrap();
        assert_eq!((s, t), (182, 182));

        let off_board = Stick {
            piece: 3,
            flipped: false,
            line: Line::Column(5),
        };
        assert!(matches!(puzzle.row_of(&off_board), Err(Error::InvalidInput(_))));
        for (r, stick) in puzzle.sticks().iter().enumerate() {
            assert_eq!(puzzle.row_of(stick).unwrap(), r);
        }
    }

    #[test]
    fn test_unrestricted_solve() {
        let puzzle = IqStix::new().unwrap();
        let solution = puzzle.solve(&[]).unwrap().expect("open grid is solvable");
        assert_valid_layout(&solution);
        assert_eq!(puzzle.count_solutions(&[]).unwrap(), 800);
    }

    #[test]
    fn test_card_restrictions() {
        let puzzle = IqStix::new().unwrap();
        let card = [
            Stick::from_label("A", 1).unwrap(),
            Stick::from_label("3", 2).unwrap(),
            Stick::from_label("5", 3).unwrap(),
            Stick::from_label("H", 4).unwrap(),
        ];

        assert_eq!(puzzle.count_solutions(&card[..1]).unwrap(), 32);
        assert_eq!(puzzle.count_solutions(&card[..2]).unwrap(), 7);
        assert_eq!(puzzle.count_solutions(&card[..3]).unwrap(), 4);
        assert_eq!(puzzle.count_solutions(&card).unwrap(), 3);

        let solution = puzzle.solve(&card).unwrap().unwrap();
        assert_valid_layout(&solution);
        for given in &card {
            assert!(solution.contains(given), "{:?} missing", given);
        }
    }

    #[test]
    fn test_clashing_restrictions() {
        let puzzle = IqStix::new().unwrap();
        // Both labels name stick 0
        let same_stick = [
            Stick::from_label("A", 1).unwrap(),
            Stick::from_label("B", 3).unwrap(),
        ];
        assert!(matches!(
            puzzle.solve(&same_stick),
            Err(Error::ConflictingSeed { row: 12, column: 0 })
        ));

        // Two sticks in the same row slot
        let same_row = [
            Stick::from_label("A", 2).unwrap(),
            Stick::from_label("C", 2).unwrap(),
        ];
        assert!(matches!(
            puzzle.count_solutions(&same_row),
            Err(Error::ConflictingSeed { .. })
        ));
    }
}
