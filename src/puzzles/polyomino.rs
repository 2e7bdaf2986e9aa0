//! Packing polyomino pieces onto a board with holes.
//!
//! Covers the pentomino and date-calendar puzzles: every open board cell
//! must be covered exactly once and every piece used exactly once. Cells map
//! to matrix columns in row-major order, skipping blocked cells, followed by
//! one column per piece.

use crate::cs::combinatorial::dancing_links::{DancingLinks, Matrix};
use crate::cs::error::{Error, Result};
use log::debug;

/// A polyomino as a set of `(row, col)` cells, shifted so the topmost row and
/// leftmost column are 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    cells: Vec<(usize, usize)>,
}

impl Shape {
    /// Builds a shape from any set of cells.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if `cells` is empty.
    pub fn new<I: IntoIterator<Item = (usize, usize)>>(cells: I) -> Result<Self> {
        let cells: Vec<(usize, usize)> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(Error::InvalidInput("a shape needs at least one cell".to_string()));
        }
        Ok(Self::normalized(cells))
    }

    /// Builds a shape from a picture where `.` and spaces are empty.
    ///
    /// # Example
    /// ```
    /// use dlx::puzzles::polyomino::Shape;
    ///
    /// let l = Shape::from_rows(&["#.", "##"]).unwrap();
    /// assert_eq!(l.cells(), &[(0, 0), (1, 0), (1, 1)]);
    /// assert_eq!(l.orientations(false).len(), 4);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let cells = rows.iter().enumerate().flat_map(|(r, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, ch)| ch != '.' && ch != ' ')
                .map(move |(c, _)| (r, c))
        });
        Self::new(cells)
    }

    fn normalized(mut cells: Vec<(usize, usize)>) -> Self {
        let min_r = cells.iter().map(|&(r, _)| r).min().unwrap_or(0);
        let min_c = cells.iter().map(|&(_, c)| c).min().unwrap_or(0);
        for cell in &mut cells {
            cell.0 -= min_r;
            cell.1 -= min_c;
        }
        cells.sort_unstable();
        cells.dedup();
        Shape { cells }
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Quarter turn clockwise.
    pub fn rotate(&self) -> Shape {
        let h = self.height();
        Self::normalized(self.cells.iter().map(|&(r, c)| (c, h - 1 - r)).collect())
    }

    /// Mirror image across the vertical axis.
    pub fn reflect(&self) -> Shape {
        let w = self.width();
        Self::normalized(self.cells.iter().map(|&(r, c)| (r, w - 1 - c)).collect())
    }

    /// Distinct rotations, plus their mirror images when `allow_reflection`.
    pub fn orientations(&self, allow_reflection: bool) -> Vec<Shape> {
        let mut result = Vec::with_capacity(8);
        let mut bases = vec![self.clone()];
        if allow_reflection {
            bases.push(self.reflect());
        }
        for base in bases {
            let mut current = base;
            for _ in 0..4 {
                let next = current.rotate();
                result.push(current);
                current = next;
            }
        }
        result.sort();
        result.dedup();
        result
    }
}

/// The twelve free pentominoes, keyed by their conventional letters.
pub fn pentominoes() -> Vec<(char, Shape)> {
    let pictures: [(char, &[&str]); 12] = [
        ('F', &[".##", "##.", ".#."]),
        ('I', &["#####"]),
        ('L', &["#...", "####"]),
        ('N', &["##..", ".###"]),
        ('P', &["##", "##", "#."]),
        ('T', &["###", ".#.", ".#."]),
        ('U', &["#.#", "###"]),
        ('V', &["#..", "#..", "###"]),
        ('W', &["#..", "##.", ".##"]),
        ('X', &[".#.", "###", ".#."]),
        ('Y', &[".#..", "####"]),
        ('Z', &["##.", ".#.", ".##"]),
    ];
    pictures
        .iter()
        .filter_map(|&(name, rows)| Shape::from_rows(rows).ok().map(|s| (name, s)))
        .collect()
}

/// A rectangular board where some cells may be blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Matrix column of each cell, `None` for blocked cells.
    columns: Vec<Option<usize>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "board must be non-empty, got {}x{}",
                width, height
            )));
        }
        let mut board = Board {
            width,
            height,
            columns: vec![Some(0); width * height],
        };
        board.renumber();
        Ok(board)
    }

    /// Blocks each listed `(row, col)` cell.
    pub fn with_blocked(mut self, cells: &[(usize, usize)]) -> Result<Self> {
        for &(r, c) in cells {
            self.block(r, c)?;
        }
        Ok(self)
    }

    pub fn block(&mut self, row: usize, col: usize) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(Error::InvalidInput(format!(
                "cell ({}, {}) is outside the {}x{} board",
                row, col, self.width, self.height
            )));
        }
        self.columns[row * self.width + col] = None;
        self.renumber();
        Ok(())
    }

    fn renumber(&mut self) {
        let mut next = 0;
        for slot in self.columns.iter_mut().filter(|s| s.is_some()) {
            *slot = Some(next);
            next += 1;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.cell_column(row, col).is_some()
    }

    pub fn open_cells(&self) -> usize {
        self.columns.iter().filter(|s| s.is_some()).count()
    }

    /// Matrix column of an open cell.
    pub fn cell_column(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.columns[row * self.width + col]
    }
}

/// Cell of `day` on the calendar board: seven days per row, with 29–31 in
/// the last three columns of the fifth row.
pub fn calendar_cell(day: u32) -> Option<(usize, usize)> {
    if !(1..=31).contains(&day) {
        return None;
    }
    let index = (day - 1) as usize;
    let (row, mut col) = (index / 7, index % 7);
    if day > 28 {
        col += 4;
    }
    Some((row, col))
}

/// The 7x5 date-calendar board with `day` blocked as the hole.
///
/// Only cell coverage is modelled. The physical puzzle also colours its
/// cells like a checkerboard and each piece face must match that colouring,
/// so a packing found here may not be playable on the real board.
///
/// # Example
/// ```
/// use dlx::puzzles::polyomino::{calendar_board, calendar_cell};
///
/// let board = calendar_board(31).unwrap();
/// assert_eq!(board.open_cells(), 30);
/// assert_eq!(calendar_cell(31), Some((4, 6)));
/// assert!(!board.is_open(4, 6));
/// assert!(calendar_board(32).is_err());
/// ```
pub fn calendar_board(day: u32) -> Result<Board> {
    let hole = calendar_cell(day)
        .ok_or_else(|| Error::InvalidInput(format!("day must be in 1..=31, got {}", day)))?;
    Board::new(7, 5)?.with_blocked(&[(4, 0), (4, 1), (4, 2), (4, 3), hole])
}

/// One piece placed on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub piece: usize,
    pub cells: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct Packing {
    board: Board,
    pieces: Vec<Shape>,
    matrix: Matrix,
    placements: Vec<Placement>,
}

impl Packing {
    /// Builds the exact-cover matrix for placing every piece on `board`.
    pub fn new(board: Board, pieces: Vec<Shape>, allow_reflection: bool) -> Result<Self> {
        let open = board.open_cells();
        let mut rows: Vec<Vec<usize>> = Vec::new();
        let mut placements = Vec::new();

        for (piece, shape) in pieces.iter().enumerate() {
            for orientation in shape.orientations(allow_reflection) {
                let (h, w) = (orientation.height(), orientation.width());
                if h > board.height() || w > board.width() {
                    continue;
                }
                for r0 in 0..=board.height() - h {
                    for c0 in 0..=board.width() - w {
                        let cells: Vec<(usize, usize)> = orientation
                            .cells()
                            .iter()
                            .map(|&(r, c)| (r + r0, c + c0))
                            .collect();
                        let columns: Option<Vec<usize>> = cells
                            .iter()
                            .map(|&(r, c)| board.cell_column(r, c))
                            .collect();
                        if let Some(mut row) = columns {
                            row.push(open + piece);
                            rows.push(row);
                            placements.push(Placement { piece, cells });
                        }
                    }
                }
            }
        }

        debug!(
            "packing {} pieces onto {} open cells: {} placements",
            pieces.len(),
            open,
            placements.len()
        );
        let matrix = Matrix::from_sparse(open + pieces.len(), &rows)?;
        Ok(Packing {
            board,
            pieces,
            matrix,
            placements,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &[Shape] {
        &self.pieces
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Every candidate placement, one per matrix row.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// A packing ordered by piece, or `None` if there is none.
    pub fn solve(&self) -> Option<Vec<Placement>> {
        let rows = DancingLinks::new(self.matrix.clone()).solve()?;
        Some(self.placements_of(&rows))
    }

    /// A packing that uses the given placements, by index into
    /// [`Packing::placements`].
    pub fn solve_with(&self, given: &[usize]) -> Result<Option<Vec<Placement>>> {
        let rows = DancingLinks::new(self.matrix.clone()).solve_with(given)?;
        Ok(rows.map(|rows| self.placements_of(&rows)))
    }

    pub fn count_solutions(&self) -> usize {
        DancingLinks::new(self.matrix.clone()).count_solutions()
    }

    #[cfg(feature = "parallel")]
    pub fn par_count_solutions(&self) -> usize {
        crate::cs::combinatorial::dancing_links::par_count_solutions(&self.matrix)
    }

    fn placements_of(&self, rows: &[usize]) -> Vec<Placement> {
        rows.iter().map(|&r| self.placements[r].clone()).collect()
    }

    /// Piece index covering each board cell, `None` for holes.
    pub fn grid(&self, solution: &[Placement]) -> Vec<Vec<Option<usize>>> {
        let mut grid = vec![vec![None; self.board.width()]; self.board.height()];
        for placement in solution {
            for &(r, c) in &placement.cells {
                grid[r][c] = Some(placement.piece);
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domino() -> Shape {
        Shape::from_rows(&["##"]).unwrap()
    }

    fn assert_valid_packing(packing: &Packing, solution: &[Placement]) {
        let grid = packing.grid(solution);
        let board = packing.board();
        for r in 0..board.height() {
            for c in 0..board.width() {
                assert_eq!(grid[r][c].is_some(), board.is_open(r, c), "cell ({}, {})", r, c);
            }
        }
        let mut used: Vec<usize> = solution.iter().map(|p| p.piece).collect();
        used.sort_unstable();
        assert_eq!(used, (0..packing.pieces().len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_shape_normalization() {
        let s = Shape::new([(3, 4), (3, 5), (4, 4)]).unwrap();
        assert_eq!(s.cells(), &[(0, 0), (0, 1), (1, 0)]);
        assert_eq!((s.height(), s.width(), s.len()), (2, 2, 3));
        assert!(Shape::new(Vec::new()).is_err());
        assert!(Shape::from_rows(&["..", "  "]).is_err());
    }

    #[test]
    fn test_rotate_and_reflect() {
        let l = Shape::from_rows(&["#.", "#.", "##"]).unwrap();
        assert_eq!(l.rotate(), Shape::from_rows(&["###", "#.."]).unwrap());
        assert_eq!(l.reflect(), Shape::from_rows(&[".#", ".#", "##"]).unwrap());
        assert_eq!(l.rotate().rotate().rotate().rotate(), l);
    }

    #[test]
    fn test_orientation_counts() {
        let counts: Vec<(char, usize, usize)> = pentominoes()
            .iter()
            .map(|(name, s)| (*name, s.orientations(false).len(), s.orientations(true).len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ('F', 4, 8),
                ('I', 2, 2),
                ('L', 4, 8),
                ('N', 4, 8),
                ('P', 4, 8),
                ('T', 4, 4),
                ('U', 4, 4),
                ('V', 4, 4),
                ('W', 4, 4),
                ('X', 1, 1),
                ('Y', 4, 8),
                ('Z', 2, 4),
            ]
        );
        assert_eq!(domino().orientations(true).len(), 2);
    }

    #[test]
    fn test_board_columns_skip_blocked_cells() {
        let board = Board::new(3, 2).unwrap().with_blocked(&[(0, 1)]).unwrap();
        assert_eq!(board.open_cells(), 5);
        assert_eq!(board.cell_column(0, 0), Some(0));
        assert_eq!(board.cell_column(0, 1), None);
        assert_eq!(board.cell_column(0, 2), Some(1));
        assert_eq!(board.cell_column(1, 0), Some(2));
        assert_eq!(board.cell_column(2, 0), None);
        assert!(Board::new(0, 3).is_err());
        assert!(Board::new(2, 2).unwrap().with_blocked(&[(2, 0)]).is_err());
    }

    #[test]
    fn test_calendar_cells() {
        assert_eq!(calendar_cell(1), Some((0, 0)));
        assert_eq!(calendar_cell(7), Some((0, 6)));
        assert_eq!(calendar_cell(8), Some((1, 0)));
        assert_eq!(calendar_cell(28), Some((3, 6)));
        assert_eq!(calendar_cell(29), Some((4, 4)));
        assert_eq!(calendar_cell(0), None);
        assert_eq!(calendar_cell(32), None);

        let board = calendar_board(15).unwrap();
        assert!(!board.is_open(2, 0));
        assert!(board.is_open(4, 4));
        assert!(!board.is_open(4, 3));
    }

    #[test]
    fn test_domino_ring_counts_every_piece_permutation() {
        // A 3x3 board without its centre is a ring of eight cells: two
        // tilings, each with 4! ways to assign the distinct dominoes.
        let board = Board::new(3, 3).unwrap().with_blocked(&[(1, 1)]).unwrap();
        let packing = Packing::new(board, vec![domino(); 4], false).unwrap();
        assert_eq!(packing.count_solutions(), 48);
        #[cfg(feature = "parallel")]
        assert_eq!(packing.par_count_solutions(), 48);

        let solution = packing.solve().unwrap();
        assert_valid_packing(&packing, &solution);
    }

    #[test]
    fn test_l_trominoes_on_two_by_three() {
        let l = Shape::from_rows(&["#.", "##"]).unwrap();
        let board = Board::new(3, 2).unwrap();
        let packing = Packing::new(board, vec![l.clone(), l], false).unwrap();
        assert_eq!(packing.count_solutions(), 4);
    }

    #[test]
    fn test_given_placement_is_respected() {
        let board = Board::new(3, 3).unwrap().with_blocked(&[(1, 1)]).unwrap();
        let packing = Packing::new(board, vec![domino(); 4], false).unwrap();
        let given = packing
            .placements()
            .iter()
            .position(|p| p.piece == 0 && p.cells == vec![(0, 0), (0, 1)])
            .unwrap();
        let solution = packing.solve_with(&[given]).unwrap().unwrap();
        assert_valid_packing(&packing, &solution);
        assert_eq!(solution[0].cells, vec![(0, 0), (0, 1)]);

        assert!(packing.solve_with(&[packing.placements().len()]).is_err());
    }

    #[test]
    fn test_pentominoes_three_by_twenty() {
        let pieces: Vec<Shape> = pentominoes().into_iter().map(|(_, s)| s).collect();
        let board = Board::new(20, 3).unwrap();
        let packing = Packing::new(board, pieces, true).unwrap();
        // Two tilings, each seen under the four symmetries of the rectangle
        assert_eq!(packing.count_solutions(), 8);

        let solution = packing.solve().unwrap();
        assert_valid_packing(&packing, &solution);
    }

    #[test]
    fn test_calendar_puzzle() {
        let pieces: Vec<Shape> = pentominoes()
            .into_iter()
            .filter(|(name, _)| "LNPUVY".contains(*name))
            .map(|(_, s)| s)
            .collect();
        let packing = Packing::new(calendar_board(31).unwrap(), pieces, true).unwrap();
        let solution = packing.solve().unwrap();
        assert_valid_packing(&packing, &solution);
    }

    #[test]
    fn test_too_few_cells_has_no_packing() {
        let board = Board::new(2, 2).unwrap();
        let packing = Packing::new(board, vec![domino(); 3], false).unwrap();
        assert_eq!(packing.solve(), None);
        assert_eq!(packing.count_solutions(), 0);
    }
}
