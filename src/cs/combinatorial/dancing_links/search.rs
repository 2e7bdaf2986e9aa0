//! Algorithm X over the dancing-links structure.
//!
//! [`DancingLinks`] owns the linked structure and is the only thing that
//! mutates it. Every call unwinds all of its covers before returning, so a
//! solver can be searched repeatedly and always starts from the state built
//! from its matrix.

use super::links::Links;
use super::matrix::Matrix;
use crate::cs::error::{Error, Result};
use log::{debug, trace};

/// Options for multi-solution searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop enumerating once this many solutions have been found.
    pub max_solutions: Option<usize>,
    /// Record each solution's rows, not just the count.
    pub collect_solutions: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_solutions: None,
            collect_solutions: true,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = Some(max_solutions);
        self
    }

    pub fn with_collect_solutions(mut self, collect_solutions: bool) -> Self {
        self.collect_solutions = collect_solutions;
        self
    }
}

/// Counters gathered during the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search-tree nodes visited, the root included.
    pub nodes: u64,
    /// Complete covers reached.
    pub solutions: u64,
    /// Deepest level reached below the pre-selected rows.
    pub max_depth: usize,
}

/// A Dancing Links solver for exact cover.
///
/// # Example
/// ```
/// use dlx::DancingLinks;
///
/// let mut dlx = DancingLinks::from_rows(&[
///     [1u8, 1, 0],
///     [0, 0, 1],
///     [1, 0, 1],
///     [0, 1, 0],
/// ])
/// .unwrap();
///
/// assert_eq!(dlx.solve(), Some(vec![0, 1]));
/// assert_eq!(dlx.solve_all(), vec![vec![0, 1], vec![2, 3]]);
/// assert_eq!(dlx.solve_with(&[3]).unwrap(), Some(vec![2, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct DancingLinks {
    matrix: Matrix,
    links: Links,
    config: SearchConfig,
    /// Partial solution stack of row nodes, pre-selected rows first.
    partial: Vec<usize>,
    collect: bool,
    first: Option<Vec<usize>>,
    solutions: Vec<Vec<usize>>,
    solution_count: usize,
    stats: SearchStats,
}

impl DancingLinks {
    pub fn new(matrix: Matrix) -> Self {
        Self::with_config(matrix, SearchConfig::default())
    }

    pub fn with_config(matrix: Matrix, config: SearchConfig) -> Self {
        let links = Links::new(&matrix);
        debug!(
            "built dancing links for {} rows over {} columns",
            matrix.num_rows(),
            links.num_cols()
        );
        DancingLinks {
            matrix,
            links,
            config,
            partial: Vec::new(),
            collect: config.collect_solutions,
            first: None,
            solutions: Vec::new(),
            solution_count: 0,
            stats: SearchStats::default(),
        }
    }

    /// Validates `rows` as a 0/1 matrix and builds a solver for it.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        Ok(Self::new(Matrix::from_rows(rows)?))
    }

    /// Validates `rows` as a boolean matrix and builds a solver for it.
    pub fn from_bools<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        Ok(Self::new(Matrix::from_bools(rows)?))
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Solutions reached by the last search.
    pub fn solution_count(&self) -> usize {
        self.solution_count
    }

    /// Solutions recorded by the last multi-solution search, in discovery
    /// order. Each one is a sorted list of row indices.
    pub fn solutions(&self) -> &[Vec<usize>] {
        &self.solutions
    }

    /// The solution found by the last single-solution search.
    pub fn solution(&self) -> Option<&[usize]> {
        self.first.as_deref()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs Algorithm X after force-selecting the rows in `pre_solution`.
    ///
    /// With `multi_solution` off the search stops at the first solution,
    /// available afterwards from [`DancingLinks::solution`]. With it on,
    /// every solution is counted (and recorded if the config says so) until
    /// the tree is exhausted or `max_solutions` is reached.
    ///
    /// Returns whether the search stopped on a solution.
    ///
    /// # Errors
    /// * [`Error::RowOutOfRange`] for a pre-selected row outside the matrix
    /// * [`Error::EmptyRow`] for a pre-selected row with no 1-entries
    /// * [`Error::ConflictingSeed`] for pre-selected rows sharing a column
    pub fn search(&mut self, multi_solution: bool, pre_solution: &[usize]) -> Result<bool> {
        let collect = self.config.collect_solutions;
        self.run(multi_solution, collect, pre_solution)
    }

    /// First solution as sorted row indices, or `None` if there is none.
    pub fn solve(&mut self) -> Option<Vec<usize>> {
        // Nothing to validate without pre-selected rows
        self.solve_with(&[]).unwrap_or(None)
    }

    /// First solution containing every row of `pre_solution`.
    pub fn solve_with(&mut self, pre_solution: &[usize]) -> Result<Option<Vec<usize>>> {
        self.run(false, false, pre_solution)?;
        Ok(self.first.clone())
    }

    /// Every solution, in discovery order.
    pub fn solve_all(&mut self) -> Vec<Vec<usize>> {
        self.solve_all_with(&[]).unwrap_or_default()
    }

    /// Every solution containing the rows of `pre_solution`.
    pub fn solve_all_with(&mut self, pre_solution: &[usize]) -> Result<Vec<Vec<usize>>> {
        self.run(true, true, pre_solution)?;
        Ok(self.solutions.clone())
    }

    /// Number of solutions, without storing them.
    pub fn count_solutions(&mut self) -> usize {
        self.count_solutions_with(&[]).unwrap_or(0)
    }

    pub fn count_solutions_with(&mut self, pre_solution: &[usize]) -> Result<usize> {
        self.run(true, false, pre_solution)?;
        Ok(self.solution_count)
    }

    fn reset(&mut self) {
        self.partial.clear();
        self.first = None;
        self.solutions.clear();
        self.solution_count = 0;
        self.stats = SearchStats::default();
    }

    fn run(&mut self, multi_solution: bool, collect: bool, pre_solution: &[usize]) -> Result<bool> {
        self.reset();
        self.collect = collect;
        debug_assert!(self.links.check_consistency());

        let seeds = self.apply_seeds(pre_solution)?;
        debug!(
            "searching {}x{} matrix, multi_solution={}, pre_solution={:?}",
            self.matrix.num_rows(),
            self.matrix.num_cols(),
            multi_solution,
            pre_solution
        );

        let stopped = if multi_solution && self.config.max_solutions == Some(0) {
            false
        } else {
            self.search_level(0, multi_solution)
        };

        self.unwind_seeds(&seeds);
        self.partial.clear();
        debug_assert!(self.links.check_consistency());

        debug!(
            "search finished: {} solution(s), {} nodes, max depth {}",
            self.solution_count, self.stats.nodes, self.stats.max_depth
        );
        Ok(stopped)
    }

    /// Covers the columns of each pre-selected row. On error the rows seeded
    /// so far are unwound before returning.
    fn apply_seeds(&mut self, pre_solution: &[usize]) -> Result<Vec<usize>> {
        let mut seeds = Vec::with_capacity(pre_solution.len());
        for &row in pre_solution {
            match self.check_seed(row) {
                Ok(head) => {
                    self.links.seed(head);
                    self.partial.push(head);
                    seeds.push(head);
                }
                Err(err) => {
                    self.unwind_seeds(&seeds);
                    self.partial.clear();
                    return Err(err);
                }
            }
        }
        Ok(seeds)
    }

    fn check_seed(&self, row: usize) -> Result<usize> {
        let rows = self.matrix.num_rows();
        if row >= rows {
            return Err(Error::RowOutOfRange { row, rows });
        }
        let head = self.links.row_head(row).ok_or(Error::EmptyRow(row))?;

        let mut node = head;
        loop {
            let header = self.links.column(node);
            if !self.links.is_active(header) {
                return Err(Error::ConflictingSeed {
                    row,
                    column: header - 1,
                });
            }
            node = self.links.right(node);
            if node == head {
                break;
            }
        }
        Ok(head)
    }

    fn unwind_seeds(&mut self, seeds: &[usize]) {
        for &head in seeds.iter().rev() {
            self.links.unseed(head);
        }
    }

    /// One level of Algorithm X. Returns true when the search should stop.
    fn search_level(&mut self, depth: usize, multi_solution: bool) -> bool {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if self.links.is_solved() {
            return self.record_solution(multi_solution);
        }
        let col = match self.links.choose_column() {
            Some(col) => col,
            None => return false,
        };

        // A column nothing can cover is a dead end
        if self.links.size(col) == 0 {
            return false;
        }

        self.links.cover(col);

        let mut stop = false;
        let mut row_node = self.links.down(col);
        while row_node != col {
            self.partial.push(row_node);
            self.links.select(row_node);

            stop = self.search_level(depth + 1, multi_solution);

            self.links.deselect(row_node);
            self.partial.pop();
            if stop {
                break;
            }
            row_node = self.links.down(row_node);
        }

        self.links.uncover(col);
        stop
    }

    fn record_solution(&mut self, multi_solution: bool) -> bool {
        let mut rows: Vec<usize> = self.partial.iter().map(|&n| self.links.row(n)).collect();
        rows.sort_unstable();
        debug_assert!(self.matrix.is_exact_cover(&rows));

        self.solution_count += 1;
        self.stats.solutions += 1;
        trace!("solution {}: rows {:?}", self.solution_count, rows);

        if !multi_solution {
            self.first = Some(rows);
            return true;
        }
        if self.collect {
            self.solutions.push(rows);
        }
        self.config
            .max_solutions
            .is_some_and(|max| self.solution_count >= max)
    }
}
