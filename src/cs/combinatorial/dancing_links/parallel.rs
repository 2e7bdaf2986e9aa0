//! Multi-threaded enumeration by forking the search at its first branch.
//!
//! The linked structure is mutated in place during search, so workers never
//! share one. Each branch of the top-level column choice gets its own
//! [`DancingLinks`] seeded with that branch's row, and rayon runs the
//! branches in parallel. The branches partition the solution space: every
//! solution contains exactly one row covering the chosen column.

use super::matrix::Matrix;
use super::search::DancingLinks;
use log::debug;
use rayon::prelude::*;

enum Branches {
    /// No columns: the empty selection is the only solution.
    Trivial,
    /// Rows covering the leftmost minimum-size column, possibly none.
    Rows(Vec<usize>),
}

fn branches(matrix: &Matrix) -> Branches {
    let sizes = matrix.column_sizes();
    match sizes.iter().enumerate().min_by_key(|&(_, size)| *size) {
        None => Branches::Trivial,
        Some((col, _)) => {
            let rows = matrix.rows_covering(col);
            debug!("forking search on column {} into {} branches", col, rows.len());
            Branches::Rows(rows)
        }
    }
}

/// Counts the solutions of `matrix` using all rayon worker threads.
///
/// # Example
/// ```
/// use dlx::{par_count_solutions, Matrix};
///
/// let m = Matrix::from_rows(&[[1u8, 0], [0, 1], [1, 1], [1, 0]]).unwrap();
/// assert_eq!(par_count_solutions(&m), 3);
/// ```
pub fn par_count_solutions(matrix: &Matrix) -> usize {
    match branches(matrix) {
        Branches::Trivial => 1,
        // A lone seed taken from `rows_covering` is in range, non-empty and
        // cannot clash with itself, so seeding never fails here.
        Branches::Rows(rows) => rows
            .par_iter()
            .map(|&row| {
                DancingLinks::new(matrix.clone())
                    .count_solutions_with(&[row])
                    .unwrap_or(0)
            })
            .sum(),
    }
}

/// Finds every solution of `matrix` using all rayon worker threads.
///
/// Solutions are grouped by the row taken at the first branch, in row order.
pub fn par_solve_all(matrix: &Matrix) -> Vec<Vec<usize>> {
    match branches(matrix) {
        Branches::Trivial => vec![Vec::new()],
        Branches::Rows(rows) => rows
            .par_iter()
            .flat_map_iter(|&row| {
                DancingLinks::new(matrix.clone())
                    .solve_all_with(&[row])
                    .unwrap_or_default()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_matches_sequential_on_sample() {
        let m = Matrix::from_rows(&[
            [1u8, 1, 0],
            [0, 0, 1],
            [1, 0, 1],
            [0, 1, 0],
            [0, 1, 1],
            [1, 0, 0],
        ])
        .unwrap();
        assert_eq!(par_count_solutions(&m), 4);
        assert_eq!(
            par_solve_all(&m),
            vec![vec![0, 1], vec![2, 3], vec![1, 3, 5], vec![4, 5]]
        );
    }

    #[test]
    fn test_degenerate_matrices() {
        let none: Vec<Vec<u8>> = vec![];
        let empty = Matrix::from_rows(&none).unwrap();
        assert_eq!(par_count_solutions(&empty), 1);
        assert_eq!(par_solve_all(&empty), vec![Vec::<usize>::new()]);

        let dead = Matrix::from_rows(&[[1u8, 0], [1, 0]]).unwrap();
        assert_eq!(par_count_solutions(&dead), 0);
        assert!(par_solve_all(&dead).is_empty());
    }

    #[test]
    fn test_branch_rows_skip_empty_and_duplicate_rows() {
        // Row 0 is empty and never becomes a branch; rows 1 and 3 are twins
        let m = Matrix::from_rows(&[[0u8, 0, 0], [1, 1, 0], [0, 0, 1], [1, 1, 0], [1, 0, 1]]).unwrap();
        assert_eq!(par_count_solutions(&m), 2);
        assert_eq!(par_solve_all(&m), vec![vec![1, 2], vec![2, 3]]);
    }

    #[test]
    fn test_matches_sequential_on_random_matrices() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            let rows = rng.gen_range(1..16);
            let cols = rng.gen_range(1..8);
            let rows: Vec<Vec<u8>> = (0..rows)
                .map(|_| (0..cols).map(|_| u8::from(rng.gen_bool(0.3))).collect())
                .collect();
            let m = Matrix::from_rows(&rows).unwrap();

            let mut sequential = DancingLinks::new(m.clone()).solve_all();
            let mut parallel = par_solve_all(&m);
            sequential.sort();
            parallel.sort();
            assert_eq!(parallel, sequential);
            assert_eq!(par_count_solutions(&m), sequential.len());
        }
    }
}
