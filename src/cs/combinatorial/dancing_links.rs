//! Dancing Links (Algorithm X) for exact cover.
//!
//! Given a 0/1 matrix, find subsets of rows whose union covers every column
//! exactly once. Knuth's Algorithm X does the backtracking; Dancing Links
//! makes each step reversible in O(1) per node by unlinking nodes from
//! circular doubly-linked rings and relinking them on the way back.
//!
//! # Example
//! ```
//! // In this small example, we have 4 columns (C0..C3) and 6 possible rows.
//! //   R0: [1, 0, 1, 0]
//! //   R1: [1, 0, 0, 1]
//! //   R2: [0, 1, 1, 0]
//! //   R3: [0, 1, 0, 1]
//! //   R4: [1, 0, 1, 0]  (same as R0)
//! //   R5: [0, 1, 0, 1]  (same as R3)
//! use dlx::cs::combinatorial::dancing_links::{DancingLinks, Matrix};
//!
//! let matrix = Matrix::from_bools(&[
//!     [true,  false, true,  false],
//!     [true,  false, false, true ],
//!     [false, true,  true,  false],
//!     [false, true,  false, true ],
//!     [true,  false, true,  false],
//!     [false, true,  false, true ],
//! ])
//! .unwrap();
//!
//! let mut dlx = DancingLinks::new(matrix);
//! // Duplicate rows give distinct solutions.
//! assert_eq!(
//!     dlx.solve_all(),
//!     vec![vec![0, 3], vec![0, 5], vec![1, 2], vec![3, 4], vec![4, 5]]
//! );
//! ```

mod links;
pub mod matrix;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod search;

pub use matrix::Matrix;
#[cfg(feature = "parallel")]
pub use parallel::{par_count_solutions, par_solve_all};
pub use search::{DancingLinks, SearchConfig, SearchStats};
