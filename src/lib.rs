pub mod cs;
pub mod puzzles;

pub use cs::combinatorial::dancing_links;
pub use cs::error::{Error, Result};
#[cfg(feature = "parallel")]
pub use cs::{par_count_solutions, par_solve_all};
pub use cs::{DancingLinks, Matrix, SearchConfig, SearchStats};
