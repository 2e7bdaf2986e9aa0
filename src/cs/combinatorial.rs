pub mod dancing_links;

#[cfg(feature = "parallel")]
pub use dancing_links::{par_count_solutions, par_solve_all};
pub use dancing_links::{DancingLinks, Matrix, SearchConfig, SearchStats};
