use thiserror::Error;

/// Errors raised while building or seeding an exact-cover problem.
///
/// Search itself never fails: an unsatisfiable matrix is a normal negative
/// result, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A matrix row whose length differs from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A matrix entry other than 0 or 1.
    #[error("entry ({row}, {column}) is {value}, expected 0 or 1")]
    NonBinaryEntry { row: usize, column: usize, value: u8 },

    /// A pre-solution row index outside the matrix.
    #[error("row {row} is out of range for a matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    /// A pre-solution row that has no 1-entries and so cannot be selected.
    #[error("row {0} is empty and cannot be selected")]
    EmptyRow(usize),

    /// A pre-solution row overlapping a column already covered by an earlier one.
    #[error("row {row} conflicts with an earlier pre-selected row on column {column}")]
    ConflictingSeed { row: usize, column: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for exact-cover operations
pub type Result<T> = std::result::Result<T, Error>;
