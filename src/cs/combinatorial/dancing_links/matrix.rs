//! Validated 0/1 constraint matrices.
//!
//! Rows are candidate options, columns are items that a solution must cover
//! exactly once. Every constructor checks the shape and the entries up front,
//! so the linked structure built from a [`Matrix`] is always well formed.

use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use ndarray::ArrayView2;
use std::collections::HashSet;
use std::fmt;

/// A rectangular binary matrix with rows stored as bit vectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    rows: Vec<BitVec>,
    num_cols: usize,
}

impl Matrix {
    /// Builds a matrix from rows of `0`/`1` bytes.
    ///
    /// # Errors
    /// * [`Error::RaggedRow`] if a row's length differs from the first row
    /// * [`Error::NonBinaryEntry`] if an entry is neither 0 nor 1
    ///
    /// # Example
    /// ```
    /// use dlx::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1u8, 1, 0], [0, 0, 1]]).unwrap();
    /// assert_eq!(m.num_rows(), 2);
    /// assert_eq!(m.num_cols(), 3);
    /// assert!(Matrix::from_rows(&[[1u8, 2]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut bits = Vec::with_capacity(rows.len());

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            check_width(r, num_cols, row.len())?;
            let mut bv: BitVec = BitVec::repeat(false, num_cols);
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => bv.set(c, true),
                    _ => {
                        return Err(Error::NonBinaryEntry {
                            row: r,
                            column: c,
                            value,
                        })
                    }
                }
            }
            bits.push(bv);
        }

        Ok(Matrix {
            rows: bits,
            num_cols,
        })
    }

    /// Builds a matrix from rows of booleans.
    pub fn from_bools<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut bits = Vec::with_capacity(rows.len());

        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            check_width(r, num_cols, row.len())?;
            bits.push(row.iter().copied().collect::<BitVec>());
        }

        Ok(Matrix {
            rows: bits,
            num_cols,
        })
    }

    /// Builds a matrix from a 2-D array view, as produced by array-based
    /// puzzle generators.
    pub fn from_array(array: ArrayView2<'_, u8>) -> Result<Self> {
        let num_cols = array.ncols();
        let mut bits = Vec::with_capacity(array.nrows());

        for (r, row) in array.outer_iter().enumerate() {
            let mut bv: BitVec = BitVec::repeat(false, num_cols);
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => bv.set(c, true),
                    _ => {
                        return Err(Error::NonBinaryEntry {
                            row: r,
                            column: c,
                            value,
                        })
                    }
                }
            }
            bits.push(bv);
        }

        Ok(Matrix {
            rows: bits,
            num_cols,
        })
    }

    /// Builds a matrix with `num_cols` columns where each row is given as the
    /// list of column indices holding a 1.
    ///
    /// Repeated indices within a row are harmless.
    ///
    /// # Example
    /// ```
    /// use dlx::Matrix;
    ///
    /// let m = Matrix::from_sparse(3, &[vec![0usize, 1], vec![2]]).unwrap();
    /// assert_eq!(m, Matrix::from_rows(&[[1u8, 1, 0], [0, 0, 1]]).unwrap());
    /// ```
    pub fn from_sparse<R: AsRef<[usize]>>(num_cols: usize, rows: &[R]) -> Result<Self> {
        let mut bits = Vec::with_capacity(rows.len());

        for (r, row) in rows.iter().enumerate() {
            let mut bv: BitVec = BitVec::repeat(false, num_cols);
            for &c in row.as_ref() {
                if c >= num_cols {
                    return Err(Error::InvalidInput(format!(
                        "row {} references column {} but the matrix has {} columns",
                        r, c, num_cols
                    )));
                }
                bv.set(c, true);
            }
            bits.push(bv);
        }

        Ok(Matrix {
            rows: bits,
            num_cols,
        })
    }

    /// The identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        let rows = (0..n)
            .map(|i| {
                let mut bv: BitVec = BitVec::repeat(false, n);
                bv.set(i, true);
                bv
            })
            .collect();
        Matrix { rows, num_cols: n }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Row `index` as a bit slice.
    ///
    /// # Panics
    /// Panics if `index >= self.num_rows()`.
    pub fn row(&self, index: usize) -> &BitSlice {
        &self.rows[index]
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> + '_ {
        self.rows.iter().map(|r| r.as_bitslice())
    }

    /// Whether row `index` has no 1-entries. Such a row can never be selected.
    pub fn is_row_empty(&self, index: usize) -> bool {
        self.rows[index].not_any()
    }

    /// Number of 1-entries in every column.
    pub fn column_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_cols];
        for row in &self.rows {
            for c in row.iter_ones() {
                sizes[c] += 1;
            }
        }
        sizes
    }

    /// Rows with a 1 in `column`, in ascending order.
    pub fn rows_covering(&self, column: usize) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(column).is_some_and(|b| *b))
            .map(|(r, _)| r)
            .collect()
    }

    /// Checks that `rows` are pairwise disjoint and together cover every
    /// column. Out-of-range or repeated row indices make the check fail.
    ///
    /// # Example
    /// ```
    /// use dlx::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1u8, 1, 0], [0, 0, 1], [1, 0, 1]]).unwrap();
    /// assert!(m.is_exact_cover(&[0, 1]));
    /// assert!(!m.is_exact_cover(&[0, 2]));
    /// ```
    pub fn is_exact_cover(&self, rows: &[usize]) -> bool {
        let mut covered: BitVec = BitVec::repeat(false, self.num_cols);
        for &r in rows {
            let Some(row) = self.rows.get(r) else {
                return false;
            };
            if row.not_any() {
                return false;
            }
            for c in row.iter_ones() {
                if covered[c] {
                    return false;
                }
                covered.set(c, true);
            }
        }
        covered.all()
    }

    /// Removes duplicate rows, keeping the first occurrence of each.
    ///
    /// Returns the reduced matrix and, for each of its rows, the index of
    /// that row in `self`.
    ///
    /// # Example
    /// ```
    /// use dlx::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1u8, 0], [0, 1], [1, 0]]).unwrap();
    /// let (unique, origin) = m.dedup_rows();
    /// assert_eq!(unique.num_rows(), 2);
    /// assert_eq!(origin, vec![0, 1]);
    /// ```
    pub fn dedup_rows(&self) -> (Matrix, Vec<usize>) {
        let mut seen: HashSet<&BitVec> = HashSet::with_capacity(self.rows.len());
        let mut rows = Vec::new();
        let mut origin = Vec::new();

        for (r, row) in self.rows.iter().enumerate() {
            if !seen.insert(row) {
                continue;
            }
            rows.push(row.clone());
            origin.push(r);
        }

        (
            Matrix {
                rows,
                num_cols: self.num_cols,
            },
            origin,
        )
    }
}

fn check_width(row: usize, expected: usize, found: usize) -> Result<()> {
    if found != expected {
        return Err(Error::RaggedRow {
            row,
            expected,
            found,
        });
    }
    Ok(())
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for bit in row.iter() {
                f.write_str(if *bit { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
