//! Validation and square padding of cost matrices.

use nalgebra::DMatrix;

use crate::{Cost, HungarianError, MatrixDefect};

/// Shape of a cost matrix as supplied, together with the side length of the
/// square working matrix it is padded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
    pub n: usize,
}

impl Dimensions {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            n: rows.max(cols),
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Number of pairs a complete assignment holds.
    pub fn matching_size(&self) -> usize {
        self.rows.min(self.cols)
    }
}

/// Checks that `costs` is non-empty and that every entry is supported.
pub(crate) fn validate<T: Cost>(costs: &DMatrix<T>) -> Result<Dimensions, HungarianError> {
    let (rows, cols) = costs.shape();
    if rows == 0 {
        return Err(MatrixDefect::NoRows.into());
    }
    if cols == 0 {
        return Err(MatrixDefect::NoColumns.into());
    }

    for row in 0..rows {
        for col in 0..cols {
            if !costs[(row, col)].is_supported() {
                return Err(HungarianError::UnsupportedCost { row, col });
            }
        }
    }

    Ok(Dimensions::new(rows, cols))
}

/// Builds a matrix from row vectors, rejecting empty and ragged input.
pub(crate) fn from_rows<T: Cost>(rows: &[Vec<T>]) -> Result<DMatrix<T>, HungarianError> {
    let first = rows.first().ok_or(MatrixDefect::NoRows)?;
    let width = first.len();
    if width == 0 {
        return Err(MatrixDefect::NoColumns.into());
    }

    if let Some((row, found)) = rows
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, len)| len != width)
    {
        return Err(MatrixDefect::RaggedRow {
            row,
            expected: width,
            found,
        }
        .into());
    }

    Ok(DMatrix::from_fn(rows.len(), width, |r, c| rows[r][c]))
}

/// Pads `costs` in place with zero valued rows and columns until it is
/// `dims.n` by `dims.n`. Existing entries keep their coordinates.
pub(crate) fn pad_square<T: Cost>(costs: &mut DMatrix<T>, dims: &Dimensions) {
    if costs.shape() != (dims.n, dims.n) {
        costs.resize_mut(dims.n, dims.n, T::zero());
    }
}
