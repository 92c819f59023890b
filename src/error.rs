use std::fmt::{self, Display};

use thiserror::Error;

/// Structural problem found while validating a cost matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixDefect {
    /// The matrix has no rows.
    NoRows,
    /// The matrix has rows, but they hold no entries.
    NoColumns,
    /// A row's length differs from the length of the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl Display for MatrixDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixDefect::NoRows => write!(f, "matrix has no rows"),
            MatrixDefect::NoColumns => write!(f, "matrix has no columns"),
            MatrixDefect::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} entries, expected {expected}"
            ),
        }
    }
}

/// Errors reported when constructing a solver.
///
/// Solving a validated matrix always succeeds, so every variant is raised
/// before any reduction takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HungarianError {
    #[error("invalid cost matrix: {reason}")]
    InvalidMatrix { reason: MatrixDefect },
    #[error("cost at ({row}, {col}) cannot be ordered and subtracted")]
    UnsupportedCost { row: usize, col: usize },
}

impl From<MatrixDefect> for HungarianError {
    fn from(reason: MatrixDefect) -> Self {
        HungarianError::InvalidMatrix { reason }
    }
}
