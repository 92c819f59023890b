use nalgebra::DMatrix;

use crate::mark::Marks;
use crate::normalize::Dimensions;
use crate::Cost;

/// A single row to column pairing of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    row: usize,
    col: usize,
}

impl Allocation {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn assignment(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

impl From<(usize, usize)> for Allocation {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// The pairs of a solved assignment, ordered by row.
///
/// Each row and each column appears at most once. The buffer can be reused
/// across solves, see [`crate::hungarian`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocations {
    allocations: Vec<Allocation>,
}

impl Allocations {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            allocations: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Allocation> {
        self.allocations.iter()
    }

    pub fn as_slice(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Iterates the `(row, col)` pairs.
    pub fn assignment(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.allocations.iter().map(Allocation::assignment)
    }

    pub fn col_for_row(&self, row: usize) -> Option<usize> {
        self.allocations
            .binary_search_by_key(&row, Allocation::row)
            .ok()
            .map(|i| self.allocations[i].col)
    }

    pub fn row_for_col(&self, col: usize) -> Option<usize> {
        self.allocations
            .iter()
            .find(|a| a.col == col)
            .map(Allocation::row)
    }

    /// Rows below `rows` that received no column.
    pub fn unassigned_rows(&self, rows: usize) -> Vec<usize> {
        (0..rows)
            .filter(|&r| self.col_for_row(r).is_none())
            .collect()
    }

    /// Columns below `cols` that received no row.
    pub fn unassigned_cols(&self, cols: usize) -> Vec<usize> {
        let mut taken = vec![false; cols];
        for a in self.allocations.iter().filter(|a| a.col < cols) {
            taken[a.col] = true;
        }
        (0..cols).filter(|&c| !taken[c]).collect()
    }

    /// Sums the entries of `costs` at every allocated cell.
    ///
    /// # Panics
    /// If an allocation lies outside `costs`.
    pub fn cost<T: Cost>(&self, costs: &DMatrix<T>) -> T {
        crate::cost::total(costs, self.assignment())
    }

    pub fn clear(&mut self) {
        self.allocations.clear();
    }

    pub fn into_vec(self) -> Vec<Allocation> {
        self.allocations
    }

    /// Replaces the content with the starred cells inside the original
    /// bounds, dropping anything matched against padding.
    pub(crate) fn extract(&mut self, marks: &Marks, dims: &Dimensions) {
        self.allocations.clear();
        self.allocations.extend(
            marks
                .stars_within(dims.rows, dims.cols)
                .map(Allocation::from),
        );
        debug_assert_eq!(self.allocations.len(), dims.matching_size());
    }
}

impl<'a> IntoIterator for &'a Allocations {
    type Item = &'a Allocation;
    type IntoIter = std::slice::Iter<'a, Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.allocations.iter()
    }
}

impl IntoIterator for Allocations {
    type Item = Allocation;
    type IntoIter = std::vec::IntoIter<Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.allocations.into_iter()
    }
}
