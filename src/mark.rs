use nalgebra::DMatrix;

/// Label carried by each cell of the working matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Mark {
    #[default]
    None,
    /// Zero selected for the tentative assignment.
    Star,
    /// Candidate zero found while looking for an augmenting path.
    Prime,
}

/// Square grid of [`Mark`]s, parallel to the working matrix.
///
/// At most one [`Mark::Star`] may exist per row and per column.
#[derive(Debug, Clone)]
pub(crate) struct Marks(DMatrix<Mark>);

impl Marks {
    pub(crate) fn new(n: usize) -> Self {
        Self(DMatrix::from_element(n, n, Mark::None))
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> Mark {
        self.0[(row, col)]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, mark: Mark) {
        self.0[(row, col)] = mark;
    }

    pub(crate) fn star_in_row(&self, row: usize) -> Option<usize> {
        self.0.row(row).iter().position(|&m| m == Mark::Star)
    }

    pub(crate) fn prime_in_row(&self, row: usize) -> Option<usize> {
        self.0.row(row).iter().position(|&m| m == Mark::Prime)
    }

    pub(crate) fn star_in_col(&self, col: usize) -> Option<usize> {
        self.0.column(col).iter().position(|&m| m == Mark::Star)
    }

    /// Columns holding a starred zero.
    pub(crate) fn starred_cols(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .column_iter()
            .enumerate()
            .filter(|(_, col)| col.iter().any(|&m| m == Mark::Star))
            .map(|(c, _)| c)
    }

    /// Starred cells with `row < rows` and `col < cols`, in row-major order.
    pub(crate) fn stars_within(
        &self,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..rows).flat_map(move |r| {
            (0..cols)
                .filter(move |&c| self.get(r, c) == Mark::Star)
                .map(move |c| (r, c))
        })
    }

    pub(crate) fn erase_primes(&mut self) {
        self.0
            .iter_mut()
            .filter(|m| **m == Mark::Prime)
            .for_each(|m| *m = Mark::None);
    }
}
