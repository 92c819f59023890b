use std::borrow::{Borrow, BorrowMut};

use log::debug;
use nalgebra::DMatrix;

use crate::normalize::{self, Dimensions};
use crate::step::SolverState;
use crate::{Allocations, Cost, HungarianError, SolveStatistics};

/// Pads `costs`, runs the step machine on it and writes the assignment into
/// `allocations`. `dims` must come from validating `costs`.
pub(crate) fn solve_in_place<T: Cost>(
    costs: &mut DMatrix<T>,
    dims: &Dimensions,
    allocations: &mut Allocations,
) -> SolveStatistics {
    debug!(
        "solving {}x{} cost matrix as {}x{}",
        dims.rows, dims.cols, dims.n, dims.n
    );
    normalize::pad_square(costs, dims);
    let (marks, stats) = SolverState::new(costs).run();
    allocations.extract(&marks, dims);
    debug!("solved with {} pairs: {stats}", allocations.len());
    stats
}

#[derive(Debug, Clone)]
struct Solution<T> {
    allocations: Allocations,
    value: T,
    stats: SolveStatistics,
}

/// Minimum cost assignment solver for a single cost matrix.
///
/// The working matrix `M` is anything that mutably borrows a
/// [`DMatrix`]. Solving pads it to a square and reduces it **in place**:
///
/// - passing `&mut DMatrix<T>` leaves the caller's matrix padded and
///   reduced after [`Hungarian::assignments`]; clone it first if the
///   original entries are still needed;
/// - passing an owned `DMatrix<T>` (or using [`Hungarian::from_matrix`])
///   keeps the caller's matrix untouched.
///
/// Either way [`Hungarian::value`] is computed from a snapshot taken at
/// construction, so it always reflects the costs as supplied.
///
/// ```
/// use hungarian::Hungarian;
///
/// let mut costs = nalgebra::DMatrix::from_row_slice(3, 3, &[
///     0, 1, 2,
///     0, 2, 4,
///     0, 3, 6,
/// ]);
/// let mut solver = Hungarian::new(&mut costs).unwrap();
/// let pairs: Vec<_> = solver.assignments().assignment().collect();
/// assert_eq!(pairs, vec![(0, 2), (1, 1), (2, 0)]);
/// assert_eq!(solver.value(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Hungarian<T: Cost, M = DMatrix<T>> {
    costs: M,
    original: DMatrix<T>,
    dims: Dimensions,
    solution: Option<Solution<T>>,
}

impl<T: Cost> Hungarian<T> {
    /// Solver over a private copy of `costs`.
    pub fn from_matrix(costs: &DMatrix<T>) -> Result<Self, HungarianError> {
        Self::new(costs.clone())
    }

    /// Solver over a matrix built from equally long rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, HungarianError> {
        Self::new(normalize::from_rows(rows)?)
    }
}

impl<T, M> Hungarian<T, M>
where
    T: Cost,
    M: BorrowMut<DMatrix<T>>,
{
    /// Validates `costs` and snapshots it for [`Hungarian::value`].
    ///
    /// Fails if the matrix has no rows or columns, or holds an entry the
    /// reduction cannot subtract from itself (`NaN`, infinities).
    pub fn new(costs: M) -> Result<Self, HungarianError> {
        let dims = normalize::validate(Borrow::<DMatrix<T>>::borrow(&costs))?;
        let original = Borrow::<DMatrix<T>>::borrow(&costs).clone();
        Ok(Self {
            costs,
            original,
            dims,
            solution: None,
        })
    }

    /// Optimal pairs, one per row for wide matrices and one per column for
    /// tall ones, ordered by row.
    ///
    /// The first call solves; later calls return the cached result.
    pub fn assignments(&mut self) -> &Allocations {
        &self.solve().allocations
    }

    /// Total cost of [`Hungarian::assignments`] under the original costs.
    pub fn value(&mut self) -> T {
        self.solve().value
    }

    /// Counters of the solve, `None` until the first solve.
    pub fn statistics(&self) -> Option<&SolveStatistics> {
        self.solution.as_ref().map(|s| &s.stats)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// The costs as supplied at construction.
    pub fn original(&self) -> &DMatrix<T> {
        &self.original
    }

    /// The working matrix; padded and reduced once solved.
    pub fn costs(&self) -> &DMatrix<T> {
        Borrow::<DMatrix<T>>::borrow(&self.costs)
    }

    pub fn into_inner(self) -> M {
        self.costs
    }

    fn solve(&mut self) -> &Solution<T> {
        let Self {
            costs,
            original,
            dims,
            solution,
        } = self;

        solution.get_or_insert_with(|| {
            let mut allocations = Allocations::with_capacity(dims.matching_size());
            let working = BorrowMut::<DMatrix<T>>::borrow_mut(costs);
            let stats = solve_in_place(working, dims, &mut allocations);
            let value = allocations.cost(original);
            Solution {
                allocations,
                value,
                stats,
            }
        })
    }
}
