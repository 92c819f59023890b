//! Minimum cost assignment with the Kuhn-Munkres (Hungarian) algorithm.
//!
//! Given an `R x C` cost matrix, finds `min(R, C)` row to column pairs, no
//! row or column used twice, whose summed cost is minimal. Rectangular
//! matrices are padded with zero cost rows or columns which never show up in
//! the result.
//!
//! [`Hungarian`] solves a single matrix and caches the outcome, while
//! [`hungarian`] reuses an [`Allocations`] buffer across many solves.

mod allocation;
mod cost;
mod error;
mod mark;
mod normalize;
mod solver;
mod stats;
mod step;

pub use allocation::{Allocation, Allocations};
pub use cost::Cost;
pub use error::{HungarianError, MatrixDefect};
pub use normalize::Dimensions;
pub use solver::Hungarian;
pub use stats::SolveStatistics;

/// Solves `costs` without touching it, writing the pairs into `assignments`
/// and returning their total cost.
///
/// `assignments` is cleared first, so one buffer can serve repeated calls.
pub fn hungarian<T: Cost>(
    costs: &nalgebra::DMatrix<T>,
    assignments: &mut Allocations,
) -> Result<T, HungarianError> {
    assignments.clear();
    let dims = normalize::validate(costs)?;
    let mut working = costs.clone();
    solver::solve_in_place(&mut working, &dims, assignments);

    Ok(assignments.cost(costs))
}
