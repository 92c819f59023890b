//! The Kuhn-Munkres step machine.
//!
//! Every step mutates the shared [`SolverState`] and returns the [`Step`] to
//! run next. The driver in [`SolverState::run`] loops until step three finds
//! every column covered by a starred zero.

use log::trace;
use nalgebra::DMatrix;

use crate::mark::{Mark, Marks};
use crate::{Cost, SolveStatistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Subtract each row's minimum from the row.
    One,
    /// Star independent zeros greedily.
    Two,
    /// Cover the columns of starred zeros, finishing once all are covered.
    Three,
    /// Prime uncovered zeros until one can start an augmenting path.
    Four,
    /// Augment along the alternating path of primes and stars.
    Five,
    /// Redistribute the smallest uncovered value to create new zeros.
    Six,
    Done,
}

/// All state threaded through the steps of a single solve.
///
/// `costs` must already be square; it is reduced in place.
pub(crate) struct SolverState<'a, T> {
    costs: &'a mut DMatrix<T>,
    n: usize,
    marks: Marks,
    covered_rows: Vec<bool>,
    covered_cols: Vec<bool>,
    path_origin: Option<(usize, usize)>,
    path: Vec<(usize, usize)>,
    stats: SolveStatistics,
}

impl<'a, T: Cost> SolverState<'a, T> {
    pub(crate) fn new(costs: &'a mut DMatrix<T>) -> Self {
        let n = costs.nrows();
        debug_assert_eq!(costs.shape(), (n, n), "working matrix must be square");
        Self {
            costs,
            n,
            marks: Marks::new(n),
            covered_rows: vec![false; n],
            covered_cols: vec![false; n],
            path_origin: None,
            path: Vec::with_capacity(2 * n + 1),
            stats: SolveStatistics::default(),
        }
    }

    /// Runs the steps to completion, returning the final marks.
    pub(crate) fn run(mut self) -> (Marks, SolveStatistics) {
        let mut step = Step::One;
        loop {
            let next = match step {
                Step::One => self.subtract_row_minima(),
                Step::Two => self.star_zeros(),
                Step::Three => self.cover_starred_columns(),
                Step::Four => self.prime_zeros(),
                Step::Five => self.augment_path(),
                Step::Six => self.adjust_by_minimum(),
                Step::Done => break,
            };
            self.stats.transitions += 1;
            trace!("step {step:?} -> {next:?}");
            step = next;
        }

        (self.marks, self.stats)
    }

    fn subtract_row_minima(&mut self) -> Step {
        for mut row in self.costs.row_iter_mut() {
            let min = row
                .iter()
                .copied()
                .reduce(|min, v| if v < min { v } else { min });
            if let Some(min) = min {
                row.iter_mut().for_each(|v| *v -= min);
            }
        }

        Step::Two
    }

    fn star_zeros(&mut self) -> Step {
        for row in 0..self.n {
            for col in 0..self.n {
                if self.costs[(row, col)].is_zero()
                    && !self.covered_rows[row]
                    && !self.covered_cols[col]
                {
                    self.marks.set(row, col, Mark::Star);
                    self.covered_rows[row] = true;
                    self.covered_cols[col] = true;
                    break;
                }
            }
        }
        self.clear_covers();

        Step::Three
    }

    fn cover_starred_columns(&mut self) -> Step {
        for col in self.marks.starred_cols() {
            self.covered_cols[col] = true;
        }

        let covered = self.covered_cols.iter().filter(|&&c| c).count();
        if covered >= self.n {
            Step::Done
        } else {
            Step::Four
        }
    }

    fn prime_zeros(&mut self) -> Step {
        while let Some((row, col)) = self.find_uncovered_zero() {
            self.marks.set(row, col, Mark::Prime);
            self.stats.primes += 1;

            match self.marks.star_in_row(row) {
                Some(star_col) => {
                    self.covered_rows[row] = true;
                    self.covered_cols[star_col] = false;
                }
                None => {
                    self.path_origin = Some((row, col));
                    return Step::Five;
                }
            }
        }

        Step::Six
    }

    fn augment_path(&mut self) -> Step {
        let origin = self
            .path_origin
            .take()
            .expect("step four records a primed zero before augmenting");

        self.path.clear();
        self.path.push(origin);
        let mut col = origin.1;
        while let Some(row) = self.marks.star_in_col(col) {
            self.path.push((row, col));
            // the star's row was covered when it got primed in step four
            col = self
                .marks
                .prime_in_row(row)
                .expect("a row with a star on the path holds a prime");
            self.path.push((row, col));
        }
        trace!("augmenting path {:?}", self.path);

        for &(row, col) in &self.path {
            let flipped = match self.marks.get(row, col) {
                Mark::Star => Mark::None,
                Mark::Prime => Mark::Star,
                Mark::None => {
                    unreachable!("({row}, {col}) on the path is neither starred nor primed")
                }
            };
            self.marks.set(row, col, flipped);
        }
        self.stats.augmentations += 1;

        self.clear_covers();
        self.marks.erase_primes();

        Step::Three
    }

    fn adjust_by_minimum(&mut self) -> Step {
        let min = self
            .smallest_uncovered()
            .expect("fewer than n covered lines leave an uncovered cell");

        // adding before subtracting keeps unsigned costs from wrapping
        for row in 0..self.n {
            for col in 0..self.n {
                if self.covered_rows[row] {
                    self.costs[(row, col)] += min;
                }
                if !self.covered_cols[col] {
                    self.costs[(row, col)] -= min;
                }
            }
        }
        self.stats.adjustments += 1;

        Step::Four
    }

    /// First uncovered zero in row-major order.
    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        (0..self.n)
            .filter(|&row| !self.covered_rows[row])
            .find_map(|row| {
                (0..self.n)
                    .find(|&col| !self.covered_cols[col] && self.costs[(row, col)].is_zero())
                    .map(|col| (row, col))
            })
    }

    fn smallest_uncovered(&self) -> Option<T> {
        let mut min: Option<T> = None;
        for row in (0..self.n).filter(|&r| !self.covered_rows[r]) {
            for col in (0..self.n).filter(|&c| !self.covered_cols[c]) {
                let v = self.costs[(row, col)];
                if min.map_or(true, |m| v < m) {
                    min = Some(v);
                }
            }
        }
        min
    }

    fn clear_covers(&mut self) {
        self.covered_rows.fill(false);
        self.covered_cols.fill(false);
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{DMatrix, Matrix3};

    use super::*;

    fn stars(marks: &Marks, n: usize) -> Vec<(usize, usize)> {
        marks.stars_within(n, n).collect()
    }

    #[test]
    fn step_one_leaves_a_zero_in_every_row() {
        #[rustfmt::skip]
        let mut costs = DMatrix::from_row_slice(3, 3, &[
            4, 2, 8,
            3, 9, 3,
            7, 7, 7,
        ]);
        let mut state = SolverState::new(&mut costs);
        assert_eq!(state.subtract_row_minima(), Step::Two);
        drop(state);

        #[rustfmt::skip]
        let expected = DMatrix::from_row_slice(3, 3, &[
            2, 0, 6,
            0, 6, 0,
            0, 0, 0,
        ]);
        assert_eq!(costs, expected);
    }

    #[test]
    fn step_two_stars_independent_zeros() {
        #[rustfmt::skip]
        let mut costs = DMatrix::from_row_slice(3, 3, &[
            0, 0, 1,
            0, 1, 1,
            1, 0, 0,
        ]);
        let mut state = SolverState::new(&mut costs);
        assert_eq!(state.star_zeros(), Step::Three);
        assert_eq!(stars(&state.marks, 3), vec![(0, 0), (2, 1)]);
        assert!(state.covered_rows.iter().all(|&c| !c));
        assert!(state.covered_cols.iter().all(|&c| !c));
    }

    #[test]
    fn step_three_finishes_on_full_cover() {
        let mut costs = DMatrix::<i32>::zeros(2, 2);
        let mut state = SolverState::new(&mut costs);
        state.marks.set(0, 1, Mark::Star);
        assert_eq!(state.cover_starred_columns(), Step::Four);
        assert_eq!(state.covered_cols, vec![false, true]);

        state.marks.set(1, 0, Mark::Star);
        assert_eq!(state.cover_starred_columns(), Step::Done);
    }

    #[test]
    fn step_four_primes_and_records_path_origin() {
        #[rustfmt::skip]
        let mut costs = DMatrix::from_row_slice(2, 2, &[
            0, 0,
            0, 1,
        ]);
        let mut state = SolverState::new(&mut costs);
        state.marks.set(0, 0, Mark::Star);
        state.covered_cols[0] = true;

        assert_eq!(state.prime_zeros(), Step::Five);
        assert_eq!(state.marks.get(0, 1), Mark::Prime);
        assert_eq!(state.marks.get(1, 0), Mark::Prime);
        assert_eq!(state.covered_rows, vec![true, false]);
        assert_eq!(state.covered_cols, vec![false, false]);
        assert_eq!(state.path_origin, Some((1, 0)));
        assert_eq!(state.stats.primes, 2);
    }

    #[test]
    fn step_four_falls_through_to_six_without_zeros() {
        let mut costs = DMatrix::from_row_slice(2, 2, &[0, 3, 0, 2]);
        let mut state = SolverState::new(&mut costs);
        state.marks.set(0, 0, Mark::Star);
        state.covered_cols[0] = true;
        assert_eq!(state.prime_zeros(), Step::Six);
        assert_eq!(state.path_origin, None);
    }

    #[test]
    fn step_five_flips_the_alternating_path() {
        let mut costs = DMatrix::<i32>::zeros(2, 2);
        let mut state = SolverState::new(&mut costs);
        state.marks.set(0, 0, Mark::Star);
        state.marks.set(0, 1, Mark::Prime);
        state.marks.set(1, 0, Mark::Prime);
        state.covered_rows[0] = true;
        state.path_origin = Some((1, 0));

        assert_eq!(state.augment_path(), Step::Three);
        assert_eq!(state.path, vec![(1, 0), (0, 0), (0, 1)]);
        assert_eq!(stars(&state.marks, 2), vec![(0, 1), (1, 0)]);
        assert_eq!(state.marks.prime_in_row(0), None);
        assert!(state.covered_rows.iter().all(|&c| !c));
        assert_eq!(state.stats.augmentations, 1);
    }

    #[test]
    #[should_panic(expected = "neither starred nor primed")]
    fn step_five_rejects_unmarked_cells_on_the_path() {
        let mut costs = DMatrix::<i32>::zeros(2, 2);
        let mut state = SolverState::new(&mut costs);
        state.path_origin = Some((1, 1));
        state.augment_path();
    }

    #[test]
    fn step_six_moves_the_uncovered_minimum() {
        #[rustfmt::skip]
        let mut costs = DMatrix::from_row_slice(3, 3, &[
            0u32, 0, 0,
            0,    1, 2,
            0,    2, 4,
        ]);
        let mut state = SolverState::new(&mut costs);
        state.covered_rows[0] = true;
        state.covered_cols[0] = true;

        assert_eq!(state.adjust_by_minimum(), Step::Four);
        drop(state);

        #[rustfmt::skip]
        let expected = DMatrix::from_row_slice(3, 3, &[
            1u32, 0, 0,
            0,    0, 1,
            0,    1, 3,
        ]);
        assert_eq!(costs, expected);
    }

    #[test]
    fn run_finds_a_full_matching() {
        #[rustfmt::skip]
        let costs = Matrix3::new(
            0., 1., 2.,
            0., 2., 4.,
            0., 3., 6.,
        );
        let mut working = DMatrix::from_iterator(3, 3, costs.iter().copied());
        let (marks, stats) = SolverState::new(&mut working).run();

        assert_eq!(stars(&marks, 3), vec![(0, 2), (1, 1), (2, 0)]);
        assert_eq!(stats.augmentations, 2);
        assert!(stats.adjustments > 0);
    }

    #[test]
    fn at_most_one_star_per_line() {
        #[rustfmt::skip]
        let mut costs = DMatrix::from_row_slice(4, 4, &[
            82, 83, 69, 92,
            77, 37, 49, 92,
            11, 69,  5, 86,
             8,  9, 98, 23,
        ]);
        let (marks, _) = SolverState::new(&mut costs).run();
        let stars = stars(&marks, 4);

        assert_eq!(stars.len(), 4);
        for i in 0..4 {
            assert_eq!(stars.iter().filter(|s| s.0 == i).count(), 1);
            assert_eq!(stars.iter().filter(|s| s.1 == i).count(), 1);
        }
    }
}
