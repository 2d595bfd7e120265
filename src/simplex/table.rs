use nalgebra::{DMatrix, DVector, RowDVector};
use num_traits::Zero;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use crate::dbg_display;

use super::{Solution, SolveError, EPS, FEASIBILITY_EPS};

/// The working state of one solve: the tableau with its right-hand side in
/// column 0, the current basis and basic costs, and the augmented cost row.
///
/// Column `v + 1` holds variable `v`; variable indices run over structural,
/// then per-constraint slack/surplus/artificial variables in assignment order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimplexTable {
    pub(crate) n_structural: usize,
    /// Index of the variable currently basic in each row.
    pub(crate) basis: DVector<usize>,
    pub(crate) tableau: DMatrix<f64>,
    /// Augmented objective coefficient of each basic variable.
    pub(crate) cost_basis: DVector<f64>,
    /// Augmented cost row; artificial columns carry the signed penalty.
    pub(crate) cost_row: RowDVector<f64>,
    /// Variable indices of the artificial variables, ascending.
    pub(crate) artificial: Vec<usize>,
    pub(crate) minimization: bool,
    pub(crate) penalty: f64,
}

impl SimplexTable {
    pub(crate) fn is_artificial(&self, var: usize) -> bool {
        self.artificial.contains(&var)
    }

    /// Phase I is active while any artificial variable is still basic.
    fn phase_one(&self) -> bool {
        self.basis.iter().any(|var| self.is_artificial(*var))
    }

    fn big_m_active(&self) -> bool {
        self.cost_basis.iter().any(|cost| cost.abs() == self.penalty)
    }

    /// Computes the reduced-cost row: entry 0 is the current augmented
    /// objective value, entry j is z_j - c_j.
    pub(crate) fn delta_row(&self) -> RowDVector<f64> {
        dbg_display!(self.cost_basis.transpose() * &self.tableau - &self.cost_row)
    }

    /// Phase-aware entering-column choice; `None` means the current tableau
    /// is optimal. Ties go to the leftmost candidate.
    pub(crate) fn entering_column(&self, delta_row: &RowDVector<f64>) -> Option<usize> {
        if self.phase_one() || self.minimization {
            self.most_positive(delta_row, |var| !self.is_artificial(var))
        } else if self.big_m_active() {
            self.most_positive(delta_row, |var| var < self.n_structural)
                .or_else(|| {
                    self.most_positive(delta_row, |var| {
                        var >= self.n_structural && !self.is_artificial(var)
                    })
                })
        } else {
            // Once the penalty is gone the z_j - c_j convention inverts for
            // maximization: improving columns are the negative ones.
            self.most_negative(delta_row, |var| var < self.n_structural)
        }
    }

    fn most_positive(
        &self,
        delta_row: &RowDVector<f64>,
        allowed: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let mut best = EPS;
        let mut column = None;
        for j in 1..delta_row.len() {
            if allowed(j - 1) && delta_row[j] > best {
                best = delta_row[j];
                column = Some(j);
            }
        }
        column
    }

    fn most_negative(
        &self,
        delta_row: &RowDVector<f64>,
        allowed: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let mut best = -EPS;
        let mut column = None;
        for j in 1..delta_row.len() {
            if allowed(j - 1) && delta_row[j] < best {
                best = delta_row[j];
                column = Some(j);
            }
        }
        column
    }

    /// Minimum-ratio test over the entering column. Ties go to the topmost
    /// row. A failing test while the penalty is still in play means the
    /// artificial variables cannot be driven out, i.e. the feasible region is
    /// empty; otherwise the objective is unbounded.
    pub(crate) fn leaving_row(&self, entering: usize) -> Result<usize, SolveError> {
        let mut min_ratio = f64::INFINITY;
        let mut row = None;
        for i in 0..self.tableau.nrows() {
            let coefficient = self.tableau[(i, entering)];
            if coefficient > EPS {
                let ratio = self.tableau[(i, 0)] / coefficient;
                if ratio >= 0. && ratio < min_ratio {
                    min_ratio = ratio;
                    row = Some(i);
                }
            }
        }
        row.ok_or_else(|| {
            if self.is_artificial(entering - 1) || self.phase_one() {
                SolveError::Infeasible
            } else {
                SolveError::Unbounded {
                    minimization: self.minimization,
                }
            }
        })
    }

    /// Gauss-Jordan elimination around the pivot element.
    pub(crate) fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let pivot_el = self.tableau[(pivot_row, pivot_col)];
        log::debug!("pivot element: {pivot_el}");

        // divide all elements in the pivot row by the pivot element
        self.tableau.row_mut(pivot_row).apply(|el| *el /= pivot_el);

        // subtract the pivot row from other rows till all of the elements in
        // the pivot column except the pivot element are zero
        let pivot_row_els = self.tableau.row(pivot_row).into_owned();
        for i in (0..self.tableau.nrows()).filter(|i| i != &pivot_row) {
            let multiplier = self.tableau[(i, pivot_col)];
            self.tableau
                .row_mut(i)
                .zip_apply(&pivot_row_els, |el, pivot_row_el| {
                    *el -= pivot_row_el * multiplier
                });
        }

        self.basis[pivot_row] = pivot_col - 1;
        // The cost row already carries the signed penalty, so an artificial
        // entering variable lands here with its penalty cost intact.
        self.cost_basis[pivot_row] = self.cost_row[pivot_col];
    }

    /// Reads off the structural variable values and the objective value,
    /// rejecting tableaus where an artificial variable kept a nonzero value.
    pub(crate) fn extract_solution(
        &self,
        delta_row: &RowDVector<f64>,
    ) -> Result<Solution, SolveError> {
        for (i, var) in self.basis.iter().enumerate() {
            if self.is_artificial(*var) && self.tableau[(i, 0)] > FEASIBILITY_EPS {
                log::info!(
                    "artificial variable x{} kept value {}",
                    var + 1,
                    self.tableau[(i, 0)]
                );
                return Err(SolveError::Infeasible);
            }
        }

        let vars: DVector<f64> = (0..self.n_structural)
            .into_par_iter()
            .map(|var| {
                self.basis
                    .iter()
                    .enumerate()
                    .find_map(|(k, basic)| (basic == &var).then_some(k))
                    .map_or(Zero::zero(), |k| self.tableau[(k, 0)])
            })
            .collect::<Vec<_>>()
            .into();

        Ok(Solution {
            vars,
            fn_val: delta_row[0],
        })
    }
}
