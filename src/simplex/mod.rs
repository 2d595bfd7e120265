mod format;
mod problem;
mod report;
mod solution;
mod standard_form;
mod table;


pub use format::NumberFormatter;
pub use problem::{Constraint, ObjectiveFunction, Problem, Sign};
pub use report::{
    NormalizationNote, Pivot, SetupReport, Snapshot, SolveReport, StandardFormNote,
};
pub use solution::{Solution, SolveError};

/// Optimality/pivot tolerance for reduced costs and ratio-test denominators.
pub(crate) const EPS: f64 = 1e-4;
/// An artificial variable basic above this value means an empty feasible
/// region.
pub(crate) const FEASIBILITY_EPS: f64 = 1e-3;

/// Default Big-M penalty. It has to dominate every product of a coefficient
/// with a feasible variable value; raise it through
/// [`SimplexSolver::with_penalty`] for problems with larger magnitudes.
pub const DEFAULT_PENALTY: f64 = 1e6;
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Big-M simplex solver.
///
/// Entering columns are chosen by the largest reduced-cost improvement,
/// ties broken left to right; leaving rows by the minimum-ratio rule, ties
/// broken top to bottom. Identical input therefore always produces the
/// identical iteration sequence. No anti-cycling rule is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexSolver {
    penalty: f64,
    max_iterations: usize,
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self {
            penalty: DEFAULT_PENALTY,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SimplexSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// A formatter matching this solver's penalty constant.
    pub const fn formatter(&self) -> NumberFormatter {
        NumberFormatter::new(self.penalty)
    }

    /// Runs the solve to termination: normalization, standard-form and
    /// penalty augmentation, then pivoting until the optimality test passes.
    ///
    /// Returns the setup notes, one snapshot per tableau (the initial build
    /// is iteration 0) and the extracted solution, or the error that aborted
    /// the solve.
    pub fn solve(&self, problem: &Problem) -> Result<SolveReport, SolveError> {
        log::info!("solving: {}", problem.objective_function);

        let (constraints, normalizations) = problem.normalized();
        let (mut table, standard_forms, augmented_objective) =
            standard_form::build(&problem.objective_function, &constraints, self.penalty);

        let mut delta_row = table.delta_row();
        let mut snapshots = vec![Snapshot::record(0, &table, &delta_row, None)];

        let mut iteration = 0;
        while let Some(entering) = table.entering_column(&delta_row) {
            if iteration == self.max_iterations {
                return Err(SolveError::NonConvergence {
                    iterations: self.max_iterations,
                });
            }
            iteration += 1;

            let leaving = table.leaving_row(entering)?;
            log::info!("iteration {iteration}: pivot at row {leaving}, column {entering}");
            table.pivot(leaving, entering);

            delta_row = table.delta_row();
            snapshots.push(Snapshot::record(
                iteration,
                &table,
                &delta_row,
                Some(Pivot {
                    row: leaving,
                    column: entering,
                }),
            ));
        }
        log::info!("optimal after {iteration} iterations");

        let solution = table.extract_solution(&delta_row)?;
        Ok(SolveReport {
            setup: SetupReport {
                normalizations,
                standard_forms,
                augmented_objective,
            },
            cost_row: table.cost_row.clone(),
            n_structural: table.n_structural,
            snapshots,
            solution,
        })
    }
}
