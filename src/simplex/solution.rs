use derive_more::{Display, Error, IsVariant};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Values of the structural variables and the objective value they yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub vars: DVector<f64>,
    pub fn_val: f64,
}

/// Why a solve produced no solution. Any of these aborts the solve; no
/// partial report is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, IsVariant)]
pub enum SolveError {
    #[display(fmt = "the problem has no feasible solution (the feasible region is empty)")]
    Infeasible,
    #[display(
        fmt = "the objective function is unbounded: it can {} indefinitely over the feasible region",
        r#"if *minimization { "decrease towards -inf" } else { "grow towards +inf" }"#
    )]
    Unbounded { minimization: bool },
    #[display(fmt = "optimality was not reached within {} iterations", iterations)]
    NonConvergence { iterations: usize },
}
