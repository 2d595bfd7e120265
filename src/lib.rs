//! A Big-M simplex-tableau solver for linear programs.
//!
//! Given an objective function and a set of linear constraints, the solver
//! produces the full sequence of simplex tableaux leading to an optimal basic
//! feasible solution, or reports why none exists. Every tableau is captured as
//! an independent snapshot so a rendering layer can display the whole
//! computation step by step.

mod helpers;
pub mod simplex;

pub use simplex::{
    Constraint, NormalizationNote, NumberFormatter, ObjectiveFunction, Pivot, Problem,
    SetupReport, Sign, SimplexSolver, Snapshot, Solution, SolveError, SolveReport,
    StandardFormNote,
};
