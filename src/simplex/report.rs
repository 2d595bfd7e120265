use nalgebra::{DMatrix, DVector, RowDVector};
use serde::{Deserialize, Serialize};

use super::table::SimplexTable;
use super::Solution;

/// Position of the pivot element a snapshot was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

/// An independent copy of the solver state after one iteration; the initial
/// table is iteration 0 and carries no pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub iteration: usize,
    /// Right-hand side in column 0, variable `v` in column `v + 1`.
    pub tableau: DMatrix<f64>,
    pub basis: DVector<usize>,
    pub cost_basis: DVector<f64>,
    /// Entry 0 is the augmented objective value, entry j is z_j - c_j.
    pub delta_row: RowDVector<f64>,
    pub pivot: Option<Pivot>,
}

impl Snapshot {
    pub(crate) fn record(
        iteration: usize,
        table: &SimplexTable,
        delta_row: &RowDVector<f64>,
        pivot: Option<Pivot>,
    ) -> Self {
        Self {
            iteration,
            tableau: table.tableau.clone(),
            basis: table.basis.clone(),
            cost_basis: table.cost_basis.clone(),
            delta_row: delta_row.clone(),
            pivot,
        }
    }
}

/// How one constraint was rewritten to get a non-negative right-hand side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationNote {
    /// 1-based constraint number, as shown to the user.
    pub index: usize,
    pub original: String,
    pub transformed: String,
    pub reason: String,
}

/// How one constraint was turned into an equality, and which auxiliary
/// variables were introduced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardFormNote {
    /// 1-based constraint number, as shown to the user.
    pub index: usize,
    pub original: String,
    pub standard_form: String,
    pub variables: Vec<String>,
}

/// The pre-iteration explanation block: everything the renderer shows before
/// the first tableau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupReport {
    pub normalizations: Vec<NormalizationNote>,
    pub standard_forms: Vec<StandardFormNote>,
    /// Penalty-augmented objective text, present when artificial variables
    /// were introduced.
    pub augmented_objective: Option<String>,
}

/// Everything a successful solve hands to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub setup: SetupReport,
    /// Augmented cost row, for the table header.
    pub cost_row: RowDVector<f64>,
    pub n_structural: usize,
    pub snapshots: Vec<Snapshot>,
    pub solution: Solution,
}
