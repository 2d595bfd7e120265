use nalgebra::{DMatrix, DVector, RowDVector};
use num_traits::Zero;

use super::problem::{terms, Constraint, ObjectiveFunction, Sign};
use super::table::SimplexTable;
use super::StandardFormNote;

/// Builds the initial simplex table from normalized constraints: one
/// slack/surplus/artificial column block per constraint, the starting basis
/// with its costs, and the penalty-augmented cost row.
///
/// Returns the table together with the standard-form explanation per
/// constraint and, when artificial variables were introduced, the augmented
/// objective function text for the renderer.
pub(crate) fn build(
    objective: &ObjectiveFunction,
    constraints: &[Constraint],
    penalty: f64,
) -> (SimplexTable, Vec<StandardFormNote>, Option<String>) {
    let n_structural = objective.coefficients.len();
    let n_auxiliary: usize = constraints
        .iter()
        .map(|constraint| match constraint.sign {
            Sign::Less | Sign::Equals => 1,
            Sign::Greater => 2,
        })
        .sum();
    let n_total = n_structural + n_auxiliary;

    let artificial_cost = if objective.minimization {
        penalty
    } else {
        -penalty
    };

    let mut tableau = DMatrix::zeros(constraints.len(), n_total + 1);
    let mut basis = Vec::with_capacity(constraints.len());
    let mut cost_basis = Vec::with_capacity(constraints.len());
    let mut artificial = Vec::new();
    let mut notes = Vec::with_capacity(constraints.len());

    let mut next_var = n_structural;
    for (i, constraint) in constraints.iter().enumerate() {
        tableau[(i, 0)] = constraint.rhs;
        for (j, coefficient) in constraint.coefficients.iter().enumerate() {
            tableau[(i, j + 1)] = *coefficient;
        }

        let lhs = terms(&constraint.coefficients);
        let mut variables = Vec::new();
        let standard_form = match constraint.sign {
            Sign::Less => {
                tableau[(i, next_var + 1)] = 1.;
                basis.push(next_var);
                cost_basis.push(0.);
                variables.push(format!("x{} - slack variable (>= 0)", next_var + 1));
                let text = format!("{lhs} + x{} = {}", next_var + 1, constraint.rhs);
                next_var += 1;
                text
            }
            Sign::Greater => {
                tableau[(i, next_var + 1)] = -1.;
                tableau[(i, next_var + 2)] = 1.;
                basis.push(next_var + 1);
                cost_basis.push(artificial_cost);
                artificial.push(next_var + 1);
                variables.push(format!("x{} - surplus variable (>= 0)", next_var + 1));
                variables.push(format!("x{} - artificial variable (>= 0)", next_var + 2));
                let text = format!(
                    "{lhs} - x{} + x{} = {}",
                    next_var + 1,
                    next_var + 2,
                    constraint.rhs
                );
                next_var += 2;
                text
            }
            Sign::Equals => {
                tableau[(i, next_var + 1)] = 1.;
                basis.push(next_var);
                cost_basis.push(artificial_cost);
                artificial.push(next_var);
                variables.push(format!("x{} - artificial variable (>= 0)", next_var + 1));
                let text = format!("{lhs} + x{} = {}", next_var + 1, constraint.rhs);
                next_var += 1;
                text
            }
        };
        notes.push(StandardFormNote {
            index: i + 1,
            original: constraint.to_string(),
            standard_form,
            variables,
        });
    }

    let mut cost_row = RowDVector::zeros(n_total + 1);
    for (j, coefficient) in objective.coefficients.iter().enumerate() {
        cost_row[j + 1] = *coefficient;
    }
    for var in &artificial {
        cost_row[var + 1] = artificial_cost;
    }

    let augmented_objective = (!artificial.is_empty()).then(|| {
        let function = objective_terms(&objective.coefficients);
        let penalty_part = artificial
            .iter()
            .map(|var| format!("x{}", var + 1))
            .collect::<Vec<_>>()
            .join(" + ");
        if objective.minimization {
            format!("F' = {function} + M({penalty_part}) -> min")
        } else {
            format!("F' = {function} - M({penalty_part}) -> max")
        }
    });

    let table = SimplexTable {
        n_structural,
        basis: DVector::from_vec(basis),
        tableau,
        cost_basis: DVector::from_vec(cost_basis),
        cost_row,
        artificial,
        minimization: objective.minimization,
        penalty,
    };
    (table, notes, augmented_objective)
}

/// Objective function text with zero terms elided, for the augmented
/// objective note.
fn objective_terms(coefficients: &RowDVector<f64>) -> String {
    let mut out = String::new();
    for (i, coefficient) in coefficients.iter().enumerate() {
        if coefficient.is_zero() {
            continue;
        }
        if out.is_empty() {
            out.push_str(&format!("{}x{}", coefficient, i + 1));
        } else if *coefficient > 0. {
            out.push_str(&format!(" + {}x{}", coefficient, i + 1));
        } else {
            out.push_str(&format!(" - {}x{}", coefficient.abs(), i + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::{assert_eq, assert_str_eq};

    use super::*;

    const PENALTY: f64 = 1e6;

    #[test]
    fn less_equal_constraints_get_slack_columns() {
        let (table, notes, augmented) = build(
            &ObjectiveFunction::new(RowDVector::from_row_slice(&[3., 2.]), false),
            &[
                Constraint::new(RowDVector::from_row_slice(&[2., 1.]), Sign::Less, 18.),
                Constraint::new(RowDVector::from_row_slice(&[1., 2.]), Sign::Less, 16.),
            ],
            PENALTY,
        );

        assert_str_eq!(
            table.tableau.to_string(),
            DMatrix::from_row_slice(
                2,
                5,
                &[
                    18., 2., 1., 1., 0., //
                    16., 1., 2., 0., 1., //
                ]
            )
            .to_string()
        );
        assert_eq!(table.basis, DVector::from_vec(vec![2, 3]));
        assert_eq!(table.cost_basis, DVector::from_vec(vec![0., 0.]));
        assert_eq!(
            table.cost_row,
            RowDVector::from_row_slice(&[0., 3., 2., 0., 0.])
        );
        assert!(table.artificial.is_empty());
        assert_eq!(augmented, None);
        assert_eq!(notes[0].standard_form, "2x1+1x2 + x3 = 18");
        assert_eq!(notes[0].variables, vec!["x3 - slack variable (>= 0)"]);
    }

    #[test]
    fn mixed_constraints_get_penalized_artificial_columns() {
        // minimization: artificial columns cost +M
        let (table, notes, augmented) = build(
            &ObjectiveFunction::new(RowDVector::from_row_slice(&[4., 1.]), true),
            &[
                Constraint::new(RowDVector::from_row_slice(&[3., 1.]), Sign::Equals, 3.),
                Constraint::new(RowDVector::from_row_slice(&[4., 3.]), Sign::Greater, 6.),
                Constraint::new(RowDVector::from_row_slice(&[1., 2.]), Sign::Less, 4.),
            ],
            PENALTY,
        );

        assert_str_eq!(
            table.tableau.to_string(),
            DMatrix::from_row_slice(
                3,
                7,
                &[
                    3., 3., 1., 1., 0., 0., 0., //
                    6., 4., 3., 0., -1., 1., 0., //
                    4., 1., 2., 0., 0., 0., 1., //
                ]
            )
            .to_string()
        );
        assert_eq!(table.basis, DVector::from_vec(vec![2, 4, 5]));
        assert_eq!(
            table.cost_basis,
            DVector::from_vec(vec![PENALTY, PENALTY, 0.])
        );
        assert_eq!(
            table.cost_row,
            RowDVector::from_row_slice(&[0., 4., 1., PENALTY, 0., PENALTY, 0.])
        );
        assert_eq!(table.artificial, vec![2, 4]);
        assert_eq!(
            augmented.as_deref(),
            Some("F' = 4x1 + 1x2 + M(x3 + x5) -> min")
        );
        assert_eq!(notes[1].standard_form, "4x1+3x2 - x4 + x5 = 6");
        assert_eq!(
            notes[1].variables,
            vec![
                "x4 - surplus variable (>= 0)",
                "x5 - artificial variable (>= 0)",
            ]
        );
    }

    #[test]
    fn maximization_penalizes_artificials_negatively() {
        let (table, _, augmented) = build(
            &ObjectiveFunction::new(RowDVector::from_row_slice(&[1., 1.]), false),
            &[
                Constraint::new(RowDVector::from_row_slice(&[1., 1.]), Sign::Less, 2.),
                Constraint::new(RowDVector::from_row_slice(&[1., 1.]), Sign::Greater, 5.),
            ],
            PENALTY,
        );

        assert_eq!(table.cost_basis, DVector::from_vec(vec![0., -PENALTY]));
        assert_eq!(
            table.cost_row,
            RowDVector::from_row_slice(&[0., 1., 1., 0., 0., -PENALTY])
        );
        assert_eq!(
            augmented.as_deref(),
            Some("F' = 1x1 + 1x2 - M(x5) -> max")
        );
    }
}
