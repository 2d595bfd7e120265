use std::{
    fmt,
    ops::{Mul, MulAssign},
};

use derive_more::{Display, IsVariant};
use derive_new::new;
use nalgebra::RowDVector;
use serde::{Deserialize, Serialize};

use super::NormalizationNote;

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    IsVariant,
    Display,
    Serialize,
    Deserialize,
)]
pub enum Sign {
    #[display(fmt = "<=")]
    Less = -1,
    #[display(fmt = "=")]
    Equals = 0,
    #[display(fmt = ">=")]
    Greater = 1,
}

#[derive(Debug, Clone, PartialEq, new, Serialize, Deserialize)]
pub struct Constraint {
    pub(crate) coefficients: RowDVector<f64>,
    pub(crate) sign: Sign,
    pub(crate) rhs: f64,
}

impl Constraint {
    pub fn coefficients(&self) -> &RowDVector<f64> {
        &self.coefficients
    }

    pub const fn sign(&self) -> Sign {
        self.sign
    }

    pub const fn rhs(&self) -> f64 {
        self.rhs
    }
}

#[derive(Debug, Clone, PartialEq, new, Serialize, Deserialize)]
pub struct ObjectiveFunction {
    pub(crate) coefficients: RowDVector<f64>,
    pub(crate) minimization: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub(crate) objective_function: ObjectiveFunction,
    pub(crate) constraints: Vec<Constraint>,
}

impl Problem {
    /// Builds a problem from an objective function and its constraints.
    ///
    /// Coefficient rows shorter than the longest one (objective function
    /// included) are padded with zeros, so every row ends up with one entry
    /// per structural variable.
    pub fn new(mut objective_function: ObjectiveFunction, mut constraints: Vec<Constraint>) -> Self {
        let max_coefficients_count = constraints
            .iter()
            .map(|constraint| constraint.coefficients.len())
            .chain([objective_function.coefficients.len()])
            .max()
            .unwrap();

        assert_ne!(max_coefficients_count, 0);

        constraints
            .iter_mut()
            .map(|constraint| &mut constraint.coefficients)
            .chain([&mut objective_function.coefficients])
            .for_each(|coefficients| {
                if coefficients.len() < max_coefficients_count {
                    *coefficients = coefficients
                        .clone()
                        .resize_horizontally(max_coefficients_count, 0.);
                }
            });

        Self {
            objective_function,
            constraints,
        }
    }

    /// Number of structural (decision) variables.
    pub fn n_structural(&self) -> usize {
        self.objective_function.coefficients.len()
    }

    /// Rewrites constraints with a negative right-hand side into the
    /// equivalent constraint with a non-negative one, recording what changed.
    pub(crate) fn normalized(&self) -> (Vec<Constraint>, Vec<NormalizationNote>) {
        let mut notes = Vec::new();
        let constraints = self
            .constraints
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, mut constraint)| {
                if constraint.rhs < 0. {
                    let original = constraint.to_string();
                    constraint *= -1.;
                    notes.push(NormalizationNote {
                        index: i + 1,
                        original,
                        transformed: constraint.to_string(),
                        reason: "multiplied by -1 to make the right-hand side non-negative"
                            .to_owned(),
                    });
                }
                constraint
            })
            .collect();
        (constraints, notes)
    }
}

pub(crate) fn terms(coefficients: &RowDVector<f64>) -> String {
    let mut out = String::new();
    for (j, coefficient) in coefficients.iter().enumerate() {
        if j > 0 && *coefficient >= 0. {
            out.push('+');
        }
        out.push_str(&format!("{}x{}", coefficient, j + 1));
    }
    out
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", terms(&self.coefficients), self.sign, self.rhs)
    }
}

impl fmt::Display for ObjectiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F = {} -> {}",
            terms(&self.coefficients),
            if self.minimization { "min" } else { "max" }
        )
    }
}

impl Mul<f64> for Sign {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        if rhs >= 0. {
            return self;
        }
        match self {
            Sign::Less => Sign::Greater,
            Sign::Equals => self,
            Sign::Greater => Sign::Less,
        }
    }
}

impl MulAssign<f64> for Sign {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Mul<f64> for Constraint {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            coefficients: self.coefficients * rhs,
            rhs: self.rhs * rhs,
            sign: self.sign * rhs,
        }
    }
}

impl MulAssign<f64> for Constraint {
    fn mul_assign(&mut self, rhs: f64) {
        self.coefficients *= rhs;
        self.rhs *= rhs;
        self.sign *= rhs;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sign_flips_when_multiplied_by_negative() {
        assert_eq!(Sign::Less * -1., Sign::Greater);
        assert_eq!(Sign::Greater * -1., Sign::Less);
        assert_eq!(Sign::Equals * -1., Sign::Equals);
        assert_eq!(Sign::Less * 2., Sign::Less);
    }

    #[test]
    fn negative_rhs_constraint_is_normalized() {
        let problem = Problem::new(
            ObjectiveFunction::new(RowDVector::from_row_slice(&[1., 1.]), false),
            vec![Constraint::new(
                RowDVector::from_row_slice(&[-1., -1.]),
                Sign::Less,
                -4.,
            )],
        );

        let (constraints, notes) = problem.normalized();

        assert_eq!(
            constraints,
            vec![Constraint::new(
                RowDVector::from_row_slice(&[1., 1.]),
                Sign::Greater,
                4.,
            )]
        );
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].index, 1);
        assert_eq!(notes[0].original, "-1x1-1x2 <= -4");
        assert_eq!(notes[0].transformed, "1x1+1x2 >= 4");
    }

    #[test]
    fn non_negative_rhs_passes_through_unchanged() {
        let problem = Problem::new(
            ObjectiveFunction::new(RowDVector::from_row_slice(&[3., 2.]), false),
            vec![Constraint::new(
                RowDVector::from_row_slice(&[2., 1.]),
                Sign::Less,
                18.,
            )],
        );

        let (constraints, notes) = problem.normalized();

        assert_eq!(constraints, problem.constraints);
        assert!(notes.is_empty());
    }

    #[test]
    fn short_coefficient_rows_are_padded() {
        let problem = Problem::new(
            ObjectiveFunction::new(RowDVector::from_row_slice(&[1.]), true),
            vec![Constraint::new(
                RowDVector::from_row_slice(&[2., 3., 4.]),
                Sign::Less,
                5.,
            )],
        );

        assert_eq!(problem.n_structural(), 3);
        assert_eq!(
            problem.objective_function.coefficients,
            RowDVector::from_row_slice(&[1., 0., 0.])
        );
    }

    #[test]
    fn constraint_renders_with_explicit_signs() {
        let constraint = Constraint::new(RowDVector::from_row_slice(&[2., -1., 0.]), Sign::Less, 18.);
        assert_eq!(constraint.to_string(), "2x1-1x2+0x3 <= 18");
    }
}
