use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::helpers::f64_rounded_string;

use super::{DEFAULT_PENALTY, EPS};

/// Denominators tried when matching penalty expressions like `(16M-12)/5`.
const PENALTY_DENOMINATORS: [i64; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 15, 20];

/// Renders raw tableau values the way a textbook writes them: penalty-scaled
/// values symbolically (`M`, `-3M`, `(16M-12)/5`), exact rationals as
/// fractions (`20/3`), everything else as a trimmed decimal.
///
/// This is a best-effort pretty-printer; a value no rule recognizes falls
/// back to its decimal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberFormatter {
    penalty: f64,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PENALTY)
    }
}

impl NumberFormatter {
    pub const fn new(penalty: f64) -> Self {
        Self { penalty }
    }

    pub fn format(&self, num: f64) -> String {
        if num.abs() < EPS {
            return "0".to_owned();
        }

        let penalty = self.penalty;
        if num.abs() == penalty {
            return if num > 0. { "M" } else { "-M" }.to_owned();
        }

        if num.abs() > penalty / 10. {
            if let Some(rendered) = self.penalty_expression(num) {
                return rendered;
            }
        }

        if num.fract() == 0. {
            return format!("{}", num as i64);
        }

        for denominator in 1..=20i64 {
            let numerator = (num * denominator as f64).round();
            if (num - numerator / denominator as f64).abs() < EPS {
                if denominator == 1 {
                    return format!("{}", numerator as i64);
                }
                return Ratio::new(numerator as i64, denominator).to_string();
            }
        }

        let rounded = (num * 1000.).round() / 1000.;
        if rounded == 0. {
            return "0".to_owned();
        }
        f64_rounded_string(&rounded, 3)
    }

    /// Tries to express `num` as `(kM + r)/d` with a small integer remainder,
    /// falling back to a coarse multiple-of-M rendering. `None` means the
    /// value does not decompose and the plain numeric rules apply instead.
    fn penalty_expression(&self, num: f64) -> Option<String> {
        let penalty = self.penalty;

        for denominator in PENALTY_DENOMINATORS {
            let numerator = num * denominator as f64;
            let m_coefficient = (numerator / penalty).round();
            let remainder = numerator - m_coefficient * penalty;

            if m_coefficient != 0. && remainder.abs() < 50. {
                let m_coefficient = m_coefficient as i64;
                let remainder = remainder.round() as i64;

                if remainder == 0 {
                    if denominator == 1 {
                        return Some(penalty_term(m_coefficient));
                    }
                    let coefficient = match m_coefficient {
                        1 => String::new(),
                        -1 => "-".to_owned(),
                        k => k.to_string(),
                    };
                    return Some(format!("{coefficient}M/{denominator}"));
                }

                let m_part = penalty_term(m_coefficient);
                let sign = if remainder >= 0 { "+" } else { "" };
                if denominator == 1 {
                    return Some(format!("{m_part}{sign}{remainder}"));
                }
                return Some(format!("({m_part}{sign}{remainder})/{denominator}"));
            }
        }

        let coefficient = (num / penalty).round();
        let remainder = num - coefficient * penalty;

        if remainder.abs() < 0.001 {
            return Some(penalty_term(coefficient as i64));
        }
        if remainder.abs() < 1000. {
            let sign = if remainder >= 0. { "+" } else { "" };
            return Some(format!(
                "{}{sign}{}",
                penalty_term(coefficient as i64),
                remainder.round() as i64
            ));
        }

        None
    }
}

fn penalty_term(m_coefficient: i64) -> String {
    match m_coefficient {
        1 => "M".to_owned(),
        -1 => "-M".to_owned(),
        k => format!("{k}M"),
    }
}
