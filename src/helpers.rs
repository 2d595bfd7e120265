#[macro_export]
macro_rules! dbg_display {
    ($e: expr) => {{
        let val = $e;
        log::debug!(
            "[{}/{}:{}] {} = {}",
            file!(),
            line!(),
            column!(),
            stringify!($e),
            val
        );
        val
    }};
}

pub fn f64_rounded_string(val: &f64, precision: usize) -> String {
    format!("{val:.precision$}")
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_str_eq;

    use super::*;

    #[test]
    fn rounded_string_trims_trailing_zeros() {
        assert_str_eq!(f64_rounded_string(&5., 3), "5");
        assert_str_eq!(f64_rounded_string(&0.12, 3), "0.12");
        assert_str_eq!(f64_rounded_string(&29.333333333333332, 3), "29.333");
        assert_str_eq!(f64_rounded_string(&-2.5, 3), "-2.5");
    }
}
