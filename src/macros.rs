#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {
        assert!(
            ($l - $r).abs() < f64::EPSILON,
            "assertion failed: {} !~ {}",
            $l,
            $r
        )
    };
    ($l:expr, $r:expr, $msg:expr) => {
        assert!(
            ($l - $r).abs() < f64::EPSILON,
            "assertion failed: {} !~ {}: {}",
            $l,
            $r,
            $msg
        )
    };
}

/// Compare two f64 slices element-wise with [assert_f64_approx]
#[macro_export]
macro_rules! assert_weights_approx {
    ($l:expr, $r:expr) => {{
        let l: &[f64] = &$l;
        let r: &[f64] = &$r;
        assert_eq!(l.len(), r.len(), "weight vectors differ in length");
        for (i, (a, b)) in l.iter().zip(r.iter()).enumerate() {
            $crate::assert_f64_approx!(a, b, format!("at index {i}"));
        }
    }};
}
