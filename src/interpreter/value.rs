/// The single scalar type used for every literal, variable binding and
/// intermediate result.
///
/// Literals are parsed straight into this type; no integer representation is
/// kept after lexing.
pub type Value = f64;

/// Compares two values with a tolerance that is absolute near zero and
/// relative for large magnitudes.
///
/// Two infinities of the same sign compare equal; `NaN` never does.
///
/// # Example
/// ```
/// use newton::interpreter::value::approx_eq;
///
/// assert!(approx_eq(0.1 + 0.2, 0.3, 1e-12));
/// assert!(approx_eq(f64::INFINITY, f64::INFINITY, 1e-12));
/// assert!(!approx_eq(1.0, 1.1, 1e-6));
/// ```
#[must_use]
pub fn approx_eq(left: Value, right: Value, tolerance: Value) -> bool {
    if left == right {
        return true;
    }
    if !left.is_finite() || !right.is_finite() {
        return false;
    }
    (left - right).abs() <= tolerance * left.abs().max(right.abs()).max(1.0)
}
