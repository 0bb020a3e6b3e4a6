//! The one division policy used by every metric formula.

/// `numerator / denominator`, or exactly `0.0` when the denominator is zero.
///
/// Integer inputs keep differences such as `count_a - count_b` exact until the
/// final division.
pub fn safe_ratio<N, D>(numerator: N, denominator: D) -> f64
where
    N: Into<i128>,
    D: Into<i128>,
{
    let numerator: i128 = numerator.into();
    let denominator: i128 = denominator.into();
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
