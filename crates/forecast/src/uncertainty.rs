/// Symmetric uncertainty band around a prediction, clamped below at zero.
///
/// Width is one historical mean error on each side; demand cannot be
/// negative, so the lower bound clamps while the upper bound does not.
#[must_use]
pub fn uncertainty_band(predicted_demand: f64, mean_error: f64) -> (f64, f64) {
    let lower = (predicted_demand - mean_error).max(0.0);
    let upper = predicted_demand + mean_error;
    (lower, upper)
}
