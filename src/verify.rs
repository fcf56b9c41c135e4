use ndarray::{ArrayView2, Zip};

/// Largest absolute element-wise difference between two result matrices.
///
/// This is a signal for the report, not a pass/fail check: no tolerance is
/// applied here. A NaN difference wins over any finite one so a broken
/// result can never look like agreement.
///
/// # Panics
///
/// Panics if the shapes differ.
pub fn max_abs_diff(seq: ArrayView2<f64>, par: ArrayView2<f64>) -> f64 {
    assert_eq!(
        seq.dim(),
        par.dim(),
        "result shapes differ: {:?} vs {:?}",
        seq.dim(),
        par.dim()
    );

    Zip::from(&seq).and(&par).fold(0.0, |worst: f64, &s, &p| {
        let diff = (s - p).abs();
        if diff.is_nan() || worst.is_nan() {
            f64::NAN
        } else {
            worst.max(diff)
        }
    })
}
