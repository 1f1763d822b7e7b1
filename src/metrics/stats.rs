//! Percentile and mean over sample lists.

/// A numeric sample that statistics can be computed over
pub trait Sample: Copy + Ord {
    fn to_f64(self) -> f64;
}

impl Sample for i64 {
    #[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for u64 {
    #[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Nearest-rank percentile.
///
/// The samples are sorted ascending and the value at `ceil(len * rank / 100) - 1` is returned,
/// so the result is always one of the samples. Returns `None` for an empty list.
#[must_use]
pub fn percentile<T: Sample>(samples: &[T], rank: f64) -> Option<T> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    #[expect(clippy::cast_possible_truncation, reason = "index calculation")]
    #[expect(clippy::cast_sign_loss, reason = "value is clamped to non-negative range")]
    #[expect(clippy::cast_precision_loss, reason = "index fits in usize")]
    let idx = (rank / 100.0 * sorted.len() as f64).ceil().clamp(1.0, sorted.len() as f64) as usize - 1;

    sorted.get(idx).copied()
}

/// Arithmetic mean. Returns `None` for an empty list.
#[must_use]
pub fn mean<T: Sample>(samples: &[T]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    #[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
    let len = samples.len() as f64;

    Some(samples.iter().map(|s| s.to_f64()).sum::<f64>() / len)
}
