use crate::{Error, Result};

/// What to do with a desired value of zero, where relative accuracy is undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroTargetPolicy {
    /// Fail with `Error::DegenerateAccuracyInput`
    #[default]
    Reject,
    /// Leave the pair out of the average
    Skip,
    /// Count the pair as 0% accurate
    CountAsMiss,
    /// Count the pair as 100% accurate
    CountAsHit,
}

/// Average relative accuracy of `output` against `desired`, in percent.
/// Each pair contributes `max(0, 1 - |o - d| / d)`.
/// Sequences of different length score 0.
/// A zero in `desired` is rejected, see `average_accuracy_with` for other policies.
pub fn average_accuracy(output: &[f64], desired: &[f64]) -> Result<f64> {
    average_accuracy_with(output, desired, ZeroTargetPolicy::Reject)
}

/// Like `average_accuracy` but with an explicit policy for zero desired values
pub fn average_accuracy_with(
    output: &[f64],
    desired: &[f64],
    policy: ZeroTargetPolicy,
) -> Result<f64> {
    if output.len() != desired.len() {
        debug!(
            "accuracy of sequences with different lengths ({} vs {})",
            output.len(),
            desired.len()
        );
        return Ok(0.0);
    }

    let mut total = 0.0;
    let mut counted: usize = 0;
    for (i, (o, d)) in output.iter().zip(desired).enumerate() {
        if *d == 0.0 {
            match policy {
                ZeroTargetPolicy::Reject => return Err(Error::DegenerateAccuracyInput { index: i }),
                ZeroTargetPolicy::Skip => continue,
                ZeroTargetPolicy::CountAsMiss => {}
                ZeroTargetPolicy::CountAsHit => total += 1.0,
            }
            counted += 1;
            continue;
        }

        let accuracy = 1.0 - (o - d).abs() / d;
        total += accuracy.max(0.0);
        counted += 1;
    }
    if counted == 0 {
        return Ok(0.0);
    }

    Ok(total / counted as f64 * 100.0)
}
