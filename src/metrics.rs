use crate::error::{LearnError, Result};
use std::collections::BTreeMap;

/// Per-label counters gathered by [`evaluate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelMetrics {
    pub correct: usize,
    pub predicted: usize,
    pub true_count: usize,
}

impl LabelMetrics {
    pub fn new(correct: usize, predicted: usize, true_count: usize) -> Self {
        Self { correct, predicted, true_count }
    }

    /// `correct / predicted`, or `None` if the label was never predicted.
    pub fn precision(&self) -> Option<f64> {
        ratio(self.correct, self.predicted)
    }

    /// `correct / true_count`, or `None` if the label never occurred.
    pub fn recall(&self) -> Option<f64> {
        ratio(self.correct, self.true_count)
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

/// Counts, per label, the correct predictions, how often it was predicted,
/// and how often it truly occurred.
///
/// `correct` and `true_count` go to the actual label's bucket and `predicted`
/// goes to the predicted label's bucket, so one position may touch two labels.
pub fn evaluate<A, P>(actual: &[A], predicted: &[P]) -> Result<BTreeMap<String, LabelMetrics>>
where
    A: AsRef<str>,
    P: AsRef<str>,
{
    if actual.len() != predicted.len() {
        return Err(LearnError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }

    let mut metrics: BTreeMap<String, LabelMetrics> = BTreeMap::new();

    for (actual, predicted) in actual.iter().zip(predicted) {
        let actual: &str = actual.as_ref();
        let predicted: &str = predicted.as_ref();

        let entry = metrics.entry(actual.to_string()).or_default();
        entry.true_count += 1;
        if actual == predicted {
            entry.correct += 1;
        }

        metrics.entry(predicted.to_string()).or_default().predicted += 1;
    }

    Ok(metrics)
}

/// Fraction of positions where the prediction equals the actual label.
pub fn accuracy<A, P>(actual: &[A], predicted: &[P]) -> Result<f64>
where
    A: AsRef<str>,
    P: AsRef<str>,
{
    if actual.len() != predicted.len() {
        return Err(LearnError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(LearnError::EmptyInput("accuracy of zero predictions".to_string()));
    }

    let correct = actual.iter()
        .zip(predicted)
        .filter(|&(a, p)| {
            let (a, p): (&str, &str) = (a.as_ref(), p.as_ref());
            a == p
        })
        .count();
    Ok(correct as f64 / actual.len() as f64)
}
