use crate::error::LearnError;
use crate::neighbors::squared_euclidean;
use crate::ArrayView1;
use std::fmt;
use std::str::FromStr;

/// Distance functions available to k-means, selected by their short names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distance {
    /// `manh`: sum of absolute index-aligned differences.
    Manhattan,
    /// `e2`: sum of squared index-aligned differences.
    SquaredEuclidean,
}

impl Distance {
    pub fn compute(&self, a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
        match self {
            Distance::Manhattan => manhattan(a, b),
            Distance::SquaredEuclidean => squared_euclidean(a, b),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Distance::Manhattan => "manh",
            Distance::SquaredEuclidean => "e2",
        }
    }
}

impl FromStr for Distance {
    type Err = LearnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manh" => Ok(Distance::Manhattan),
            "e2" => Ok(Distance::SquaredEuclidean),
            other => Err(LearnError::UnknownDistance(other.to_string())),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn manhattan(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
}
