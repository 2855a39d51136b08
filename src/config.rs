//! Run configuration and algorithm selection.

use crate::cluster::Distance;
use crate::error::{LearnError, Result};
use std::path::PathBuf;

/// The single algorithm a run executes.
#[derive(Clone, Debug, PartialEq)]
pub enum Algorithm {
    Knn { k: usize },
    NaiveBayes { c: f64 },
    KMeans { distance: Distance, centroids: Vec<String> },
}

/// Where classifier test rows come from.
#[derive(Clone, Debug, PartialEq)]
pub enum TestSource {
    File(PathBuf),
    /// Shuffle the training file and hold out the last `test_size` fraction.
    Holdout { test_size: f64, seed: u64 },
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub train: PathBuf,
    pub test: Option<PathBuf>,
    pub k: Option<usize>,
    pub c: Option<f64>,
    pub distance: Option<String>,
    pub centroids: Vec<String>,
    pub test_size: Option<f64>,
    pub seed: u64,
    pub max_iter: Option<usize>,
    pub verbose: bool,
}

impl RunConfig {
    pub fn new(train: impl Into<PathBuf>) -> Self {
        Self {
            train: train.into(),
            test: None,
            k: None,
            c: None,
            distance: None,
            centroids: Vec::new(),
            test_size: None,
            seed: 42,
            max_iter: None,
            verbose: false,
        }
    }

    /// Validates the flags and picks exactly one algorithm.
    ///
    /// A distance name selects k-means; otherwise exactly one of `k` and `c`
    /// must be present.
    pub fn algorithm(&self) -> Result<Algorithm> {
        if let Some(name) = &self.distance {
            let distance: Distance = name.parse()?;
            if self.k.is_some() || self.c.is_some() {
                return Err(LearnError::Config(
                    "-d (K-Means) cannot be combined with -k or -c".to_string(),
                ));
            }
            if self.centroids.is_empty() {
                return Err(LearnError::Config(
                    "K-Means needs at least one centroid argument, e.g. 0,0".to_string(),
                ));
            }
            if self.max_iter == Some(0) {
                return Err(LearnError::Config("--max-iter must be > 0".to_string()));
            }
            return Ok(Algorithm::KMeans {
                distance,
                centroids: self.centroids.clone(),
            });
        }

        if !self.centroids.is_empty() {
            return Err(LearnError::Config(format!(
                "unexpected argument(s) {:?}; centroids are only used with -d",
                self.centroids
            )));
        }

        match (self.k, self.c) {
            (Some(_), Some(_)) => Err(LearnError::Config(
                "cannot use both -k and -c in the same run".to_string(),
            )),
            (None, None) => Err(LearnError::Config(
                "one of -k (KNN), -c (Naive Bayes) or -d (K-Means) is required".to_string(),
            )),
            (Some(0), None) => Err(LearnError::Config(
                "number of nearest neighbours k must be > 0".to_string(),
            )),
            (Some(k), None) => Ok(Algorithm::Knn { k }),
            (None, Some(c)) if !(c >= 0.0) => Err(LearnError::Config(format!(
                "Laplace correction c must be >= 0, got {}",
                c
            ))),
            (None, Some(c)) => Ok(Algorithm::NaiveBayes { c }),
        }
    }

    pub fn test_source(&self) -> Result<TestSource> {
        match (&self.test, self.test_size) {
            (Some(path), None) => Ok(TestSource::File(path.clone())),
            (None, Some(test_size)) => Ok(TestSource::Holdout {
                test_size,
                seed: self.seed,
            }),
            (Some(_), Some(_)) => Err(LearnError::Config(
                "use either --test or --test-size, not both".to_string(),
            )),
            (None, None) => Err(LearnError::Config(
                "classifiers need --test FILE or --test-size FRACTION".to_string(),
            )),
        }
    }
}
