use crate::error::{LearnError, Result};
use crate::{ArrayView1, Matrix, Vector};
use ndarray::{s, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A single labeled observation held by a classifier's training set.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    features: Vector,
    label: String,
}

impl DataPoint {
    pub fn new(features: Vector, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }

    pub fn features(&self) -> &Vector {
        &self.features
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vec<String>,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vec<String>) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(LearnError::dimension(
                "dataset labels",
                features.nrows(),
                labels.len(),
            ));
        }

        Ok(Self { features, labels })
    }

    /// Builds a dataset from row vectors, rejecting ragged rows.
    pub fn from_rows(rows: Vec<Vec<f64>>, labels: Vec<String>) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(LearnError::dimension("dataset labels", rows.len(), labels.len()));
        }

        let n_features = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_features {
                return Err(LearnError::dimension(
                    format!("dataset row {}", i + 1),
                    n_features,
                    row.len(),
                ));
            }
        }

        let n_samples = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let features = Matrix::from_shape_vec((n_samples, n_features), flat)
            .map_err(|e| LearnError::Config(format!("cannot shape dataset: {}", e)))?;

        Self::new(features, labels)
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows paired with their labels, in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, &str)> {
        self.features
            .outer_iter()
            .zip(self.labels.iter().map(String::as_str))
    }

    /// Splits off the last `test_size` fraction of rows as a test set.
    pub fn train_test_split(&self, test_size: f64) -> Result<(Self, Self)> {
        if test_size <= 0.0 || test_size >= 1.0 {
            return Err(LearnError::Config(format!(
                "test_size must be between 0 and 1, got {}",
                test_size
            )));
        }

        let n_samples = self.n_samples();
        let n_test = (n_samples as f64 * test_size).round() as usize;
        let n_train = n_samples.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(LearnError::EmptyInput(format!(
                "splitting {} samples with test_size={} leaves an empty side",
                n_samples, test_size
            )));
        }

        let train_features = self.features.slice(s![..n_train, ..]).to_owned();
        let train_labels = self.labels[..n_train].to_vec();

        let test_features = self.features.slice(s![n_train.., ..]).to_owned();
        let test_labels = self.labels[n_train..].to_vec();

        let train_dataset = Dataset::new(train_features, train_labels)?;
        let test_dataset = Dataset::new(test_features, test_labels)?;

        Ok((train_dataset, test_dataset))
    }

    /// Returns a copy with rows permuted by a seeded RNG; labels follow their rows.
    pub fn shuffled(&self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..self.n_samples()).collect();
        order.shuffle(&mut rng);

        Self {
            features: self.features.select(Axis(0), &order),
            labels: order.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}
