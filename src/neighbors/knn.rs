use crate::dataset::{DataPoint, Dataset};
use crate::error::{LearnError, Result};
use crate::{ArrayView1, Matrix, Vector};
use std::collections::BTreeMap;

/// Sum of squared index-aligned differences.
pub fn squared_euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
}

/// K-nearest-neighbors classifier over a plain training list.
///
/// Neighbors vote with weight `1 / d²`; an exact match (`d² == 0`) votes with
/// infinite weight. Among equal top weights the lexicographically smallest
/// label wins.
#[derive(Clone, Debug)]
pub struct KNearestNeighbors {
    k: usize,
    data: Vec<DataPoint>,
}

impl KNearestNeighbors {
    pub fn new(k: usize) -> Self {
        if k == 0 {
            panic!("k must be > 0, got {}", k);
        }

        Self {
            k,
            data: Vec::new(),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn n_samples(&self) -> usize {
        self.data.len()
    }

    /// Appends a single labeled point.
    pub fn fit(&mut self, x: Vector, y: impl Into<String>) -> Result<()> {
        if let Some(first) = self.data.first() {
            if first.features().len() != x.len() {
                return Err(LearnError::dimension(
                    "KNN training point",
                    first.features().len(),
                    x.len(),
                ));
            }
        }

        self.data.push(DataPoint::new(x, y));
        Ok(())
    }

    pub fn train(&mut self, dataset: &Dataset) -> Result<()> {
        for (row, label) in dataset.iter() {
            self.fit(row.to_owned(), label)?;
        }
        Ok(())
    }

    pub fn predict(&self, x: &ArrayView1<f64>) -> Result<String> {
        let first = self.data.first()
            .ok_or(LearnError::NotFitted("KNearestNeighbors"))?;

        if x.len() != first.features().len() {
            return Err(LearnError::dimension(
                "KNN query",
                first.features().len(),
                x.len(),
            ));
        }

        let mut distances: Vec<(f64, &str)> = self.data.iter()
            .map(|point| (squared_euclidean(x, &point.features().view()), point.label()))
            .collect();

        // Stable, so equidistant points keep training order
        distances.sort_by(|(a, _), (b, _)| a.total_cmp(b));

        let mut votes: BTreeMap<&str, f64> = BTreeMap::new();
        for &(distance, label) in distances.iter().take(self.k) {
            let weight = if distance == 0.0 { f64::INFINITY } else { 1.0 / distance };
            *votes.entry(label).or_insert(0.0) += weight;
        }

        let mut best: Option<(&str, f64)> = None;
        for (label, weight) in votes {
            if best.map_or(true, |(_, top)| weight > top) {
                best = Some((label, weight));
            }
        }

        best.map(|(label, _)| label.to_string())
            .ok_or(LearnError::NotFitted("KNearestNeighbors"))
    }

    pub fn predict_on_data(&self, x: &Matrix) -> Result<Vec<String>> {
        x.outer_iter()
            .map(|row| self.predict(&row))
            .collect()
    }
}
