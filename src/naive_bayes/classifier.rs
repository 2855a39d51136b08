use super::table::{discretize, ConditionalProbabilityTable, Smoothed};
use crate::dataset::Dataset;
use crate::error::{LearnError, Result};
use crate::report::format_decimal;
use crate::{ArrayView1, Matrix};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Naive Bayes over discretized feature values with additive smoothing.
///
/// Scores are plain products of probabilities, not log sums, so datasets with
/// many columns or tiny estimates can underflow to zero.
#[derive(Clone, Debug)]
pub struct NaiveBayes {
    c: f64,
    verbose: bool,
    n_samples: usize,
    domains: Vec<BTreeSet<String>>,
    label_counts: BTreeMap<String, usize>,
    priors: BTreeMap<String, f64>,
    table: ConditionalProbabilityTable,
}

impl NaiveBayes {
    pub fn new(c: f64, verbose: bool) -> Self {
        if !(c >= 0.0) {
            panic!("smoothing constant c must be >= 0, got {}", c);
        }

        Self {
            c,
            verbose,
            n_samples: 0,
            domains: Vec::new(),
            label_counts: BTreeMap::new(),
            priors: BTreeMap::new(),
            table: ConditionalProbabilityTable::new(),
        }
    }

    pub fn smoothing(&self) -> f64 {
        self.c
    }

    pub fn n_features(&self) -> usize {
        self.domains.len()
    }

    /// Training labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.label_counts.keys().map(String::as_str)
    }

    pub fn domain(&self, column: usize) -> Option<&BTreeSet<String>> {
        self.domains.get(column)
    }

    pub fn prior(&self, label: &str) -> Option<f64> {
        self.priors.get(label).copied()
    }

    pub fn conditional(&self, value: f64, column: usize, label: &str) -> Option<f64> {
        self.table.get(&discretize(value), column, label)
            .map(|entry| entry.probability())
    }

    /// Builds domains, priors and the smoothed table, replacing any earlier model.
    pub fn train(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            return Err(LearnError::EmptyInput("Naive Bayes training set".to_string()));
        }

        let n_features = dataset.n_features();
        let mut domains = vec![BTreeSet::new(); n_features];
        let mut joint_counts: HashMap<(String, usize, String), usize> = HashMap::new();
        let mut label_counts: BTreeMap<String, usize> = BTreeMap::new();

        for (row, label) in dataset.iter() {
            for (column, &x) in row.iter().enumerate() {
                let value = discretize(x);
                domains[column].insert(value.clone());
                *joint_counts.entry((value, column, label.to_string())).or_insert(0) += 1;
            }
            *label_counts.entry(label.to_string()).or_insert(0) += 1;
        }

        let total = dataset.n_samples() as f64;
        let mut priors = BTreeMap::new();
        let mut table = ConditionalProbabilityTable::new();

        for (label, &count) in &label_counts {
            priors.insert(label.clone(), count as f64 / total);

            for (column, domain) in domains.iter().enumerate() {
                let denominator = count as f64 + self.c * domain.len() as f64;
                for value in domain {
                    let joint = joint_counts
                        .get(&(value.clone(), column, label.clone()))
                        .copied()
                        .unwrap_or(0);
                    let entry = Smoothed {
                        numerator: joint as f64 + self.c,
                        denominator,
                    };
                    table.insert(value, column, label, entry);
                }
            }
        }

        debug!(
            n_samples = dataset.n_samples(),
            n_features,
            n_labels = label_counts.len(),
            n_entries = table.len(),
            "trained naive bayes"
        );

        self.n_samples = dataset.n_samples();
        self.domains = domains;
        self.label_counts = label_counts;
        self.priors = priors;
        self.table = table;
        Ok(())
    }

    /// Unnormalized score of a single label for `x`.
    ///
    /// An unknown label, or a value never seen in its column, scores 0 with a
    /// warning. A query wider than the training data is an error.
    pub fn label_probability(&self, x: &ArrayView1<f64>, label: &str) -> Result<f64> {
        self.ensure_fitted()?;

        if !self.priors.contains_key(label) {
            warn!(label, "label does not exist in training label set");
            return Ok(0.0);
        }

        let values = self.discretize_query(x)?;
        if let Some((column, value)) = self.unseen_value(&values) {
            warn!(column = column + 1, value, "X value not in training set");
            return Ok(0.0);
        }

        Ok(self.score(&values, label))
    }

    pub fn predict(&self, x: &ArrayView1<f64>) -> Result<String> {
        self.ensure_fitted()?;

        let values = self.discretize_query(x)?;
        let unseen = self.unseen_value(&values);
        if let Some((column, value)) = unseen {
            warn!(column = column + 1, value, "X value not in training set, every label scores 0");
        }

        let mut best: Option<(&str, f64)> = None;
        for label in self.label_counts.keys() {
            let score = match unseen {
                Some(_) => 0.0,
                None => self.score(&values, label),
            };
            if self.verbose {
                info!("NB(C={}) = {:.6}", label, score);
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((label.as_str(), score));
            }
        }

        best.map(|(label, _)| label.to_string())
            .ok_or(LearnError::NotFitted("NaiveBayes"))
    }

    pub fn predict_on_data(&self, x: &Matrix) -> Result<Vec<String>> {
        x.outer_iter()
            .map(|row| self.predict(&row))
            .collect()
    }

    /// Like [`predict_on_data`](Self::predict_on_data); in verbose mode each
    /// prediction is also reported against the dataset's own label.
    pub fn predict_on_dataset(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let mut predictions = Vec::with_capacity(dataset.n_samples());
        for (row, actual) in dataset.iter() {
            let predicted = self.predict(&row)?;
            if self.verbose {
                if predicted == actual {
                    info!("match: \"{}\"", predicted);
                } else {
                    info!("fail: got \"{}\" != want \"{}\"", predicted, actual);
                }
            }
            predictions.push(predicted);
        }
        Ok(predictions)
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.label_counts.is_empty() {
            return Err(LearnError::NotFitted("NaiveBayes"));
        }
        Ok(())
    }

    fn discretize_query(&self, x: &ArrayView1<f64>) -> Result<Vec<String>> {
        if x.len() > self.domains.len() {
            return Err(LearnError::dimension(
                "Naive Bayes query",
                self.domains.len(),
                x.len(),
            ));
        }
        Ok(x.iter().map(|&v| discretize(v)).collect())
    }

    fn unseen_value<'a>(&self, values: &'a [String]) -> Option<(usize, &'a str)> {
        values.iter()
            .enumerate()
            .find(|(column, value)| !self.domains[*column].contains(value.as_str()))
            .map(|(column, value)| (column, value.as_str()))
    }

    // Caller guarantees the label is known and every value is in its domain.
    fn score(&self, values: &[String], label: &str) -> f64 {
        let mut probability = self.priors.get(label).copied().unwrap_or(0.0);

        if self.verbose {
            let count = self.label_counts.get(label).copied().unwrap_or(0);
            info!("P(C={}) = [{} / {}]", label, count, self.n_samples);
        }

        for (column, value) in values.iter().enumerate() {
            let Some(entry) = self.table.get(value, column, label) else {
                return 0.0;
            };
            if self.verbose {
                info!(
                    "P(A{}={} | C={}) = {} / {}",
                    column,
                    value,
                    label,
                    format_decimal(entry.numerator),
                    format_decimal(entry.denominator)
                );
            }
            probability *= entry.probability();
        }

        probability
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dataset(features: Matrix, labels: &[&str]) -> Dataset {
        Dataset::new(features, labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn fitted(c: f64) -> NaiveBayes {
        let train = dataset(array![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], &["a", "a", "b"]);
        let mut nb = NaiveBayes::new(c, false);
        nb.train(&train).unwrap();
        nb
    }

    #[test]
    fn test_priors() {
        let nb = fitted(1.0);
        assert!((nb.prior("a").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((nb.prior("b").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(nb.prior("c"), None);
    }

    #[test]
    fn test_laplace_smoothing() {
        let nb = fitted(1.0);
        // (joint + c) / (count(label) + c * |domain|)
        assert!((nb.conditional(1.0, 0, "a").unwrap() - 0.75).abs() < 1e-12);
        assert!((nb.conditional(0.0, 0, "a").unwrap() - 0.25).abs() < 1e-12);
        assert!((nb.conditional(1.0, 0, "b").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert!((nb.conditional(1.0, 1, "b").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_domains_and_labels() {
        let nb = fitted(0.0);
        assert_eq!(nb.n_features(), 2);
        assert_eq!(nb.labels().collect::<Vec<_>>(), vec!["a", "b"]);
        let domain: Vec<&str> = nb.domain(0).unwrap().iter().map(String::as_str).collect();
        assert_eq!(domain, vec!["0.0", "1.0"]);
        assert!(nb.domain(2).is_none());
    }

    #[test]
    fn test_predict() {
        let nb = fitted(1.0);
        assert_eq!(nb.predict(&array![1.0, 1.0].view()).unwrap(), "a");
        assert_eq!(nb.predict(&array![0.0, 1.0].view()).unwrap(), "b");

        let score_a = nb.label_probability(&array![1.0, 1.0].view(), "a").unwrap();
        assert!((score_a - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_value_scores_zero() {
        let nb = fitted(1.0);
        let query = array![7.0, 1.0];

        assert_eq!(nb.label_probability(&query.view(), "a").unwrap(), 0.0);
        assert_eq!(nb.label_probability(&query.view(), "b").unwrap(), 0.0);
        // Every score is zero, so the first label in sorted order is returned
        assert_eq!(nb.predict(&query.view()).unwrap(), "a");
    }

    #[test]
    fn test_unknown_label_scores_zero() {
        let nb = fitted(1.0);
        assert_eq!(nb.label_probability(&array![1.0, 1.0].view(), "zzz").unwrap(), 0.0);
    }

    #[test]
    fn test_too_many_features() {
        let nb = fitted(1.0);
        let err = nb.predict(&array![1.0, 1.0, 1.0].view()).unwrap_err();
        assert!(matches!(err, LearnError::DimensionMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_tie_prefers_sorted_label() {
        let train = dataset(array![[0.0], [0.0]], &["b", "a"]);
        let mut nb = NaiveBayes::new(0.0, false);
        nb.train(&train).unwrap();

        assert_eq!(nb.predict(&array![0.0].view()).unwrap(), "a");
    }

    #[test]
    fn test_predict_on_dataset_matches_predict_on_data() {
        let nb = fitted(1.0);
        let test = dataset(array![[1.0, 1.0], [0.0, 1.0], [1.0, 0.0]], &["a", "a", "a"]);

        let on_data = nb.predict_on_data(&test.features).unwrap();
        let on_dataset = nb.predict_on_dataset(&test).unwrap();
        assert_eq!(on_data, on_dataset);
        assert_eq!(on_data.len(), 3);
    }

    #[test]
    fn test_verbose_predictions_unchanged() {
        let train = dataset(array![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], &["a", "a", "b"]);
        let mut verbose = NaiveBayes::new(1.0, true);
        verbose.train(&train).unwrap();

        let test = dataset(array![[1.0, 1.0], [0.0, 1.0], [7.0, 0.0]], &["a", "a", "b"]);
        let predictions = verbose.predict_on_dataset(&test).unwrap();

        assert_eq!(predictions, fitted(1.0).predict_on_dataset(&test).unwrap());
        assert_eq!(predictions, vec!["a", "b", "a"]);
        let score_a = verbose.label_probability(&array![1.0, 1.0].view(), "a").unwrap();
        assert!((score_a - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_predict_without_train() {
        let nb = NaiveBayes::new(1.0, false);
        assert!(matches!(
            nb.predict(&array![1.0].view()),
            Err(LearnError::NotFitted(_))
        ));
    }

    #[test]
    fn test_train_empty_dataset() {
        let mut nb = NaiveBayes::new(1.0, false);
        let empty = Dataset::new(Matrix::zeros((0, 2)), Vec::new()).unwrap();
        assert!(matches!(nb.train(&empty), Err(LearnError::EmptyInput(_))));
    }

    #[test]
    fn test_negative_smoothing() {
        std::panic::catch_unwind(|| {
            NaiveBayes::new(-1.0, false);
        }).expect_err("Should panic on negative c");
    }

    mod nb_proptest {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn prop_unsmoothed_conditionals_sum_to_one(
                rows in prop::collection::vec(
                    (prop::collection::vec(0..4i32, 3), 0..3usize),
                    1..30,
                ),
            ) {
                let features: Vec<Vec<f64>> = rows.iter()
                    .map(|(row, _)| row.iter().map(|&v| v as f64).collect())
                    .collect();
                let labels: Vec<String> = rows.iter()
                    .map(|(_, label)| format!("class{}", label))
                    .collect();
                let train = Dataset::from_rows(features, labels).unwrap();

                let mut nb = NaiveBayes::new(0.0, false);
                nb.train(&train).unwrap();

                let labels: Vec<String> = nb.labels().map(str::to_string).collect();
                for label in &labels {
                    for column in 0..nb.n_features() {
                        let total: f64 = nb.domain(column).unwrap()
                            .iter()
                            .map(|value| value.parse::<f64>().unwrap())
                            .map(|value| nb.conditional(value, column, label).unwrap())
                            .sum();
                        prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
                    }
                }
            }
        }
    }
}
