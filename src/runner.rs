//! Loads a run's inputs, executes the selected algorithm and renders the result.

use crate::cluster::{Distance, KMeans, Node};
use crate::config::{Algorithm, RunConfig, TestSource};
use crate::dataset::Dataset;
use crate::error::{LearnError, Result};
use crate::loading::{parse_centroids, read_labeled_csv, read_nodes};
use crate::metrics::{accuracy, evaluate};
use crate::naive_bayes::NaiveBayes;
use crate::neighbors::KNearestNeighbors;
use crate::report::{format_clusters, format_comparisons, format_metrics};
use tracing::info;

/// Runs one invocation end to end and returns the report lines.
pub fn execute(config: &RunConfig) -> Result<Vec<String>> {
    match config.algorithm()? {
        Algorithm::KMeans { distance, centroids } => {
            let nodes = read_nodes(&config.train)?;
            let centroids = parse_centroids(&centroids)?;
            run_kmeans(nodes, centroids, distance, config.max_iter)
        }
        algorithm => {
            let (train, test) = load_classifier_data(config)?;
            run_classifier(&algorithm, &train, &test, config.verbose)
        }
    }
}

fn load_classifier_data(config: &RunConfig) -> Result<(Dataset, Dataset)> {
    let train = read_labeled_csv(&config.train)?;
    match config.test_source()? {
        TestSource::File(path) => Ok((train, read_labeled_csv(path)?)),
        TestSource::Holdout { test_size, seed } => {
            train.shuffled(seed).train_test_split(test_size)
        }
    }
}

/// Trains a classifier, predicts the test rows and reports per-label counts.
///
/// With `verbose`, KNN also lists every `want=.. got=..` pair; Naive Bayes
/// logs its probability derivations instead.
pub fn run_classifier(
    algorithm: &Algorithm,
    train: &Dataset,
    test: &Dataset,
    verbose: bool,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    let predictions = match *algorithm {
        Algorithm::Knn { k } => {
            let mut knn = KNearestNeighbors::new(k);
            knn.train(train)?;
            let predictions = knn.predict_on_data(&test.features)?;
            if verbose {
                lines.extend(format_comparisons(&test.labels, &predictions));
            }
            predictions
        }
        Algorithm::NaiveBayes { c } => {
            let mut nb = NaiveBayes::new(c, verbose);
            nb.train(train)?;
            nb.predict_on_dataset(test)?
        }
        Algorithm::KMeans { .. } => {
            return Err(LearnError::Config("K-Means is not a classifier".to_string()));
        }
    };

    let metrics = evaluate(&test.labels, &predictions)?;
    if let Ok(accuracy) = accuracy(&test.labels, &predictions) {
        info!(accuracy, n_test = test.n_samples(), "evaluation finished");
    }

    lines.extend(format_metrics(&metrics));
    Ok(lines)
}

pub fn run_kmeans(
    nodes: Vec<Node>,
    centroids: Vec<Node>,
    distance: Distance,
    max_iter: Option<usize>,
) -> Result<Vec<String>> {
    let mut kmeans = KMeans::new(nodes, centroids, distance)?;
    if let Some(max_iter) = max_iter {
        kmeans = kmeans.max_iter(max_iter);
    }

    let clustering = kmeans.run()?;
    info!(
        iterations = clustering.iterations,
        inertia = clustering.inertia,
        "k-means converged"
    );

    Ok(format_clusters(&clustering))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::parse_nodes;
    use ndarray::array;
    use std::path::PathBuf;

    fn dataset(features: crate::Matrix, labels: &[&str]) -> Dataset {
        Dataset::new(features, labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_run_knn_verbose() {
        let train = dataset(
            array![[0.0, 0.0], [1.0, 1.0], [5.0, 5.0], [6.0, 6.0]],
            &["x", "x", "y", "y"],
        );
        let test = dataset(array![[0.5, 0.5], [5.5, 5.5]], &["x", "x"]);

        let lines = run_classifier(&Algorithm::Knn { k: 3 }, &train, &test, true).unwrap();
        assert_eq!(
            lines,
            vec![
                "want=x got=x",
                "want=x got=y",
                "Label=x Precision=1/1 Recall=1/2",
                "Label=y Precision=0/1 Recall=0/0",
            ]
        );
    }

    #[test]
    fn test_run_naive_bayes() {
        let train = dataset(array![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], &["a", "a", "b"]);
        let test = dataset(array![[1.0, 1.0], [0.0, 1.0]], &["a", "b"]);

        let lines = run_classifier(&Algorithm::NaiveBayes { c: 1.0 }, &train, &test, false).unwrap();
        assert_eq!(
            lines,
            vec![
                "Label=a Precision=1/1 Recall=1/1",
                "Label=b Precision=1/1 Recall=1/1",
            ]
        );
    }

    #[test]
    fn test_run_classifier_rejects_kmeans() {
        let train = dataset(array![[0.0]], &["a"]);
        let algorithm = Algorithm::KMeans {
            distance: Distance::Manhattan,
            centroids: vec!["0".to_string()],
        };
        assert!(run_classifier(&algorithm, &train, &train, false).is_err());
    }

    #[test]
    fn test_run_kmeans_report() {
        let nodes = parse_nodes("0 0 A\n10 10 B\n").unwrap();
        let centroids = parse_centroids(&["0,0", "10,10"]).unwrap();

        let lines = run_kmeans(nodes, centroids, Distance::SquaredEuclidean, None).unwrap();
        assert_eq!(lines, vec!["C1 = {A}", "C2 = {B}", "([0 0])", "([10 10])"]);
    }

    #[test]
    fn test_execute_missing_train_file() {
        let mut config = RunConfig::new("/nonexistent/learnkit/train.csv");
        config.k = Some(1);
        config.test = Some(PathBuf::from("/nonexistent/learnkit/test.csv"));

        assert!(matches!(execute(&config), Err(LearnError::Io { .. })));
    }

    #[test]
    fn test_execute_from_files() {
        let dir = std::env::temp_dir();
        let train_path = dir.join(format!("learnkit-{}-train.csv", std::process::id()));
        let test_path = dir.join(format!("learnkit-{}-test.csv", std::process::id()));
        std::fs::write(&train_path, "0,0,x\n1,1,x\n5,5,y\n6,6,y\n").unwrap();
        std::fs::write(&test_path, "0.5,0.5,x\n6,6,y\n").unwrap();

        let mut config = RunConfig::new(&train_path);
        config.k = Some(3);
        config.test = Some(test_path.clone());
        let lines = execute(&config);

        std::fs::remove_file(&train_path).ok();
        std::fs::remove_file(&test_path).ok();

        assert_eq!(
            lines.unwrap(),
            vec![
                "Label=x Precision=1/1 Recall=1/1",
                "Label=y Precision=1/1 Recall=1/1",
            ]
        );
    }
}
