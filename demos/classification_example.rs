use learnkit::metrics::{accuracy, evaluate};
use learnkit::{Dataset, KNearestNeighbors, NaiveBayes};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== KNN vs Naive Bayes Classification Example ===\n");

    // Features: weather code, temperature band; label: play outside or not
    let features = array![
        [0.0, 2.0], [0.0, 2.0], [1.0, 2.0], [2.0, 1.0], [2.0, 0.0],
        [2.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0], [2.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 2.0], [2.0, 1.0], [1.0, 1.0],
        [0.0, 0.0]
    ];
    let labels = [
        "no", "no", "yes", "yes", "yes",
        "no", "yes", "no", "yes", "yes",
        "yes", "yes", "yes", "no", "yes",
        "yes",
    ];

    let dataset = Dataset::new(features, labels.iter().map(|s| s.to_string()).collect())?;
    let (train, test) = dataset.shuffled(7).train_test_split(0.25)?;

    println!("Training samples: {}", train.n_samples());
    println!("Test samples: {}\n", test.n_samples());

    println!("=== K-Nearest Neighbors ===");
    for &k in &[1, 3, 5] {
        let mut knn = KNearestNeighbors::new(k);
        knn.train(&train)?;
        let predictions = knn.predict_on_data(&test.features)?;
        println!("k={}: accuracy {:.2}%", k, accuracy(&test.labels, &predictions)? * 100.0);
    }

    println!("\n=== Naive Bayes ===");
    for &c in &[0.0, 1.0, 2.0] {
        let mut nb = NaiveBayes::new(c, false);
        nb.train(&train)?;
        let predictions = nb.predict_on_data(&test.features)?;

        println!("c={}: accuracy {:.2}%", c, accuracy(&test.labels, &predictions)? * 100.0);
        for (label, m) in evaluate(&test.labels, &predictions)? {
            let precision = m.precision().map_or("n/a".to_string(), |p| format!("{:.2}", p));
            let recall = m.recall().map_or("n/a".to_string(), |r| format!("{:.2}", r));
            println!("  {}: precision={} recall={}", label, precision, recall);
        }
    }

    Ok(())
}
