//! Plain-text rendering of predictions, metrics and clusters.

use crate::cluster::Clustering;
use crate::metrics::LabelMetrics;
use crate::Vector;
use std::collections::BTreeMap;

/// Up to 13 fractional digits, trailing zeros and a bare `.` removed.
pub fn format_decimal(value: f64) -> String {
    let mut text = format!("{:.13}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

pub fn format_coordinates(coordinates: &Vector) -> String {
    let parts: Vec<String> = coordinates.iter().map(|&v| format_decimal(v)).collect();
    format!("([{}])", parts.join(" "))
}

/// One `want=<actual> got=<predicted>` line per position.
pub fn format_comparisons<A, P>(actual: &[A], predicted: &[P]) -> Vec<String>
where
    A: AsRef<str>,
    P: AsRef<str>,
{
    actual.iter()
        .zip(predicted)
        .map(|(a, p)| format!("want={} got={}", a.as_ref(), p.as_ref()))
        .collect()
}

pub fn format_metrics(metrics: &BTreeMap<String, LabelMetrics>) -> Vec<String> {
    metrics.iter()
        .map(|(label, m)| {
            format!(
                "Label={} Precision={}/{} Recall={}/{}",
                label, m.correct, m.predicted, m.correct, m.true_count
            )
        })
        .collect()
}

/// Membership lines for every centroid, followed by their coordinate lines.
pub fn format_clusters(clustering: &Clustering) -> Vec<String> {
    let memberships = clustering.clusters.iter()
        .map(|cluster| format!("{} = {{{}}}", cluster.identity, cluster.members.join(",")));
    let coordinates = clustering.clusters.iter()
        .map(|cluster| cluster.formatted_coordinates());

    memberships.chain(coordinates).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;
    use ndarray::array;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(10.0), "10");
        assert_eq!(format_decimal(2.5), "2.5");
        assert_eq!(format_decimal(1.0 / 3.0), "0.3333333333333");
        assert_eq!(format_decimal(-0.0), "0");
        assert_eq!(format_decimal(-1.25), "-1.25");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(&array![1.0, 2.5, 0.0]), "([1 2.5 0])");
    }

    #[test]
    fn test_format_metrics_in_label_order() {
        let mut metrics = BTreeMap::new();
        metrics.insert("b".to_string(), LabelMetrics::new(0, 1, 1));
        metrics.insert("a".to_string(), LabelMetrics::new(1, 2, 2));

        assert_eq!(
            format_metrics(&metrics),
            vec![
                "Label=a Precision=1/2 Recall=1/2",
                "Label=b Precision=0/1 Recall=0/1",
            ]
        );
    }

    #[test]
    fn test_format_comparisons() {
        let lines = format_comparisons(&["x", "y"], &["x", "x"]);
        assert_eq!(lines, vec!["want=x got=x", "want=y got=x"]);
    }

    #[test]
    fn test_format_clusters() {
        let clustering = Clustering {
            clusters: vec![
                Cluster {
                    identity: "C1".to_string(),
                    members: vec!["A".to_string(), "B".to_string()],
                    centroid: array![0.5, 1.0],
                },
                Cluster {
                    identity: "C2".to_string(),
                    members: Vec::new(),
                    centroid: array![7.0, 7.0],
                },
            ],
            labels: vec![0, 0],
            inertia: 1.0,
            iterations: 2,
        };

        assert_eq!(
            format_clusters(&clustering),
            vec!["C1 = {A,B}", "C2 = {}", "([0.5 1])", "([7 7])"]
        );
    }
}
