//! Readers for labeled CSV datasets and k-means node lists.

use crate::cluster::Node;
use crate::dataset::Dataset;
use crate::error::{LearnError, Result};
use crate::Vector;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads a headerless CSV whose last column is the label.
pub fn read_labeled_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LearnError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse_labeled_csv(file)?;
    debug!(
        path = %path.display(),
        n_samples = dataset.n_samples(),
        n_features = dataset.n_features(),
        "loaded labeled dataset"
    );
    Ok(dataset)
}

pub fn parse_labeled_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(index + 1, |p| p.line() as usize);
        let fields: Vec<&str> = record.iter().collect();
        let Some((label, features)) = fields.split_last() else {
            continue;
        };

        let row = features.iter()
            .map(|field| parse_number(field, line))
            .collect::<Result<Vec<f64>>>()?;

        rows.push(row);
        labels.push(label.to_string());
    }

    Dataset::from_rows(rows, labels)
}

/// Parses k-means input: one node per line, coordinates separated by commas
/// or whitespace, identity last. Blank lines and `#` comments are skipped.
pub fn parse_nodes(text: &str) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.replace(',', " ");
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((identity, coordinates)) = tokens.split_last() else {
            continue;
        };

        let coordinates = coordinates.iter()
            .map(|token| parse_number(token, index + 1))
            .collect::<Result<Vec<f64>>>()?;

        nodes.push(Node::new(*identity, Vector::from(coordinates)));
    }

    Ok(nodes)
}

pub fn read_nodes(path: impl AsRef<Path>) -> Result<Vec<Node>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LearnError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let nodes = parse_nodes(&text)?;
    debug!(path = %path.display(), n_nodes = nodes.len(), "loaded k-means nodes");
    Ok(nodes)
}

/// Builds centroids `C1..Cn` from arguments such as `"0,0"` or `"1.5,2,3"`.
pub fn parse_centroids<S: AsRef<str>>(args: &[S]) -> Result<Vec<Node>> {
    args.iter()
        .enumerate()
        .map(|(index, arg)| -> Result<Node> {
            let text = arg.as_ref().replace(',', " ");
            let coordinates = text.split_whitespace()
                .map(|token| parse_number(token, index + 1))
                .collect::<Result<Vec<f64>>>()?;

            if coordinates.is_empty() {
                return Err(LearnError::Parse {
                    line: index + 1,
                    message: format!("centroid argument '{}' has no coordinates", arg.as_ref()),
                });
            }

            Ok(Node::new(format!("C{}", index + 1), Vector::from(coordinates)))
        })
        .collect()
}

// Rejects `inf` and `NaN`: k-means movement never settles on them.
fn parse_number(token: &str, line: usize) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LearnError::Parse {
            line,
            message: format!("'{}' is not a finite number", token),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_parse_labeled_csv() {
        let text = "1,2,yes\n\n3.5, 4 ,no\n";
        let dataset = parse_labeled_csv(text.as_bytes()).unwrap();

        assert_eq!(dataset.features, array![[1.0, 2.0], [3.5, 4.0]]);
        assert_eq!(dataset.labels, vec!["yes", "no"]);
    }

    #[test]
    fn test_parse_labeled_csv_rejects_ragged_rows() {
        let text = "1,2,yes\n3,no\n";
        assert!(matches!(
            parse_labeled_csv(text.as_bytes()),
            Err(LearnError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_parse_labeled_csv_bad_number() {
        let text = "1,2,yes\n3,x,no\n";
        match parse_labeled_csv(text.as_bytes()) {
            Err(LearnError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other.map(|d| d.labels)),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_labeled_csv("/nonexistent/learnkit/train.csv").unwrap_err();
        assert!(matches!(err, LearnError::Io { .. }));
        assert!(matches!(read_nodes("/nonexistent/learnkit/nodes.txt"), Err(LearnError::Io { .. })));
    }

    #[test]
    fn test_parse_nodes() {
        let text = "# comment line\n0 0 A\n\n1,2,B\n  3 4   C  \n";
        let nodes = parse_nodes(text).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].identity(), "A");
        assert_eq!(nodes[1].coordinates(), &array![1.0, 2.0]);
        assert_eq!(nodes[2].identity(), "C");
        assert_eq!(nodes[2].coordinates(), &array![3.0, 4.0]);
    }

    #[test]
    fn test_parse_nodes_bad_number() {
        assert!(matches!(
            parse_nodes("0 0 A\n1 q B\n"),
            Err(LearnError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(matches!(
            parse_nodes("0 0 A\ninf 1 B\n"),
            Err(LearnError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_nodes("0 0 A\nNaN 1 B\n"),
            Err(LearnError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_labeled_csv("1,-inf,yes\n".as_bytes()),
            Err(LearnError::Parse { line: 1, .. })
        ));
        assert!(parse_centroids(&["0,NaN"]).is_err());
        assert!(parse_centroids(&["inf,0"]).is_err());
    }

    #[test]
    fn test_parse_centroids() {
        let centroids = parse_centroids(&["0,0", "10,10.5"]).unwrap();

        assert_eq!(centroids[0].identity(), "C1");
        assert_eq!(centroids[1].identity(), "C2");
        assert_eq!(centroids[1].coordinates(), &array![10.0, 10.5]);
        assert!(parse_centroids(&[","]).is_err());
        assert!(parse_centroids(&["1,a"]).is_err());
    }
}
