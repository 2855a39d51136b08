use super::distance::Distance;
use super::node::Node;
use crate::error::{LearnError, Result};
use crate::report::format_coordinates;
use crate::Vector;
use tracing::debug;

/// Verifies that every data node and centroid has the same dimensionality.
pub fn sanity_check(data: &[Node], centroids: &[Node]) -> Result<()> {
    let first = data.first()
        .ok_or_else(|| LearnError::EmptyInput("k-means data".to_string()))?;
    if centroids.is_empty() {
        return Err(LearnError::EmptyInput("k-means centroids".to_string()));
    }

    let dimension = first.dimension();
    for node in data {
        if node.dimension() != dimension {
            return Err(LearnError::dimension(
                format!("k-means data node {}", node.identity()),
                dimension,
                node.dimension(),
            ));
        }
    }

    for centroid in centroids {
        if centroid.dimension() != dimension {
            return Err(LearnError::dimension(
                format!("k-means centroid {}", centroid.identity()),
                dimension,
                centroid.dimension(),
            ));
        }
    }

    Ok(())
}

/// Final state of one centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub identity: String,
    pub members: Vec<String>,
    pub centroid: Vector,
}

impl Cluster {
    /// Coordinates as `([x y ...])` with 13 fractional digits, zeros trimmed.
    pub fn formatted_coordinates(&self) -> String {
        format_coordinates(&self.centroid)
    }
}

#[derive(Clone, Debug)]
pub struct Clustering {
    pub clusters: Vec<Cluster>,
    /// Centroid index per data node, in input order.
    pub labels: Vec<usize>,
    /// Sum of distances from each node to its centroid.
    pub inertia: f64,
    pub iterations: usize,
}

/// K-means with caller-supplied initial centroids.
///
/// Iterates assign/update until the total absolute centroid movement drops to
/// `tolerance`. There is no iteration cap unless [`max_iter`](Self::max_iter)
/// is set; inputs that oscillate will otherwise loop forever.
#[derive(Clone, Debug)]
pub struct KMeans {
    data: Vec<Node>,
    centroids: Vec<Node>,
    distance: Distance,
    tolerance: f64,
    max_iter: Option<usize>,
}

impl KMeans {
    pub fn new(data: Vec<Node>, centroids: Vec<Node>, distance: Distance) -> Result<Self> {
        sanity_check(&data, &centroids)?;

        Ok(Self {
            data,
            centroids,
            distance,
            tolerance: 1e-5,
            max_iter: None,
        })
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        if !(tolerance >= 0.0) {
            panic!("tolerance must be >= 0, got {}", tolerance);
        }
        self.tolerance = tolerance;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        if max_iter == 0 {
            panic!("max_iter must be > 0, got {}", max_iter);
        }
        self.max_iter = Some(max_iter);
        self
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn run(&self) -> Result<Clustering> {
        let mut centroids: Vec<Vector> = self.centroids.iter()
            .map(|centroid| centroid.coordinates().clone())
            .collect();
        let mut iterations = 0;

        loop {
            iterations += 1;

            let labels = self.assign(&centroids);
            let updated = self.update(&centroids, &labels);

            let movement: f64 = centroids.iter()
                .zip(&updated)
                .map(|(old, new)| (old - new).mapv(f64::abs).sum())
                .sum();

            debug!(iteration = iterations, movement, distance = %self.distance, "k-means iteration");

            if movement <= self.tolerance {
                return Ok(self.collect(centroids, labels, iterations));
            }

            if let Some(max_iter) = self.max_iter {
                if iterations >= max_iter {
                    return Err(LearnError::NotConverged { iterations });
                }
            }

            centroids = updated;
        }
    }

    // Nearest centroid per node; ties go to the lowest index.
    fn assign(&self, centroids: &[Vector]) -> Vec<usize> {
        self.data.iter()
            .map(|node| {
                let point = node.coordinates().view();
                let mut closest = 0;
                let mut min_distance = self.distance.compute(&point, &centroids[0].view());

                for (k, centroid) in centroids.iter().enumerate().skip(1) {
                    let distance = self.distance.compute(&point, &centroid.view());
                    if distance < min_distance {
                        min_distance = distance;
                        closest = k;
                    }
                }

                closest
            })
            .collect()
    }

    // Mean of members; centroids without members keep their position.
    fn update(&self, centroids: &[Vector], labels: &[usize]) -> Vec<Vector> {
        let mut sums: Vec<Vector> = centroids.iter()
            .map(|centroid| Vector::zeros(centroid.len()))
            .collect();
        let mut counts = vec![0usize; centroids.len()];

        for (node, &k) in self.data.iter().zip(labels) {
            sums[k] += node.coordinates();
            counts[k] += 1;
        }

        sums.into_iter()
            .zip(counts)
            .zip(centroids)
            .map(|((sum, count), old)| {
                if count == 0 {
                    old.clone()
                } else {
                    sum / count as f64
                }
            })
            .collect()
    }

    fn collect(&self, centroids: Vec<Vector>, labels: Vec<usize>, iterations: usize) -> Clustering {
        let mut clusters: Vec<Cluster> = self.centroids.iter()
            .zip(centroids)
            .map(|(initial, centroid)| Cluster {
                identity: initial.identity().to_string(),
                members: Vec::new(),
                centroid,
            })
            .collect();

        let mut inertia = 0.0;
        for (node, &k) in self.data.iter().zip(&labels) {
            inertia += self.distance.compute(
                &node.coordinates().view(),
                &clusters[k].centroid.view(),
            );
            clusters[k].members.push(node.identity().to_string());
        }

        Clustering {
            clusters,
            labels,
            inertia,
            iterations,
        }
    }
}
