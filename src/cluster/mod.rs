//! Clustering algorithms for unsupervised learning.
//!
//! This module provides:
//! - `KMeans`: partitional clustering from caller-supplied initial centroids
//! - `Distance`: the distance functions k-means can run with (`manh`, `e2`)
//! - `Node`: a named point, used for both data and centroids
//!
//! # Examples
//!
//! ## K-Means Clustering
//! ```rust
//! use learnkit::{Distance, KMeans, Node};
//! use ndarray::array;
//!
//! let data = vec![
//!     Node::new("A", array![1.0, 1.0]),
//!     Node::new("B", array![1.5, 2.0]),
//!     Node::new("C", array![8.0, 8.0]),
//!     Node::new("D", array![9.0, 8.5]),
//! ];
//! let centroids = vec![
//!     Node::new("C1", array![0.0, 0.0]),
//!     Node::new("C2", array![10.0, 10.0]),
//! ];
//!
//! let distance: Distance = "e2".parse().unwrap();
//! let kmeans = KMeans::new(data, centroids, distance).unwrap();
//! let result = kmeans.run().unwrap();
//!
//! assert_eq!(result.clusters[0].members, vec!["A", "B"]);
//! assert_eq!(result.clusters[1].formatted_coordinates(), "([8.5 8.25])");
//! ```

mod distance;
mod kmeans;
mod node;

pub use distance::{manhattan, Distance};
pub use kmeans::{sanity_check, Cluster, Clustering, KMeans};
pub use node::Node;
