//! Instance-based classification.
//!
//! This module provides:
//! - `KNearestNeighbors`: k-nearest-neighbors classification with
//!   inverse-distance weighted voting over a linear scan of the training set
//!
//! # Examples
//!
//! ```rust
//! use learnkit::{Dataset, KNearestNeighbors};
//! use ndarray::array;
//!
//! let train = Dataset::new(
//!     array![[0.0, 0.0], [1.0, 1.0], [5.0, 5.0], [6.0, 6.0]],
//!     vec!["x".into(), "x".into(), "y".into(), "y".into()],
//! ).unwrap();
//!
//! let mut knn = KNearestNeighbors::new(3);
//! knn.train(&train).unwrap();
//!
//! let label = knn.predict(&array![0.5, 0.5].view()).unwrap();
//! assert_eq!(label, "x");
//! ```

mod knn;

pub use knn::{squared_euclidean, KNearestNeighbors};
