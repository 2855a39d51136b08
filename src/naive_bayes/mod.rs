//! Naive Bayes classification over discretized feature values.
//!
//! This module provides:
//! - `NaiveBayes`: categorical Naive Bayes with Laplace (additive) smoothing
//! - `ConditionalProbabilityTable`: smoothed `P(value | label)` per column
//!
//! Every distinct feature value seen in a column is its own category, so the
//! classifier suits integer-coded or otherwise discrete attributes.
//!
//! # Examples
//!
//! ```rust
//! use learnkit::{Dataset, NaiveBayes};
//! use ndarray::array;
//!
//! let train = Dataset::new(
//!     array![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
//!     vec!["a".into(), "a".into(), "b".into()],
//! ).unwrap();
//!
//! let mut nb = NaiveBayes::new(1.0, false);
//! nb.train(&train).unwrap();
//!
//! assert_eq!(nb.predict(&array![1.0, 1.0].view()).unwrap(), "a");
//! assert!((nb.conditional(1.0, 0, "a").unwrap() - 0.75).abs() < 1e-12);
//! ```

mod classifier;
mod table;

pub use classifier::NaiveBayes;
pub use table::{discretize, ConditionalProbabilityTable, Smoothed};
