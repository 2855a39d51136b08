pub use ndarray::{Array1, Array2, ArrayView1};

pub mod cluster;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loading;
pub mod metrics;
pub mod naive_bayes;
pub mod neighbors;
pub mod report;
pub mod runner;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use cluster::{Cluster, Clustering, Distance, KMeans, Node};
pub use config::{Algorithm, RunConfig};
pub use dataset::{DataPoint, Dataset};
pub use error::{LearnError, Result};
pub use metrics::{evaluate, LabelMetrics};
pub use naive_bayes::NaiveBayes;
pub use neighbors::KNearestNeighbors;
