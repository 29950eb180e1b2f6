use futures::future::BoxFuture;
use ndarray::Array2;

use crate::AppResult;

/// Trait for converting text into vector embeddings.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts in one call.
    /// Returns one embedding per input text, in input order.
    fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, AppResult<Vec<Vec<f32>>>>;
}

/// Trait for partitioning items into clusters plus a noise set.
pub trait Clusterer: Send + Sync {
    /// Assign a cluster label to each item of a precomputed pairwise
    /// distance matrix. Labels are arbitrary non-negative integers; -1
    /// marks noise. The returned vector is positionally aligned with the
    /// matrix rows.
    fn cluster(&self, distances: &Array2<f64>) -> Vec<i32>;
}

/// Trait for the short-text generation collaborator used to name clusters.
pub trait TextGenerator: Send + Sync {
    /// Run one prompt and return the model's free-text reply.
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, AppResult<String>>;
}
