use ndarray::prelude::*;
use tracing::trace;

use crate::{AppError, AppResult};

/// Convert an embedding batch into a dense `f64` matrix, validating that the
/// collaborator returned one vector per input and that every vector has the
/// same dimensionality.
#[tracing::instrument(name = "Converting embeddings", level = "debug", skip(embs))]
pub fn embeddings_to_ndarray(embs: &[Vec<f32>], expected_rows: usize) -> AppResult<Array2<f64>> {
    if embs.len() != expected_rows {
        return Err(AppError::MalformedEmbeddingBatch(format!(
            "expected {expected_rows} vectors, got {}",
            embs.len()
        )));
    }
    let cols = embs.first().map(|e| e.len()).unwrap_or(0);
    if cols == 0 {
        return Err(AppError::MalformedEmbeddingBatch(
            "vectors have zero dimensionality".to_string(),
        ));
    }
    if let Some(bad) = embs.iter().find(|e| e.len() != cols) {
        return Err(AppError::MalformedEmbeddingBatch(format!(
            "mixed dimensionality: {} vs {cols}",
            bad.len()
        )));
    }

    let mut arr: Array2<f64> = Array2::<f64>::zeros((embs.len(), cols));
    trace!("Initialized ndarray with shape: {:?}", arr.dim());
    for (i, mut row) in arr.axis_iter_mut(Axis(0)).enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = embs[i][j] as f64;
        }
    }
    Ok(arr)
}
