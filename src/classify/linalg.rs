use ndarray::prelude::*;

/// Scale every row to unit length. Rows with zero norm are left untouched;
/// they end up at cosine distance 1 from everything, including each other.
#[tracing::instrument(name = "Normalizing embeddings", level = "debug", skip(data))]
pub fn normalize_rows(mut data: Array2<f64>) -> Array2<f64> {
    for mut row in data.axis_iter_mut(Axis(0)) {
        let norm = row.mapv(|v| v * v).sum().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }
    data
}

/// Pairwise cosine distance matrix over unit-normalized rows: symmetric,
/// zero diagonal, values clamped to [0, 2].
#[tracing::instrument(name = "Computing cosine distances", level = "debug", skip(data))]
pub fn cosine_distance_matrix(data: &Array2<f64>) -> Array2<f64> {
    let sims = data.dot(&data.t());
    let n = data.nrows();
    let mut dist: Array2<f64> = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                dist[[i, j]] = (1.0 - sims[[i, j]]).clamp(0.0, 2.0);
            }
        }
    }
    dist
}
