use std::collections::VecDeque;

use ndarray::prelude::*;

use crate::classify::traits::Clusterer;

/// Reserved label for points that belong to no cluster.
pub const NOISE: i32 = -1;

const UNCLASSIFIED: i32 = -2;

/// DBSCAN over a precomputed cosine distance matrix.
pub struct DbscanClusterer {
    pub eps: f64,
    pub min_samples: usize,
}

impl DbscanClusterer {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }
}

impl Clusterer for DbscanClusterer {
    fn cluster(&self, distances: &Array2<f64>) -> Vec<i32> {
        dbscan_labels(distances, self.eps, self.min_samples)
    }
}

/// Label every row of `distances` with a cluster id, or [`NOISE`].
///
/// A point is a core point if its eps-neighborhood (distance <= eps,
/// counting the point itself) holds at least `min_samples` points. Clusters
/// grow breadth-first through core points; non-core points inside a core
/// point's neighborhood join as border points; the rest stay noise.
///
/// Fewer than two points cannot form a neighborhood, so no clustering is
/// attempted: every point gets the same non-distinguishing label and the
/// caller's minimum-size filter takes care of the rest.
#[tracing::instrument(name = "Clustering embeddings", level = "debug", skip(distances))]
pub fn dbscan_labels(distances: &Array2<f64>, eps: f64, min_samples: usize) -> Vec<i32> {
    let n = distances.nrows();
    if n < 2 {
        return vec![0; n];
    }

    let neighborhoods: Vec<Vec<usize>> = (0..n)
        .map(|i| (0..n).filter(|&j| distances[[i, j]] <= eps).collect())
        .collect();

    let mut labels = vec![UNCLASSIFIED; n];
    let mut next_label = 0;

    for point in 0..n {
        if labels[point] != UNCLASSIFIED {
            continue;
        }
        if neighborhoods[point].len() < min_samples {
            labels[point] = NOISE;
            continue;
        }

        let label = next_label;
        next_label += 1;
        labels[point] = label;

        let mut seeds: VecDeque<usize> = neighborhoods[point]
            .iter()
            .copied()
            .filter(|&q| q != point)
            .collect();
        while let Some(q) = seeds.pop_front() {
            if labels[q] == NOISE {
                // border point reached from a core point
                labels[q] = label;
                continue;
            }
            if labels[q] != UNCLASSIFIED {
                continue;
            }
            labels[q] = label;
            if neighborhoods[q].len() >= min_samples {
                seeds.extend(neighborhoods[q].iter().copied());
            }
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn symmetric(entries: &[(usize, usize, f64)], n: usize) -> Array2<f64> {
        let mut dist = Array2::<f64>::from_elem((n, n), 10.0);
        for i in 0..n {
            dist[[i, i]] = 0.0;
        }
        for &(i, j, d) in entries {
            dist[[i, j]] = d;
            dist[[j, i]] = d;
        }
        dist
    }

    #[test]
    fn empty_and_single_inputs_short_circuit() {
        assert!(dbscan_labels(&Array2::<f64>::zeros((0, 0)), 0.4, 2).is_empty());
        assert_eq!(dbscan_labels(&array![[0.0]], 0.4, 2), vec![0]);
    }

    #[test]
    fn near_points_cluster_and_far_point_is_noise() {
        let dist = symmetric(&[(0, 1, 0.1), (0, 2, 0.2), (1, 2, 0.15)], 4);
        let labels = dbscan_labels(&dist, 0.4, 2);

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[2]);
        assert!(labels[0] >= 0);
        assert_eq!(labels[3], NOISE);
    }

    #[test]
    fn clusters_connect_transitively_through_core_points() {
        // 0-1 and 1-2 are within eps, 0-2 is not; 1 bridges them.
        let dist = symmetric(&[(0, 1, 0.3), (1, 2, 0.3), (0, 2, 0.6)], 3);
        let labels = dbscan_labels(&dist, 0.4, 2);

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
    }

    #[test]
    fn border_point_joins_its_core_neighbor() {
        // 0, 1, 2 are mutually close (core at min_samples=3); 3 only
        // touches 2, so it is not core but still reachable.
        let dist = symmetric(
            &[(0, 1, 0.1), (0, 2, 0.1), (1, 2, 0.1), (2, 3, 0.3)],
            4,
        );
        let labels = dbscan_labels(&dist, 0.4, 3);

        assert_eq!(labels[3], labels[2]);
        assert!(labels[3] >= 0);
    }

    #[test]
    fn neighborhood_radius_is_inclusive() {
        let dist = symmetric(&[(0, 1, 0.4)], 2);
        let labels = dbscan_labels(&dist, 0.4, 2);
        assert_eq!(labels[0], labels[1]);
        assert!(labels[0] >= 0);
    }

    #[test]
    fn separated_pairs_get_distinct_labels_in_scan_order() {
        let dist = symmetric(&[(0, 1, 0.1), (2, 3, 0.1)], 4);
        let labels = dbscan_labels(&dist, 0.4, 2);

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn all_isolated_points_are_noise() {
        let dist = symmetric(&[], 3);
        assert_eq!(dbscan_labels(&dist, 0.4, 2), vec![NOISE; 3]);
    }
}
