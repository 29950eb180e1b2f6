pub(super) mod convert;
pub(super) mod dbscan;
pub(super) mod linalg;
pub(super) mod openai;
pub mod traits;

use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppResult;
use crate::ai::name_group::name_tab_group;
use crate::classify::traits::{Clusterer, Embedder, TextGenerator};
use crate::tabs::TabContent;

/// Chrome-compatible tab group colors. Assigned by result ordinal, so more
/// than eight groups simply cycle back to the start of the palette.
pub const GROUP_COLORS: [&str; 8] = [
    "blue", "green", "yellow", "purple", "pink", "cyan", "orange", "red",
];

pub fn assign_color(ordinal: usize) -> &'static str {
    GROUP_COLORS[ordinal % GROUP_COLORS.len()]
}

/// Pipeline tunables, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// DBSCAN neighborhood radius over cosine distance.
    pub eps: f64,
    /// Minimum neighborhood size for a DBSCAN core point.
    pub min_samples: usize,
    /// Member titles quoted in the naming prompt.
    pub prompt_titles: usize,
    /// Hard cap on group names, in characters.
    pub name_max_len: usize,
    /// Page text kept for the embedding input, in characters.
    pub text_truncate: usize,
    /// Smallest cluster worth surfacing as a group.
    pub min_cluster_size: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            eps: 0.4,
            min_samples: 2,
            prompt_titles: 5,
            name_max_len: 30,
            text_truncate: 1000,
            min_cluster_size: 2,
        }
    }
}

/// A named, colored tab group returned to the caller.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    pub id: String,
    pub name: String,
    pub color: String,
    pub tab_ids: Vec<i64>,
    pub confidence: f64,
}

/// Indices of one surfaced cluster, in input order.
struct LabeledGroup {
    label: i32,
    indices: Vec<usize>,
}

/// Group positional labels back into clusters: noise dropped, groups ordered
/// by first appearance of their label in the input, members kept in input
/// order, and anything below `min_size` discarded.
fn assemble_groups(labels: &[i32], min_size: usize) -> Vec<LabeledGroup> {
    let mut groups: Vec<LabeledGroup> = Vec::new();
    for (index, &label) in labels.iter().enumerate() {
        if label < 0 {
            continue;
        }
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.indices.push(index),
            None => groups.push(LabeledGroup {
                label,
                indices: vec![index],
            }),
        }
    }
    groups.retain(|group| group.indices.len() >= min_size);
    groups
}

/// Cohesion-derived confidence: mean intra-cluster cosine distance mapped
/// from [0, 2] onto [1, 0]. Tight clusters score close to 1.
fn cluster_confidence(distances: &Array2<f64>, indices: &[usize]) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (offset, &i) in indices.iter().enumerate() {
        for &j in &indices[offset + 1..] {
            total += distances[[i, j]];
            pairs += 1;
        }
    }
    if pairs == 0 {
        return 1.0;
    }
    (1.0 - (total / pairs as f64) / 2.0).clamp(0.0, 1.0)
}

/// The clustering pipeline: normalize tab text, embed it, cluster the
/// vectors, and turn qualifying clusters into named, colored results.
pub struct TabClassifier<E, C, G> {
    embedder: E,
    clusterer: C,
    namer: G,
    params: ClusterParams,
}

impl<E: Embedder, C: Clusterer, G: TextGenerator> TabClassifier<E, C, G> {
    pub fn new(embedder: E, clusterer: C, namer: G, params: ClusterParams) -> Self {
        Self {
            embedder,
            clusterer,
            namer,
            params,
        }
    }

    #[tracing::instrument(name = "Grouping browser tabs", level = "info", skip(self, tabs))]
    pub async fn classify(&self, tabs: &[TabContent]) -> AppResult<Vec<ClusterResult>> {
        if tabs.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = tabs
            .iter()
            .map(|tab| tab.embedding_input(self.params.text_truncate))
            .collect();
        let embeddings = self.embedder.embed(&texts).await?;

        let arr = convert::embeddings_to_ndarray(&embeddings, tabs.len())?;
        let arr = linalg::normalize_rows(arr);
        let distances = linalg::cosine_distance_matrix(&arr);

        let labels = self.clusterer.cluster(&distances);
        debug_assert_eq!(labels.len(), tabs.len());
        debug!("Cluster labels: {:?}", labels);

        let groups = assemble_groups(&labels, self.params.min_cluster_size);
        let mut results = Vec::with_capacity(groups.len());
        for (ordinal, group) in groups.iter().enumerate() {
            let members: Vec<TabContent> =
                group.indices.iter().map(|&i| tabs[i].clone()).collect();
            let name = name_tab_group(
                &self.namer,
                &members,
                self.params.prompt_titles,
                self.params.name_max_len,
            )
            .await;
            results.push(ClusterResult {
                id: format!("cluster_{}", group.label),
                name,
                color: assign_color(ordinal).to_string(),
                tab_ids: members.iter().map(|tab| tab.tab_id).collect(),
                confidence: cluster_confidence(&distances, &group.indices),
            });
        }
        Ok(results)
    }
}
