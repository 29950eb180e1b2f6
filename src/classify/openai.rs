use async_openai::types::CreateEmbeddingRequestArgs;
use async_openai::{Client, config::Config};
use futures::FutureExt;
use tracing::debug;

use crate::classify::traits::Embedder;
use crate::{AppError, AppResult};

/// Embedding implementation that talks to an OpenAI-compatible API.
///
/// The whole text batch goes out as one request; per-text round trips would
/// multiply collaborator latency by the tab count.
pub struct OAIEmbedder<'a, C: Config> {
    client: &'a Client<C>,
    model: String,
}

impl<'a, C: Config> OAIEmbedder<'a, C> {
    pub fn new(client: &'a Client<C>, model: String) -> Self {
        Self { client, model }
    }
}

impl<'a, C: Config + Sync> Embedder for OAIEmbedder<'a, C> {
    fn embed<'e>(
        &'e self,
        texts: &'e [String],
    ) -> futures::future::BoxFuture<'e, AppResult<Vec<Vec<f32>>>> {
        async move {
            let request = CreateEmbeddingRequestArgs::default()
                .model(&self.model)
                .input(texts.to_vec())
                .build()
                .map_err(AppError::EmbeddingUnavailable)?;

            let response = self
                .client
                .embeddings()
                .create(request)
                .await
                .map_err(AppError::EmbeddingUnavailable)?;
            debug!("Embedded {} texts with {}", texts.len(), self.model);

            // The API carries an index per item; sort on it so the batch
            // keeps positional correspondence with the input texts.
            let mut data = response.data;
            data.sort_by_key(|d| d.index);
            Ok(data.into_iter().map(|d| d.embedding).collect())
        }
        .boxed()
    }
}
