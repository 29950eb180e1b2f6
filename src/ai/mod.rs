pub mod name_group;

use std::time::Duration;

use async_openai::config::{Config, OpenAIConfig};
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_openai::Client;
use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::debug;

use crate::AppResult;
use crate::classify::traits::TextGenerator;

/// Build an async-openai client pointed at an OpenAI-compatible model server
/// (Ollama by default). The underlying HTTP client carries a bounded request
/// timeout so a hung collaborator call cannot stall a request forever.
#[tracing::instrument(name = "Connecting to the model server", level = "debug")]
pub fn get_model_client(base_url: &str, timeout: Duration) -> AppResult<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;
    let config = OpenAIConfig::default().with_api_base(base_url);
    Ok(Client::build(http_client, config, Default::default()))
}

/// Short-text generation over the chat completions API.
pub struct OAIGenerator<'a, C: Config> {
    client: &'a Client<C>,
    model: String,
}

impl<'a, C: Config> OAIGenerator<'a, C> {
    pub fn new(client: &'a Client<C>, model: String) -> Self {
        Self { client, model }
    }
}

impl<'a, C: Config + Sync> TextGenerator for OAIGenerator<'a, C> {
    fn generate<'g>(&'g self, prompt: &'g str) -> BoxFuture<'g, AppResult<String>> {
        async move {
            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages([ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into()])
                .temperature(0.2)
                .build()?;

            let response = self.client.chat().create(request).await?;
            debug!("AI response: {:?}", response);

            let content = response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default();
            Ok(content)
        }
        .boxed()
    }
}
