use thiserror::Error;

/// Unified application error type to simplify bubbling errors through async flows.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("The embedding service is unavailable. {0}")]
    EmbeddingUnavailable(#[source] async_openai::error::OpenAIError),
    #[error("Malformed embedding batch. {0}")]
    MalformedEmbeddingBatch(String),
    #[error("Error communicating with the AI. {0}")]
    AIClient(#[from] async_openai::error::OpenAIError),
    #[error("Error building the HTTP client. {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Errored while handling a socket. {0}")]
    Io(#[from] std::io::Error),
    #[error("Error serializing json. {0}")]
    SerdeJsonSer(#[from] serde_json::Error),
}

/// Convenience alias for results that bubble `AppError`.
pub type AppResult<T> = Result<T, AppError>;
