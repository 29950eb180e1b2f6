use clap::Parser;

use crate::classify::ClusterParams;

/// Chronicle - group open browser tabs into named, colored clusters.
///
/// Tab text is embedded and clustered by cosine similarity on a local
/// OpenAI-compatible model server (Ollama by default); each cluster gets a
/// short model-generated name and a Chrome tab-group color.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "CHRONICLE_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Base URL of the OpenAI-compatible model server.
    #[arg(
        long,
        env = "CHRONICLE_MODEL_SERVER",
        default_value = "http://localhost:11434/v1"
    )]
    pub model_server: String,

    /// Embedding model identifier.
    #[arg(long, env = "CHRONICLE_EMBED_MODEL", default_value = "nomic-embed-text")]
    pub embed_model: String,

    /// Chat model used to name tab groups.
    #[arg(long, env = "CHRONICLE_NAME_MODEL", default_value = "llama3.2")]
    pub name_model: String,

    /// Seconds before a model server call times out.
    #[arg(long, env = "CHRONICLE_MODEL_TIMEOUT_SECS", default_value_t = 60)]
    pub model_timeout_secs: u64,

    /// DBSCAN neighborhood radius over cosine distance.
    #[arg(long, default_value_t = 0.4)]
    pub eps: f64,

    /// Minimum neighborhood size for a DBSCAN core point.
    #[arg(long, default_value_t = 2)]
    pub min_samples: usize,

    /// Number of member titles quoted in the naming prompt.
    #[arg(long, default_value_t = 5)]
    pub prompt_titles: usize,

    /// Hard cap on generated group names, in characters.
    #[arg(long, default_value_t = 30)]
    pub name_max_len: usize,

    /// Characters of page text kept for the embedding input.
    #[arg(long, default_value_t = 1000)]
    pub text_truncate: usize,

    /// Smallest cluster worth surfacing as a tab group.
    #[arg(long, default_value_t = 2)]
    pub min_cluster_size: usize,
}

impl Cli {
    pub fn cluster_params(&self) -> ClusterParams {
        ClusterParams {
            eps: self.eps,
            min_samples: self.min_samples,
            prompt_titles: self.prompt_titles,
            name_max_len: self.name_max_len,
            text_truncate: self.text_truncate,
            min_cluster_size: self.min_cluster_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_tunables() {
        let cli = Cli::parse_from(["chronicle"]);
        let params = cli.cluster_params();

        assert_eq!(cli.bind, "0.0.0.0:8000");
        assert_eq!(params.eps, 0.4);
        assert_eq!(params.min_samples, 2);
        assert_eq!(params.prompt_titles, 5);
        assert_eq!(params.name_max_len, 30);
        assert_eq!(params.text_truncate, 1000);
        assert_eq!(params.min_cluster_size, 2);
    }
}
