//! Environment-driven settings.
//!
//! Configuration is a flat set of environment variables read once at
//! startup; AWS credentials resolve through the SDK default chain.

use std::env;

/// Which managed store holds chat history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBackend {
    /// DynamoDB table keyed by `(session_id, timestamp)`.
    Dynamo,
    /// One JSON document per session in the S3 bucket.
    S3,
}

impl HistoryBackend {
    pub fn parse(s: &str) -> eyre::Result<Self> {
        match s.to_lowercase().as_str() {
            "dynamo" | "dynamodb" => Ok(Self::Dynamo),
            "s3" => Ok(Self::S3),
            other => Err(eyre::eyre!(
                "unsupported history backend: {other} (expected \"dynamo\" or \"s3\")"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub region: String,
    pub bucket: String,
    pub history_backend: HistoryBackend,
    pub history_table: String,
    pub model_id: String,
    pub retrieval_k: usize,
    pub history_limit: usize,
    pub chunk_chars: usize,
    pub temperature: f32,
    pub max_tokens: i32,
}

impl Settings {
    pub fn from_env() -> eyre::Result<Self> {
        let bucket = env::var("PAPERCHAT_BUCKET")
            .map_err(|_| eyre::eyre!("PAPERCHAT_BUCKET must be set"))?;

        let history_backend = HistoryBackend::parse(
            &env::var("PAPERCHAT_HISTORY_BACKEND").unwrap_or_else(|_| "dynamo".to_string()),
        )?;

        Ok(Self {
            bind_addr: env::var("PAPERCHAT_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            bucket,
            history_backend,
            history_table: env::var("PAPERCHAT_HISTORY_TABLE")
                .unwrap_or_else(|_| "ChatHistory".to_string()),
            model_id: env::var("PAPERCHAT_MODEL_ID")
                .unwrap_or_else(|_| "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string()),
            retrieval_k: parse_var("PAPERCHAT_RETRIEVAL_K", 4)?,
            history_limit: parse_var("PAPERCHAT_HISTORY_LIMIT", 20)?,
            chunk_chars: parse_var(
                "PAPERCHAT_CHUNK_CHARS",
                paperchat_index::chunk::DEFAULT_MAX_CHARS,
            )?,
            temperature: parse_var("PAPERCHAT_TEMPERATURE", 0.3)?,
            max_tokens: parse_var("PAPERCHAT_MAX_TOKENS", 500)?,
        })
    }
}

/// Read an optional environment variable, falling back to `default` when
/// unset and failing loudly on an unparseable value.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> eyre::Result<T> {
    match env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| eyre::eyre!("invalid value for {name}: {v}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse() {
        assert_eq!(HistoryBackend::parse("dynamo").unwrap(), HistoryBackend::Dynamo);
        assert_eq!(HistoryBackend::parse("DynamoDB").unwrap(), HistoryBackend::Dynamo);
        assert_eq!(HistoryBackend::parse("s3").unwrap(), HistoryBackend::S3);
        assert!(HistoryBackend::parse("redis").is_err());
    }
}
