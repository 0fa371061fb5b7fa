use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use crate::models::{GenerationConfig, GenerationRequest, GenerationResponse};

#[derive(Debug, Clone)]
pub enum GenerationError {
    /// Upstream answered 429.
    Throttled,
    /// Transport failure, timeout, non-success status or undecodable body.
    Upstream(String)
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::Throttled => write!(f, "upstream throttled the request"),
            GenerationError::Upstream(message) => write!(f, "upstream call failed: {}", message)
        }
    }
}

impl std::error::Error for GenerationError {}

/// Capability the chat handler generates text through. Injected once
/// at startup so tests can substitute a double for the real service.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// reqwest-backed client for the hosted text-generation endpoint.
/// Created once per process and reused across invocations.
pub struct HttpGenerationClient {
    client: Client,
    endpoint_url: String,
    api_key: Option<String>
}

impl HttpGenerationClient {

    pub fn new(endpoint_url: String, api_key: Option<String>) -> Self {
        HttpGenerationClient {
            client: Client::new(),
            endpoint_url,
            api_key
        }
    }

}

#[async_trait]
impl TextGeneration for HttpGenerationClient {

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {

        let request = GenerationRequest {
            input_text: prompt.to_string(),
            text_generation_config: GenerationConfig::default()
        };

        let mut builder = self.client
            .post(&self.endpoint_url)
            .timeout(std::time::Duration::from_secs(60))
            .json(&request);

        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::Throttled);
        }

        let generation_response: GenerationResponse = response
            .error_for_status()
            .map_err(|e| GenerationError::Upstream(e.to_string()))?
            .json()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        Ok(generation_response.first_output())

    }

}
