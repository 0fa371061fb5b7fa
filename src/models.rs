use serde::{Deserialize, Serialize};

/// One prior user/assistant exchange in the conversation history.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Turn {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub assistant: String
}

// Both fields default when absent: a body of "{}" is a valid
// request for an empty message with no history.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub response: String
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String
}

/// Fixed generation parameters sent with every upstream call.
/// Not user-configurable.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_token_count: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            max_token_count: 300,
            temperature: 0.7,
            top_p: 0.9,
            stop_sequences: Vec::new()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub input_text: String,
    pub text_generation_config: GenerationConfig
}

#[derive(Debug, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub results: Vec<GenerationResult>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default)]
    pub output_text: String
}

impl GenerationResponse {
    /// First candidate's output text, or empty string when the
    /// upstream returned no candidates.
    pub fn first_output(&self) -> String {
        self.results
            .first()
            .map(|result| result.output_text.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_missing_fields_default() {

        let request: ChatRequest = serde_json::from_str("{}")
            .expect("empty object should deserialize");

        assert_eq!(request.message, "");
        assert!(request.history.is_empty());

    }

    #[test]
    fn test_history_turn_defaults() {

        let request: ChatRequest = serde_json::from_str(
            r#"{"message":"Hi","history":[{"user":"only user side"}]}"#
        ).expect("partial turn should deserialize");

        assert_eq!(request.history[0].user, "only user side");
        assert_eq!(request.history[0].assistant, "");

    }

    #[test]
    fn test_generation_request_wire_format() {

        let request = GenerationRequest {
            input_text: "User: Hello\nAssistant:".to_string(),
            text_generation_config: GenerationConfig::default()
        };

        let value = serde_json::to_value(&request)
            .expect("request should serialize");

        assert_eq!(value["inputText"], "User: Hello\nAssistant:");
        assert_eq!(value["textGenerationConfig"]["maxTokenCount"], 300);
        assert_eq!(
            value["textGenerationConfig"]["stopSequences"],
            serde_json::json!([])
        );

    }

    #[test]
    fn test_empty_results_gives_empty_output() {

        let response: GenerationResponse = serde_json::from_str(r#"{"results":[]}"#)
            .expect("empty results should deserialize");
        assert_eq!(response.first_output(), "");

        let response: GenerationResponse = serde_json::from_str("{}")
            .expect("missing results should deserialize");
        assert_eq!(response.first_output(), "");

    }

    #[test]
    fn test_first_of_many_results() {

        let response: GenerationResponse = serde_json::from_str(
            r#"{"results":[{"outputText":" first"},{"outputText":" second"}]}"#
        ).expect("results should deserialize");

        assert_eq!(response.first_output(), " first");

    }

}
