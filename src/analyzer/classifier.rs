// Hugging Face inference client for the sentiment model
use crate::model::{Classification, ClassifierError};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError>;
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// The inference API answers either `[[{..}, ..]]` or `[{..}, ..]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

pub struct HuggingFaceClassifier {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HuggingFaceClassifier {
    pub fn new(client: Client, model: &str, token: Option<String>) -> Self {
        Self {
            client,
            url: format!("https://api-inference.huggingface.co/models/{}", model),
            token,
        }
    }

    /// Picks the highest-confidence label out of a raw response body.
    pub fn parse_response(body: &str) -> Result<Classification, ClassifierError> {
        if let Ok(err) = serde_json::from_str::<InferenceError>(body) {
            return Err(ClassifierError::ApiError(err.error));
        }
        let parsed: InferenceResponse =
            serde_json::from_str(body).map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;
        let labels = match parsed {
            InferenceResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            InferenceResponse::Flat(labels) => labels,
        };
        labels
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|top| Classification::new(top.label, top.score))
            .ok_or_else(|| ClassifierError::InvalidResponse("no labels in response".into()))
    }
}

#[async_trait::async_trait]
impl Classifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::HttpError(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::HttpError(e.to_string()))?;
        if !status.is_success() {
            return Err(ClassifierError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let classification = Self::parse_response(&body)?;
        debug!("Classified as {} ({:.3})", classification.label, classification.confidence);
        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_response_and_picks_top_label() {
        let body = r#"[[{"label":"Positive","score":0.91},{"label":"Neutral","score":0.06},{"label":"Negative","score":0.03}]]"#;
        let c = HuggingFaceClassifier::parse_response(body).unwrap();
        assert_eq!(c.label, "Positive");
        assert!((c.confidence - 0.91).abs() < 1e-9);
    }

    #[test]
    fn parses_flat_response() {
        let body = r#"[{"label":"Neutral","score":0.2},{"label":"Negative","score":0.7}]"#;
        let c = HuggingFaceClassifier::parse_response(body).unwrap();
        assert_eq!(c.label, "Negative");
    }

    #[test]
    fn api_error_body_is_reported() {
        let body = r#"{"error":"Model yiyanghkust/finbert-tone is currently loading"}"#;
        let err = HuggingFaceClassifier::parse_response(body).unwrap_err();
        assert!(matches!(err, ClassifierError::ApiError(msg) if msg.contains("loading")));
    }

    #[test]
    fn empty_response_is_invalid() {
        assert!(matches!(
            HuggingFaceClassifier::parse_response("[]"),
            Err(ClassifierError::InvalidResponse(_))
        ));
    }
}
