//! Ranker API HTTP client.

use aegis_core::rank::{RankedText, Ranker, RankerError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound on one ranking round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the external coherence ranker.
pub struct RankerClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct CompareRequest<'a> {
    query: &'a str,
    candidates: &'a [String],
    use_freq: bool,
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    top: Vec<ScoredCandidate>,
}

#[derive(Debug, Deserialize)]
struct ScoredCandidate {
    text: String,
    score: f64,
}

impl RankerClient {
    /// Create a client for the given compare endpoint with the default
    /// timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Ranker for RankerClient {
    async fn rank(
        &self,
        query: &str,
        candidates: &[String],
    ) -> Result<Vec<RankedText>, RankerError> {
        let request = CompareRequest {
            query,
            candidates,
            use_freq: true,
            top_k: candidates.len(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|err| RankerError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "ranker returned non-success status");
            return Err(RankerError::Status(status.as_u16()));
        }

        let payload: CompareResponse = response
            .json()
            .await
            .map_err(|err| RankerError::Transport(err.to_string()))?;

        Ok(payload
            .top
            .into_iter()
            .map(|candidate| RankedText {
                text: candidate.text,
                score: candidate.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_request_serializes_the_wire_shape() {
        let candidates = vec!["option a".to_string(), "option b".to_string()];
        let request = CompareRequest {
            query: "situation",
            candidates: &candidates,
            use_freq: true,
            top_k: candidates.len(),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["query"], "situation");
        assert_eq!(value["use_freq"], true);
        assert_eq!(value["top_k"], 2);
        assert_eq!(value["candidates"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn compare_response_parses_scored_candidates() {
        let payload = r#"{"top": [{"text": "option a", "score": 0.91}]}"#;
        let response: CompareResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.top.len(), 1);
        assert_eq!(response.top[0].text, "option a");
        assert!((response.top[0].score - 0.91).abs() < 1e-12);
    }

    #[tokio::test]
    async fn unreachable_ranker_is_a_transport_error() {
        // Discard port: connection refused immediately.
        let client = RankerClient::with_timeout("http://127.0.0.1:9/v1/compare", Duration::from_secs(1));
        let err = client
            .rank("query", &["candidate".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, RankerError::Transport(_)));
    }
}
