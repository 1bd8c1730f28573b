//! Narrow seam to the external semantic-coherence ranker.
//!
//! The engine only knows this trait; the real HTTP client lives in a
//! separate crate and deterministic stubs stand in for it in tests.

use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// One scored candidate returned by the ranker. `text` is expected to match
/// a submitted narrative verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedText {
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Error)]
pub enum RankerError {
    #[error("ranker returned HTTP {0}")]
    Status(u16),
    #[error("ranker request failed: {0}")]
    Transport(String),
}

/// Submit a situation query plus candidate narratives, receive ranked
/// scores. Implementations must request exactly as many results as there
/// are candidates.
pub trait Ranker {
    fn rank(
        &self,
        query: &str,
        candidates: &[String],
    ) -> impl Future<Output = Result<Vec<RankedText>, RankerError>> + Send;
}
