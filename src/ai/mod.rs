//! Generation service integration for product analysis and ad copy
//!
//! Request builders are provider-agnostic; `gemini` turns them into
//! `generateContent` calls with a strict JSON response schema.

pub mod gemini;
pub mod mime;
pub mod mock;
pub mod request;

pub use gemini::GeminiAdClient;
pub use mock::MockAdClient;
pub use request::{AdRequest, AnalyzeRequest, DEFAULT_AUDIENCE};

use crate::models::{AdContent, AnalysisResult};
use crate::Result;
use async_trait::async_trait;

/// One outbound call per method, all-or-nothing.
///
/// Implementations fail with [`crate::Error::AnalysisFailed`] or
/// [`crate::Error::GenerationFailed`] on transport or parse errors; they never
/// retry.
#[async_trait]
pub trait AdCopyService: Send + Sync {
    async fn analyze_product(&self, request: &AnalyzeRequest) -> Result<AnalysisResult>;
    async fn generate_ad(&self, request: &AdRequest) -> Result<AdContent>;
}
