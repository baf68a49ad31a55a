use super::{AdCopyService, AdRequest, AnalyzeRequest};
use crate::models::{AdContent, AnalysisResult, ComplianceResult, ComplianceStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockAdClient {
    analysis_responses: Arc<Mutex<Vec<AnalysisResult>>>,
    ad_responses: Arc<Mutex<Vec<AdContent>>>,
    should_fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
    instructions: Arc<Mutex<Vec<String>>>,
}

impl MockAdClient {
    pub fn new() -> Self {
        Self {
            analysis_responses: Arc::new(Mutex::new(Vec::new())),
            ad_responses: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
            instructions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_analysis_response(self, response: AnalysisResult) -> Self {
        self.analysis_responses.lock().unwrap().push(response);
        self
    }

    pub fn with_ad_response(self, response: AdContent) -> Self {
        self.ad_responses.lock().unwrap().push(response);
        self
    }

    /// Every call fails as if the service returned unparseable output.
    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Instruction text of every call made so far, in order.
    pub fn get_instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }

    fn record(&self, instruction: String) -> usize {
        self.instructions.lock().unwrap().push(instruction);
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        *count
    }

    fn failing(&self) -> bool {
        *self.should_fail.lock().unwrap()
    }
}

impl Default for MockAdClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdCopyService for MockAdClient {
    async fn analyze_product(&self, request: &AnalyzeRequest) -> Result<AnalysisResult> {
        let count = self.record(request.instruction());
        if self.failing() {
            return Err(Error::AnalysisFailed(
                "mock: response was not valid JSON".to_string(),
            ));
        }

        let responses = self.analysis_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(AnalysisResult {
                product_name: "Mock product".to_string(),
                product_details: "Mock details".to_string(),
                target_audience: "Mock audience".to_string(),
            })
        } else {
            Ok(responses[(count - 1) % responses.len()].clone())
        }
    }

    async fn generate_ad(&self, request: &AdRequest) -> Result<AdContent> {
        let count = self.record(request.instruction());
        if self.failing() {
            return Err(Error::GenerationFailed(
                "mock: response was not valid JSON".to_string(),
            ));
        }

        let responses = self.ad_responses.lock().unwrap();
        if responses.is_empty() {
            Ok(AdContent {
                title: request.product_name().to_string(),
                description: request.product_details().to_string(),
                category: "Mock category".to_string(),
                compliance: ComplianceResult {
                    status: ComplianceStatus::Approved,
                    feedback: "Mock feedback".to_string(),
                },
            })
        } else {
            Ok(responses[(count - 1) % responses.len()].clone())
        }
    }
}
