//! Presentation state for one user session.
//!
//! Two independent flows, analysis and generation, each move
//! `Idle -> InProgress -> {Succeeded | Failed}` and can be started again from
//! any state except `InProgress`. The only link between them is that a
//! successful analysis overwrites the form fields generation later reads.

use crate::ai::{AdCopyService, AdRequest, AnalyzeRequest};
use crate::export::{self, Clipboard, SharePayload, ShareTarget, COPY_ACK_WINDOW};
use crate::models::{AdContent, AnalysisResult, ComplianceResult, GeneratedAd, ImagePayload};
use crate::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

pub const ANALYSIS_VALIDATION_MESSAGE: &str =
    "Please upload an image or enter a product link to analyze.";
pub const ANALYSIS_ERROR_MESSAGE: &str =
    "An error occurred while analyzing the product. Please try again.";
pub const GENERATION_VALIDATION_MESSAGE: &str = "Please fill in the product name and details.";
pub const GENERATION_ERROR_MESSAGE: &str =
    "An error occurred while generating the ad. Check your API key and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

/// Text inputs of the product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub product_name: String,
    pub product_details: String,
    pub target_audience: String,
    pub product_url: String,
}

#[derive(Debug, Default)]
pub struct Session {
    pub form: ProductForm,
    image: Option<ImagePayload>,
    analysis: FlowStatus,
    analysis_error: Option<String>,
    generation: FlowStatus,
    generation_error: Option<String>,
    generated_ad: Option<GeneratedAd>,
    compliance: Option<ComplianceResult>,
    copied_at: Option<Instant>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: ProductForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn set_image(&mut self, image: ImagePayload) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn analysis_status(&self) -> FlowStatus {
        self.analysis
    }

    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis_error.as_deref()
    }

    pub fn generation_status(&self) -> FlowStatus {
        self.generation
    }

    pub fn generation_error(&self) -> Option<&str> {
        self.generation_error.as_deref()
    }

    pub fn generated_ad(&self) -> Option<&GeneratedAd> {
        self.generated_ad.as_ref()
    }

    pub fn compliance(&self) -> Option<&ComplianceResult> {
        self.compliance.as_ref()
    }

    /// Whether the analyze control is enabled.
    pub fn can_analyze(&self) -> bool {
        self.analysis != FlowStatus::InProgress
    }

    /// Whether the generate control is enabled.
    pub fn can_generate(&self) -> bool {
        self.generation != FlowStatus::InProgress
    }

    /// Validates the inputs and moves analysis to `InProgress`.
    ///
    /// Returns `None` when no call should be made: the flow is already in
    /// progress, or validation failed (the inline message is set).
    pub fn begin_analysis(&mut self) -> Option<AnalyzeRequest> {
        if !self.can_analyze() {
            warn!("Analysis already in progress; ignoring request");
            return None;
        }

        let reference = Some(self.form.product_url.as_str());
        match AnalyzeRequest::new(self.image.clone(), reference) {
            Ok(request) => {
                self.analysis = FlowStatus::InProgress;
                self.analysis_error = None;
                self.generation_error = None;
                Some(request)
            }
            Err(e) => {
                info!("Analysis not started: {}", e);
                self.analysis_error = Some(ANALYSIS_VALIDATION_MESSAGE.to_string());
                None
            }
        }
    }

    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult>) {
        match outcome {
            Ok(result) => {
                self.form.product_name = result.product_name;
                self.form.product_details = result.product_details;
                self.form.target_audience = result.target_audience;
                self.analysis = FlowStatus::Succeeded;
                self.analysis_error = None;
            }
            Err(e) => {
                error!("Product analysis failed: {}", e);
                self.analysis = FlowStatus::Failed;
                self.analysis_error = Some(ANALYSIS_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub async fn analyze(&mut self, service: &dyn AdCopyService) -> FlowStatus {
        if let Some(request) = self.begin_analysis() {
            let outcome = service.analyze_product(&request).await;
            self.finish_analysis(outcome);
        }
        self.analysis
    }

    /// Validates the form and moves generation to `InProgress`, clearing any
    /// previous result.
    pub fn begin_generation(&mut self) -> Option<AdRequest> {
        if !self.can_generate() {
            warn!("Generation already in progress; ignoring request");
            return None;
        }

        let request = AdRequest::new(
            &self.form.product_name,
            &self.form.product_details,
            Some(self.form.target_audience.as_str()),
            self.image.clone(),
        );
        match request {
            Ok(request) => {
                self.generation = FlowStatus::InProgress;
                self.generation_error = None;
                self.generated_ad = None;
                self.compliance = None;
                self.copied_at = None;
                Some(request)
            }
            Err(e) => {
                info!("Generation not started: {}", e);
                self.generation_error = Some(GENERATION_VALIDATION_MESSAGE.to_string());
                None
            }
        }
    }

    /// The displayed image comes from `request`, the one actually sent.
    pub fn finish_generation(&mut self, request: &AdRequest, outcome: Result<AdContent>) {
        match outcome {
            Ok(content) => {
                self.generated_ad = Some(GeneratedAd::from_content(&content, request.image()));
                self.compliance = Some(content.compliance);
                self.generation = FlowStatus::Succeeded;
                self.generation_error = None;
            }
            Err(e) => {
                error!("Ad generation failed: {}", e);
                self.generated_ad = None;
                self.compliance = None;
                self.generation = FlowStatus::Failed;
                self.generation_error = Some(GENERATION_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub async fn generate(&mut self, service: &dyn AdCopyService) -> FlowStatus {
        if let Some(request) = self.begin_generation() {
            let outcome = service.generate_ad(&request).await;
            self.finish_generation(&request, outcome);
        }
        self.generation
    }

    pub fn export_text(&self) -> Option<String> {
        self.generated_ad.as_ref().map(export::ad_as_text)
    }

    /// Copies the export text; returns `false` when there is nothing to copy.
    pub fn copy_all(&mut self, clipboard: &dyn Clipboard, now: Instant) -> Result<bool> {
        let Some(text) = self.export_text() else {
            return Ok(false);
        };
        clipboard.set_text(&text).map_err(|e| {
            error!("Failed to copy ad text: {}", e);
            e
        })?;
        self.copied_at = Some(now);
        Ok(true)
    }

    /// True for [`COPY_ACK_WINDOW`] after a successful copy.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.saturating_duration_since(at) < COPY_ACK_WINDOW)
            .unwrap_or(false)
    }

    pub fn download(&self, dir: &Path) -> Result<Option<PathBuf>> {
        match &self.generated_ad {
            Some(ad) => export::write_download(dir, &self.form.product_name, ad).map(Some),
            None => Ok(None),
        }
    }

    /// Share failures are logged, never surfaced. Returns whether the share
    /// went through.
    pub async fn share(&self, target: &dyn ShareTarget) -> bool {
        let Some(ad) = &self.generated_ad else {
            return false;
        };
        match target.share(&SharePayload::for_ad(ad)).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error while sharing: {}", e);
                false
            }
        }
    }
}
