//! Provider-agnostic request builders for the Analyze and Generate operations.
//!
//! Both types validate on construction, so holding one means a call may be
//! issued.

use crate::models::ImagePayload;
use crate::{prompts, Error, Result};

/// Audience filler used when the user left the field empty.
pub const DEFAULT_AUDIENCE: &str = "general";

/// Input for the Analyze operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeRequest {
    /// Attached as an inline binary part.
    Image(ImagePayload),
    /// Embedded in the instruction text; the model answers from general
    /// knowledge and never fetches it.
    Reference(String),
}

impl AnalyzeRequest {
    /// An image wins over a reference when both are present. A blank
    /// reference counts as absent.
    pub fn new(image: Option<ImagePayload>, reference: Option<&str>) -> Result<Self> {
        if let Some(image) = image {
            return Ok(Self::Image(image));
        }

        match reference.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reference) => Ok(Self::Reference(reference.to_string())),
            None => Err(Error::Validation(
                "nothing to analyze: provide an image or a product reference".to_string(),
            )),
        }
    }

    pub fn instruction(&self) -> String {
        let intro = prompts::ANALYZE_INTRO.trim_end();
        match self {
            Self::Image(_) => prompts::render(prompts::ANALYZE_IMAGE, &[("intro", intro)]),
            Self::Reference(reference) => prompts::render(
                prompts::ANALYZE_REFERENCE,
                &[("intro", intro), ("reference", reference.as_str())],
            ),
        }
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        match self {
            Self::Image(image) => Some(image),
            Self::Reference(_) => None,
        }
    }
}

/// Input for the Generate operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdRequest {
    product_name: String,
    product_details: String,
    target_audience: Option<String>,
    image: Option<ImagePayload>,
}

impl AdRequest {
    pub fn new(
        product_name: &str,
        product_details: &str,
        target_audience: Option<&str>,
        image: Option<ImagePayload>,
    ) -> Result<Self> {
        if product_name.trim().is_empty() || product_details.trim().is_empty() {
            return Err(Error::Validation(
                "product name and product details are required".to_string(),
            ));
        }

        Ok(Self {
            product_name: product_name.to_string(),
            product_details: product_details.to_string(),
            target_audience: target_audience
                .filter(|a| !a.trim().is_empty())
                .map(str::to_string),
            image,
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn product_details(&self) -> &str {
        &self.product_details
    }

    pub fn target_audience(&self) -> &str {
        self.target_audience.as_deref().unwrap_or(DEFAULT_AUDIENCE)
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn instruction(&self) -> String {
        let image_guidance = if self.image.is_some() {
            prompts::GENERATE_IMAGE_GUIDANCE
        } else {
            ""
        };

        prompts::render(
            prompts::GENERATE_AD,
            &[
                ("product_name", self.product_name.as_str()),
                ("product_details", self.product_details.as_str()),
                ("target_audience", self.target_audience()),
                ("image_guidance", image_guidance),
            ],
        )
    }
}
