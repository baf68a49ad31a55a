//! Application orchestration for the analyze and generate commands.

use crate::ai::{AdCopyService, GeminiAdClient};
use crate::export::{Clipboard, ShareTarget, SystemClipboard};
use crate::image::load_image;
use crate::models::Config;
use crate::render;
use crate::session::{FlowStatus, ProductForm, Session};
use crate::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Inputs for a standalone analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeCommand {
    pub image: Option<PathBuf>,
    pub product_url: Option<String>,
}

/// Inputs for ad generation plus the export actions to run afterwards.
#[derive(Debug, Clone, Default)]
pub struct GenerateCommand {
    pub product_name: Option<String>,
    pub product_details: Option<String>,
    pub target_audience: Option<String>,
    pub image: Option<PathBuf>,
    pub product_url: Option<String>,
    /// Run analysis first to pre-fill the form.
    pub analyze_first: bool,
    pub copy: bool,
    pub download_dir: Option<PathBuf>,
    pub share: bool,
}

/// What the command produced: the rendered view and whether its flow
/// succeeded.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub succeeded: bool,
}

/// Coordinates the session, the generation service, and export targets.
pub struct App {
    ads: Box<dyn AdCopyService>,
    clipboard: Box<dyn Clipboard>,
    share: Option<Box<dyn ShareTarget>>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub ads: Box<dyn AdCopyService>,
    pub clipboard: Box<dyn Clipboard>,
    pub share: Option<Box<dyn ShareTarget>>,
}

impl App {
    pub fn with_services(services: AppServices) -> Self {
        Self {
            ads: services.ads,
            clipboard: services.clipboard,
            share: services.share,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    ///
    /// A missing API key fails here, before any request is built.
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        info!("Generation provider: Gemini (model: {})", config.model);

        let ads = GeminiAdClient::from_config(&config, reqwest::Client::new());

        // A terminal has no native share sheet.
        Ok(Self::with_services(AppServices {
            ads: Box::new(ads),
            clipboard: Box::new(SystemClipboard::new()),
            share: None,
        }))
    }

    pub async fn analyze(&self, command: AnalyzeCommand) -> Result<Outcome> {
        let mut session = Session::new();
        if let Some(path) = &command.image {
            session.set_image(load_image(path).await?);
        }
        session.form.product_url = command.product_url.unwrap_or_default();

        let status = session.analyze(self.ads.as_ref()).await;

        Ok(Outcome {
            output: render::render_analysis(&session),
            succeeded: status == FlowStatus::Succeeded,
        })
    }

    pub async fn generate(&self, mut command: GenerateCommand) -> Result<Outcome> {
        let mut session = Session::with_form(ProductForm {
            product_url: command.product_url.take().unwrap_or_default(),
            ..ProductForm::default()
        });
        if let Some(path) = &command.image {
            session.set_image(load_image(path).await?);
        }

        let mut output = String::new();
        if command.analyze_first {
            if session.analyze(self.ads.as_ref()).await != FlowStatus::Succeeded {
                return Ok(Outcome {
                    output: render::render_analysis(&session),
                    succeeded: false,
                });
            }
            output.push_str(&render::render_analysis(&session));
            output.push('\n');
        }

        // Explicit values override what analysis pre-filled.
        if let Some(name) = command.product_name.take() {
            session.form.product_name = name;
        }
        if let Some(details) = command.product_details.take() {
            session.form.product_details = details;
        }
        if let Some(audience) = command.target_audience.take() {
            session.form.target_audience = audience;
        }

        let status = session.generate(self.ads.as_ref()).await;
        let succeeded = status == FlowStatus::Succeeded;

        if succeeded {
            self.run_exports(&mut session, &command).await;
        }

        output.push_str(&render::render_result(&session, Instant::now()));
        Ok(Outcome { output, succeeded })
    }

    async fn run_exports(&self, session: &mut Session, command: &GenerateCommand) {
        if command.copy {
            if let Err(e) = session.copy_all(self.clipboard.as_ref(), Instant::now()) {
                warn!("Copy to clipboard failed: {}", e);
            }
        }

        if let Some(dir) = &command.download_dir {
            match session.download(dir) {
                Ok(Some(path)) => info!("Downloaded ad to {}", path.display()),
                Ok(None) => {}
                Err(e) => warn!("Download failed: {}", e),
            }
        }

        if command.share {
            match &self.share {
                Some(target) => {
                    session.share(target.as_ref()).await;
                }
                None => warn!("Sharing is not available in this environment"),
            }
        }
    }
}
