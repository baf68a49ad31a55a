use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shopping_ad_generator::app::{AnalyzeCommand, App, GenerateCommand, Outcome};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "shopping-ad-generator")]
#[command(about = "Generate shopping ad copy and a compliance verdict for a product")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Guess name, details and audience from an image or a product link.
    Analyze(AnalyzeArgs),
    /// Generate title, description, category and compliance verdict.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// PNG, JPEG or WEBP product image (up to 4MB).
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Product page link; described from general knowledge, never fetched.
    #[arg(long, value_name = "URL")]
    url: Option<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    details: Option<String>,

    /// Defaults to "general" when omitted.
    #[arg(long)]
    audience: Option<String>,

    /// PNG, JPEG or WEBP product image (up to 4MB).
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Product page link used by --analyze.
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Pre-fill name, details and audience by analyzing --image or --url first.
    #[arg(long)]
    analyze: bool,

    /// Copy the generated ad text to the clipboard.
    #[arg(long)]
    copy: bool,

    /// Save the generated ad text into this directory.
    #[arg(long, value_name = "DIR")]
    download: Option<PathBuf>,

    /// Share the generated ad (when the environment supports it).
    #[arg(long)]
    share: bool,
}

impl From<AnalyzeArgs> for AnalyzeCommand {
    fn from(args: AnalyzeArgs) -> Self {
        Self {
            image: args.image,
            product_url: args.url,
        }
    }
}

impl From<GenerateArgs> for GenerateCommand {
    fn from(args: GenerateArgs) -> Self {
        Self {
            product_name: args.name,
            product_details: args.details,
            target_audience: args.audience,
            image: args.image,
            product_url: args.url,
            analyze_first: args.analyze,
            copy: args.copy,
            download_dir: args.download,
            share: args.share,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopping_ad_generator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::Analyze(args) => app.analyze(args.into()).await,
        Command::Generate(args) => app.generate(args.into()).await,
    };

    match result {
        Ok(Outcome { output, succeeded }) => {
            print!("{}", output);
            if !succeeded {
                std::process::exit(1);
            }
            info!("Done");
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
