//! CLI that generates article hero images.

use anyhow::{Context, Result};
use article_restyle::hero::{self, GeminiBackend, GeneratorConfig, HeroGenerator};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hero-images")]
#[command(author, version, about = "Generate blog hero images with Gemini", long_about = None)]
struct Cli {
    /// List configured images and exit
    #[arg(long)]
    list: bool,

    /// Generate a single image from this prompt
    #[arg(long, value_name = "PROMPT")]
    single: Option<String>,

    /// Filename for --single
    #[arg(long, default_value = "custom-hero.png")]
    filename: String,

    /// Output directory
    #[arg(long, default_value = "assets/images")]
    output: PathBuf,

    /// YAML manifest replacing the built-in image list
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 630)]
    height: u32,

    /// Seconds to wait between API calls
    #[arg(long, default_value_t = 3)]
    delay: u64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    article_restyle::init_tracing(cli.verbose);

    let specs = match &cli.manifest {
        Some(path) => hero::load_manifest(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => hero::default_specs(),
    };

    if cli.list {
        hero::render_specs(&specs, &mut io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = match GeneratorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let config = config
        .size(cli.width, cli.height)
        .delay(Duration::from_secs(cli.delay))
        .output_dir(&cli.output);

    let generator = HeroGenerator::new(GeminiBackend::new(&config), &config);
    let mut out = io::stdout().lock();

    match &cli.single {
        Some(prompt) => {
            if generator
                .generate_single(prompt, &cli.filename, &config.output_dir, &mut out)
                .is_err()
            {
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            generator
                .generate_all(&specs, &config.output_dir, &mut out)
                .context("Hero generation failed")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
