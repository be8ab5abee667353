//! Hero image generation for article pages.
//!
//! Images are produced one at a time through an [`ImageBackend`], resized,
//! and written as PNG files. A failed image never stops the batch; the
//! generator pauses between attempts to stay under the API rate limit.

pub mod gemini;
pub mod raster;

pub use gemini::{GeminiBackend, GeneratorConfig};

use crate::error::{RestyleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

const BANNER_WIDTH: usize = 60;

/// Produces encoded image bytes from a text prompt.
pub trait ImageBackend {
    fn generate(&self, prompt: &str) -> Result<Vec<u8>>;
}

/// One image to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSpec {
    pub filename: String,
    pub prompt: String,
}

impl HeroSpec {
    pub fn new(filename: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    images: Vec<HeroSpec>,
}

/// Loads specs from a YAML manifest with an `images:` list.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<HeroSpec>> {
    let content = fs::read_to_string(path.as_ref())?;
    let manifest: Manifest = serde_yaml::from_str(&content).map_err(|e| {
        RestyleError::InvalidConfig(format!("Failed to parse image manifest: {}", e))
    })?;
    Ok(manifest.images)
}

/// The hero images for the portfolio blog articles.
pub fn default_specs() -> Vec<HeroSpec> {
    const STYLE: &str = "Clean modern design. Professional finance aesthetic.";
    [
        (
            "import-zerodha-portfolio-hero.png",
            "Professional blog hero image for investment portfolio import. Modern smartphone displaying portfolio dashboard with green growth charts, stock prices, and financial data. Clean navy blue gradient background. Professional investment finance aesthetic. High contrast, cinematic lighting. Landscape orientation 16:9.",
        ),
        (
            "manual-csv-portfolio-import-hero.png",
            "Professional blog hero image for CSV data import. Spreadsheet transforming into beautiful dashboard visualization, data flow with blue accents. Clean modern design. Professional finance aesthetic. High contrast, cinematic lighting. Landscape orientation 16:9.",
        ),
        (
            "setting-up-smart-alerts-hero.png",
            "Professional blog hero image for smart alerts. Bell notification icons with stock charts, alert dashboard interface, protective shield with financial graphs. Orange/gold accent color. {style} Landscape orientation 16:9.",
        ),
        (
            "ai-stock-discovery-hero.png",
            "Professional blog hero image for AI stock discovery. AI brain analyzing stock charts, neural network patterns over financial data, futuristic investment analysis. Purple accent color. {style} Landscape orientation 16:9.",
        ),
        (
            "portfolio-diversification-hero.png",
            "Professional blog hero image for portfolio diversification. Colorful pie chart showing asset allocation, diverse investment baskets, balanced portfolio visualization. Green accent color. {style} Landscape orientation 16:9.",
        ),
        (
            "introduction-to-investing-hero.png",
            "Professional blog hero image for introduction to investing. Seed growing into money tree, compound growth visualization, growth charts. Emerald green accent. {style} Landscape orientation 16:9.",
        ),
        (
            "getting-started-hero.png",
            "Professional blog hero image for portfolio tracking. Clean dashboard with portfolio metrics, real-time stock prices, returns visualization. Sky blue accent. {style} Landscape orientation 16:9.",
        ),
        (
            "ai-powered-stock-discovery-hero.png",
            "Professional blog hero image for AI-powered stock discovery revolution. Futuristic AI interface analyzing Indian stock market data, machine learning visualization, robot analyzing charts. Blue and purple gradient. {style} Landscape 16:9.",
        ),
        (
            "understanding-diversification-hero.png",
            "Professional blog hero image for understanding portfolio diversification. Multiple baskets with different colored eggs, pie chart segments, risk balance scale. Green and blue accents. {style} Landscape 16:9.",
        ),
    ]
    .into_iter()
    .map(|(filename, prompt)| {
        HeroSpec::new(
            filename,
            format!("Generate an image: {}", prompt.replace("{style}", STYLE)),
        )
    })
    .collect()
}

/// Tally of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub successful: usize,
    pub failed: usize,
}

type Sleeper = Box<dyn Fn(Duration)>;

/// Drives an [`ImageBackend`] over a list of specs.
pub struct HeroGenerator<B> {
    backend: B,
    width: u32,
    height: u32,
    delay: Duration,
    sleep: Sleeper,
}

impl<B: ImageBackend> HeroGenerator<B> {
    pub fn new(backend: B, config: &GeneratorConfig) -> Self {
        Self {
            backend,
            width: config.width,
            height: config.height,
            delay: config.delay,
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// Replaces the pause function used between attempts.
    pub fn with_sleeper(mut self, sleep: impl Fn(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    /// Generates one image; generation failures are logged and reported as `Ok(false)`.
    ///
    /// Only a failure to write to `out` is returned as an error.
    pub fn generate_one(
        &self,
        prompt: &str,
        output: &Path,
        out: &mut impl Write,
    ) -> io::Result<bool> {
        match self.try_generate(prompt, output) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(path = %output.display(), error = %e, "image generation failed");
                writeln!(out, "   Error: {e}")?;
                Ok(false)
            }
        }
    }

    fn try_generate(&self, prompt: &str, output: &Path) -> Result<()> {
        let bytes = self.backend.generate(prompt)?;
        if bytes.is_empty() {
            return Err(RestyleError::Generation {
                message: "backend returned no image data".into(),
            });
        }
        raster::resize_to_png(&bytes, output, self.width, self.height)
    }

    /// Generates every spec in order into `output_dir`.
    pub fn generate_all(
        &self,
        specs: &[HeroSpec],
        output_dir: &Path,
        out: &mut impl Write,
    ) -> Result<GenerationSummary> {
        fs::create_dir_all(output_dir)?;

        let rule = "=".repeat(BANNER_WIDTH);
        writeln!(out, "{rule}")?;
        writeln!(out, "Blog Hero Image Generator")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Output directory: {}", output_dir.display())?;
        writeln!(out, "Images to generate: {}", specs.len())?;

        let mut summary = GenerationSummary::default();
        for (i, spec) in specs.iter().enumerate() {
            writeln!(out, "\n[{}/{}] Generating: {}", i + 1, specs.len(), spec.filename)?;
            writeln!(out, "   Prompt: {}...", preview(&spec.prompt, 60))?;

            let path = output_dir.join(&spec.filename);
            if self.generate_one(&spec.prompt, &path, &mut *out)? {
                writeln!(out, "   Saved: {} ({})", spec.filename, size_kb(&path)?)?;
                summary.successful += 1;
            } else {
                writeln!(out, "   Failed to generate image")?;
                summary.failed += 1;
            }

            if i + 1 < specs.len() {
                (self.sleep)(self.delay);
            }
        }

        writeln!(out, "\n{rule}")?;
        writeln!(
            out,
            "COMPLETE: {} successful, {} failed",
            summary.successful, summary.failed
        )?;
        writeln!(out, "{rule}")?;
        info!(
            successful = summary.successful,
            failed = summary.failed,
            "hero generation finished"
        );

        writeln!(out, "\nGenerated files:")?;
        for file in list_pngs(output_dir)? {
            let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            writeln!(out, "  - {} ({})", name, size_kb(&file)?)?;
        }

        Ok(summary)
    }

    /// Generates a single image, returning an error when it fails.
    pub fn generate_single(
        &self,
        prompt: &str,
        filename: &str,
        output_dir: &Path,
        out: &mut impl Write,
    ) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(filename);

        writeln!(out, "Generating: {filename}")?;
        writeln!(out, "Prompt: {}...", preview(prompt, 80))?;

        if self.generate_one(prompt, &path, &mut *out)? {
            writeln!(out, "Saved: {} ({})", path.display(), size_kb(&path)?)?;
            Ok(path)
        } else {
            writeln!(out, "Failed to generate image")?;
            Err(RestyleError::Generation {
                message: format!("could not generate {filename}"),
            })
        }
    }
}

/// Writes the numbered list of configured specs.
pub fn render_specs(specs: &[HeroSpec], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Configured hero images:")?;
    writeln!(out, "{}", "-".repeat(BANNER_WIDTH))?;
    for (i, spec) in specs.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, spec.filename)?;
        writeln!(out, "   {}...", preview(&spec.prompt, 70))?;
        writeln!(out)?;
    }
    Ok(())
}

fn preview(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

fn size_kb(path: &Path) -> io::Result<String> {
    let bytes = fs::metadata(path)?.len();
    Ok(format!("{:.1} KB", bytes as f64 / 1024.0))
}

fn list_pngs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if path.is_file() && is_png {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
