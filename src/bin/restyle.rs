//! CLI that cleans inline styles from article pages.

use anyhow::{Context, Result};
use article_restyle::diff::{colorized_diff, unified_diff};
use article_restyle::prelude::*;
use article_restyle::report::render_header;
use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "restyle")]
#[command(author, version, about = "Replace inline styles in article HTML with CSS classes", long_about = None)]
struct Cli {
    /// Preview changes without writing
    #[arg(long)]
    dry_run: bool,

    /// Process a single file (path relative to the project root)
    #[arg(long, value_name = "PATH")]
    single: Option<PathBuf>,

    /// Project root containing the content directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config file (default: restyle.yaml/.yml/.json in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Content directory relative to the root (overrides config)
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// File extension to process (overrides config)
    #[arg(short, long)]
    extension: Option<String>,

    /// Glob pattern to restrict the run to, relative to the content directory
    #[arg(long)]
    include: Vec<String>,

    /// Glob pattern to exclude, relative to the content directory
    #[arg(long)]
    exclude: Vec<String>,

    /// Rule table file, YAML or JSON (overrides config)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// With --dry-run, print a diff for every file that would change
    #[arg(long)]
    diff: bool,

    /// Colorize diffs
    #[arg(long)]
    color: bool,

    /// Print the rule table in application order and exit
    #[arg(long)]
    list_rules: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    article_restyle::init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => RestyleConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RestyleConfig::discover(&cli.root).context("Failed to load project config")?,
    };
    if let Some(dir) = &cli.content_dir {
        config.content_dir = dir.clone();
    }
    if let Some(ext) = &cli.extension {
        config.extension = ext.trim_start_matches('.').to_string();
    }
    if let Some(rules) = &cli.rules {
        config.rules_file = Some(rules.clone());
    }
    config.include.extend(cli.include.iter().cloned());
    config.exclude.extend(cli.exclude.iter().cloned());

    if cli.list_rules {
        return cmd_list_rules(&cli.root, &config);
    }

    let mut restyle =
        Restyle::from_config(&cli.root, &config).context("Failed to load rule table")?;
    if cli.dry_run {
        restyle = restyle.dry_run();
    }

    let show_diff = cli.diff && cli.dry_run;
    let color = cli.color;
    let root = restyle.root();
    let mut diffs = Vec::new();
    let collect = |change: &FileChange| {
        if show_diff {
            let path = change.path.strip_prefix(root).unwrap_or(&change.path);
            diffs.push(render_diff(change, path, color));
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_header(&mut out)?;

    let report = match &cli.single {
        Some(relative) => match restyle.run_single_with(relative, collect) {
            Ok(report) => report,
            Err(RestyleError::FileNotFound(path)) => {
                writeln!(out, "  File not found: {}", path.display())?;
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(anyhow::Error::from(e).context("Restyle failed")),
        },
        None => restyle.run_batch_with(collect).context("Restyle failed")?,
    };

    report.render(&mut out)?;
    for diff in diffs {
        writeln!(out, "\n{diff}")?;
    }

    Ok(ExitCode::SUCCESS)
}

fn render_diff(change: &FileChange, path: &Path, color: bool) -> String {
    if color {
        colorized_diff(&change.original, &change.transformed, path)
    } else {
        unified_diff(&change.original, &change.transformed, path)
    }
}

fn cmd_list_rules(root: &Path, config: &RestyleConfig) -> Result<ExitCode> {
    let rules = config.rule_set(root).context("Failed to load rule table")?;
    let rewriter = rules.compile().context("Invalid rule table")?;
    println!("Rules ({}), applied in order:", rewriter.len());
    for (i, line) in rewriter.describe().iter().enumerate() {
        println!("  {:>2}. {}", i + 1, line);
    }
    Ok(ExitCode::SUCCESS)
}
