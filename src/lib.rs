//! # Article Restyle
//!
//! Rewrites legacy inline-styled article HTML into semantic, class-based
//! markup using an ordered table of text rules.
//!
//! This is not an HTML parser. Rules are literal or regex matches over raw
//! text, applied once each, top to bottom. Markup that does not match a
//! known legacy pattern exactly is left untouched.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use article_restyle::prelude::*;
//!
//! // Preview which posts under ./site/posts would change
//! let report = Restyle::in_project("./site")
//!     .content_dir("posts")
//!     .dry_run()
//!     .run_batch()?;
//!
//! println!("{}", report.summary_line());
//! # Ok::<(), article_restyle::error::RestyleError>(())
//! ```
//!
//! ## Rewriting Text Directly
//!
//! ```rust
//! use article_restyle::prelude::*;
//!
//! let rewriter = RuleSet::article_defaults().compile()?;
//! let result = rewriter.rewrite(r#"<table style="width:100%">"#);
//!
//! assert_eq!(result.text, "<table>");
//! assert!(result.changed);
//! # Ok::<(), article_restyle::error::RestyleError>(())
//! ```
//!
//! ## Custom Rule Tables
//!
//! Rule tables are data and can be loaded from YAML or JSON:
//!
//! ```rust
//! use article_restyle::prelude::*;
//!
//! let rules = RuleSet::from_yaml_str(r#"
//! rules:
//!   - name: banner
//!     pattern: '<div class="banner" style="[^"]*">'
//!     replacement: '<div class="banner">'
//! "#)?;
//!
//! let out = rules.compile()?.rewrite(r#"<div class="banner" style="color: red">"#);
//! assert_eq!(out.text, r#"<div class="banner">"#);
//! # Ok::<(), article_restyle::error::RestyleError>(())
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod hero;
pub mod matcher;
pub mod report;
pub mod restyle;
pub mod rules;
pub mod transform;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::RestyleConfig;
    pub use crate::error::{RestyleError, Result};
    pub use crate::hero::{
        GeminiBackend, GenerationSummary, GeneratorConfig, HeroGenerator, HeroSpec, ImageBackend,
    };
    pub use crate::matcher::FileMatcher;
    pub use crate::report::{FileOutcome, FileStatus, RunMode, RunReport};
    pub use crate::restyle::Restyle;
    pub use crate::rules::{Rule, RuleKind, RuleSet};
    pub use crate::transform::{
        FileChange, RewriteResult, Rewriter, RuleHit, TextTransform, rewrite_file,
    };
}

pub use prelude::*;

/// Installs the stderr `tracing` subscriber used by the binaries.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over `warn`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "article_restyle=debug"
    } else {
        "article_restyle=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
