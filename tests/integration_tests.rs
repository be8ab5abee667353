//! Integration tests for the restyle engine.

use article_restyle::prelude::*;
use article_restyle::report::render_header;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LEGACY: &str = include_str!("fixtures/legacy_article.html");
const CLEAN: &str = include_str!("fixtures/clean_article.html");

fn create_site(dir: &Path) {
    fs::create_dir_all(dir.join("posts/2025/10")).unwrap();
    fs::create_dir_all(dir.join("posts/2025/11")).unwrap();

    fs::write(dir.join("posts/2025/10/portfolio-import.html"), LEGACY).unwrap();
    fs::write(
        dir.join("posts/2025/10/alerts.html"),
        r#"<div class="info-box" style="padding: 1rem;"><p>Alerts</p></div>"#,
    )
    .unwrap();
    fs::write(dir.join("posts/2025/11/plain.html"), "<p>plain text</p>").unwrap();
    fs::write(dir.join("posts/2025/11/notes.txt"), r#"<table style="x">"#).unwrap();
    fs::write(dir.join("index.html"), r#"<table style="x">"#).unwrap();
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = walkdir_files(dir)
        .into_iter()
        .map(|p| {
            let bytes = fs::read(&p).unwrap();
            (p.to_string_lossy().into_owned(), bytes)
        })
        .collect();
    files.sort();
    files
}

fn walkdir_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walkdir_files(&path));
        } else {
            out.push(path);
        }
    }
    out
}

fn console(restyle: &Restyle) -> String {
    let mut out = Vec::new();
    render_header(&mut out).unwrap();
    restyle.run_batch().unwrap().render(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_full_article_rewrite() {
    let rewriter = RuleSet::article_defaults().compile().unwrap();
    let result = rewriter.rewrite(LEGACY);

    assert!(result.changed);
    assert_eq!(result.text, CLEAN);
}

#[test]
fn test_every_builtin_rule_fires_on_fixture() {
    let rules = RuleSet::article_defaults();
    let (_, hits) = rules.compile().unwrap().rewrite_traced(LEGACY);

    let fired: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(fired, rules.names());
}

#[test]
fn test_idempotent_per_rule() {
    for rule in RuleSet::article_defaults().iter() {
        let single = RuleSet::new(vec![rule.clone()]).compile().unwrap();
        let once = single.rewrite(LEGACY);
        let twice = single.rewrite(&once.text);

        assert!(once.changed, "rule {} did not match fixture", rule.name);
        assert!(!twice.changed, "rule {} is not idempotent", rule.name);
    }
}

#[test]
fn test_idempotent_full_table() {
    let rewriter = RuleSet::article_defaults().compile().unwrap();

    assert!(rewriter.is_idempotent_on(LEGACY));
    assert_eq!(rewriter.rewrite(CLEAN), RewriteResult {
        text: CLEAN.to_string(),
        changed: false,
    });
}

#[test]
fn test_clean_input_is_noop() {
    let rewriter = RuleSet::article_defaults().compile().unwrap();
    for doc in [
        "<p>plain text</p>",
        "",
        r#"<div class="key-takeaways">already clean</div>"#,
        r#"<table class="data"><tr><td>1</td></tr></table>"#,
    ] {
        let result = rewriter.rewrite(doc);
        assert_eq!(result.text, doc);
        assert!(!result.changed);
    }
}

#[test]
fn test_partial_patterns_left_untouched() {
    let rewriter = RuleSet::article_defaults().compile().unwrap();
    // Near misses: wrong spacing, missing closing quote, different class order.
    let doc = concat!(
        r#"<ul style="list-style: none;padding: 0;">"#,
        r#"<div class="info-box" style="unterminated>"#,
        r#"<div style="padding: 1rem;" class="step">"#,
    );

    assert!(!rewriter.rewrite(doc).changed);
}

#[test]
fn test_rule_order_is_load_bearing() {
    let broad = Rule::pattern("any-table", r#"<table style="[^"]*">"#, "<table>");
    let specific = Rule::literal(
        "full-width-table",
        r#"<table style="width:100%">"#,
        r#"<table class="full-width">"#,
    );
    let doc = r#"<table style="width:100%">"#;

    let mut rules = RuleSet::new(vec![broad, specific]);
    let broad_first = rules.compile().unwrap().rewrite(doc);

    rules.swap(0, 1);
    let specific_first = rules.compile().unwrap().rewrite(doc);

    assert_eq!(broad_first.text, "<table>");
    assert_eq!(specific_first.text, r#"<table class="full-width">"#);
}

#[test]
fn test_batch_run_console_output() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    let output = console(&Restyle::in_project(dir.path()));
    let rule = "-".repeat(50);

    assert_eq!(
        output,
        format!(
            "Cleaning inline styles from blog posts...\n{rule}\n  Updated: posts/2025/10/alerts.html\n  Updated: posts/2025/10/portfolio-import.html\n  No changes: posts/2025/11/plain.html\n{rule}\nUpdated 2/3 posts\n"
        )
    );

    // Files outside the content directory or with other extensions are untouched.
    assert_eq!(fs::read_to_string(dir.path().join("index.html")).unwrap(), r#"<table style="x">"#);
    assert_eq!(
        fs::read_to_string(dir.path().join("posts/2025/11/notes.txt")).unwrap(),
        r#"<table style="x">"#
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("posts/2025/10/portfolio-import.html")).unwrap(),
        CLEAN
    );
}

#[test]
fn test_dry_run_is_pure() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    let before = snapshot(dir.path());

    let report = Restyle::in_project(dir.path()).dry_run().run_batch().unwrap();

    assert_eq!(report.summary_line(), "Would update 2/3 posts");
    assert!(
        report
            .entries
            .iter()
            .any(|e| e.status == FileStatus::WouldUpdate)
    );
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_traversal_is_deterministic() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    let restyle = Restyle::in_project(dir.path()).dry_run();

    assert_eq!(console(&restyle), console(&restyle));
}

#[test]
fn test_second_live_run_reports_no_changes() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    Restyle::in_project(dir.path()).run_batch().unwrap();
    let report = Restyle::in_project(dir.path()).run_batch().unwrap();

    assert_eq!(report.summary_line(), "Updated 0/3 posts");
}

#[test]
fn test_single_missing_file_touches_nothing() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    let before = snapshot(dir.path());

    let result = Restyle::in_project(dir.path()).run_single("posts/2025/10/missing.html");

    assert!(matches!(result, Err(RestyleError::FileNotFound(_))));
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_single_file_only_touches_that_file() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());

    let report = Restyle::in_project(dir.path())
        .run_single("posts/2025/10/alerts.html")
        .unwrap();

    let mut out = Vec::new();
    report.render(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  Updated: posts/2025/10/alerts.html\n"
    );
    assert!(
        fs::read_to_string(dir.path().join("posts/2025/10/portfolio-import.html"))
            .unwrap()
            .contains("style=")
    );
}

#[test]
fn test_rules_file_from_config() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    fs::write(
        dir.path().join("restyle.yaml"),
        "rules_file: tidy.json\nexclude:\n  - \"2025/10/portfolio-*\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("tidy.json"),
        r#"{"rules": [{"name": "info", "kind": "literal", "pattern": " style=\"padding: 1rem;\"", "replacement": ""}]}"#,
    )
    .unwrap();

    let config = RestyleConfig::discover(dir.path()).unwrap();
    let report = Restyle::from_config(dir.path(), &config)
        .unwrap()
        .run_batch()
        .unwrap();

    assert_eq!(report.summary_line(), "Updated 1/2 posts");
    assert_eq!(
        fs::read_to_string(dir.path().join("posts/2025/10/alerts.html")).unwrap(),
        r#"<div class="info-box"><p>Alerts</p></div>"#
    );
}

#[test]
fn test_include_from_config_limits_batch() {
    let dir = TempDir::new().unwrap();
    create_site(dir.path());
    fs::write(dir.path().join("restyle.yaml"), "include:\n  - \"2025/11/**\"\n").unwrap();
    let before = fs::read_to_string(dir.path().join("posts/2025/10/alerts.html")).unwrap();

    let config = RestyleConfig::discover(dir.path()).unwrap();
    let report = Restyle::from_config(dir.path(), &config)
        .unwrap()
        .run_batch()
        .unwrap();

    assert_eq!(report.summary_line(), "Updated 0/1 posts");
    assert_eq!(
        fs::read_to_string(dir.path().join("posts/2025/10/alerts.html")).unwrap(),
        before
    );
}
