//! Built-in rule table for blog article pages.

use super::Rule;

/// Returns the article rules in application order.
///
/// Every replacement drops the `style` attribute its matcher requires,
/// so a second pass over rewritten text finds nothing to do.
pub(super) fn rules() -> Vec<Rule> {
    vec![
        // Article container
        Rule::literal(
            "article-container",
            r#"<article class="article-content container">"#,
            r#"<article class="article-content">"#,
        ),
        // Key takeaways box
        Rule::pattern(
            "key-takeaways",
            r#"<div class="key-takeaways" style="[^"]*">"#,
            r#"<div class="key-takeaways">"#,
        ),
        Rule::literal(
            "key-takeaways-heading",
            r#"<h3 style="color: white; margin-bottom: 1rem;">Key Takeaways</h3>"#,
            "<h3>Key Takeaways</h3>",
        ),
        Rule::literal(
            "key-takeaways-list",
            r#"<ul style="list-style: none; padding: 0;">"#,
            "<ul>",
        ),
        Rule::literal(
            "key-takeaways-item",
            r#"<li style="margin-bottom: 0.75rem;">"#,
            "<li>",
        ),
        // Callouts
        Rule::pattern(
            "info-box",
            r#"<div class="info-box" style="[^"]*">"#,
            r#"<div class="info-box">"#,
        ),
        Rule::literal(
            "warning-box",
            r#"<div style="background: #fef2f2; border-left: 4px solid #ef4444; padding: 1.5rem; margin: 1.5rem 0; border-radius: 0 8px 8px 0;">"#,
            r#"<div class="warning-box">"#,
        ),
        Rule::pattern(
            "success-box",
            r#"<div style="background: #f0fdf4; border-left: 4px solid #22c55e;[^"]*">"#,
            r#"<div class="success-box">"#,
        ),
        // Tables
        Rule::pattern("table", r#"<table style="[^"]*">"#, "<table>"),
        Rule::pattern("table-head", r#"<thead style="[^"]*">"#, "<thead>"),
        Rule::pattern("table-header-cell", r#"<th style="[^"]*">"#, "<th>"),
        Rule::pattern("table-cell", r#"<td style="[^"]*">"#, "<td>"),
        Rule::pattern("table-row", r#"<tr style="[^"]*">"#, "<tr>"),
        // Call to action
        Rule::pattern(
            "cta-box",
            r#"<div class="cta-box" style="[^"]*">"#,
            r#"<div class="cta-box">"#,
        ),
        Rule::literal(
            "cta-heading",
            r#"<h3 style="color: white; font-size: 2rem; margin: 0 0 1rem 0;">"#,
            "<h3>",
        ),
        Rule::literal(
            "cta-text",
            r#"<p style="font-size: 1.2rem; margin-bottom: 1.5rem;">"#,
            "<p>",
        ),
        Rule::pattern(
            "cta-button",
            r#"<a href="([^"]*)" class="cta-button" style="[^"]*">"#,
            r#"<a href="${1}" class="cta-button">"#,
        ),
        // Related posts
        Rule::pattern(
            "related-posts",
            r#"<div class="related-posts" style="[^"]*">"#,
            r#"<div class="related-posts">"#,
        ),
        Rule::pattern(
            "related-posts-heading",
            r#"<h3 style="font-size: 1\.5rem; margin-bottom: 1\.5rem;">([^<]*)</h3>"#,
            "<h3>${1}</h3>",
        ),
        Rule::literal(
            "related-posts-grid",
            r#"<div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 1.5rem;">"#,
            r#"<div class="related-posts-grid">"#,
        ),
        Rule::literal(
            "related-post-card",
            r#"<div style="border: 1px solid #e2e8f0; border-radius: 8px; padding: 1.5rem;">"#,
            r#"<div class="related-post-card">"#,
        ),
        Rule::pattern(
            "related-post-link",
            r#"<h4 style="margin: 0 0 0\.5rem 0;"><a href="([^"]*)" style="color: #0ea5e9;">([^<]*)</a></h4>"#,
            r#"<h4><a href="${1}">${2}</a></h4>"#,
        ),
        Rule::literal(
            "related-post-excerpt",
            r#"<p style="margin: 0; color: #64748b;">"#,
            "<p>",
        ),
        // Step indicators
        Rule::pattern(
            "step",
            r#"<div class="step" style="[^"]*">"#,
            r#"<div class="step">"#,
        ),
        Rule::pattern(
            "step-number",
            r#"<span class="step-number" style="[^"]*">"#,
            r#"<span class="step-number">"#,
        ),
        // Related grid
        Rule::pattern(
            "related-grid",
            r#"<div class="related-grid" style="[^"]*">"#,
            r#"<div class="related-grid">"#,
        ),
        // CTA subtext
        Rule::pattern(
            "cta-subtext",
            r#"<p class="cta-subtext" style="[^"]*">"#,
            r#"<p class="cta-subtext">"#,
        ),
    ]
}
