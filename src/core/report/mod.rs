//! HTML report rendering for analysis results
//!
//! Every section is built as a plain string so the whole report can be
//! written into the result container in one go. Payload text is always
//! passed through [`escape_text`] before it lands in markup.

mod comparison;
mod cost;
mod rationale;
mod schema;
mod validation;

pub use comparison::{QueryComparison, render_query_comparison};
pub use cost::{CostItem, Impact, detect_cost_items, render_cost_analysis};
pub use rationale::{OptimizationArea, detect_optimization_areas, render_performance_metrics};
pub use schema::{SchemaSuggestion, detect_schema_suggestions, render_schema_suggestions};
pub use validation::{
    ValidationCheck, ValidationStatus, add_status_badges, detect_validation_checks,
    render_validation_report,
};

use crate::core::analysis::{AnalysisResult, NO_CHANGES, NO_RATIONALE};
use crate::core::extract::{extract_rationale, extract_sql};

/// Escape `&`, `<` and `>` so payload text cannot inject markup
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Wrap a section body with its icon header
pub fn format_section(title: &str, icon: &str, icon_class: &str, body: &str) -> String {
    format!(
        r#"
    <section class="results__section" style="--section-color: var(--{icon_class})">
        <div class="results__section-header">
            <i class="fas fa-{icon} {icon_class}"></i>
            <h2>{title}</h2>
        </div>
        {body}
    </section>
"#
    )
}

/// Render a SQL code block with a copy button.
///
/// `content` must already be escaped.
pub fn format_sql_block(label: &str, content: &str, icon: &str) -> String {
    let id = code_block_id();
    format!(
        r#"
    <div class="results__subsection">
        <div class="sql-header">
            <h3><i class="fas fa-{icon}"></i>{label}</h3>
            <button class="copy-btn" type="button" data-copy-target="{id}" onclick="copyToClipboard('{id}')" title="Copy to clipboard">
                <i class="fas fa-copy"></i>
                <span>Copy</span>
            </button>
        </div>
        <div class="sql-code-wrapper">
            <pre class="sql-code" id="{id}"><code class="language-sql">{content}</code></pre>
        </div>
    </div>
"#
    )
}

/// Render free text as line blocks, promoting `- ` / `• ` lines to list items.
///
/// `content` must already be escaped (it may carry trusted badge spans).
pub fn format_text_block(content: &str) -> String {
    let mut html = String::new();

    if content.contains("- ") || content.contains("• ") {
        for line in content.split('\n') {
            let trimmed = line.trim();
            if trimmed.starts_with("- ") || trimmed.starts_with("• ") {
                let item = line.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '•');
                html.push_str(&format!(
                    r#"<div class="bullet-item"><i class="fas fa-check-circle"></i>{item}</div>"#
                ));
            } else if line.is_empty() {
                html.push_str(r#"<div class="text-spacer"></div>"#);
            } else {
                html.push_str(&format!(r#"<div class="text-line">{line}</div>"#));
            }
        }
        return format!(r#"<div class="bullet-list">{html}</div>"#);
    }

    for line in content.split('\n') {
        if line.trim().is_empty() {
            html.push_str(r#"<div class="text-spacer"></div>"#);
        } else {
            html.push_str(&format!(r#"<div class="text-line">{line}</div>"#));
        }
    }
    format!(r#"<div class="text-block">{html}</div>"#)
}

/// Render the full report for one analysis result
pub fn render_report(result: &AnalysisResult) -> String {
    let original = result.original_query();
    let optimizer_output = result.optimized_query();
    let optimized_sql = extract_sql(optimizer_output);
    let extracted_rationale = extract_rationale(optimizer_output);

    let optimized_display = if optimized_sql.is_empty() {
        NO_CHANGES
    } else {
        optimized_sql
    };
    let query_section = format_section(
        "Query Comparison",
        "exchange-alt",
        "icon-queries",
        &format!(
            "{}{}{}",
            render_query_comparison(original, optimized_sql),
            format_sql_block("Original Query", &escape_text(original), "file-code"),
            format_sql_block(
                "Optimized Query",
                &escape_text(optimized_display),
                "check-circle"
            ),
        ),
    );

    let rationale_text = if !extracted_rationale.is_empty() {
        extracted_rationale
    } else {
        result.optimization_rationale().unwrap_or(NO_RATIONALE)
    };
    let rationale_section = format_section(
        "Optimization Rationale",
        "lightbulb",
        "icon-rationale",
        &format!(
            "{}{}",
            render_performance_metrics(rationale_text),
            format_text_block(&escape_text(rationale_text)),
        ),
    );

    let validation_text = result.validation_report();
    let validation_section = format_section(
        "Data Validation Report",
        "shield-alt",
        "icon-validation",
        &format!(
            "{}{}",
            render_validation_report(validation_text),
            format_text_block(&add_status_badges(&escape_text(validation_text))),
        ),
    );

    let cost_text = result.cost_estimation();
    let cost_section = format_section(
        "Cost & Performance Analysis",
        "chart-line",
        "icon-cost",
        &format!(
            "{}{}",
            render_cost_analysis(cost_text),
            format_text_block(&escape_text(cost_text)),
        ),
    );

    let schema_text = result.schema_suggestions();
    let schema_section = format_section(
        "Schema Optimization Suggestions",
        "database",
        "icon-schema",
        &format!(
            "{}{}",
            render_schema_suggestions(schema_text),
            format_text_block(&escape_text(schema_text)),
        ),
    );

    format!(
        "{query_section}{rationale_section}{validation_section}{cost_section}{schema_section}"
    )
}

/// Placeholder shown while a submission is in flight
pub fn render_loading() -> String {
    r#"
        <div class="loading">
            <i class="fas fa-spinner"></i>
            <p>Analyzing your query with AI agents...</p>
        </div>
    "#
    .to_string()
}

/// View for a non-2xx response
pub fn render_error(message: &str) -> String {
    render_failure("Error", message)
}

/// View for a thrown exception (network, decode, missing element)
pub fn render_exception(message: &str) -> String {
    render_failure("Exception", message)
}

fn render_failure(prefix: &str, message: &str) -> String {
    format!(
        r#"
        <div class="error">
            <i class="fas fa-exclamation-circle"></i>
            <span>{prefix}: {}</span>
        </div>
    "#,
        escape_text(message)
    )
}

/// Case-insensitive check for any of `needles` (given lower-case) in `text`
pub(crate) fn mentions_any(text: &str, needles: &[&str]) -> bool {
    let haystack = text.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Unique element id for a code block, `sql-` plus nine characters
fn code_block_id() -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("sql-{}", &token[..9])
}
