//! Validation badges and inline status highlighting

use derive_more::Display;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Outcome shown on a validation badge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ValidationStatus {
    #[display("pass")]
    Pass,
    #[display("warning")]
    Warning,
    #[display("fail")]
    Fail,
    #[display("info")]
    Info,
}

impl ValidationStatus {
    pub fn color(&self) -> &'static str {
        match self {
            ValidationStatus::Pass => "#10b981",
            ValidationStatus::Warning => "#f59e0b",
            ValidationStatus::Fail => "#ef4444",
            ValidationStatus::Info => "#3b82f6",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ValidationStatus::Pass => "check-circle",
            ValidationStatus::Warning => "exclamation-triangle",
            ValidationStatus::Fail => "times-circle",
            ValidationStatus::Info => "info-circle",
        }
    }
}

/// A detected validation aspect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationCheck {
    pub title: &'static str,
    pub icon: &'static str,
    pub status: ValidationStatus,
}

static SYNTAX_PASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)syntax.*pass").expect("valid regex"));
static SYNTAX_FAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)syntax.*fail").expect("valid regex"));
static COMPAT_PASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)compatibility.*pass|compatible").expect("valid regex"));
static COMPAT_WARNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)compatibility.*warning").expect("valid regex"));
static SAFETY_PASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)safety.*pass|safe").expect("valid regex"));
static SAFETY_WARNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)safety.*warning|risk").expect("valid regex"));
static REWRITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rewrite").expect("valid regex"));

static STATUS_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(pass|success|compatible|safe|warning|caution|review|error|fail|unsafe|risk|info|note|recommended)\b",
    )
    .expect("valid regex")
});

/// Scan a validation report for the fixed set of checks, in display order
pub fn detect_validation_checks(text: &str) -> Vec<ValidationCheck> {
    let mut checks = Vec::new();
    let mut push = |title, icon, status| {
        checks.push(ValidationCheck {
            title,
            icon,
            status,
        })
    };

    if SYNTAX_PASS.is_match(text) {
        push("Syntax Compliance", "code", ValidationStatus::Pass);
    } else if SYNTAX_FAIL.is_match(text) {
        push("Syntax Compliance", "code", ValidationStatus::Fail);
    }

    if COMPAT_PASS.is_match(text) {
        push("MariaDB Compatibility", "database", ValidationStatus::Pass);
    } else if COMPAT_WARNING.is_match(text) {
        push("MariaDB Compatibility", "database", ValidationStatus::Warning);
    }

    if SAFETY_PASS.is_match(text) {
        push("Safety Assessment", "shield-alt", ValidationStatus::Pass);
    } else if SAFETY_WARNING.is_match(text) {
        push("Safety Assessment", "shield-alt", ValidationStatus::Warning);
    }

    if REWRITE.is_match(text) {
        push("Recommended Rewrites", "edit", ValidationStatus::Info);
    }

    checks
}

pub fn render_validation_report(text: &str) -> String {
    let items: String = detect_validation_checks(text)
        .iter()
        .map(|check| {
            format!(
                r#"
                    <div class="validation-item validation-item--{status}">
                        <div class="validation-item__icon" style="color: {color}">
                            <i class="fas fa-{icon}"></i>
                        </div>
                        <div class="validation-item__content">
                            <div class="validation-item__title">{title}</div>
                            <div class="validation-item__status">
                                <i class="fas fa-{status_icon}"></i>
                                <span>{label}</span>
                            </div>
                        </div>
                    </div>
                "#,
                status = check.status,
                color = check.status.color(),
                icon = check.icon,
                title = check.title,
                status_icon = check.status.icon(),
                label = check.status.to_string().to_uppercase(),
            )
        })
        .collect();

    format!(
        r#"
        <div class="validation-report">
            <div class="validation-grid">
                {items}
            </div>
        </div>
    "#
    )
}

/// Wrap status words in colored badge spans.
///
/// Runs over already escaped text; the original casing of each word is kept.
pub fn add_status_badges(escaped: &str) -> String {
    STATUS_WORD_REGEX
        .replace_all(escaped, |caps: &Captures| {
            let word = &caps[1];
            let class = match word.to_lowercase().as_str() {
                "pass" | "success" | "compatible" | "safe" => "badge-success",
                "warning" | "caution" | "review" => "badge-warning",
                "error" | "fail" | "unsafe" | "risk" => "badge-error",
                _ => "badge-info",
            };
            format!(r#"<span class="badge {class}">{word}</span>"#)
        })
        .into_owned()
}
