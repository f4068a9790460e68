//! Before/after diagram for the original and optimized query

/// Line metrics for the query comparison cards
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryComparison {
    pub original_lines: usize,
    pub optimized_lines: usize,
}

impl QueryComparison {
    pub fn new(original: &str, optimized: &str) -> Self {
        Self {
            original_lines: line_count(original),
            optimized_lines: line_count(optimized),
        }
    }

    /// Percentage of lines removed, 0 unless the optimized query is shorter
    pub fn improvement(&self) -> u32 {
        if self.optimized_lines >= self.original_lines {
            return 0;
        }
        let removed = (self.original_lines - self.optimized_lines) as f64;
        (removed / self.original_lines as f64 * 100.0).round() as u32
    }
}

/// Newline-separated segments; an empty string still counts as one line
fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

pub fn render_query_comparison(original: &str, optimized: &str) -> String {
    let comparison = QueryComparison::new(original, optimized);
    let improvement = comparison.improvement();
    let badge = if improvement > 0 {
        format!(r#"<span class="improvement-badge">-{improvement}%</span>"#)
    } else {
        String::new()
    };

    format!(
        r#"
        <div class="visual-comparison">
            <div class="comparison-cards">
                <div class="comparison-card comparison-card--before">
                    <div class="comparison-card__header">
                        <i class="fas fa-file-code"></i>
                        <span>BEFORE</span>
                    </div>
                    <div class="comparison-card__body">
                        <div class="metric">
                            <div class="metric__value">{original_lines}</div>
                            <div class="metric__label">Lines of Code</div>
                        </div>
                        <div class="status-indicator status-indicator--warning">
                            <i class="fas fa-exclamation-triangle"></i>
                            <span>Needs Optimization</span>
                        </div>
                    </div>
                </div>

                <div class="comparison-arrow">
                    <i class="fas fa-arrow-right"></i>
                    {badge}
                </div>

                <div class="comparison-card comparison-card--after">
                    <div class="comparison-card__header">
                        <i class="fas fa-check-circle"></i>
                        <span>AFTER</span>
                    </div>
                    <div class="comparison-card__body">
                        <div class="metric">
                            <div class="metric__value">{optimized_lines}</div>
                            <div class="metric__label">Lines of Code</div>
                        </div>
                        <div class="status-indicator status-indicator--success">
                            <i class="fas fa-check-circle"></i>
                            <span>Optimized</span>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    "#,
        original_lines = comparison.original_lines,
        optimized_lines = comparison.optimized_lines,
    )
}
