//! "Optimization Areas" indicator cards for the rationale section

use super::mentions_any;

/// One of the four fixed optimization indicators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizationArea {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub active: bool,
}

const AREAS: [(&str, &str, &str, &[&str]); 4] = [
    ("Index Usage", "database", "#10b981", &["index"]),
    ("Join Optimization", "project-diagram", "#3b82f6", &["join"]),
    (
        "Subquery Handling",
        "layer-group",
        "#a855f7",
        &["subquery", "derived table"],
    ),
    ("Limit Optimization", "filter", "#f59e0b", &["limit"]),
];

/// Light up the indicators whose keywords appear in the rationale
pub fn detect_optimization_areas(text: &str) -> [OptimizationArea; 4] {
    AREAS.map(|(label, icon, color, keywords)| OptimizationArea {
        label,
        icon,
        color,
        active: mentions_any(text, keywords),
    })
}

pub fn render_performance_metrics(text: &str) -> String {
    let cards: String = detect_optimization_areas(text)
        .iter()
        .map(|area| {
            let (state, status) = if area.active {
                (
                    "metric-card--active",
                    r#"<i class="fas fa-check-circle" style="color: #10b981"></i>"#,
                )
            } else {
                (
                    "metric-card--inactive",
                    r#"<i class="fas fa-minus-circle" style="color: #6b7280"></i>"#,
                )
            };
            format!(
                r#"
                    <div class="metric-card {state}">
                        <div class="metric-card__icon" style="color: {color}">
                            <i class="fas fa-{icon}"></i>
                        </div>
                        <div class="metric-card__label">{label}</div>
                        <div class="metric-card__status">
                            {status}
                        </div>
                    </div>
                "#,
                color = area.color,
                icon = area.icon,
                label = area.label,
            )
        })
        .collect();

    format!(
        r#"
        <div class="performance-metrics">
            <h4 class="metrics-title"><i class="fas fa-tachometer-alt"></i> Optimization Areas</h4>
            <div class="metrics-grid">
                {cards}
            </div>
        </div>
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_labels(text: &str) -> Vec<&'static str> {
        detect_optimization_areas(text)
            .iter()
            .filter(|a| a.active)
            .map(|a| a.label)
            .collect()
    }

    #[test]
    fn test_index_only_lights_one_card() {
        assert_eq!(
            active_labels("Add an INDEX on customer_id"),
            vec!["Index Usage"]
        );
    }

    #[test]
    fn test_each_keyword_maps_to_its_card() {
        assert_eq!(active_labels("rewrite the LEFT JOIN"), vec!["Join Optimization"]);
        assert_eq!(active_labels("flatten the Subquery"), vec!["Subquery Handling"]);
        assert_eq!(
            active_labels("replace the derived table"),
            vec!["Subquery Handling"]
        );
        assert_eq!(active_labels("add a Limit clause"), vec!["Limit Optimization"]);
    }

    #[test]
    fn test_no_keywords_lights_nothing() {
        assert!(active_labels("use explicit columns").is_empty());
    }

    #[test]
    fn test_keywords_match_inside_words() {
        // Substring tests, so "indexes" and "limited" count
        assert_eq!(
            active_labels("indexes are limited"),
            vec!["Index Usage", "Limit Optimization"]
        );
    }

    #[test]
    fn test_rendered_cards_reflect_state() {
        let html = render_performance_metrics("use the index");
        assert_eq!(html.matches("metric-card--active").count(), 1);
        assert_eq!(html.matches("metric-card--inactive").count(), 3);
        assert!(html.contains("Optimization Areas"));
    }
}
