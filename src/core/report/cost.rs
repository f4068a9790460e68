//! Cost optimization opportunity cards

use super::mentions_any;
use derive_more::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Impact {
    #[display("high")]
    High,
    #[display("medium")]
    Medium,
    #[display("low")]
    Low,
}

impl Impact {
    pub fn color(&self) -> &'static str {
        match self {
            Impact::High => "#ef4444",
            Impact::Medium => "#f59e0b",
            Impact::Low => "#10b981",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub impact: Impact,
    pub detected: bool,
}

const ITEMS: [(&str, &str, Impact, &str); 4] = [
    ("Query Performance", "tachometer-alt", Impact::High, "slow log"),
    ("Storage Optimization", "hdd", Impact::Medium, "storage"),
    ("Caching Strategy", "memory", Impact::High, "cach"),
    ("Index Efficiency", "sitemap", Impact::High, "index"),
];

pub fn detect_cost_items(text: &str) -> [CostItem; 4] {
    ITEMS.map(|(label, icon, impact, keyword)| CostItem {
        label,
        icon,
        impact,
        detected: mentions_any(text, &[keyword]),
    })
}

pub fn render_cost_analysis(text: &str) -> String {
    let items: String = detect_cost_items(text)
        .iter()
        .map(|item| {
            let (state, status) = if item.detected {
                (
                    "cost-item--detected",
                    r#"<i class="fas fa-exclamation-circle" style="color: #f59e0b"></i> <span>Optimization Available</span>"#,
                )
            } else {
                (
                    "",
                    r#"<i class="fas fa-check-circle" style="color: #10b981"></i> <span>Optimized</span>"#,
                )
            };
            format!(
                r#"
                    <div class="cost-item {state}">
                        <div class="cost-item__header">
                            <div class="cost-item__icon">
                                <i class="fas fa-{icon}"></i>
                            </div>
                            <div class="cost-item__title">{label}</div>
                            <div class="cost-item__badge" style="background: {color}">
                                {impact} IMPACT
                            </div>
                        </div>
                        <div class="cost-item__status">
                            {status}
                        </div>
                    </div>
                "#,
                icon = item.icon,
                label = item.label,
                color = item.impact.color(),
                impact = item.impact.to_string().to_uppercase(),
            )
        })
        .collect();

    format!(
        r#"
        <div class="cost-analysis">
            <h4 class="metrics-title"><i class="fas fa-chart-bar"></i> Cost Optimization Opportunities</h4>
            <div class="cost-items">
                {items}
            </div>
        </div>
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_keywords() {
        let items = detect_cost_items("Check the SLOW LOG; consider query caching and an index");
        let detected: Vec<_> = items.iter().filter(|i| i.detected).map(|i| i.label).collect();
        assert_eq!(
            detected,
            vec!["Query Performance", "Caching Strategy", "Index Efficiency"]
        );
    }

    #[test]
    fn test_nothing_detected_renders_all_optimized() {
        let html = render_cost_analysis("No cost estimation.");
        assert_eq!(html.matches("<span>Optimized</span>").count(), 4);
        assert!(!html.contains("cost-item--detected"));
    }

    #[test]
    fn test_impact_badges() {
        let html = render_cost_analysis("storage heavy");
        assert!(html.contains("MEDIUM IMPACT"));
        assert_eq!(html.matches("HIGH IMPACT").count(), 3);
        assert!(html.contains("background: #f59e0b"));
        assert_eq!(html.matches("Optimization Available").count(), 1);
    }

    #[test]
    fn test_impact_colors() {
        assert_eq!(Impact::High.color(), "#ef4444");
        assert_eq!(Impact::Low.color(), "#10b981");
    }
}
