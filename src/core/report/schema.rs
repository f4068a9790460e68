//! Schema suggestion cards, included only when their trigger word appears

use super::mentions_any;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaSuggestion {
    pub title: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

const SUGGESTIONS: [(&str, SchemaSuggestion); 4] = [
    (
        "index",
        SchemaSuggestion {
            title: "Indexing Strategy",
            icon: "sitemap",
            color: "#3b82f6",
            description: "Add or optimize indexes for better query performance",
        },
    ),
    (
        "data type",
        SchemaSuggestion {
            title: "Data Type Optimization",
            icon: "code",
            color: "#10b981",
            description: "Use appropriate data types to reduce storage",
        },
    ),
    (
        "partition",
        SchemaSuggestion {
            title: "Table Partitioning",
            icon: "th-large",
            color: "#a855f7",
            description: "Partition large tables for better manageability",
        },
    ),
    (
        "normaliz",
        SchemaSuggestion {
            title: "Data Modeling",
            icon: "project-diagram",
            color: "#f59e0b",
            description: "Review normalization and relationships",
        },
    ),
];

pub fn detect_schema_suggestions(text: &str) -> Vec<SchemaSuggestion> {
    SUGGESTIONS
        .iter()
        .filter(|(trigger, _)| mentions_any(text, &[*trigger]))
        .map(|(_, suggestion)| *suggestion)
        .collect()
}

pub fn render_schema_suggestions(text: &str) -> String {
    let cards: String = detect_schema_suggestions(text)
        .iter()
        .map(|s| {
            format!(
                r#"
                    <div class="suggestion-card">
                        <div class="suggestion-card__icon" style="background: {color}">
                            <i class="fas fa-{icon}"></i>
                        </div>
                        <div class="suggestion-card__content">
                            <h5>{title}</h5>
                            <p>{description}</p>
                        </div>
                    </div>
                "#,
                color = s.color,
                icon = s.icon,
                title = s.title,
                description = s.description,
            )
        })
        .collect();

    format!(
        r#"
        <div class="schema-suggestions">
            <div class="suggestions-grid">
                {cards}
            </div>
        </div>
    "#
    )
}
