//! The fixed 20-class category taxonomy.
//!
//! Labels split into two groups: 15 AI topics and 5 general topics carried
//! with a `Non-AI ` prefix in the source data. The filter engine only needs
//! set membership; the group structure exists for the sidebar, where each
//! group shows per-label counts and its own "select all" toggle spanning
//! the labels actually present in the loaded data.

use std::collections::BTreeSet;

use super::types::Item;

/// Prefix carried by the general-topic labels in the source data.
pub const NON_AI_PREFIX: &str = "Non-AI ";

/// The 15 AI category labels, in sidebar display order.
pub const AI_CATEGORIES: [&str; 15] = [
    "Retrieval-Augmented Generation (RAG)",
    "Agentic AI & AI Agents",
    "Large Language Models (LLM)",
    "Multimodal AI (Vision/Audio/Video + Language)",
    "Computer Vision (CV)",
    "Speech & Audio AI",
    "Natural Language Processing (non-LLM)",
    "Fine-tuning & Embeddings",
    "Prompt Engineering & In-Context Learning",
    "AI Evaluation & Metrics",
    "Deep Learning (non-LLM)",
    "Machine Learning (Classical)",
    "AI Infrastructure, MLOps & Frameworks",
    "AI Applications (Business/Dev/Productivity)",
    "AI Policy, Governance & Safety",
];

/// The 5 general-topic labels as they appear in the source data.
pub const NON_AI_CATEGORIES: [&str; 5] = [
    "Non-AI Software Engineering & Programming",
    "Non-AI Data Science & Statistics",
    "Non-AI Technology/Science",
    "Non-AI Finance/Economics/Business",
    "Non-AI Society/Culture/Other",
];

/// Which half of the taxonomy a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryGroup {
    Ai,
    NonAi,
}

impl CategoryGroup {
    /// All labels in this group, in display order.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            CategoryGroup::Ai => &AI_CATEGORIES,
            CategoryGroup::NonAi => &NON_AI_CATEGORIES,
        }
    }
}

/// Group membership of a label, or `None` for labels outside the taxonomy.
pub fn group_of(label: &str) -> Option<CategoryGroup> {
    if AI_CATEGORIES.contains(&label) {
        Some(CategoryGroup::Ai)
    } else if NON_AI_CATEGORIES.contains(&label) {
        Some(CategoryGroup::NonAi)
    } else {
        None
    }
}

/// The checkbox text for a label: general-topic labels drop their storage
/// prefix (the sidebar already says which group they are in).
pub fn display_label(label: &str) -> &str {
    label.strip_prefix(NON_AI_PREFIX).unwrap_or(label)
}

/// Labels of `group` present in the loaded data, with their item counts,
/// in taxonomy order. Labels with zero items are omitted — the sidebar only
/// renders checkboxes for categories that exist in this export.
pub fn present_in(group: CategoryGroup, items: &[Item]) -> Vec<(&'static str, usize)> {
    group
        .labels()
        .iter()
        .filter_map(|label| {
            let count = items.iter().filter(|item| item.category == *label).count();
            (count > 0).then_some((*label, count))
        })
        .collect()
}

/// The label set a group-scoped "select all" toggle spans: every label of
/// the group present in the loaded data.
pub fn select_all(group: CategoryGroup, items: &[Item]) -> BTreeSet<String> {
    present_in(group, items)
        .into_iter()
        .map(|(label, _)| label.to_string())
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(category: &str) -> Item {
        Item {
            key: format!("https://example.com/{}", category.len()),
            date: None,
            author: "Ada".to_string(),
            title: "Title".to_string(),
            subtitle: None,
            url: String::new(),
            category: category.to_string(),
            read: false,
        }
    }

    #[test]
    fn test_taxonomy_has_twenty_labels() {
        assert_eq!(AI_CATEGORIES.len() + NON_AI_CATEGORIES.len(), 20);
    }

    #[test]
    fn test_group_of_known_labels() {
        assert_eq!(
            group_of("Large Language Models (LLM)"),
            Some(CategoryGroup::Ai)
        );
        assert_eq!(
            group_of("Non-AI Technology/Science"),
            Some(CategoryGroup::NonAi)
        );
        assert_eq!(group_of("Gardening"), None);
    }

    #[test]
    fn test_display_label_strips_prefix() {
        assert_eq!(
            display_label("Non-AI Technology/Science"),
            "Technology/Science"
        );
        assert_eq!(
            display_label("Computer Vision (CV)"),
            "Computer Vision (CV)"
        );
    }

    #[test]
    fn test_present_in_counts_and_order() {
        let items = vec![
            item("Computer Vision (CV)"),
            item("Large Language Models (LLM)"),
            item("Large Language Models (LLM)"),
        ];

        let present = present_in(CategoryGroup::Ai, &items);
        // Taxonomy order: LLM before CV
        assert_eq!(
            present,
            vec![
                ("Large Language Models (LLM)", 2),
                ("Computer Vision (CV)", 1),
            ]
        );
        assert!(present_in(CategoryGroup::NonAi, &items).is_empty());
    }

    #[test]
    fn test_select_all_spans_present_labels_only() {
        let items = vec![
            item("Large Language Models (LLM)"),
            item("Non-AI Technology/Science"),
        ];

        let ai = select_all(CategoryGroup::Ai, &items);
        assert_eq!(ai.len(), 1);
        assert!(ai.contains("Large Language Models (LLM)"));

        let non_ai = select_all(CategoryGroup::NonAi, &items);
        assert_eq!(non_ai.len(), 1);
        assert!(non_ai.contains("Non-AI Technology/Science"));
    }
}
