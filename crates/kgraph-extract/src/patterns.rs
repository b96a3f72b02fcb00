//! Keyword table for relation classification.
//!
//! The table is ordered: labels are tried top to bottom and, within a label,
//! keywords left to right. The first keyword found in the fragment decides
//! the label, so 是 (belongs-to) outranks 在 (located-in) in a fragment that
//! contains both.

use kgraph_types::RelationLabel;

/// Relation labels and their trigger keywords, in priority order.
pub const RELATION_PATTERNS: &[(RelationLabel, &[&str])] = &[
    (
        RelationLabel::BelongsTo,
        &["是", "为", "属于", "作为", "叫做", "称为"],
    ),
    (
        RelationLabel::Contains,
        &["有", "包含", "包括", "拥有", "具备", "含有"],
    ),
    (
        RelationLabel::LocatedIn,
        &["位于", "处在", "坐落在", "在", "地处", "坐落于"],
    ),
    (
        RelationLabel::CreatedBy,
        &["创造", "发明", "提出", "创立", "建立", "开发"],
    ),
    (
        RelationLabel::UsedFor,
        &["用于", "用来", "适用于", "应用于", "作用于"],
    ),
    (
        RelationLabel::Related,
        &["相关", "有关", "涉及", "关于", "关系到"],
    ),
];

/// Classify the relation expressed by a sentence fragment.
///
/// Always yields a label; fragments with no trigger word are `Related`.
pub fn classify(fragment: &str) -> RelationLabel {
    keyword_label(fragment).unwrap_or_else(|| fallback_label(fragment))
}

/// First table entry with a keyword occurring in `fragment`.
pub fn keyword_label(fragment: &str) -> Option<RelationLabel> {
    RELATION_PATTERNS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| fragment.contains(kw)))
        .map(|(label, _)| *label)
}

/// Secondary heuristics for fragments the table did not classify.
fn fallback_label(fragment: &str) -> RelationLabel {
    let has = |kw: &str| fragment.contains(kw);

    if has("是") || has("为") || has("叫做") {
        RelationLabel::BelongsTo
    } else if has("在") && (has("位于") || has("处在")) {
        RelationLabel::LocatedIn
    } else if has("包括") || has("包含") || has("有") {
        RelationLabel::Contains
    } else if has("用于") || has("用来") {
        RelationLabel::UsedFor
    } else {
        RelationLabel::Related
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_label_order() {
        let labels: Vec<RelationLabel> = RELATION_PATTERNS.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, RelationLabel::ALL.to_vec());
    }

    #[test]
    fn test_belongs_to_beats_related() {
        assert_eq!(classify("北京是中国的首都"), RelationLabel::BelongsTo);
    }

    #[test]
    fn test_each_label_reachable() {
        assert_eq!(classify("苹果公司包括多个部门"), RelationLabel::Contains);
        assert_eq!(classify("苹果公司位于美国"), RelationLabel::LocatedIn);
        assert_eq!(classify("乔布斯创立了苹果公司"), RelationLabel::CreatedBy);
        assert_eq!(classify("算法用于数据分析"), RelationLabel::UsedFor);
        assert_eq!(classify("深度学习涉及神经网络"), RelationLabel::Related);
    }

    #[test]
    fn test_priority_across_labels() {
        // 有 (contains) is checked before 位于 (located-in)
        assert_eq!(classify("中国有长城，长城位于北京"), RelationLabel::Contains);
        // 在 is a located-in keyword but 是 comes first
        assert_eq!(classify("他在北京是学生"), RelationLabel::BelongsTo);
    }

    #[test]
    fn test_no_keyword_defaults_to_related() {
        assert_eq!(classify("深度学习和神经网络"), RelationLabel::Related);
        assert_eq!(classify(""), RelationLabel::Related);
    }

    #[test]
    fn test_keyword_label_none_without_keyword() {
        assert_eq!(keyword_label("深度学习和神经网络"), None);
        assert_eq!(keyword_label("关于"), Some(RelationLabel::Related));
    }

    #[test]
    fn test_fallback_heuristics() {
        assert_eq!(fallback_label("叫做"), RelationLabel::BelongsTo);
        assert_eq!(fallback_label("在位于"), RelationLabel::LocatedIn);
        assert_eq!(fallback_label("位于"), RelationLabel::Related);
        assert_eq!(fallback_label("包括"), RelationLabel::Contains);
        assert_eq!(fallback_label("用来"), RelationLabel::UsedFor);
        assert_eq!(fallback_label("无"), RelationLabel::Related);
    }
}
