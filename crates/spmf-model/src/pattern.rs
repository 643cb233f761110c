//! Decoded mining results.

use serde::{Deserialize, Serialize};

/// Separator placed between consecutive itemsets of a rendered pattern.
pub const ITEMSET_ARROW: &str = " -> ";

/// Separator placed between the antecedent and consequent of a rendered rule.
pub const RULE_IMPLICATION: &str = " ==> ";

/// Ordered itemsets of decoded item labels.
pub type Itemsets = Vec<Vec<String>>;

/// A frequent pattern (sequential pattern or episode) with its support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub itemsets: Itemsets,
    pub support: u64,
}

impl Pattern {
    /// Render as `a b -> c`: items joined by a space, itemsets by an arrow.
    pub fn render(&self) -> String {
        render_itemsets(&self.itemsets)
    }
}

/// An episode rule `antecedent ==> consequent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedent: Itemsets,
    pub consequent: Itemsets,
    pub support: u64,
    pub confidence: f64,
}

impl Rule {
    pub fn render(&self) -> String {
        format!(
            "{}{RULE_IMPLICATION}{}",
            render_itemsets(&self.antecedent),
            render_itemsets(&self.consequent)
        )
    }
}

pub fn render_itemsets(itemsets: &[Vec<String>]) -> String {
    itemsets
        .iter()
        .map(|itemset| itemset.join(" "))
        .collect::<Vec<_>>()
        .join(ITEMSET_ARROW)
}

/// Everything decoded from one result file.
///
/// An empty collection is a valid outcome: the tool ran and found nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum MiningResults {
    Patterns(Vec<Pattern>),
    Rules(Vec<Rule>),
}

impl MiningResults {
    pub fn len(&self) -> usize {
        match self {
            Self::Patterns(patterns) => patterns.len(),
            Self::Rules(rules) => rules.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_rules(&self) -> bool {
        matches!(self, Self::Rules(_))
    }

    /// Rendered pattern text, one entry per result.
    pub fn rendered(&self) -> Vec<String> {
        match self {
            Self::Patterns(patterns) => patterns.iter().map(Pattern::render).collect(),
            Self::Rules(rules) => rules.iter().map(Rule::render).collect(),
        }
    }

    pub fn supports(&self) -> Vec<u64> {
        match self {
            Self::Patterns(patterns) => patterns.iter().map(|p| p.support).collect(),
            Self::Rules(rules) => rules.iter().map(|r| r.support).collect(),
        }
    }

    /// Confidences for rule results, `None` for frequent patterns.
    pub fn confidences(&self) -> Option<Vec<f64>> {
        match self {
            Self::Patterns(_) => None,
            Self::Rules(rules) => Some(rules.iter().map(|r| r.confidence).collect()),
        }
    }
}
