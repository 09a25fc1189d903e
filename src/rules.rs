// 🏷️ Category Rules - Rules as Data
// Keyword classification of product descriptions into replenishment buckets

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// Fallback used when no rule matches. Classification is total: every
/// description lands in some bucket, even outside the known vocabulary.
pub const FALLBACK_KEY: &str = "misc";
pub const FALLBACK_LABEL: &str = "Misc";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Stable key. Normalization chains are looked up by this key, never by
    /// the display label, so renaming a label cannot break the lookup.
    pub key: String,

    /// Lower number = more specific = evaluated first = wins.
    /// Ties keep declaration order.
    #[serde(default = "default_priority")]
    pub priority: i32,

    /// Any of these substrings in the upper-cased description is a match
    pub keywords: Vec<String>,

    /// Display label used for grouping and section headers
    pub label: String,
}

fn default_priority() -> i32 {
    0
}

impl CategoryRule {
    /// Check against an already upper-cased description
    pub fn matches(&self, upper_description: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| upper_description.contains(keyword.as_str()))
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub key: String,
    pub label: String,
}

impl Classification {
    fn fallback() -> Self {
        Classification {
            key: FALLBACK_KEY.to_string(),
            label: FALLBACK_LABEL.to_string(),
        }
    }
}

// ============================================================================
// RULE SET
// ============================================================================

pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Create a new empty rule set
    pub fn new() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// Load rules from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rules file: {:?}", path.as_ref()))?;

        let rules: Vec<CategoryRule> =
            serde_json::from_str(&content).context("Failed to parse rules JSON")?;

        Ok(RuleSet::from_rules(rules))
    }

    /// Create a set from a list of rules.
    /// The sort is stable, so equal priorities keep declaration order.
    pub fn from_rules(mut rules: Vec<CategoryRule>) -> Self {
        rules.sort_by_key(|rule| rule.priority);
        RuleSet { rules }
    }

    /// Add a single rule
    pub fn add_rule(&mut self, rule: CategoryRule) {
        self.rules.push(rule);
        self.rules.sort_by_key(|rule| rule.priority);
    }

    /// Classify a description. Total: always returns a category, using the
    /// fixed fallback when no keyword matches.
    pub fn classify(&self, description: &str) -> Classification {
        let upper = description.to_uppercase();

        for rule in &self.rules {
            if rule.matches(&upper) {
                return Classification {
                    key: rule.key.clone(),
                    label: rule.label.clone(),
                };
            }
        }

        Classification::fallback()
    }

    /// Get number of rules loaded
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_rules(default_rules())
    }
}

// ============================================================================
// DEFAULT TABLE
// ============================================================================

/// Built-in rule table for the Saphirus product lines.
/// Priorities encode specificity: "DIFUSOR AUTO" is a diffuser, not a car
/// accessory, because the diffuser rule ranks above the automotive one.
pub fn default_rules() -> Vec<CategoryRule> {
    fn rule(key: &str, priority: i32, keywords: &[&str], label: &str) -> CategoryRule {
        CategoryRule {
            key: key.to_string(),
            priority,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            label: label.to_string(),
        }
    }

    vec![
        rule("textiles", 10, &["TEXTIL"], "Textiles"),
        rule("aerosoles", 20, &["AEROSOL"], "Aerosoles"),
        rule("difusores", 30, &["DIFUSOR", "VARILLA"], "Difusores"),
        rule("sahumerios", 40, &["SAHUMERIO"], "Sahumerios"),
        rule("autos", 50, &["AUTO", "RUTA", "TOUCH"], "Autos"),
        rule("velas", 60, &["VELA"], "Velas"),
        rule("home", 70, &["HOME"], "Home Spray"),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(key: &str, priority: i32, keywords: &[&str], label: &str) -> CategoryRule {
        CategoryRule {
            key: key.to_string(),
            priority,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_input() {
        let set = RuleSet::default();
        assert_eq!(set.classify("vela lavanda").label, "Velas");
        assert_eq!(set.classify("VELA LAVANDA").label, "Velas");
    }

    #[test]
    fn test_default_table_difusores() {
        let set = RuleSet::default();
        let result = set.classify("DIFUSOR AROMATICO - INVICTO SAPHIRUS");
        assert_eq!(result.key, "difusores");
        assert_eq!(result.label, "Difusores");
    }

    #[test]
    fn test_unknown_description_falls_back() {
        let set = RuleSet::default();
        let result = set.classify("PRODUCTO DESCONTINUADO XYZ");
        assert_eq!(result.key, FALLBACK_KEY);
        assert_eq!(result.label, "Misc");
    }

    #[test]
    fn test_empty_description_is_total() {
        let set = RuleSet::default();
        assert_eq!(set.classify("").label, "Misc");
    }

    #[test]
    fn test_lower_priority_number_wins() {
        let set = RuleSet::from_rules(vec![
            rule("generic", 5, &["TOUCH"], "Generic"),
            rule("specific", 1, &["TOUCH"], "Specific"),
        ]);

        assert_eq!(set.classify("PERFUMINA TOUCH NEGRO").label, "Specific");
    }

    #[test]
    fn test_priority_beats_declaration_order() {
        // Same rules, both declaration orders: the numeric priority decides
        let forward = RuleSet::from_rules(vec![
            rule("a", 1, &["VELA"], "First"),
            rule("b", 5, &["VELA"], "Second"),
        ]);
        let reversed = RuleSet::from_rules(vec![
            rule("b", 5, &["VELA"], "Second"),
            rule("a", 1, &["VELA"], "First"),
        ]);

        assert_eq!(forward.classify("VELA").label, "First");
        assert_eq!(reversed.classify("VELA").label, "First");
    }

    #[test]
    fn test_priority_tie_keeps_declaration_order() {
        let set = RuleSet::from_rules(vec![
            rule("a", 3, &["VELA"], "Declared first"),
            rule("b", 3, &["VELA"], "Declared second"),
        ]);

        assert_eq!(set.classify("VELA").label, "Declared first");
    }

    #[test]
    fn test_overlapping_keywords_resolve_by_specificity() {
        // "DIFUSOR PARA AUTO" matches both the diffuser and automotive rules;
        // the diffuser rule ranks above in the default table.
        let set = RuleSet::default();
        assert_eq!(set.classify("DIFUSOR PARA AUTO").label, "Difusores");
    }

    #[test]
    fn test_add_rule_resorts() {
        let mut set = RuleSet::new();
        set.add_rule(rule("late", 50, &["VELA"], "Late"));
        set.add_rule(rule("early", 1, &["VELA"], "Early"));

        assert_eq!(set.rule_count(), 2);
        assert_eq!(set.classify("VELA").label, "Early");
    }
}
