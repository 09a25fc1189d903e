// ✂️ Name Normalizer - Category-aware cleanup of product descriptions
// Ordered substitution chains per category, then a generic brand strip.
// Never destroys the identifying content: too-short results fall back.

use anyhow::{Context as AnyhowContext, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Results shorter than this discard the normalization
pub const MIN_NAME_LEN: usize = 2;

// ============================================================================
// CHAIN DEFINITION
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepAction {
    /// Replace every match with the given text
    Replace(String),

    /// A match collapses the whole name to a fixed token. Used where only a
    /// small enumerable set of variants exists (colors, finishes) and all of
    /// them should land on one canonical name.
    CollapseTo(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    pub pattern: String,
    pub action: StepAction,
}

/// Declarative chain for one category. The key must be the classifier rule
/// key: lookups by display label broke whenever a label was reworded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSpec {
    pub category_key: String,
    pub steps: Vec<StepSpec>,
}

/// Compiled step, pattern ready to run
struct ChainStep {
    pattern: Regex,
    action: StepAction,
}

// ============================================================================
// GENERIC CLEANUP
// ============================================================================

fn brand_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // La marca y todo lo que sigue
    RE.get_or_init(|| Regex::new(r"SAPHIRUS.*$").expect("brand suffix regex"))
}

fn brand_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"SAPHIRUS").expect("brand token regex"))
}

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("ws regex"))
}

fn edge_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-–\s.,:]+|[-–\s.,:]+$").expect("edge separator regex"))
}

/// Collapse whitespace and trim leading/trailing separator punctuation
fn tidy(name: &str) -> String {
    let collapsed = ws_re().replace_all(name.trim(), " ");
    edge_separator_re().replace_all(&collapsed, "").to_string()
}

// ============================================================================
// CHAIN SET
// ============================================================================

pub struct ChainSet {
    chains: HashMap<String, Vec<ChainStep>>,
}

impl ChainSet {
    /// Compile a set of declarative chains
    pub fn from_specs(specs: Vec<ChainSpec>) -> Result<Self> {
        let mut chains = HashMap::new();

        for spec in specs {
            let mut steps = Vec::with_capacity(spec.steps.len());
            for step in spec.steps {
                let pattern = Regex::new(&step.pattern).with_context(|| {
                    format!(
                        "Failed to compile chain pattern {:?} for category {:?}",
                        step.pattern, spec.category_key
                    )
                })?;
                steps.push(ChainStep {
                    pattern,
                    action: step.action,
                });
            }
            chains.insert(spec.category_key, steps);
        }

        Ok(ChainSet { chains })
    }

    /// Load chains from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read chains file: {:?}", path.as_ref()))?;

        let specs: Vec<ChainSpec> =
            serde_json::from_str(&content).context("Failed to parse chains JSON")?;

        ChainSet::from_specs(specs)
    }

    /// Number of categories with a chain
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Produce the canonical display name for a description.
    ///
    /// Runs the category chain (if any) over the upper-cased description,
    /// then the generic brand strip. A result shorter than MIN_NAME_LEN
    /// discards the chain output: first retry with the soft strip (brand
    /// token only), and as a last resort return the description untouched.
    pub fn normalize(&self, description: &str, category_key: &str) -> String {
        let original = description.trim();
        let mut name = original.to_uppercase();

        if let Some(steps) = self.chains.get(category_key) {
            for step in steps {
                match &step.action {
                    StepAction::Replace(replacement) => {
                        name = step
                            .pattern
                            .replace_all(&name, replacement.as_str())
                            .to_string();
                    }
                    StepAction::CollapseTo(token) => {
                        if step.pattern.is_match(&name) {
                            name = token.clone();
                            break;
                        }
                    }
                }
            }
            name = tidy(&name);
        }

        name = tidy(&brand_suffix_re().replace_all(&name, ""));
        if name.chars().count() >= MIN_NAME_LEN {
            return name;
        }

        // Chain ate the whole name. Softer pass: solo el token de marca.
        let soft = tidy(&brand_token_re().replace_all(&original.to_uppercase(), ""));
        if soft.chars().count() >= MIN_NAME_LEN {
            return soft;
        }

        original.to_string()
    }
}

// ============================================================================
// DEFAULT TABLE
// ============================================================================

/// Built-in chains for the Saphirus product lines, keyed by rule key.
/// Categories without a chain (Misc among them) get the generic pass only.
pub fn default_chains() -> Vec<ChainSpec> {
    fn replace(pattern: &str) -> StepSpec {
        StepSpec {
            pattern: pattern.to_string(),
            action: StepAction::Replace(String::new()),
        }
    }

    fn collapse(pattern: &str, token: &str) -> StepSpec {
        StepSpec {
            pattern: pattern.to_string(),
            action: StepAction::CollapseTo(token.to_string()),
        }
    }

    fn chain(category_key: &str, steps: Vec<StepSpec>) -> ChainSpec {
        ChainSpec {
            category_key: category_key.to_string(),
            steps,
        }
    }

    vec![
        chain(
            "textiles",
            vec![
                replace(r"PERFUME\s+TEXTIL(?:ES)?"),
                replace(r"TEXTIL(?:ES)?"),
            ],
        ),
        chain("aerosoles", vec![replace(r"AEROSOL(?:ES)?")]),
        chain(
            "difusores",
            vec![
                replace(r"DIFUSOR(?:ES)?\s+AROM[AÁ]TICO(?:S)?"),
                replace(r"DIFUSOR(?:ES)?"),
                replace(r"VARILLA(?:S)?"),
            ],
        ),
        chain("sahumerios", vec![replace(r"SAHUMERIO(?:S)?")]),
        chain(
            "autos",
            vec![
                // Touch accessory comes in a handful of finishes; every one
                // of them restocks as the same unit.
                collapse(r"\bTOUCH\b", "TOUCH"),
                replace(r"AROMATIZANTE\s+PARA\s+AUTOS?"),
                replace(r"\bAUTOS?\b"),
            ],
        ),
        chain(
            "velas",
            vec![replace(r"VELA(?:S)?\s+DE\b"), replace(r"VELA(?:S)?")],
        ),
        chain("home", vec![replace(r"HOME\s+SPRAY"), replace(r"\bHOME\b")]),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
