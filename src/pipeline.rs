// 🔁 Pipeline - extract → classify → normalize → aggregate
// Pure batch transform over one text dump. The rule and chain tables are
// read-only and shareable; all per-run data is owned by the call.

use tracing::{debug, info, warn};

use crate::aggregator::{aggregate, AggregatedEntry, CategorizedItem};
use crate::extractor::{
    diagnostic_sample, extract, normalize_quantities, Extraction, ExtractionStrategy,
};
use crate::normalizer::{default_chains, ChainSet};
use crate::rules::RuleSet;

// ============================================================================
// OUTCOME
// ============================================================================

#[derive(Debug)]
pub enum PipelineOutcome {
    /// At least one positive-quantity item survived; ready to render
    Report {
        strategy: ExtractionStrategy,
        entries: Vec<AggregatedEntry>,
    },

    /// Nothing to report. Either the format was unrecognized or every row
    /// was a return/zero-movement line. The sample shows what came in.
    NoData { sample: String },
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct Pipeline {
    rules: RuleSet,
    chains: ChainSet,
}

impl Pipeline {
    /// Pipeline with the built-in rule and chain tables
    pub fn new() -> Self {
        let chains = ChainSet::from_specs(default_chains()).expect("builtin chains compile");
        Pipeline {
            rules: RuleSet::default(),
            chains,
        }
    }

    /// Pipeline with caller-provided tables
    pub fn with_tables(rules: RuleSet, chains: ChainSet) -> Self {
        Pipeline { rules, chains }
    }

    /// Run the full transform over a linearized text dump
    pub fn process(&self, text: &str) -> PipelineOutcome {
        let (strategy, raw_items) = match extract(text) {
            Extraction::Matched { strategy, items } => (strategy, items),
            Extraction::NoData { sample } => {
                warn!("no line items recognized in input");
                return PipelineOutcome::NoData { sample };
            }
        };

        match strategy {
            ExtractionStrategy::QuotedCsv => {
                info!(raw_items = raw_items.len(), "strict CSV format detected")
            }
            ExtractionStrategy::PlainText => warn!(
                raw_items = raw_items.len(),
                "quoted fields missing, plain-text rescue mode active"
            ),
        }

        let raw_count = raw_items.len();
        let items = normalize_quantities(raw_items);
        let dropped = raw_count - items.len();
        if dropped > 0 {
            debug!(dropped, "dropped returns and zero-movement rows");
        }

        if items.is_empty() {
            warn!("every extracted row was filtered out");
            return PipelineOutcome::NoData {
                sample: diagnostic_sample(text),
            };
        }

        let categorized: Vec<CategorizedItem> = items
            .iter()
            .map(|item| {
                let class = self.rules.classify(&item.description);
                let name = self.chains.normalize(&item.description, &class.key);
                debug!(
                    id = %item.external_id,
                    category = %class.label,
                    name = %name,
                    "classified"
                );
                CategorizedItem {
                    category: class.label,
                    name,
                    quantity: item.quantity,
                }
            })
            .collect();

        let entries = aggregate(&categorized);
        info!(
            items = items.len(),
            products = entries.len(),
            "aggregation complete"
        );

        PipelineOutcome::Report { strategy, entries }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
