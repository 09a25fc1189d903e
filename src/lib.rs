// 📦 Repositor - Core Library
// Turns a sales-report text dump into a categorized replenishment list
// Exposes all modules for use in the CLI and tests

pub mod aggregator;
pub mod extractor;
pub mod normalizer;
pub mod pipeline;
pub mod renderer;
pub mod rules;

// Re-export commonly used types
pub use aggregator::{aggregate, AggregatedEntry, CategorizedItem};
pub use extractor::{
    clean_description, diagnostic_sample, extract, normalize_quantities, parse_quantity,
    Extraction, ExtractionStrategy, LineItem, RawLineItem,
};
pub use normalizer::{default_chains, ChainSet, ChainSpec, StepAction, StepSpec};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use renderer::{build_message, format_quantity, render};
pub use rules::{default_rules, CategoryRule, Classification, RuleSet, FALLBACK_LABEL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
