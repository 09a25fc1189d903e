// 📄 Line Extractor - Report text → raw line items
// Two strategies: strict quoted-CSV fields, plain-text rescue with price anchor

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ============================================================================
// CORE TYPES
// ============================================================================

/// ExtractionStrategy - Identifica qué formato tenía el dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStrategy {
    /// The export kept its quoted CSV fields intact
    QuotedCsv,
    /// Quotes were lost; description fields end where the price column starts
    PlainText,
}

impl ExtractionStrategy {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            ExtractionStrategy::QuotedCsv => "CSV estricto",
            ExtractionStrategy::PlainText => "Texto plano",
        }
    }
}

/// RawLineItem - One matched occurrence in the source text
/// Esta es la representación "cruda" antes de normalizar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLineItem {
    pub external_id: String,
    pub raw_quantity: String,
    pub raw_description: String,
}

/// LineItem - Quantity parsed and positive, description cleaned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub external_id: String,
    pub quantity: f64,
    pub description: String,
}

/// Result of running both extraction strategies over a text dump
#[derive(Debug, Clone)]
pub enum Extraction {
    /// At least one strategy matched
    Matched {
        strategy: ExtractionStrategy,
        items: Vec<RawLineItem>,
    },
    /// Neither strategy recognized the format. Not an error: the sample is
    /// kept so the caller can show what the upstream extractor produced.
    NoData { sample: String },
}

// ============================================================================
// PATTERNS
// ============================================================================

fn quoted_csv_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // "36200035","2,00 DIFUSOR AROMATICO - INVICTO SAPHIRUS"
        Regex::new(r#""\s*(\d{8})\s*"\s*,\s*"\s*([-0-9,]+)\s+([^"]+)""#)
            .expect("quoted csv regex")
    })
}

fn plain_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // ID  CANT  DESCRIPCION  PRECIO
        // The description has no closing marker, so the non-greedy capture
        // stops where the next price-shaped token starts (ej: 5.050,00).
        Regex::new(r"(\d{8})\s+(-?\d+,\d{2})\s+(.*?)\s\d{1,3}(?:\.\d{3})*,\d{2}")
            .expect("plain text regex")
    })
}

fn leading_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{8}\s*").expect("leading id regex"))
}

fn leading_dash_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-–]\s*").expect("leading dash regex"))
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Run both strategies over a linearized text dump.
///
/// Strategy order matters: the quoted-CSV pattern is tried first because it
/// is unambiguous; the plain-text pattern only runs when it finds nothing.
pub fn extract(text: &str) -> Extraction {
    let items = run_strategy(quoted_csv_re(), text);
    if !items.is_empty() {
        return Extraction::Matched {
            strategy: ExtractionStrategy::QuotedCsv,
            items,
        };
    }

    let items = run_strategy(plain_text_re(), text);
    if !items.is_empty() {
        return Extraction::Matched {
            strategy: ExtractionStrategy::PlainText,
            items,
        };
    }

    Extraction::NoData {
        sample: diagnostic_sample(text),
    }
}

fn run_strategy(re: &Regex, text: &str) -> Vec<RawLineItem> {
    re.captures_iter(text)
        .map(|cap| RawLineItem {
            external_id: cap[1].to_string(),
            raw_quantity: cap[2].trim().to_string(),
            raw_description: cap[3].trim().to_string(),
        })
        .collect()
}

/// Sample of the raw text shown when nothing could be extracted
pub fn diagnostic_sample(text: &str) -> String {
    text.chars().take(1000).collect()
}

// ============================================================================
// QUANTITY NORMALIZATION
// ============================================================================

/// Parse a decimal-comma quantity ("2,00", "-1,00") into f64.
/// Malformed input coerces to 0.0, which the positive filter then drops.
pub fn parse_quantity(raw: &str) -> f64 {
    raw.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Strip column artifacts that leak into the description field:
/// a repeated leading 8-digit id and leading dash separators.
pub fn clean_description(raw: &str) -> String {
    let mut desc = raw.trim().to_string();
    // Quitar ID si se coló al principio
    desc = leading_id_re().replace(&desc, "").to_string();
    // Quitar guiones al inicio
    desc = leading_dash_re().replace(&desc, "").to_string();
    desc.trim().to_string()
}

/// Convert raw items into LineItems, dropping returns and zero-movement rows.
/// Quantities ≤ 0 never reach the aggregated output.
pub fn normalize_quantities(raw: Vec<RawLineItem>) -> Vec<LineItem> {
    raw.into_iter()
        .filter_map(|item| {
            let quantity = parse_quantity(&item.raw_quantity);
            if quantity <= 0.0 {
                return None;
            }
            Some(LineItem {
                external_id: item.external_id,
                quantity,
                description: clean_description(&item.raw_description),
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
