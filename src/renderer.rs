// 🧾 Report Renderer - Aggregated entries → plain-text message body
// The line grammar is a contract: `== CATEGORY ==` headers and
// `<qty> x <name>` items are re-parsed by downstream audit tooling

use chrono::Local;

use crate::aggregator::AggregatedEntry;

/// Render the sectioned replenishment list.
///
/// Categories come out in lexicographic order, each section sorted by
/// product name, one blank line between sections.
pub fn render(entries: &[AggregatedEntry]) -> String {
    let mut sorted: Vec<&AggregatedEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        (a.category.as_str(), a.product_name.as_str())
            .cmp(&(b.category.as_str(), b.product_name.as_str()))
    });

    let mut out = String::new();
    let mut current: Option<&str> = None;

    for entry in sorted {
        if current != Some(entry.category.as_str()) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("== {} ==\n", entry.category.to_uppercase()));
            current = Some(entry.category.as_str());
        }
        out.push_str(&format!(
            "{} x {}\n",
            format_quantity(entry.total_quantity),
            entry.product_name
        ));
    }

    out
}

/// Integral quantities print without a decimal point
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// Full message body handed to the delivery side: a dated title line,
/// a blank line, then the rendered sections.
pub fn build_message(title: &str, entries: &[AggregatedEntry]) -> String {
    let date = Local::now().format("%d/%m/%Y");
    format!("{} {}\n\n{}", title, date, render(entries))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, name: &str, quantity: f64) -> AggregatedEntry {
        AggregatedEntry {
            category: category.to_string(),
            product_name: name.to_string(),
            total_quantity: quantity,
        }
    }

    #[test]
    fn test_sections_sorted_lexicographically() {
        let text = render(&[
            entry("Velas", "LAVANDA", 3.0),
            entry("Aceites", "EUCALIPTO", 1.0),
        ]);

        let aceites = text.find("== ACEITES ==").expect("Aceites section");
        let velas = text.find("== VELAS ==").expect("Velas section");
        assert!(aceites < velas);
    }

    #[test]
    fn test_exact_line_grammar() {
        let text = render(&[
            entry("Difusores", "INVICTO", 2.0),
            entry("Velas", "LAVANDA", 5.0),
            entry("Velas", "ROSA", 1.5),
        ]);

        assert_eq!(
            text,
            "== DIFUSORES ==\n\
             2 x INVICTO\n\
             \n\
             == VELAS ==\n\
             5 x LAVANDA\n\
             1.5 x ROSA\n"
        );
    }

    #[test]
    fn test_items_sorted_by_name_within_section() {
        let text = render(&[
            entry("Velas", "ROSA", 1.0),
            entry("Velas", "LAVANDA", 2.0),
        ]);

        let lavanda = text.find("LAVANDA").expect("LAVANDA line");
        let rosa = text.find("ROSA").expect("ROSA line");
        assert!(lavanda < rosa);
    }

    #[test]
    fn test_format_quantity_integral_vs_fractional() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(2.5), "2.5");
    }

    #[test]
    fn test_empty_entries_render_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_build_message_has_title_and_sections() {
        let message = build_message("REPOSICION", &[entry("Velas", "LAVANDA", 3.0)]);

        assert!(message.starts_with("REPOSICION "));
        assert!(message.contains("\n\n== VELAS ==\n"));
        assert!(message.contains("3 x LAVANDA"));
    }
}
