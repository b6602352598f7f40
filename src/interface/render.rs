use std::path::Path;

use crate::catalog::Catalog;
use crate::matcher::Recommendation;
use crate::models::Receipt;
use crate::receipt::WriteReport;

/// Print the ingredient table and salad catalog.
pub fn display_menu(catalog: &Catalog) {
    println!();
    println!("=== Ingredienser ===");
    let width = catalog
        .ingredients()
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(10);
    for ingredient in catalog.ingredients() {
        println!("  {:<width$} {:>4} kr", ingredient.name, ingredient.price, width = width);
    }

    println!();
    println!("=== Sallader ===");
    for salad in catalog.salads() {
        println!(
            "  {} ({} kr): {}",
            salad.name,
            salad.price,
            salad.ingredients.join(", ")
        );
    }
    println!();
}

/// User-facing line(s) for a recommendation outcome.
pub fn recommendation_message(recommendation: &Recommendation) -> String {
    match recommendation {
        Recommendation::NothingSelected => "Välj minst en ingrediens.".to_string(),
        Recommendation::NoMatch => "Ingen sallad kan föreslås, välj fler ingredienser.".to_string(),
        Recommendation::Best(m) => {
            let missing = if m.missing.is_empty() {
                "inga".to_string()
            } else {
                m.missing.iter().cloned().collect::<Vec<_>>().join(", ")
            };
            format!(
                "Rekommenderad sallad: {} ({} kr). Saknade: {}",
                m.salad.name, m.salad.price, missing
            )
        }
        Recommendation::Complete(matches) => {
            let mut lines = vec!["Sallader som passar:".to_string()];
            lines.extend(
                matches
                    .iter()
                    .map(|m| format!("  {} ({} kr)", m.salad.name, m.salad.price)),
            );
            lines.join("\n")
        }
    }
}

pub fn display_recommendation(recommendation: &Recommendation) {
    println!("{}", recommendation_message(recommendation));
}

/// Confirmation after a receipt has been written.
///
/// A permission warning has already been logged by the writer.
pub fn display_receipt_saved(receipt: &Receipt, path: &Path, report: &WriteReport) {
    println!();
    println!("{}", receipt_saved_message(receipt, path, report));
}

pub fn receipt_saved_message(receipt: &Receipt, path: &Path, report: &WriteReport) -> String {
    let access = if report.restricted {
        " (endast ägaren kan läsa)"
    } else {
        ""
    };
    format!(
        "Kvitto sparat i {}{}! Totalpris: {} kr",
        path.display(),
        access,
        receipt.total
    )
}
