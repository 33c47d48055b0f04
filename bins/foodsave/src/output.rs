//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use foodsave_search::{Product, Store, SuggestionList};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a price in whole sum with grouped thousands ("24 000 сум")
pub fn format_price(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}{grouped} сум")
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.1}s", secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Print one product line, with its score when known
pub fn print_product(product: &Product, score: Option<f64>) {
    let urgent = if product.is_urgent { " 🔥" } else { "" };
    println!(
        "  {} {}{}",
        format!("#{}", product.id).dimmed(),
        product.name.bold(),
        urgent
    );
    println!(
        "     {} {} {}  {}  {}",
        format_price(product.discounted_price).green(),
        format_price(product.original_price).strikethrough().dimmed(),
        format!("-{}%", product.discount_percentage).yellow(),
        product.category.cyan(),
        format!("до {}", product.expiry_date).dimmed(),
    );
    let score = score
        .map(|s| format!("  score {:.3}", s))
        .unwrap_or_default();
    println!(
        "     {} · {:.1} км · ★ {:.1}{}",
        product.store.name,
        product.store.distance,
        product.store.rating,
        score.dimmed()
    );
}

/// Print one store line
pub fn print_store(store: &Store) {
    println!("  {} {}", format!("#{}", store.id).dimmed(), store.name.bold());
    println!(
        "     {} · {:.1} км · ★ {:.1}",
        store.address, store.distance, store.rating
    );
}

/// Print both suggestion lists
pub fn print_suggestions(suggestions: &SuggestionList) {
    for (title, entries) in [("Popular", &suggestions.popular), ("Recent", &suggestions.recent)] {
        if entries.is_empty() {
            continue;
        }
        Status::header(title);
        for entry in entries {
            println!("  {}", entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_price_grouping() {
        assert_eq!(format_price(24000.0), "24 000 сум");
        assert_eq!(format_price(1_250_000.0), "1 250 000 сум");
        assert_eq!(format_price(999.0), "999 сум");
        assert_eq!(format_price(0.0), "0 сум");
    }

    #[test]
    fn test_format_price_rounds() {
        assert_eq!(format_price(7999.6), "8 000 сум");
        assert_eq!(format_price(-1500.0), "-1 500 сум");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(Duration::from_secs_f32(5.5)), "5.5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "product", "products"), "1 product");
        assert_eq!(format_count(5, "store", "stores"), "5 stores");
    }
}
