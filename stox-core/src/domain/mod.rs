//! Domain types for Stox

pub mod interval;
pub mod price_record;

pub use interval::{Interval, OutputSize, ParseIntervalError};
pub use price_record::PriceRecord;

/// Symbol type alias
pub type Symbol = String;

/// Normalize user-entered symbol text: trimmed, upper-case.
///
/// Returns `None` for blank input.
pub fn normalize_symbol(raw: &str) -> Option<Symbol> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_uppercase())
    }
}
