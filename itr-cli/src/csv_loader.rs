//! CSV loader for alternate slab schedules.
//!
//! The built-in schedule covers FY 2025-26; a future Finance Act only moves
//! slab boundaries and rates, so a schedule can also be supplied as a CSV
//! file instead of waiting for a release.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive and must match exactly.
//!
//! | Column        | Required | Type    | Notes                                    |
//! |---------------|----------|---------|------------------------------------------|
//! | `lower_bound` | yes      | decimal | e.g. `400000`                            |
//! | `upper_bound` | no       | decimal | leave empty for the unbounded top slab   |
//! | `rate`        | yes      | decimal | marginal rate, e.g. `0.05`               |
//!
//! ### Example
//!
//! ```csv
//! lower_bound,upper_bound,rate
//! 0,400000,0
//! 400000,800000,0.05
//! 800000,,0.30
//! ```
//!
//! The loader only parses; the structural invariants (contiguity, ordering,
//! unbounded top slab) are enforced by the liability worksheet when the
//! schedule is used.

use std::path::Path;

use itr_core::models::TaxSlab;
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    lower_bound: Decimal,
    upper_bound: Option<Decimal>,
    rate: Decimal,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a slab schedule from CSV.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parse CSV text (the full file contents as a &str) and return the slab
/// schedule. Rows are returned in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
pub fn load_from_str(input: &str) -> Result<Vec<TaxSlab>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|row| {
            let row = row?;
            Ok(TaxSlab {
                lower_bound: row.lower_bound,
                upper_bound: row.upper_bound,
                rate: row.rate,
            })
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to
/// [`load_from_str`].
///
/// # Errors
///
/// Returns [`CsvLoadError::Io`] when the file cannot be read, or
/// [`CsvLoadError::Parse`] when the contents are invalid.
pub fn load_from_file(path: &Path) -> Result<Vec<TaxSlab>, CsvLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
