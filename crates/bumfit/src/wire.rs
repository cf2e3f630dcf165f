//! Textual wire format for persisted fits.
//!
//! One fit per line, four tab-separated `key: value` fields in fixed order:
//!
//! ```text
//! pi0: <f64>\talpha: <f64>\tbeta: <f64>\tcount: <u64>
//! ```
//!
//! This is the canonical tuple the aggregation layer exchanges and the form
//! a previously persisted global fit is parsed back out of before solving
//! for a cutoff. `decode` is a typed parser over that grammar, not a
//! substring search: unknown layouts are rejected with a field-level error.

use std::fmt;

use bumfit_core::PartialFit;

/// Errors from decoding a persisted fit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The line ended before the named field.
    MissingField {
        /// The field that was expected next.
        field: &'static str,
    },

    /// A field did not start with its `key: ` prefix.
    MalformedField {
        /// The field that was expected.
        field: &'static str,
        /// What the line held instead.
        found: String,
    },

    /// A field's value failed to parse as a number.
    InvalidNumber {
        /// The field whose value was unparseable.
        field: &'static str,
        /// The offending value text.
        value: String,
    },

    /// Content remained after the last field.
    TrailingContent {
        /// The unexpected remainder.
        found: String,
    },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::MissingField { field } => {
                write!(f, "fit line ended before field '{}'", field)
            }
            WireError::MalformedField { field, found } => {
                write!(f, "expected field '{}', found '{}'", field, found)
            }
            WireError::InvalidNumber { field, value } => {
                write!(f, "field '{}' holds unparseable number '{}'", field, value)
            }
            WireError::TrailingContent { found } => {
                write!(f, "unexpected content after count field: '{}'", found)
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Render a fit as its canonical single-line form.
pub fn encode(fit: &PartialFit) -> String {
    format!(
        "pi0: {}\talpha: {}\tbeta: {}\tcount: {}",
        fit.pi0, fit.alpha, fit.beta, fit.count
    )
}

/// Parse a fit back out of its canonical single-line form.
///
/// A trailing newline is tolerated; anything else beyond the four fields is
/// rejected.
pub fn decode(line: &str) -> Result<PartialFit, WireError> {
    let mut fields = line.trim_end_matches(['\r', '\n']).split('\t');

    let pi0 = parse_f64(take_field(&mut fields, "pi0")?, "pi0")?;
    let alpha = parse_f64(take_field(&mut fields, "alpha")?, "alpha")?;
    let beta = parse_f64(take_field(&mut fields, "beta")?, "beta")?;
    let count_text = take_field(&mut fields, "count")?;
    let count = count_text
        .parse::<u64>()
        .map_err(|_| WireError::InvalidNumber {
            field: "count",
            value: count_text.to_string(),
        })?;

    if let Some(rest) = fields.next() {
        return Err(WireError::TrailingContent {
            found: rest.to_string(),
        });
    }

    Ok(PartialFit {
        pi0,
        alpha,
        beta,
        count,
    })
}

/// Pull the next tab-separated field and strip its `key: ` prefix.
fn take_field<'a>(
    fields: &mut std::str::Split<'a, char>,
    key: &'static str,
) -> Result<&'a str, WireError> {
    let field = fields.next().ok_or(WireError::MissingField { field: key })?;
    field
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(": "))
        .ok_or_else(|| WireError::MalformedField {
            field: key,
            found: field.to_string(),
        })
}

fn parse_f64(text: &str, field: &'static str) -> Result<f64, WireError> {
    text.parse::<f64>().map_err(|_| WireError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}
