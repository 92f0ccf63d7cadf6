//! Code canonicalization
//!
//! Identifier values arrive from the spreadsheet and database collaborators
//! as numbers, numeric strings, or strings with stray whitespace and
//! inconsistent zero padding. Canonicalization happens once at ingress;
//! downstream code only ever sees the fixed-width form or the `Invalid`
//! sentinel.

/// Outcome of canonicalizing a raw code value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedCode {
    /// Canonical zero-padded numeric string
    Valid(String),
    /// Input was not coercible to a numeric code
    Invalid,
}

impl NormalizedCode {
    /// The canonical string, `None` for the sentinel
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Valid(code) => Some(code),
            Self::Invalid => None,
        }
    }

    /// Whether canonicalization succeeded
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

/// Canonicalize a raw code value to a zero-padded string of `width` digits.
///
/// Accepts digit strings with surrounding whitespace and spreadsheet float
/// artifacts (`1234.0`). Codes already longer than `width` are kept as-is.
/// Idempotent: a canonical code normalizes to itself. Non-coercible input
/// yields [`NormalizedCode::Invalid`]; the caller logs and counts it.
#[must_use]
pub fn normalize_code(raw: &str, width: usize) -> NormalizedCode {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedCode::Invalid;
    }

    // Spreadsheet exports render numeric cells as floats
    let digits = match trimmed.split_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b == b'0') => head,
        Some(_) => return NormalizedCode::Invalid,
        None => trimmed,
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return NormalizedCode::Invalid;
    }

    NormalizedCode::Valid(format!("{digits:0>width$}"))
}
