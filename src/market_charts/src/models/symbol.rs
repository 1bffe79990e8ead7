//! Normalization of user-entered ticker codes.
//!
//! The dashboard only knows one convention for exchanges: a market suffix
//! such as `.TW` or `.L` appended to the local code. A code that already
//! carries the separator is taken as fully qualified.

use thiserror::Error;

/// Character separating a local code from its exchange suffix.
pub const SUFFIX_SEPARATOR: char = '.';

/// Prefix used by the upstream for index symbols (`^GSPC`, `^TWII`).
const INDEX_PREFIX: char = '^';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("symbol is empty")]
    Empty,

    #[error("symbol {0:?} contains whitespace")]
    Whitespace(String),
}

/// Trims and upper-cases `code`, appending `suffix` when the code has no
/// exchange separator.
///
/// Index symbols (leading `^`) are never suffixed. A suffix given without
/// its leading `.` gets one.
pub fn normalize_symbol(code: &str, suffix: Option<&str>) -> Result<String, SymbolError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(SymbolError::Empty);
    }
    if code.chars().any(char::is_whitespace) {
        return Err(SymbolError::Whitespace(code));
    }

    if code.contains(SUFFIX_SEPARATOR) || code.starts_with(INDEX_PREFIX) {
        return Ok(code);
    }

    let suffix = suffix
        .map(|s| s.trim().trim_start_matches(SUFFIX_SEPARATOR).to_uppercase())
        .filter(|s| !s.is_empty());

    Ok(match suffix {
        Some(s) => format!("{code}{SUFFIX_SEPARATOR}{s}"),
        None => code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_suffix_when_separator_absent() {
        assert_eq!(normalize_symbol(" 2330 ", Some(".TW")).unwrap(), "2330.TW");
        assert_eq!(normalize_symbol("vod", Some("l")).unwrap(), "VOD.L");
    }

    #[test]
    fn keeps_fully_qualified_codes() {
        assert_eq!(normalize_symbol("6505.two", Some(".TW")).unwrap(), "6505.TWO");
    }

    #[test]
    fn index_codes_are_not_suffixed() {
        assert_eq!(normalize_symbol("^twii", Some(".TW")).unwrap(), "^TWII");
    }

    #[test]
    fn blank_suffix_means_no_suffix() {
        assert_eq!(normalize_symbol("AAPL", Some("  ")).unwrap(), "AAPL");
        assert_eq!(normalize_symbol("AAPL", None).unwrap(), "AAPL");
    }

    #[test]
    fn rejects_empty_and_inner_whitespace() {
        assert_eq!(normalize_symbol("   ", Some(".TW")), Err(SymbolError::Empty));
        assert!(matches!(
            normalize_symbol("BRK B", None),
            Err(SymbolError::Whitespace(_))
        ));
    }
}
