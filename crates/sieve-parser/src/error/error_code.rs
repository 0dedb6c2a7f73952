//! Error codes for the Sieve diagnostic system.
//!
//! - `E1xx` - Source list errors
//! - `E2xx` - Source list warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed entry.
    ///
    /// The line matches none of the recognised shapes: an entry without a
    /// name, a name containing whitespace, or a bracketed line that is not a
    /// global section marker.
    E100,

    /// Unknown namespace prefix.
    ///
    /// An entry was qualified with a word that is not a namespace keyword
    /// valid in that position. Elements accept `svg` and `math`; attributes
    /// accept `xlink`, `xml` and `xmlns`.
    E101,

    /// Unknown list namespace.
    ///
    /// The `# namespace:` header of a name list names neither a known
    /// namespace URI nor a namespace keyword.
    E102,

    /// Detached attribute.
    ///
    /// An attribute line appeared before any element line or global section
    /// marker, so there is nothing for it to apply to.
    E200,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
    }
}
