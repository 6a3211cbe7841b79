//! Error types for msbuild-analysis
//!
//! Defects in the *analyzed text* are never errors: they are reported as
//! [`Issue`](crate::issues::Issue) values and parsing always continues. The
//! error type here covers the other failure class: misuse of the crate's
//! low-level primitives by the caller, such as invoking
//! [`Tokenizer::read_attribute`](crate::xml::Tokenizer::read_attribute) when
//! the tokenizer is not positioned on an attribute name.

use thiserror::Error;

/// Result type alias using the msbuild-analysis Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for msbuild-analysis operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller violated a precondition of a low-level primitive.
    ///
    /// This indicates a bug in the calling code, not a defect in the
    /// analyzed document, and must not be converted into an `Issue`.
    #[error("contract violation: {0}")]
    Contract(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_display() {
        let err = Error::Contract("read_attribute called off a name token".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("contract violation"));
        assert!(msg.contains("read_attribute"));
    }
}
