//! Error types for sectionize
//!
//! Parsing and section building never fail. Errors only surface at the edges: invalid options
//! and registry manipulation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionizeError {
    /// An option value was rejected when building [crate::SectionOptions].
    #[error("invalid value for option '{option}': {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// No processor is registered under the given name.
    #[error("no processor registered under '{0}'")]
    NotRegistered(String),
}
