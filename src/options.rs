//! Section options
//!
//!     Two class names drive the output:
//!
//!     - `section_cls`: class given to a section when its heading carries none, and to annotated
//!       headings written as `{id}` without a class.
//!     - `heading_cls`: class every wrapped heading ends up with, whatever it had before.
//!
//!     Options are validated once and then only read, so processors can share them freely.
//!     This is stricter than hosts that pass class names through verbatim: an empty or
//!     whitespace-only class name is refused with [`SectionizeError::InvalidOption`] instead of
//!     producing `class=""` on every section.

use crate::error::SectionizeError;

pub const DEFAULT_SECTION_CLS: &str = "section";
pub const DEFAULT_HEADING_CLS: &str = "title";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOptions {
    section_cls: String,
    heading_cls: String,
}

impl SectionOptions {
    /// Builds options, rejecting empty or whitespace-only class names.
    pub fn new(
        section_cls: impl Into<String>,
        heading_cls: impl Into<String>,
    ) -> Result<Self, SectionizeError> {
        let section_cls = validate_class("section_cls", section_cls.into())?;
        let heading_cls = validate_class("heading_cls", heading_cls.into())?;
        Ok(Self {
            section_cls,
            heading_cls,
        })
    }

    pub fn section_cls(&self) -> &str {
        &self.section_cls
    }

    pub fn heading_cls(&self) -> &str {
        &self.heading_cls
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            section_cls: DEFAULT_SECTION_CLS.to_string(),
            heading_cls: DEFAULT_HEADING_CLS.to_string(),
        }
    }
}

fn validate_class(option: &'static str, value: String) -> Result<String, SectionizeError> {
    if value.trim().is_empty() {
        return Err(SectionizeError::InvalidOption {
            option,
            reason: "class name must not be empty".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SectionOptions::default();
        assert_eq!(options.section_cls(), "section");
        assert_eq!(options.heading_cls(), "title");
    }

    #[test]
    fn test_custom_classes() {
        let options = SectionOptions::new("chapter", "chapter-title").unwrap();
        assert_eq!(options.section_cls(), "chapter");
        assert_eq!(options.heading_cls(), "chapter-title");
    }

    #[test]
    fn test_rejects_blank_class() {
        let err = SectionOptions::new("section", "  ").unwrap_err();
        assert_eq!(
            err,
            SectionizeError::InvalidOption {
                option: "heading_cls",
                reason: "class name must not be empty".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value for option 'heading_cls': class name must not be empty"
        );

        assert!(SectionOptions::new("", "title").is_err());
    }
}
