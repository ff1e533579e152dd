//! # sectionize
//!
//! Turns the flat heading-and-content output of a markdown block parse into a
//! tree of nested section containers.
//!
//! Architecture
//!
//!     - Block parser host: splits source into blank-line separated blocks and hands each one to
//!       the registered block processors, in priority order. See [blocks].
//!     - Heading annotator: a block processor recognizing `## {id,class} Title` headings. See
//!       [annotator].
//!     - Section builder: a tree processor that nests every heading, and the content below it,
//!       into a `div` section according to heading depth. See [builder].
//!     - Pipeline: owns the processor registries and runs blocks, then tree processors. The
//!       [extension::SectionsExtension] registers the annotator and the builder in one go.
//!
//!     The file structure :
//!     .
//!     ├── ast                     # Node tree and the treeviz outline
//!     ├── blocks                  # Block parser host and the built-in block processors
//!     ├── annotator.rs            # `{id,class}` heading detection
//!     ├── builder.rs              # Stack based section nesting
//!     ├── extension.rs            # Registers annotator + builder
//!     ├── options.rs              # section_cls / heading_cls
//!     ├── pipeline.rs             # Pipeline, TreeProcessor, Extension
//!     ├── registry.rs             # Named, prioritized processor registry
//!     └── testing.rs              # Fluent tree assertions
//!
//! Example
//!
//!     ```text
//!     # {intro} Introduction
//!
//!     Some text.
//!
//!     ## {details,callout} Details
//!     ```
//!
//!     becomes
//!
//!     ```text
//!     div
//!     └─ div#intro.section
//!       ├─ h1.title "Introduction"
//!       ├─ p "Some text."
//!       └─ div#details.callout
//!         └─ h2.title "Details"
//!     ```

pub mod annotator;
pub mod ast;
pub mod blocks;
pub mod builder;
pub mod error;
pub mod extension;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod testing;

pub use ast::Node;
pub use error::SectionizeError;
pub use extension::SectionsExtension;
pub use options::SectionOptions;
pub use pipeline::Pipeline;

/// Parses `source` and nests its headings into sections using the default options.
pub fn sectionize(source: &str) -> Node {
    sectionize_with(source, &SectionOptions::default())
}

/// Parses `source` and nests its headings into sections using `options`.
pub fn sectionize_with(source: &str, options: &SectionOptions) -> Node {
    Pipeline::new()
        .with_extension(&SectionsExtension::new(options.clone()))
        .parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_tree;

    #[test]
    fn test_sectionize_defaults() {
        let root = sectionize("# {intro} Introduction\n\nSome text.\n");

        assert_tree(&root).child_count(1).child(0, |section| {
            section
                .is_section()
                .id("intro")
                .class("section")
                .child_count(2)
                .heading(|heading| {
                    heading.level(1).class("title").no_id().text("Introduction");
                })
                .child(1, |para| {
                    para.tag("p").text("Some text.");
                });
        });
    }

    #[test]
    fn test_sectionize_with_custom_classes() {
        let options = SectionOptions::new("chapter", "chapter-title").unwrap();
        let root = sectionize_with("## {a} A\n\n## {b,aside} B\n", &options);

        assert_tree(&root)
            .child_count(2)
            .child(0, |section| {
                section.id("a").class("chapter").heading(|heading| {
                    heading.class("chapter-title");
                });
            })
            .child(1, |section| {
                section.id("b").class("aside").heading(|heading| {
                    heading.class("chapter-title");
                });
            });
    }
}
