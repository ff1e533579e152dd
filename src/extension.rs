//! The sections extension
//!
//! Registers the two halves of sectioning into a [Pipeline]:
//!
//! | Processor           | Kind  | Priority |
//! |---------------------|-------|----------|
//! | `heading_annotator` | block | 55       |
//! | `section_builder`   | tree  | 45       |
//!
//! The annotator sits above the host `hash_heading` processor (50) so annotated headings are
//! claimed before the plain heading syntax sees them.

use crate::annotator::HeadingAnnotator;
use crate::builder::SectionBuilder;
use crate::options::SectionOptions;
use crate::pipeline::{Extension, Pipeline};

pub const HEADING_ANNOTATOR: &str = "heading_annotator";
pub const SECTION_BUILDER: &str = "section_builder";

pub const HEADING_ANNOTATOR_PRIORITY: i32 = 55;
pub const SECTION_BUILDER_PRIORITY: i32 = 45;

#[derive(Debug, Clone, Default)]
pub struct SectionsExtension {
    options: SectionOptions,
}

impl SectionsExtension {
    pub fn new(options: SectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SectionOptions {
        &self.options
    }
}

impl Extension for SectionsExtension {
    fn extend(&self, pipeline: &mut Pipeline) {
        pipeline.register_block_processor(
            HeadingAnnotator::new(self.options.section_cls()),
            HEADING_ANNOTATOR,
            HEADING_ANNOTATOR_PRIORITY,
        );
        pipeline.register_tree_processor(
            SectionBuilder::new(self.options.clone()),
            SECTION_BUILDER,
            SECTION_BUILDER_PRIORITY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_both_processors() {
        let pipeline = Pipeline::new().with_extension(&SectionsExtension::default());

        assert_eq!(
            pipeline.block_processors().names(),
            vec!["empty", "heading_annotator", "hash_heading", "paragraph"]
        );
        assert_eq!(pipeline.tree_processors().names(), vec!["section_builder"]);
        assert_eq!(
            pipeline.tree_processors().priority(SECTION_BUILDER),
            Some(SECTION_BUILDER_PRIORITY)
        );
    }

    #[test]
    fn test_registering_twice_replaces() {
        let mut pipeline = Pipeline::new();
        pipeline.register_extension(&SectionsExtension::default());
        pipeline.register_extension(&SectionsExtension::default());

        assert_eq!(pipeline.block_processors().len(), 4);
        assert_eq!(pipeline.tree_processors().len(), 1);
    }
}
