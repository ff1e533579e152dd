//! Processing pipeline
//!
//!     A [Pipeline] owns two registries:
//!
//!     - block processors, which turn source blocks into nodes under the root;
//!     - tree processors, which rewrite the finished tree, highest priority first.
//!
//!     `Pipeline::new()` comes with the host block processors (`empty`, `hash_heading`,
//!     `paragraph`) and no tree processors. Extensions add their own processors through
//!     [Extension::extend].
//!
//!     A pipeline is immutable while parsing: `parse` takes `&self` and all processors are
//!     `Send + Sync`, so a configured pipeline can be shared across threads.

use crate::ast::Node;
use crate::blocks::processors::{EMPTY, HASH_HEADING, PARAGRAPH};
use crate::blocks::{
    self, BlockProcessor, BlockProcessors, EmptyBlockProcessor, HashHeadingProcessor,
    ParagraphProcessor,
};
use crate::registry::Registry;
use tracing::debug;

/// Tag of the root node returned by [Pipeline::parse].
pub const ROOT_TAG: &str = "div";

/// A pass over the complete tree, run after block parsing.
pub trait TreeProcessor: Send + Sync {
    fn run(&self, root: &mut Node);
}

pub type TreeProcessors = Registry<Box<dyn TreeProcessor>>;

/// A bundle of processors registered into a pipeline in one go.
pub trait Extension {
    fn extend(&self, pipeline: &mut Pipeline);
}

pub struct Pipeline {
    block_processors: BlockProcessors,
    tree_processors: TreeProcessors,
}

impl Pipeline {
    /// A pipeline with the host block processors and no tree processors.
    pub fn new() -> Self {
        let mut block_processors: BlockProcessors = Registry::new();
        block_processors.register(Box::new(EmptyBlockProcessor), EMPTY, 100);
        block_processors.register(Box::new(HashHeadingProcessor), HASH_HEADING, 50);
        block_processors.register(Box::new(ParagraphProcessor), PARAGRAPH, 10);

        Self {
            block_processors,
            tree_processors: Registry::new(),
        }
    }

    /// A pipeline without any processor.
    pub fn empty() -> Self {
        Self {
            block_processors: Registry::new(),
            tree_processors: Registry::new(),
        }
    }

    pub fn with_extension(mut self, extension: &dyn Extension) -> Self {
        self.register_extension(extension);
        self
    }

    pub fn register_extension(&mut self, extension: &dyn Extension) {
        extension.extend(self);
    }

    pub fn register_block_processor<P: BlockProcessor + 'static>(
        &mut self,
        processor: P,
        name: &str,
        priority: i32,
    ) {
        self.block_processors
            .register(Box::new(processor), name, priority);
    }

    pub fn register_tree_processor<P: TreeProcessor + 'static>(
        &mut self,
        processor: P,
        name: &str,
        priority: i32,
    ) {
        self.tree_processors
            .register(Box::new(processor), name, priority);
    }

    pub fn block_processors(&self) -> &BlockProcessors {
        &self.block_processors
    }

    pub fn block_processors_mut(&mut self) -> &mut BlockProcessors {
        &mut self.block_processors
    }

    pub fn tree_processors(&self) -> &TreeProcessors {
        &self.tree_processors
    }

    pub fn tree_processors_mut(&mut self) -> &mut TreeProcessors {
        &mut self.tree_processors
    }

    /// Parses `source` into a tree rooted at a `div`, then runs every tree processor over it.
    pub fn parse(&self, source: &str) -> Node {
        let mut root = Node::new(ROOT_TAG);
        blocks::parse_document(&self.block_processors, &mut root, source);

        for (name, processor) in self.tree_processors.iter_named() {
            debug!(processor = name, "running tree processor");
            processor.run(&mut root);
        }
        root
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::to_treeviz;

    #[test]
    fn test_host_processors() {
        let pipeline = Pipeline::new();
        assert_eq!(
            pipeline.block_processors().names(),
            vec!["empty", "hash_heading", "paragraph"]
        );
        assert!(pipeline.tree_processors().is_empty());
    }

    #[test]
    fn test_parse_without_extensions_is_flat() {
        let root = Pipeline::new().parse("# Title\n\nBody text.\n\n## Sub\nmore");

        insta::assert_snapshot!(to_treeviz(&root), @r#"
        div
        ├─ h1 "Title"
        ├─ p "Body text."
        ├─ h2 "Sub"
        └─ p "more"
        "#);
    }

    #[test]
    fn test_paragraph_interrupted_by_heading() {
        let root = Pipeline::new().parse("first\nsecond\n# Title\nafter");

        insta::assert_snapshot!(to_treeviz(&root), @r#"
        div
        ├─ p "first\nsecond"
        ├─ h1 "Title"
        └─ p "after"
        "#);
    }

    struct Uppercase;

    impl TreeProcessor for Uppercase {
        fn run(&self, root: &mut Node) {
            for child in &mut root.children {
                child.text = child.text.as_ref().map(|text| text.to_uppercase());
            }
        }
    }

    struct Reverse;

    impl TreeProcessor for Reverse {
        fn run(&self, root: &mut Node) {
            root.children.reverse();
        }
    }

    #[test]
    fn test_tree_processors_run_in_priority_order() {
        let mut pipeline = Pipeline::new();
        pipeline.register_tree_processor(Reverse, "reverse", 10);
        pipeline.register_tree_processor(Uppercase, "uppercase", 20);

        assert_eq!(pipeline.tree_processors().names(), vec!["uppercase", "reverse"]);

        let root = pipeline.parse("one\n\ntwo");
        assert_eq!(
            root.children,
            vec![Node::with_text("p", "TWO"), Node::with_text("p", "ONE")]
        );
    }

    struct ReverseExtension;

    impl Extension for ReverseExtension {
        fn extend(&self, pipeline: &mut Pipeline) {
            pipeline.register_tree_processor(Reverse, "reverse", 10);
        }
    }

    #[test]
    fn test_extension_registration() {
        let pipeline = Pipeline::new().with_extension(&ReverseExtension);
        assert!(pipeline.tree_processors().has("reverse"));
    }

    #[test]
    fn test_deregistered_processor_no_longer_runs() {
        let mut pipeline = Pipeline::new();
        pipeline
            .block_processors_mut()
            .deregister(HASH_HEADING)
            .unwrap();

        let root = pipeline.parse("# Not a heading");
        assert_eq!(root.children, vec![Node::with_text("p", "# Not a heading")]);
    }

    #[test]
    fn test_empty_pipeline_produces_empty_root() {
        let root = Pipeline::empty().parse("anything\n\nat all");
        assert_eq!(root, Node::new(ROOT_TAG));
    }
}
