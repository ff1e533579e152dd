//! Fluent assertions for node trees
//!
//!     Tests describe the expected shape of a tree instead of walking it by hand. Every
//!     assertion carries a context path (`root:children[0]:heading`) so a failure points at the
//!     node that broke.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use sectionize::testing::assert_tree;
//!
//!     let root = sectionize::sectionize("# {intro} Intro\n\nText.");
//!
//!     assert_tree(&root).child_count(1).child(0, |section| {
//!         section
//!             .is_section()
//!             .id("intro")
//!             .heading(|heading| {
//!                 heading.level(1).class("title").no_id();
//!             })
//!             .child(1, |para| {
//!                 para.tag("p").text("Text.");
//!             });
//!     });
//!     ```

use crate::ast::{Node, CLASS, ID};

/// Entry point: assertions on `root`.
pub fn assert_tree(root: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node: root,
        context: "root".to_string(),
    }
}

fn summarize_children(children: &[Node]) -> String {
    children
        .iter()
        .map(|child| child.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn tag(self, expected: &str) -> Self {
        assert_eq!(
            self.node.tag, expected,
            "{}: Expected tag '{}', but got '{}'",
            self.context, expected, self.node.tag
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        let actual = self.node.text.as_deref();
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected text '{}', but got {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn text_contains(self, substring: &str) -> Self {
        let actual = self.node.text.as_deref().unwrap_or_default();
        assert!(
            actual.contains(substring),
            "{}: Expected text to contain '{}', but got '{}'",
            self.context,
            substring,
            actual
        );
        self
    }

    pub fn attribute(self, key: &str, expected: &str) -> Self {
        let actual = self.node.attribute(key);
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected attribute {}='{}', but got {:?}",
            self.context,
            key,
            expected,
            actual
        );
        self
    }

    pub fn no_attribute(self, key: &str) -> Self {
        let actual = self.node.attribute(key);
        assert!(
            actual.is_none(),
            "{}: Expected no '{}' attribute, but got {:?}",
            self.context,
            key,
            actual
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        self.attribute(ID, expected)
    }

    pub fn no_id(self) -> Self {
        self.no_attribute(ID)
    }

    pub fn class(self, expected: &str) -> Self {
        self.attribute(CLASS, expected)
    }

    pub fn level(self, expected: usize) -> Self {
        let actual = self.node.heading_level();
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected heading of level {}, but '{}' has level {:?}",
            self.context,
            expected,
            self.node.tag,
            actual
        );
        self
    }

    pub fn is_section(self) -> Self {
        assert!(
            self.node.is_section(),
            "{}: Expected a section, got '{}' with children [{}]",
            self.context,
            self.node,
            summarize_children(&self.node.children)
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children.len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {} children: [{}]",
            self.context,
            expected,
            actual,
            summarize_children(&self.node.children)
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = &self.node.children;
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (node has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }

    /// Asserts the first child is a heading and runs `assertion` on it.
    pub fn heading<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let first = self.node.children.first();
        assert!(
            first.is_some_and(Node::is_heading),
            "{}: Expected a heading as first child, found [{}]",
            self.context,
            summarize_children(&self.node.children)
        );
        if let Some(heading) = first {
            assertion(NodeAssertion {
                node: heading,
                context: format!("{}:heading", self.context),
            });
        }
        self
    }
}
