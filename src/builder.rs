//! Section building: flat headings to nested sections
//!
//! # The Problem
//!
//! After block parsing, a document is a flat list under the root:
//!
//! ```text
//! h1#a, p "x", h2#b, p "y", h2#c, p "z"
//! ```
//!
//! The heading levels describe a hierarchy the flat list does not show. Each heading, together
//! with everything that belongs under it, should live in its own `div` section:
//!
//! ```text
//! div#a.section
//! ├─ h1.title
//! ├─ p "x"
//! ├─ div#b.section
//! │ ├─ h2.title
//! │ └─ p "y"
//! └─ div#c.section
//!   ├─ h2.title
//!   └─ p "z"
//! ```
//!
//! # The Algorithm
//!
//! A single left to right pass over the root's children, with a stack of open sections.
//!
//! 1. Take the children out of the root. The pass works on that snapshot and writes to a fresh
//!    list, so nothing is skipped or revisited while the tree changes shape.
//! 2. On a heading of depth `d`:
//!    - wrap it in a new section: the section takes the heading's class (or `section_cls`) and
//!      its id, and the heading's class is overwritten with `heading_cls`;
//!    - close every open section of depth `>= d`. A closed section is moved into the section
//!      below it on the stack, or into the root list when the stack is empty;
//!    - push the new section with depth `d`.
//! 3. On any other node: append it to the section on top of the stack, or to the root list
//!    when no heading has been seen yet.
//! 4. Close what is left on the stack and give the root its new children.
//!
//! Containment is strict: a heading only nests under an open section of smaller depth. Two
//! headings of equal depth are siblings.
//!
//! A section is only attached to its parent when it is closed. While it is open nothing else can
//! be added to its parent (everything goes to the top of the stack), so attaching late keeps
//! document order.
//!
//! Only direct children of the root are restructured. Running the builder on its own output
//! changes nothing, since the root then holds sections and leading content only.

use crate::ast::{Node, CLASS, ID, SECTION_TAG};
use crate::options::SectionOptions;
use crate::pipeline::TreeProcessor;
use tracing::{debug, info};

/// A section under construction and the depth of its heading.
#[derive(Debug)]
struct OpenSection {
    node: Node,
    depth: usize,
}

/// Stack of open sections, local to one [SectionBuilder::build] call.
#[derive(Debug, Default)]
struct OpenSections {
    stack: Vec<OpenSection>,
    top_level: Vec<Node>,
}

impl OpenSections {
    /// Close every open section at `depth` or deeper.
    fn close_from(&mut self, depth: usize) {
        while self.stack.last().is_some_and(|open| open.depth >= depth) {
            self.close_innermost();
        }
    }

    fn close_innermost(&mut self) {
        if let Some(closed) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(container) => {
                    debug!(
                        depth = container.depth,
                        container = %container.node,
                        section = %closed.node,
                        "nesting section in container"
                    );
                    container.node.children.push(closed.node);
                }
                None => {
                    debug!(section = %closed.node, "section is top level");
                    self.top_level.push(closed.node);
                }
            }
        }
    }

    fn open(&mut self, node: Node, depth: usize) {
        self.stack.push(OpenSection { node, depth });
    }

    /// Append a non-heading node to the innermost open section, or the root when none is open.
    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(container) => {
                debug!(node = %node, container = %container.node, "attaching content");
                container.node.children.push(node);
            }
            None => self.top_level.push(node),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.stack.is_empty() {
            self.close_innermost();
        }
        self.top_level
    }
}

/// Tree processor nesting headings and their content into sections.
///
/// The builder only holds its options; each run allocates its own stack, so one builder can
/// process any number of documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct SectionBuilder {
    options: SectionOptions,
}

impl SectionBuilder {
    pub fn new(options: SectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SectionOptions {
        &self.options
    }

    /// Rewrites the direct children of `root` into nested sections.
    pub fn build(&self, root: &mut Node) {
        let children = std::mem::take(&mut root.children);
        info!(root = %root, children = children.len(), "building sections");

        let mut open = OpenSections::default();
        for child in children {
            match child.heading_level() {
                Some(depth) => {
                    let section = self.wrap_heading(child);
                    debug!(depth, section = %section, "matched heading");
                    open.close_from(depth);
                    open.open(section, depth);
                }
                None => open.attach(child),
            }
        }

        root.children = open.finish();
    }

    /// Wraps `heading` in a new section, moving its id and class over.
    fn wrap_heading(&self, mut heading: Node) -> Node {
        let class = heading
            .remove_attribute(CLASS)
            .unwrap_or_else(|| self.options.section_cls().to_string());
        let mut section = Node::new(SECTION_TAG).with_attribute(CLASS, class);
        if let Some(id) = heading.remove_attribute(ID) {
            section.set_attribute(ID, id);
        }
        heading.set_attribute(CLASS, self.options.heading_cls());
        section.children.push(heading);
        section
    }
}

impl TreeProcessor for SectionBuilder {
    fn run(&self, root: &mut Node) {
        self.build(root);
    }
}
