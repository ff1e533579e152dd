//! Annotated headings
//!
//!     Recognizes headings carrying an identifier group:
//!
//!         ### {intro,callout} Introduction
//!
//!     One or more `#`, whitespace, `{identifier}` or `{identifier,class}`, whitespace, then the
//!     heading text up to the end of the line. The identifier group accepts letters, digits,
//!     commas, underscores and hyphens.
//!
//!     - Depth is the number of `#`, clamped to 6. Longer runs are accepted, not rejected.
//!     - With a comma in the group, the first segment is the identifier and the second the class.
//!       Anything after a second comma is ignored.
//!     - Without a comma, the whole group is the identifier and the class is `section_cls`.
//!
//!     Only the first line of a block is a heading candidate. The remaining lines are pushed back
//!     onto the queue as separate blocks, in their original order, for the other processors.
//!
//!     The annotator only emits heading nodes; nesting them is the job of the
//!     [section builder](crate::builder).

use crate::ast::{Node, CLASS, ID};
use crate::blocks::BlockProcessor;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;
use tracing::debug;

/// Deepest heading level; deeper markers are clamped to it.
pub const MAX_DEPTH: usize = 6;

static ANNOTATED_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<depth>#+)\s+\{(?P<id>[,A-Za-z0-9_-]+)\}\s+(?P<text>.*)").unwrap()
});

/// Annotated heading lines anywhere in a block, any number of `#`.
pub(crate) static ANNOTATED_HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#+[ \t]+\{[,A-Za-z0-9_-]+\}[ \t]").unwrap());

/// The pieces of an annotated heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedHeading {
    pub depth: usize,
    pub id: String,
    pub class: String,
    pub text: String,
}

impl AnnotatedHeading {
    pub fn into_node(self) -> Node {
        Node::with_text(format!("h{}", self.depth), self.text)
            .with_attribute(ID, self.id)
            .with_attribute(CLASS, self.class)
    }
}

/// Block processor turning `## {id,class} Title` lines into heading nodes.
#[derive(Debug, Clone)]
pub struct HeadingAnnotator {
    section_cls: String,
}

impl HeadingAnnotator {
    /// `section_cls` is the class given to headings whose group has no class segment.
    pub fn new(section_cls: impl Into<String>) -> Self {
        Self {
            section_cls: section_cls.into(),
        }
    }

    /// Parses a single line, returning `None` when it is not an annotated heading.
    pub fn parse_line(&self, line: &str) -> Option<AnnotatedHeading> {
        let caps = ANNOTATED_HEADING.captures(line)?;
        let depth = caps["depth"].len().min(MAX_DEPTH);
        let (id, class) = split_identifier(&caps["id"], &self.section_cls);
        Some(AnnotatedHeading {
            depth,
            id: id.to_string(),
            class: class.to_string(),
            text: caps["text"].to_string(),
        })
    }
}

impl BlockProcessor for HeadingAnnotator {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        ANNOTATED_HEADING.is_match(first_line(block))
    }

    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> bool {
        let Some(block) = blocks.pop_front() else {
            return false;
        };
        let Some(heading) = self.parse_line(first_line(&block)) else {
            blocks.push_front(block);
            return false;
        };

        debug!(
            depth = heading.depth,
            id = %heading.id,
            class = %heading.class,
            "annotated heading"
        );
        parent.append(heading.into_node());

        let rest: Vec<&str> = block.split('\n').skip(1).collect();
        for line in rest.into_iter().rev() {
            blocks.push_front(line.to_string());
        }
        true
    }
}

fn first_line(block: &str) -> &str {
    block.split('\n').next().unwrap_or(block)
}

/// Splits `id` or `id,class`; a group without a comma takes `default_class`.
fn split_identifier<'a>(group: &'a str, default_class: &'a str) -> (&'a str, &'a str) {
    match group.split_once(',') {
        Some((id, rest)) => {
            let class = rest.split_once(',').map_or(rest, |(class, _)| class);
            (id, class)
        }
        None => (group, default_class),
    }
}
