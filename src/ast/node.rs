//! Node element
//!
//!     A node is the only element type of the tree. The tag carries the kind (`p`, `h3`, `div`),
//!     attributes are kept in a sorted map so two trees compare and print the same way regardless
//!     of the order attributes were set in.
//!
//!     Children are owned. Moving a node under another parent is a move of the value: take it
//!     out of the old child list, push it onto the new one.
//!
//! Headings
//!
//!     A node is a heading when its tag is `h1` to `h6`, in any letter case. Anything else,
//!     including `h0`, `h7` or `hr`, is content.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute holding the element identifier.
pub const ID: &str = "id";
/// Attribute holding the CSS class.
pub const CLASS: &str = "class";
/// Tag of the synthetic section containers.
pub const SECTION_TAG: &str = "div";

static HEADING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^h([1-6])$").unwrap());

/// A generic tree element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Builder style variant of [Node::set_attribute].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder style variant of [Node::append].
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute(ID)
    }

    pub fn class(&self) -> Option<&str> {
        self.attribute(CLASS)
    }

    /// Appends `child` and returns a handle to it in its new position.
    pub fn append(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Heading level (1-6) when the tag is a heading tag.
    pub fn heading_level(&self) -> Option<usize> {
        HEADING_TAG
            .captures(&self.tag)
            .and_then(|caps| caps[1].parse().ok())
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }

    /// True for a section container: a `div` whose first child is a heading.
    pub fn is_section(&self) -> bool {
        self.tag.eq_ignore_ascii_case(SECTION_TAG)
            && self.children.first().is_some_and(Node::is_heading)
    }

    /// Depth-first, pre-order iterator over this node and all its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if let Some(id) = self.id() {
            write!(f, "#{}", id)?;
        }
        if let Some(class) = self.class() {
            for name in class.split_whitespace() {
                write!(f, ".{}", name)?;
            }
        }
        if let Some(text) = &self.text {
            write!(f, " {:?}", text)?;
        }
        Ok(())
    }
}

/// Pre-order walk returned by [Node::descendants].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
