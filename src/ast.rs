//! Document tree for sectionize
//!
//! A deliberately small, element-tree style model: every node is a tag, a set of string
//! attributes, optional text and owned children. Block processors build it, tree processors
//! rewrite it.
//!
//! ## Modules
//!
//! - `node` - The [Node] type and its heading helpers
//! - `treeviz` - Box drawing outline used by tests and debug output

pub mod node;
pub mod treeviz;

pub use node::{Node, CLASS, ID, SECTION_TAG};
pub use treeviz::to_treeviz;
