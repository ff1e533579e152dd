//! Tree Visualization
//!
//! Renders a node tree as a box drawing outline, one node per line, labelled with the node's
//! [Display](std::fmt::Display) form (`tag#id.class "text"`).
//!
//! ## Example
//!
//! ```text
//! div
//! ├─ p "preface"
//! └─ div#intro.section
//!   ├─ h1.title "Introduction"
//!   └─ p "Some text."
//! ```

use super::node::Node;

/// Outline of `root` and all of its descendants.
pub fn to_treeviz(root: &Node) -> String {
    let mut output = format!("{}\n", root);
    let child_count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        format_node(child, "", i == child_count - 1, &mut output);
    }
    output
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!("{}{} {}\n", prefix, connector, node));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        format_node(child, &child_prefix, i == child_count - 1, output);
    }
}
