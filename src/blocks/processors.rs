//! Built-in block processors
//!
//! | Name           | Priority | Handles                                   |
//! |----------------|----------|-------------------------------------------|
//! | `empty`        | 100      | blank blocks and stray leading newlines   |
//! | `hash_heading` | 50       | `## Title` lines anywhere in a block      |
//! | `paragraph`    | 10       | anything else, as a `p`                   |
//!
//! The annotated heading processor (priority 55) lives in [crate::annotator] and sits between
//! `empty` and `hash_heading`, so `## {id} Title` never reaches the plain heading processor.

use super::BlockProcessor;
use crate::annotator::ANNOTATED_HEADING_LINE;
use crate::ast::Node;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

pub const EMPTY: &str = "empty";
pub const HASH_HEADING: &str = "hash_heading";
pub const PARAGRAPH: &str = "paragraph";

static HASH_HEADING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?P<level>#{1,6})(?:[ \t]+(?P<text>.*?))?(?:[ \t]+#+)?[ \t]*$").unwrap()
});

/// Consumes blank blocks, and strips the leading newline an odd run of blank lines leaves behind.
///
/// Three blank lines between `a` and `b` split into `"a"` and `"\nb"`; the second is requeued as
/// `"b"` so the other processors see its first real line.
pub struct EmptyBlockProcessor;

impl BlockProcessor for EmptyBlockProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        block.trim().is_empty() || block.starts_with('\n')
    }

    fn run(&self, _parent: &mut Node, blocks: &mut VecDeque<String>) -> bool {
        let Some(block) = blocks.pop_front() else {
            return false;
        };
        if let Some(rest) = block.strip_prefix('\n') {
            if !rest.trim().is_empty() {
                blocks.push_front(rest.to_string());
            }
        }
        true
    }
}

/// Plain ATX headings: one to six `#`, whitespace, title, optional closing hashes.
///
/// A heading line in the middle of a block splits the block: the lines above are requeued as a
/// block of their own, and the heading starts the next one. Annotated headings split the same
/// way whatever their number of `#`. Every processor thus sees headings at the start of a block.
pub struct HashHeadingProcessor;

impl BlockProcessor for HashHeadingProcessor {
    fn test(&self, _parent: &Node, block: &str) -> bool {
        HASH_HEADING_LINE.is_match(block) || inner_annotated_heading(block).is_some()
    }

    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> bool {
        let Some(block) = blocks.pop_front() else {
            return false;
        };
        let parsed = HASH_HEADING_LINE.captures(&block).and_then(|caps| {
            let line = caps.get(0)?;
            let text = caps
                .name("text")
                .map(|text| text.as_str().trim().to_string())
                .filter(|text| !text.is_empty());
            Some((line.start(), line.end(), caps["level"].len(), text))
        });
        let heading_start = parsed.as_ref().map(|&(start, ..)| start);

        if heading_start != Some(0) {
            let split_at = [heading_start, inner_annotated_heading(&block)]
                .into_iter()
                .flatten()
                .min();
            let Some(at) = split_at else {
                blocks.push_front(block);
                return false;
            };
            let before = block[..at].trim_end_matches('\n');
            blocks.push_front(block[at..].to_string());
            if !before.is_empty() {
                blocks.push_front(before.to_string());
            }
            return true;
        }

        let Some((_, end, level, text)) = parsed else {
            blocks.push_front(block);
            return false;
        };

        let mut heading = Node::new(format!("h{}", level));
        heading.text = text;
        parent.append(heading);

        let after = block[end..].trim_start_matches('\n');
        if !after.is_empty() {
            blocks.push_front(after.to_string());
        }
        true
    }
}

/// Start of the first annotated heading line below the first line of `block`.
fn inner_annotated_heading(block: &str) -> Option<usize> {
    ANNOTATED_HEADING_LINE
        .find_iter(block)
        .map(|found| found.start())
        .find(|&start| start > 0)
}

/// Fallback: every block becomes a paragraph.
pub struct ParagraphProcessor;

impl BlockProcessor for ParagraphProcessor {
    fn test(&self, _parent: &Node, _block: &str) -> bool {
        true
    }

    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> bool {
        let Some(block) = blocks.pop_front() else {
            return false;
        };
        parent.append(Node::with_text("p", block.trim_start()));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run_one(processor: &dyn BlockProcessor, block: &str) -> (Node, VecDeque<String>) {
        let mut parent = Node::new("div");
        let mut blocks = VecDeque::from(vec![block.to_string()]);
        assert!(processor.test(&parent, block), "processor should accept {:?}", block);
        assert!(processor.run(&mut parent, &mut blocks));
        (parent, blocks)
    }

    #[test]
    fn test_empty_block() {
        let parent = Node::new("div");
        assert!(EmptyBlockProcessor.test(&parent, ""));
        assert!(EmptyBlockProcessor.test(&parent, "  \n "));
        assert!(!EmptyBlockProcessor.test(&parent, "text"));

        let (parent, blocks) = run_one(&EmptyBlockProcessor, "");
        assert!(parent.children.is_empty());
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_empty_block_strips_leading_newline() {
        let (parent, blocks) = run_one(&EmptyBlockProcessor, "\n# {a} A\nbody");

        assert!(parent.children.is_empty());
        assert_eq!(blocks, vec!["# {a} A\nbody"]);
    }

    #[rstest]
    #[case("# Title", 1, Some("Title"))]
    #[case("### Deep title", 3, Some("Deep title"))]
    #[case("###### Six", 6, Some("Six"))]
    #[case("## Closed ##", 2, Some("Closed"))]
    #[case("##", 2, None)]
    fn test_hash_heading(#[case] block: &str, #[case] level: usize, #[case] text: Option<&str>) {
        let (parent, blocks) = run_one(&HashHeadingProcessor, block);

        assert!(blocks.is_empty());
        assert_eq!(parent.children.len(), 1);
        let heading = &parent.children[0];
        assert_eq!(heading.heading_level(), Some(level));
        assert_eq!(heading.text.as_deref(), text);
        assert!(heading.attributes.is_empty());
    }

    #[rstest]
    #[case("#hashtag")]
    #[case("####### seven")]
    #[case("plain text")]
    fn test_hash_heading_rejects(#[case] block: &str) {
        assert!(!HashHeadingProcessor.test(&Node::new("div"), block));
    }

    #[test]
    fn test_hash_heading_requeues_following_lines() {
        let (parent, blocks) = run_one(&HashHeadingProcessor, "# Title\nfirst\nsecond");

        assert_eq!(parent.children, vec![Node::with_text("h1", "Title")]);
        assert_eq!(blocks, vec!["first\nsecond"]);
    }

    #[test]
    fn test_hash_heading_splits_block_at_heading() {
        let (parent, blocks) = run_one(&HashHeadingProcessor, "intro\nmore\n## Title\nafter");

        assert!(parent.children.is_empty());
        assert_eq!(blocks, vec!["intro\nmore", "## Title\nafter"]);
    }

    #[rstest]
    #[case("intro\n######## {deep} Deep\nbody", "intro", "######## {deep} Deep\nbody")]
    #[case("intro\n## {a} A", "intro", "## {a} A")]
    #[case("intro\n####### {a} A\n## B", "intro", "####### {a} A\n## B")]
    fn test_hash_heading_splits_at_annotated_heading(
        #[case] block: &str,
        #[case] before: &str,
        #[case] rest: &str,
    ) {
        let (parent, blocks) = run_one(&HashHeadingProcessor, block);

        assert!(parent.children.is_empty());
        assert_eq!(blocks, vec![before, rest]);
    }

    #[test]
    fn test_paragraph() {
        let (parent, blocks) = run_one(&ParagraphProcessor, "  first line\nsecond line");

        assert!(blocks.is_empty());
        assert_eq!(
            parent.children,
            vec![Node::with_text("p", "first line\nsecond line")]
        );
    }
}
