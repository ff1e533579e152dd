//! Block parser host
//!
//!     Source text is cut into blocks at blank lines. Blocks sit in a queue; the parser offers the
//!     front block to every registered [BlockProcessor] in priority order. The first processor
//!     whose `test` accepts the block gets to `run`, and may consume the block, split it, or push
//!     new blocks back onto the front of the queue. A processor can still decline from `run` by
//!     returning `false` without touching the queue, and the parser moves on to the next one.
//!
//!     A block nobody accepts is dropped with a warning. With the built-in paragraph processor
//!     registered that never happens, but custom registries may lack a fallback.
//!
//! Normalization
//!
//!     Before splitting, line endings are unified to `\n` and lines holding only whitespace are
//!     emptied, so `"a\n  \nb"` is two blocks like `"a\n\nb"` is.

pub mod processors;

use crate::ast::Node;
use crate::registry::Registry;
use std::collections::VecDeque;
use tracing::{trace, warn};

pub use processors::{EmptyBlockProcessor, HashHeadingProcessor, ParagraphProcessor};

/// A unit of block level parsing.
pub trait BlockProcessor: Send + Sync {
    /// Whether this processor wants to handle `block`, the front of the queue.
    fn test(&self, parent: &Node, block: &str) -> bool;

    /// Handle the front of `blocks`, appending output under `parent`.
    ///
    /// Returns `false` to decline, in which case `blocks` must be left as it was.
    fn run(&self, parent: &mut Node, blocks: &mut VecDeque<String>) -> bool;
}

pub type BlockProcessors = Registry<Box<dyn BlockProcessor>>;

/// Splits normalized source text into its blank-line separated blocks.
pub fn split_blocks(source: &str) -> VecDeque<String> {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect();

    lines
        .join("\n")
        .split("\n\n")
        .map(str::to_string)
        .collect()
}

/// Parses `source` into children of `parent`.
pub fn parse_document(processors: &BlockProcessors, parent: &mut Node, source: &str) {
    parse_blocks(processors, parent, split_blocks(source));
}

/// Drains `blocks`, dispatching each front block to the first processor that accepts it.
pub fn parse_blocks(processors: &BlockProcessors, parent: &mut Node, mut blocks: VecDeque<String>) {
    while !blocks.is_empty() {
        let mut handled = false;
        for (name, processor) in processors.iter_named() {
            let accepts = match blocks.front() {
                Some(block) => processor.test(parent, block),
                None => false,
            };
            if !accepts {
                continue;
            }
            if processor.run(parent, &mut blocks) {
                trace!(processor = name, "block handled");
                handled = true;
                break;
            }
            trace!(processor = name, "block declined from run");
        }

        if !handled {
            if let Some(block) = blocks.pop_front() {
                warn!(block = %block, "no block processor accepted block, dropping it");
            }
        }
    }
}
