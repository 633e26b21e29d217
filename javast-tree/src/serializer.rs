//! Concrete tree → `SyntaxNode` conversion
//!
//! Both entry points produce identical trees. `serialize` is the direct
//! recursive walk; `serialize_iterative` keeps its own work stack so the
//! depth of the input cannot exhaust the call stack, and is what the
//! pipeline uses on untrusted source trees.
//!
//! Leaf text is always sliced from the raw byte buffer before decoding.
//! Positions are byte offsets, so slicing a decoded `str` by character
//! would shift every leaf after the first multibyte character.

use crate::error::{AstError, Result};
use crate::ir::{Point, SyntaxNode};
use crate::provider::ConcreteNode;
use std::ops::Range;

/// Serialize a concrete node and its subtree
///
/// Fails on the first leaf whose bytes are not valid UTF-8; no partial tree
/// is returned.
pub fn serialize<N: ConcreteNode>(node: &N, source: &[u8]) -> Result<SyntaxNode> {
    let children = node
        .child_nodes()
        .iter()
        .map(|child| serialize(child, source))
        .collect::<Result<Vec<_>>>()?;

    let text = if children.is_empty() {
        Some(leaf_text(node.type_tag(), node.byte_range(), source)?)
    } else {
        None
    };

    Ok(SyntaxNode {
        kind: node.type_tag().to_string(),
        start_point: node.start_point(),
        end_point: node.end_point(),
        children,
        text,
    })
}

/// Serialize with an explicit stack instead of recursion
pub fn serialize_iterative<N: ConcreteNode>(root: &N, source: &[u8]) -> Result<SyntaxNode> {
    let mut stack = vec![Frame::open(root)];

    while let Some(mut frame) = stack.pop() {
        if let Some(child) = frame.pending.next() {
            let child_frame = Frame::open(&child);
            stack.push(frame);
            stack.push(child_frame);
            continue;
        }

        let node = frame.close(source)?;
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => return Ok(node),
        }
    }

    unreachable!("the root frame always closes with an empty stack")
}

/// A node whose children are still being serialized
struct Frame<N> {
    kind: String,
    start_point: Point,
    end_point: Point,
    byte_range: Range<usize>,
    pending: std::vec::IntoIter<N>,
    children: Vec<SyntaxNode>,
}

impl<N: ConcreteNode> Frame<N> {
    fn open(node: &N) -> Self {
        let pending = node.child_nodes();
        Self {
            kind: node.type_tag().to_string(),
            start_point: node.start_point(),
            end_point: node.end_point(),
            byte_range: node.byte_range(),
            children: Vec::with_capacity(pending.len()),
            pending: pending.into_iter(),
        }
    }

    fn close(self, source: &[u8]) -> Result<SyntaxNode> {
        let text = if self.children.is_empty() {
            Some(leaf_text(&self.kind, self.byte_range, source)?)
        } else {
            None
        };

        Ok(SyntaxNode {
            kind: self.kind,
            start_point: self.start_point,
            end_point: self.end_point,
            children: self.children,
            text,
        })
    }
}

/// Decode `source[range]` as UTF-8
fn leaf_text(kind: &str, range: Range<usize>, source: &[u8]) -> Result<String> {
    let bytes = source.get(range.clone()).ok_or_else(|| AstError::InvalidRange {
        kind: kind.to_string(),
        start_byte: range.start,
        end_byte: range.end,
        len: source.len(),
    })?;

    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|source| AstError::Encoding {
            kind: kind.to_string(),
            start_byte: range.start,
            end_byte: range.end,
            source,
        })
}
