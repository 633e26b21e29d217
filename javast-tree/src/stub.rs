//! Grammar-free engine and nodes for exercising the serializer and pipeline
//!
//! `StubNode` trees are built by hand; `WordEngine` splits its input on
//! ASCII whitespace and returns a flat `document` of `word` leaves, which is
//! enough structure to drive a pipeline end to end without tree-sitter.

use crate::error::{AstError, Result};
use crate::ir::Point;
use crate::provider::{ConcreteNode, SyntaxEngine, SyntaxTree};
use std::ops::Range;

/// Hand-built concrete node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubNode {
    pub kind: String,
    pub start_point: Point,
    pub end_point: Point,
    pub byte_range: Range<usize>,
    pub children: Vec<StubNode>,
}

impl StubNode {
    /// A childless node on row 0, with columns equal to byte offsets
    pub fn leaf(kind: impl Into<String>, byte_range: Range<usize>) -> Self {
        Self {
            kind: kind.into(),
            start_point: Point::new(0, byte_range.start),
            end_point: Point::new(0, byte_range.end),
            byte_range,
            children: Vec::new(),
        }
    }

    /// An internal node spanning its first to its last child
    pub fn node(kind: impl Into<String>, children: Vec<StubNode>) -> Self {
        let (start_point, start_byte) = children
            .first()
            .map(|c| (c.start_point, c.byte_range.start))
            .unwrap_or_default();
        let (end_point, end_byte) = children
            .last()
            .map(|c| (c.end_point, c.byte_range.end))
            .unwrap_or_default();

        Self {
            kind: kind.into(),
            start_point,
            end_point,
            byte_range: start_byte..end_byte,
            children,
        }
    }

    pub fn with_points(mut self, start_point: Point, end_point: Point) -> Self {
        self.start_point = start_point;
        self.end_point = end_point;
        self
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl<'a> ConcreteNode for &'a StubNode {
    fn type_tag(&self) -> &str {
        &self.kind
    }

    fn start_point(&self) -> Point {
        self.start_point
    }

    fn end_point(&self) -> Point {
        self.end_point
    }

    fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }

    fn child_nodes(&self) -> Vec<Self> {
        let node: &'a StubNode = *self;
        node.children.iter().collect()
    }
}

/// Parse result of a stub engine
#[derive(Debug, Clone)]
pub struct StubTree {
    pub root: StubNode,
}

impl SyntaxTree for StubTree {
    type Node<'a> = &'a StubNode
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_> {
        &self.root
    }
}

/// Whitespace tokenizer posing as a grammar engine
#[derive(Debug, Default)]
pub struct WordEngine {
    calls: usize,
    fail: bool,
}

impl WordEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine whose every parse call fails
    pub fn failing() -> Self {
        Self {
            calls: 0,
            fail: true,
        }
    }

    /// Number of parse calls made so far
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl SyntaxEngine for WordEngine {
    type Tree = StubTree;

    fn grammar(&self) -> &str {
        "words"
    }

    fn parse(&mut self, source: &[u8]) -> Result<Self::Tree> {
        self.calls += 1;
        if self.fail {
            return Err(AstError::parse_error("stub engine configured to fail"));
        }

        let mut words = Vec::new();
        let mut point = Point::default();
        let mut current: Option<(usize, Point)> = None;

        for (offset, &byte) in source.iter().enumerate() {
            if byte.is_ascii_whitespace() {
                if let Some((start, start_point)) = current.take() {
                    words.push(word(start..offset, start_point, point));
                }
            } else if current.is_none() {
                current = Some((offset, point));
            }

            if byte == b'\n' {
                point = Point::new(point.row + 1, 0);
            } else {
                point.column += 1;
            }
        }
        if let Some((start, start_point)) = current {
            words.push(word(start..source.len(), start_point, point));
        }

        let root = StubNode {
            kind: "document".to_string(),
            start_point: Point::default(),
            end_point: point,
            byte_range: 0..source.len(),
            children: words,
        };
        Ok(StubTree { root })
    }
}

fn word(byte_range: Range<usize>, start_point: Point, end_point: Point) -> StubNode {
    StubNode {
        kind: "word".to_string(),
        start_point,
        end_point,
        byte_range,
        children: Vec::new(),
    }
}
