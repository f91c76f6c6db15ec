//! Dotted path expressions
//!
//! A path is the expression split on `.` with empty segments dropped. Each
//! segment is positional when it parses as an integer literal and a name
//! otherwise.
//!
//! Copyright (c) 2025 Shapeshift Team
//! Licensed under the Apache-2.0 license

use crate::convert::scalar::parse_signed;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    index: Option<i64>,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let index = parse_signed(&text, 64).ok();
        Self { text, index }
    }

    /// Position addressed by this segment, if it is an integer literal
    pub fn index(&self) -> Option<i64> {
        self.index
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_index(&self) -> bool {
        self.index.is_some()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parsed path expression, consumed left to right
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Split an expression into segments
    ///
    /// Never fails: `"A..B"` is the same path as `"A.B"`, and `""` is the
    /// empty path.
    pub fn parse(expression: &str) -> Self {
        Self {
            segments: expression
                .split('.')
                .filter(|s| !s.is_empty())
                .map(Segment::new)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether no segments remain
    pub fn is_end(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// The path without its first segment
    pub fn rest(&self) -> Path {
        Self {
            segments: self.segments.iter().skip(1).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Join segments back into an expression
    pub(crate) fn join(segments: &[Segment]) -> String {
        segments
            .iter()
            .map(Segment::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::parse(s))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Path::join(&self.segments))
    }
}
