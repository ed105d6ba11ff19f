//! Address Patterns
//!
//! Routes are declared as slash-delimited patterns. A segment is either a
//! literal or the single-segment wildcard `*`; there is no multi-segment
//! wildcard. When several patterns match one address, the one with the most
//! literal segments wins.

use crate::{Error, Result};

/// A validated, pre-split route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPattern {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard,
}

impl AddressPattern {
    /// Parse and validate a pattern string.
    ///
    /// Patterns must start with `/` and contain no empty segments.
    pub fn new(pattern: &str) -> Result<Self> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| Error::Route(format!("pattern must start with '/': {pattern:?}")))?;
        if rest.is_empty() {
            return Err(Error::Route(format!("empty pattern: {pattern:?}")));
        }

        let mut segments = Vec::new();
        for part in rest.split('/') {
            match part {
                "" => {
                    return Err(Error::Route(format!(
                        "empty segment in pattern: {pattern:?}"
                    )))
                }
                "*" => segments.push(Segment::Wildcard),
                lit => segments.push(Segment::Literal(lit.to_string())),
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `address` matches this pattern segment-for-segment.
    pub fn matches(&self, address: &str) -> bool {
        let rest = match address.strip_prefix('/') {
            Some(r) => r,
            None => return false,
        };

        let mut parts = rest.split('/');
        for segment in &self.segments {
            match (segment, parts.next()) {
                (_, None) => return false,
                (Segment::Wildcard, Some(part)) => {
                    if part.is_empty() {
                        return false;
                    }
                }
                (Segment::Literal(lit), Some(part)) => {
                    if lit != part {
                        return false;
                    }
                }
            }
        }
        parts.next().is_none()
    }

    /// Count of literal segments. Higher is more specific.
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }
}
