//! Key paths for addressing values inside a JSON document.
//!
//! A key path is a dotted string such as `profile.address.city` or
//! `tags[0]`, parsed into a sequence of segments. Each segment is either a
//! key (for objects) or an index (for arrays).

use crate::error::{PatchError, PatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single segment of a key path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Object key access: `{"key": value}`
    Key(String),
    /// Array index access: `[index]`
    Index(usize),
}

impl Segment {
    /// Create a key segment.
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Segment::Key(k.into())
    }

    /// Create an index segment.
    #[inline]
    pub fn index(i: usize) -> Self {
        Segment::Index(i)
    }

    /// Returns true if this is a key segment.
    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key(_))
    }

    /// Returns true if this is an index segment.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Get the key if this is a key segment.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(k) => Some(k),
            Segment::Index(_) => None,
        }
    }

    /// Get the index if this is an index segment.
    #[inline]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(_) => None,
            Segment::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_owned())
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A parsed key path: an ordered sequence of segments.
///
/// # Examples
///
/// ```
/// use keypatch::{KeyPath, Segment};
///
/// let path = KeyPath::parse("profile.addresses[0].city").unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path[1], Segment::key("addresses"));
/// assert_eq!(path[2], Segment::index(0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyPath(Vec<Segment>);

/// Scanner states for the key path grammar.
enum ScanState {
    /// Accumulating characters of a key segment.
    Key,
    /// Inside `[...]`, accumulating decimal digits.
    Index,
}

impl KeyPath {
    /// Parse a key path string into its segments.
    ///
    /// The grammar is a single left-to-right scan:
    ///
    /// - segments are separated by `.` and may carry `[<digits>]` index
    ///   suffixes (`a.b`, `tags[0]`, `grid[1][2]`);
    /// - the first segment must be a key, not an index;
    /// - empty segments, unterminated or empty brackets, non-digits inside
    ///   brackets, and a trailing `.` are all invalid.
    ///
    /// Every violation yields [`PatchError::InvalidKeyPath`] carrying the
    /// original path string verbatim.
    pub fn parse(raw: &str) -> PatchResult<Self> {
        if raw.is_empty() {
            return Err(PatchError::invalid_key_path(raw));
        }

        let mut segments = Vec::new();
        let mut key = String::new();
        let mut digits = String::new();
        let mut state = ScanState::Key;
        // Set after a `]` so that a following `.` separates rather than
        // flushing an empty key segment (`a[0].b` is valid, `a..b` is not).
        let mut after_index = false;

        for ch in raw.chars() {
            match state {
                ScanState::Index => match ch {
                    '0'..='9' => digits.push(ch),
                    ']' => {
                        let index = digits
                            .parse::<usize>()
                            .map_err(|_| PatchError::invalid_key_path(raw))?;
                        segments.push(Segment::Index(index));
                        digits.clear();
                        state = ScanState::Key;
                        after_index = true;
                    }
                    _ => return Err(PatchError::invalid_key_path(raw)),
                },
                ScanState::Key => match ch {
                    '.' => {
                        if !key.is_empty() {
                            segments.push(Segment::Key(std::mem::take(&mut key)));
                        } else if !after_index {
                            return Err(PatchError::invalid_key_path(raw));
                        }
                        after_index = false;
                    }
                    '[' => {
                        if !key.is_empty() {
                            segments.push(Segment::Key(std::mem::take(&mut key)));
                        }
                        // A path cannot begin with an index.
                        if segments.is_empty() {
                            return Err(PatchError::invalid_key_path(raw));
                        }
                        state = ScanState::Index;
                        after_index = false;
                    }
                    ']' => return Err(PatchError::invalid_key_path(raw)),
                    _ => {
                        key.push(ch);
                        after_index = false;
                    }
                },
            }
        }

        if matches!(state, ScanState::Index) {
            // Unterminated bracket.
            return Err(PatchError::invalid_key_path(raw));
        }
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        } else if !after_index {
            // Trailing `.` (or a path that never produced a segment).
            return Err(PatchError::invalid_key_path(raw));
        }

        Ok(KeyPath(segments))
    }

    /// Create a key path from a vector of segments.
    #[inline]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        KeyPath(segments)
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Check if this path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get the first segment.
    #[inline]
    pub fn first(&self) -> Option<&Segment> {
        self.0.first()
    }

    /// Get the last segment.
    #[inline]
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    /// Iterate over the segments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && segment.is_key() {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

impl FromIterator<Segment> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        KeyPath(iter.into_iter().collect())
    }
}

impl IntoIterator for KeyPath {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = Segment;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
