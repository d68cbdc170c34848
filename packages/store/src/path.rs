//! Path type with dot-separated segments.

use std::fmt;

/// An ordered sequence of string segments identifying a node in the tree.
///
/// Signal K addresses nodes with dotted strings (`navigation.position`), and
/// segments themselves are arbitrary identifiers - vessel contexts are URNs
/// like `urn:mrn:imo:mmsi:230099999` - so segments are kept verbatim with no
/// validation. Splitting the dotted wire encoding happens here, at the
/// boundary; the tree itself only ever sees segment sequences.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub segments: Vec<String>,
}

impl Path {
    /// Parse a dotted path string.
    ///
    /// The empty string is the empty path. Anything else is split on `.`,
    /// keeping every piece: a stray `..` yields a literal empty segment,
    /// which becomes a literal child key in the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pelorus_store::Path;
    ///
    /// assert_eq!(Path::parse("navigation.position").len(), 2);
    /// assert!(Path::parse("").is_empty());
    /// ```
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Path {
                segments: Vec::new(),
            };
        }
        Path {
            segments: s.split('.').map(|seg| seg.to_string()).collect(),
        }
    }

    /// Create a path from segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Path { segments }
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.segments.iter()
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

/// Macro for creating paths from dotted literals.
///
/// # Example
///
/// ```rust
/// use pelorus_store::path;
///
/// let p = path!("navigation.position");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}
