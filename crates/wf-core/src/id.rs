use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for node and edge IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for graph nodes (`p3`, `r12`, ...).
/// Internally a 4-byte `Spur` index: Copy, with O(1) Eq and Hash.
///
/// Ordering is lexicographic on the underlying string, not on intern order,
/// so sorted output is stable across sessions.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a new string as a NodeId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Numeric part after a one-character type prefix (`p7` → 7).
    /// Returns `None` for ids that don't follow the `<prefix><digits>` shape.
    pub fn ordinal(&self, prefix: char) -> Option<u64> {
        let digits = self.as_str().strip_prefix(prefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}

/// Identifier of an undirected edge.
///
/// Always derived from the endpoint pair: the two node ids sorted
/// lexicographically and joined with `-`. Re-deriving the same pair in either
/// order yields the same id, so id equality and pair dedup agree.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(Spur);

impl EdgeId {
    /// Canonical id for the unordered pair `{a, b}`.
    pub fn between(a: NodeId, b: NodeId) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let key = format!("{}-{}", lo.as_str(), hi.as_str());
        EdgeId(INTERNER.get_or_intern(&key))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("p4");
        let b = NodeId::intern("p4");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "p4");
    }

    #[test]
    fn ordering_is_lexicographic() {
        // Intern in reverse so intern order disagrees with string order.
        let z = NodeId::intern("zz_order");
        let a = NodeId::intern("aa_order");
        assert!(a < z);
    }

    #[test]
    fn edge_id_ignores_endpoint_order() {
        let a = NodeId::intern("p1");
        let b = NodeId::intern("r2");
        assert_eq!(EdgeId::between(a, b), EdgeId::between(b, a));
        assert_eq!(EdgeId::between(b, a).as_str(), "p1-r2");
    }

    #[test]
    fn ordinal_parses_numeric_suffix() {
        assert_eq!(NodeId::intern("p12").ordinal('p'), Some(12));
        assert_eq!(NodeId::intern("r0").ordinal('r'), Some(0));
        assert_eq!(NodeId::intern("r0").ordinal('p'), None);
        assert_eq!(NodeId::intern("pX").ordinal('p'), None);
        assert_eq!(NodeId::intern("p").ordinal('p'), None);
    }
}
