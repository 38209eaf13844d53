use std::{fmt::Display, ops::Sub};

/// The two keys of minimal difference within a (sub)tree.
///
/// A [`ClosestPair`] always holds two distinct keys with `lower < upper`;
/// "no pair" (a tree of fewer than two keys) is represented by the absence
/// of a [`ClosestPair`], never by a sentinel pair of equal bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosestPair<K> {
    lower: K,
    upper: K,
}

impl<K> ClosestPair<K> {
    pub(crate) fn new(lower: K, upper: K) -> Self
    where
        K: Ord,
    {
        debug_assert!(lower < upper);
        Self { lower, upper }
    }

    /// The smaller key of the pair.
    pub fn lower(&self) -> K
    where
        K: Copy,
    {
        self.lower
    }

    /// The larger key of the pair.
    pub fn upper(&self) -> K
    where
        K: Copy,
    {
        self.upper
    }

    /// The difference between the two keys of this pair.
    ///
    /// Always positive, as the keys of a pair are distinct. The
    /// subtraction is performed in `K`, and overflows if the difference
    /// is not representable in it (signed keys spanning more than half
    /// the domain).
    pub fn gap(&self) -> K
    where
        K: Copy + Sub<Output = K>,
    {
        self.upper - self.lower
    }
}

impl<K> Display for ClosestPair<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}
