use std::{fmt::Debug, ops::Sub};

use crate::{
    closest::ClosestPair,
    entry::Entry,
    iter::{OwnedIter, RefIter},
    node::{remove_recurse, Node, RemoveResult},
};

/// An AVL-balanced ordered map of scalar keys to values, augmented to track
/// the closest pair of keys.
///
/// Keys can be any [`Copy`] + [`Ord`] type whose difference is expressed by
/// [`Sub`] - in practice, any primitive integer type. Each key is unique
/// within the tree and maps to exactly one value.
///
/// Key gaps are computed in `K` itself, so the difference between any two
/// stored keys must be representable in `K`: a signed tree holding both
/// `i64::MIN` and `i64::MAX` overflows the gap arithmetic. Unsigned keys
/// may span their full domain.
///
/// Lookups, insertions and removals run in O(log n); reading the closest
/// pair is O(1). See the crate-level documentation for an example.
#[derive(Debug, Clone)]
pub struct GapTree<K, V>(Option<Box<Node<K, V>>>);

impl<K, V> Default for GapTree<K, V> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<K, V> GapTree<K, V>
where
    K: Ord + Copy,
{
    /// Insert `value` into the tree, keyed by `key`.
    ///
    /// If `key` is already present the node's value is replaced in place and
    /// the old value returned - the tree structure, heights and summaries
    /// are untouched. Otherwise a new node is created and [`None`] returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Sub<Output = K>,
    {
        match self.0 {
            Some(ref mut v) => v.insert(key, value),
            None => {
                self.0 = Some(Box::new(Node::new(key, value)));
                None
            }
        }
    }

    /// Return a reference to the value stored against `key`, if any.
    pub fn get(&self, key: K) -> Option<&V> {
        self.0.as_ref().and_then(|v| v.get(key))
    }

    /// Return a mutable reference to the value stored against `key`, if any.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.0.as_mut().and_then(|v| v.get_mut(key))
    }

    /// Return true if `key` exists in the tree.
    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key` from the tree, returning the value stored against it.
    ///
    /// Removing a key that is not in the tree is a no-op, returning [`None`].
    pub fn remove(&mut self, key: K) -> Option<V>
    where
        K: Sub<Output = K> + Debug,
    {
        match remove_recurse(&mut self.0, key)? {
            RemoveResult::Removed(v) => Some(v),
            RemoveResult::ParentUnlink => unreachable!(),
        }
    }

    /// Return the two keys in the tree with the smallest difference between
    /// them.
    ///
    /// This is an O(1) read of the root summary. Returns [`None`] iff the
    /// tree holds fewer than two keys.
    ///
    /// When more than one pair of keys shares the minimal difference, the
    /// reported pair is the first found when evaluating, at each node, the
    /// left subtree pair, the right subtree pair, and then the pairs
    /// straddling the node key (left-crossing before right-crossing).
    pub fn closest_pair(&self) -> Option<ClosestPair<K>> {
        self.0.as_ref().and_then(|v| v.closest_pair())
    }

    /// Return true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Return a view into the entry for `key`, whether vacant or occupied.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V>
    where
        K: Sub<Output = K> + Debug,
    {
        Entry::new(key, self)
    }

    /// Iterate over all key/value tuples, ordered by key, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.0
            .iter()
            .flat_map(|v| RefIter::new(v))
            .map(|v| (v.key(), v.value()))
    }

    /// Iterate over the per-node augmentation summaries, in key order.
    ///
    /// Each node yields its key and the height, min key, max key and closest
    /// pair of the subtree rooted at it. The iterator is lazy and
    /// restartable; it exists for diagnostics and testing.
    pub fn summaries(&self) -> impl Iterator<Item = NodeSummary<K>> + '_ {
        self.0.iter().flat_map(|v| RefIter::new(v)).map(|v| {
            NodeSummary {
                key: v.key(),
                height: v.height(),
                min: v.subtree_min(),
                max: v.subtree_max(),
                closest_pair: v.closest_pair(),
            }
        })
    }
}

impl<K, V> IntoIterator for GapTree<K, V> {
    type Item = (K, V);
    type IntoIter = OwnedIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        OwnedIter::new(self.0)
    }
}

/// The augmentation summary of a single tree node, as yielded by
/// [`GapTree::summaries()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSummary<K> {
    /// The key stored in this node.
    pub key: K,

    /// The AVL height of the subtree rooted at this node (a leaf has a
    /// height of 1).
    pub height: u8,

    /// The smallest key in the subtree rooted at this node.
    pub min: K,

    /// The largest key in the subtree rooted at this node.
    pub max: K,

    /// The closest pair of keys in the subtree rooted at this node, absent
    /// when the subtree holds fewer than two keys.
    pub closest_pair: Option<ClosestPair<K>>,
}
