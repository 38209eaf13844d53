use std::{cmp::Ordering, fmt::Debug, ops::Sub};

use crate::closest::ClosestPair;

#[derive(Debug)]
pub(super) enum RemoveResult<V> {
    /// The value was removed from the tree.
    Removed(V),

    /// The direct descendent node contains the value, but contains no children
    /// and must be unlinked by the parent.
    ParentUnlink,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Child node pointers.
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, and an absent subtree a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 2.89*10⁷⁶ entries.
    height: u8,

    /// The smallest and largest keys in the subtree rooted at this [`Node`].
    subtree_min: K,
    subtree_max: K,

    /// The two keys of minimal difference in the subtree rooted at this
    /// [`Node`], or [`None`] if the subtree holds fewer than two keys.
    closest: Option<ClosestPair<K>>,

    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self
    where
        K: Copy,
    {
        Self {
            subtree_min: key,
            subtree_max: key,
            closest: None,
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    pub(crate) fn insert(self: &mut Box<Self>, key: K, value: V) -> Option<V>
    where
        K: Ord + Copy + Sub<Output = K>,
    {
        let child = match key.cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Equal => {
                return Some(std::mem::replace(&mut self.value, value));
            }
            Ordering::Greater => &mut self.right,
        };

        let updated = match child {
            Some(v) => v.insert(key, value),
            None => {
                // Insert the key as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(key, value)));

                // Inserting this new child node cannot skew the tree in the
                // direction of the new addition such that it requires the tree
                // be rebalanced as, at most, it creates an absolute difference
                // of 1 in this direction (from balanced, or slightly skewed in
                // the opposite direction).
                //
                // Update this node and skip the rebalancing checks.
                update_height(self);
                update_subtree_min(self);
                update_subtree_max(self);
                update_closest_pair(self);
                return None;
            }
        };

        if updated.is_some() {
            // An existing key had its value replaced - the tree structure has
            // not been modified and all summaries remain valid.
            return updated;
        }

        // Update this node's height.
        update_height(self);

        // Determine the balance factor of the subtree rooted at self and
        // correct it if the absolute difference in height between branches is
        // > 1.
        match (balance(self), self.left(), self.right()) {
            // Left-heavy
            (2, Some(l), _) if balance(l) >= 0 => {
                rotate_right(self);
            }
            (2, Some(_l), _) => {
                rotate_left(self.left_mut().unwrap());
                rotate_right(self);
            }
            // Right-heavy
            (-2, _, Some(r)) if balance(r) <= 0 => {
                rotate_left(self);
            }
            (-2, _, Some(_r)) => {
                rotate_right(self.right_mut().unwrap());
                rotate_left(self);
            }
            (-1..=1, _, _) => { /* The tree is well balanced */ }
            _ => unreachable!(),
        };

        // Re-derive the min/max/closest-pair summaries on the post-rotation
        // shape (a rotation has already refreshed the two nodes it moved).
        update_subtree_min(self);
        update_subtree_max(self);
        update_closest_pair(self);

        // Invariant: the absolute difference between tree heights ("balance
        // factor") cannot exceed 1.
        debug_assert!(balance(self).abs() <= 1);

        debug_assert!(updated.is_none());
        None
    }

    pub(super) fn remove(self: &mut Box<Self>, key: K) -> Option<RemoveResult<V>>
    where
        K: Ord + Copy + Sub<Output = K> + Debug,
    {
        // Recurse down the subtree rooted at `self`.
        //
        // If the key is not found, or successfully removed, the result is
        // returned. If the direct descendent node contains the key and no
        // children, it returns [`RemoveResult::ParentUnlink`] and the node is
        // unlinked here in the parent before returning the result to the
        // caller.
        match self.key.cmp(&key) {
            Ordering::Greater => return remove_recurse(&mut self.left, key),
            Ordering::Less => return remove_recurse(&mut self.right, key),
            Ordering::Equal => {
                // This node holds the key to be removed from the tree.
            }
        };

        // This node may have 0, 1 or 2 child node(s).
        //
        // The in-order successor (if any) should move to replace this node.
        //
        // If "self.right" has a left child, descend the left-most edge to
        // locate the successor to "self" returned in an in-order traversal and
        // use it in place of "self". The right child of "self" after removing
        // this successor (if any) is then linked to this replacement.
        //
        // If there is no left node of "self.right", the "self.right" itself is
        // the successor and replaces the target node.
        //
        // If there is no right child, then "self.left" replaces "self".
        let old = if let Some(mut right) = self.right.take() {
            debug_assert!(self.height > 1);

            // Extract the minimum node in the right subtree, if any.
            match extract_subtree_min(&mut right) {
                Some(mut min) => {
                    // This minimum node "min" should be mutated to link
                    // self.right on the right, and self.left (if any) linked
                    // on the left in order to preserve the binary search
                    // property.
                    //
                    // The "min" node is guaranteed to have no left pointer as
                    // it is the left-most / minimum node in the subtree.
                    debug_assert!(min.left.is_none());
                    debug_assert!(min.right.is_none());

                    min.left = self.left.take();
                    min.right = Some(right);

                    std::mem::replace(self, min)
                }

                None => {
                    // Otherwise the extracted "right" is the successor, and
                    // can replace "self".
                    //
                    // It is guaranteed that "right" has no left pointer,
                    // otherwise the above branch would be taken.
                    debug_assert!(right.left.is_none());

                    right.left = self.left.take();
                    std::mem::replace(self, right)
                }
            }
        } else if let Some(left) = self.left.take() {
            // Otherwise, if "self" has a left child only, simply replace
            // "self" with the left child (the maximum subtree key).
            debug_assert!(self.right.is_none());
            debug_assert!(self.height > 1);

            std::mem::replace(self, left)
        } else {
            // Otherwise "self" has no children.
            debug_assert!(self.left.is_none());
            debug_assert!(self.right.is_none());
            debug_assert_eq!(self.height, 1);

            // Parent will unlink this "self" node.
            return Some(RemoveResult::ParentUnlink);
        };

        // Invariant: the node being unlinked contains no subtree.
        debug_assert!(old.right.is_none());
        debug_assert!(old.left.is_none());

        // Invariant: the old node being unlinked does contain the target key.
        debug_assert_eq!(old.key, key);
        debug_assert_ne!(self.key, key); // The replacement node does not.

        Some(RemoveResult::Removed(old.value))
    }

    pub(crate) fn get(&self, key: K) -> Option<&V>
    where
        K: Ord + Copy,
    {
        let node = match key.cmp(&self.key) {
            Ordering::Less => self.left(),
            Ordering::Equal => return Some(&self.value),
            Ordering::Greater => self.right(),
        }?;

        node.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut V>
    where
        K: Ord + Copy,
    {
        let node = match key.cmp(&self.key) {
            Ordering::Less => self.left_mut(),
            Ordering::Equal => return Some(&mut self.value),
            Ordering::Greater => self.right_mut(),
        }?;

        node.get_mut(key)
    }

    pub(crate) fn key(&self) -> K
    where
        K: Copy,
    {
        self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn subtree_min(&self) -> K
    where
        K: Copy,
    {
        self.subtree_min
    }

    pub(crate) fn subtree_max(&self) -> K
    where
        K: Copy,
    {
        self.subtree_max
    }

    pub(crate) fn closest_pair(&self) -> Option<ClosestPair<K>>
    where
        K: Copy,
    {
        self.closest
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// The height of the subtree rooted at `n`, or 0 if `n` is absent.
fn height<K, V>(n: Option<&Node<K, V>>) -> u8 {
    n.map(|v| v.height()).unwrap_or_default()
}

fn update_height<K, V>(n: &mut Node<K, V>) {
    n.height = 1 + height(n.left()).max(height(n.right()));
}

fn update_subtree_min<K, V>(n: &mut Node<K, V>)
where
    K: Ord + Copy,
{
    // The left subtree, if any, holds every key smaller than n.key.
    n.subtree_min = match n.left() {
        Some(v) => v.subtree_min().min(n.key),
        None => n.key,
    };
}

fn update_subtree_max<K, V>(n: &mut Node<K, V>)
where
    K: Ord + Copy,
{
    // The right subtree, if any, holds every key greater than n.key.
    n.subtree_max = match n.right() {
        Some(v) => v.subtree_max().max(n.key),
        None => n.key,
    };
}

/// Re-derive the closest pair of the subtree rooted at `n` from the already
/// correct summaries of its children.
///
/// By the binary search property, the minimal gap in this subtree is either
/// entirely within one child's subtree, or straddles `n.key` - and any pair
/// straddling `n.key` is bounded by the child subtree extremum adjacent to
/// it. That leaves exactly four candidates, evaluated in a fixed order:
///
///   1. The left child's subtree closest pair.
///   2. The right child's subtree closest pair.
///   3. `(left.subtree_max, n.key)` - the tightest gap crossing from the
///      left subtree into `n`.
///   4. `(n.key, right.subtree_min)` - the tightest gap crossing from `n`
///      into the right subtree.
///
/// A later candidate wins only with a strictly smaller gap, so ties resolve
/// to the first candidate in the order above.
fn update_closest_pair<K, V>(n: &mut Node<K, V>)
where
    K: Ord + Copy + Sub<Output = K>,
{
    let candidates = [
        n.left().and_then(|v| v.closest_pair()),
        n.right().and_then(|v| v.closest_pair()),
        n.left().map(|v| ClosestPair::new(v.subtree_max(), n.key)),
        n.right().map(|v| ClosestPair::new(n.key, v.subtree_min())),
    ];

    let mut best: Option<ClosestPair<K>> = None;
    for candidate in candidates.into_iter().flatten() {
        best = match best {
            Some(current) if current.gap() <= candidate.gap() => Some(current),
            _ => Some(candidate),
        };
    }

    n.closest = best;
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number
/// when left heavy, and a negative number when right heavy.
fn balance<K, V>(n: &Node<K, V>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) as i16 - height(n.right()) as i16) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// Both repositioned nodes have their height, min, max and closest-pair
/// summaries re-derived, demoted node first - the summaries of the new
/// subtree root are computed from post-rotation children.
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<K, V>(x: &mut Box<Node<K, V>>)
where
    K: Ord + Copy + Sub<Output = K>,
{
    let mut p = x.right.take().unwrap();
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);
    update_subtree_min(&mut p);
    update_subtree_max(&mut p);
    update_closest_pair(&mut p);

    x.left = Some(p);
    update_height(x);
    update_subtree_min(x);
    update_subtree_max(x);
    update_closest_pair(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// Both repositioned nodes have their height, min, max and closest-pair
/// summaries re-derived, demoted node first - the summaries of the new
/// subtree root are computed from post-rotation children.
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<K, V>(y: &mut Box<Node<K, V>>)
where
    K: Ord + Copy + Sub<Output = K>,
{
    let mut p = y.left.take().unwrap();
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);
    update_subtree_min(&mut p);
    update_subtree_max(&mut p);
    update_closest_pair(&mut p);

    y.right = Some(p);
    update_height(y);
    update_subtree_min(y);
    update_subtree_max(y);
    update_closest_pair(y);
}

/// Extracts the node holding the minimum subtree key in a descendent of
/// `root`, if any, linking the right subtree of the extracted node in its
/// place.
fn extract_subtree_min<K, V>(root: &mut Box<Node<K, V>>) -> Option<Box<Node<K, V>>>
where
    K: Ord + Copy + Sub<Output = K>,
{
    // Descend left to the leaf.
    let v = match extract_subtree_min(root.left_mut()?) {
        Some(v) => Some(v),
        None => {
            // The left child is the end of the left edge.
            //
            // ```text
            //                 6
            //                / \
            //    here ->   <4>   7
            //              / \
            //             2   5
            //              \
            //               3
            // ```
            //
            // Unlink the right node of the left root, which will become the
            // new left node of "root" (if any).
            let left_right = root.left_mut().and_then(|v| v.right.take());

            std::mem::replace(&mut root.left, left_right)
        }
    };

    rebalance_after_remove(root);
    debug_assert!(balance(root).abs() <= 1);
    v
}

/// Recurse into `node`, calling [`Node::remove()`] to remove the provided
/// `key` from the subtree rooted at `node`, if it exists.
///
/// Returns [`None`] if the key is not found.
///
/// Clears the `node` pointer if the [`Node::remove()`] call returns
/// [`RemoveResult::ParentUnlink`], returning the extracted value within a
/// [`RemoveResult::Removed`] variant.
pub(super) fn remove_recurse<K, V>(
    node: &mut Option<Box<Node<K, V>>>,
    key: K,
) -> Option<RemoveResult<V>>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    // Remove the key (if any) and rebalance the tree.
    let remove_ret = node.as_mut().and_then(|v| {
        let ret = v.remove(key)?;
        rebalance_after_remove(v);
        Some(ret)
    })?;

    let v = match remove_ret {
        RemoveResult::Removed(v) => v,
        RemoveResult::ParentUnlink => {
            let node = node.take().unwrap();
            debug_assert_eq!(node.key, key);

            node.value
        }
    };

    Some(RemoveResult::Removed(v))
}

fn rebalance_after_remove<K, V>(v: &mut Box<Node<K, V>>)
where
    K: Ord + Copy + Sub<Output = K>,
{
    // Recompute the height of the relocated node.
    update_height(v);

    // And rebalance the subtree.
    match balance(v) {
        (2..) if v.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(v);
        }
        (2..) => {
            v.left_mut().map(rotate_left);
            rotate_right(v);
        }
        (..=-2) if v.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(v);
        }
        (..=-2) => {
            v.right_mut().map(rotate_right);
            rotate_left(v);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    // Re-derive the remaining summaries on the post-rotation shape.
    update_subtree_min(v);
    update_subtree_max(v);
    update_closest_pair(v);

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after removing a key.
    debug_assert!(balance(v).abs() <= 1);
}
