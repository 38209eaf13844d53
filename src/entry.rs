use std::{fmt::Debug, ops::Sub};

use crate::GapTree;

/// A view into a single entry in a [`GapTree`], which may either be vacant
/// or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`GapTree`].
///
/// [`entry`]: GapTree::entry
#[derive(Debug)]
pub enum Entry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

/// A view into a vacant entry in a [`GapTree`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct VacantEntry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    key: K,
    tree: &'a mut GapTree<K, V>,
}

/// A view into an occupied entry in a [`GapTree`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    key: K,
    tree: &'a mut GapTree<K, V>,
}

impl<'a, K, V> VacantEntry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    /// Gets the key that would be used when inserting a value through the
    /// VacantEntry.
    #[inline]
    pub fn key(&self) -> K {
        self.key
    }

    /// Sets the value of the entry with the VacantEntry's key,
    /// and returns a mutable reference to it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        self.tree.insert(self.key, value);
        self.tree.get_mut(self.key).unwrap()
    }
}

impl<'a, K, V> OccupiedEntry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    /// Gets the key in the entry.
    #[inline]
    pub fn key(&self) -> K {
        self.key
    }

    /// Gets a reference to the value in the entry.
    #[inline]
    pub fn get(&self) -> &V {
        self.tree.get(self.key).unwrap()
    }

    /// Gets a mutable reference to the value in the entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.get_mut(self.key).unwrap()
    }

    /// Converts the entry into a mutable reference to its value.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.get_mut(self.key).unwrap()
    }

    /// Sets the value of the entry with the OccupiedEntry's key,
    /// and returns the entry's old value.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        self.tree.insert(self.key, value).unwrap()
    }

    /// Takes the value of the entry out of the tree, and returns it.
    #[inline]
    pub fn remove(self) -> V {
        self.tree.remove(self.key).unwrap()
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
{
    /// Create a new Entry for the given key and tree.
    pub(crate) fn new(key: K, tree: &'a mut GapTree<K, V>) -> Self {
        if tree.contains_key(key) {
            Entry::Occupied(OccupiedEntry { key, tree })
        } else {
            Entry::Vacant(VacantEntry { key, tree })
        }
    }

    /// Returns this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, &str> = GapTree::default();
    /// assert_eq!(tree.entry(10).key(), 10);
    /// ```
    #[inline]
    pub fn key(&self) -> K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, u32> = GapTree::default();
    ///
    /// tree.entry(10).or_insert(42);
    /// assert_eq!(tree.get(10), Some(&42));
    ///
    /// *tree.entry(10).or_insert(100) += 1;
    /// assert_eq!(tree.get(10), Some(&43));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default
    /// function if empty, and returns a mutable reference to the value in the
    /// entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, String> = GapTree::default();
    /// let s = "hello".to_string();
    ///
    /// tree.entry(10).or_insert_with(|| s);
    ///
    /// assert_eq!(tree.get(10), Some(&"hello".to_string()));
    /// ```
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of
    /// the default function. This method allows for generating key-derived
    /// values for insertion by providing the default function the key that
    /// was passed to the `.entry(key)` method call.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, i32> = GapTree::default();
    ///
    /// tree.entry(10).or_insert_with_key(|key| key * 2);
    ///
    /// assert_eq!(tree.get(10), Some(&20));
    /// ```
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, u32> = GapTree::default();
    ///
    /// tree.entry(10)
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(tree.get(10), Some(&42));
    ///
    /// tree.entry(10)
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(tree.get(10), Some(&43));
    /// ```
    #[inline]
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        match &mut self {
            Entry::Occupied(entry) => {
                f(entry.get_mut());
            }
            Entry::Vacant(_) => {}
        }
        self
    }

    /// Sets the value of the entry, and returns an OccupiedEntry.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, &str> = GapTree::default();
    /// let entry = tree.entry(10).insert_entry("hello");
    ///
    /// assert_eq!(entry.key(), 10);
    /// ```
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V> {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(entry) => {
                let key = entry.key;
                entry.tree.insert(key, value);
                OccupiedEntry {
                    key,
                    tree: entry.tree,
                }
            }
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    K: Ord + Copy + Sub<Output = K> + Debug,
    V: Default,
{
    /// Ensures a value is in the entry by inserting the default value if
    /// empty, and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaptree::GapTree;
    ///
    /// let mut tree: GapTree<i32, Option<u32>> = GapTree::default();
    /// tree.entry(10).or_default();
    ///
    /// assert_eq!(tree.get(10), Some(&None));
    /// ```
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }
}
