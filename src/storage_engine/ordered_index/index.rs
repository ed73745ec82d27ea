use crate::config::IndexConfig;
use crate::error::Result;
use crate::storage_engine::ordered_index::{Iter, Key, Node, Payload};
use log::debug;
use std::fmt::Display;
use std::mem::replace;

/// In-memory ordered index using a B-tree. Each node holds up to 2t-1 sorted keys, where t is the
/// configured minimum degree, and internal nodes hold one more child than keys. Insertion splits
/// full nodes on the way down, so the tree only ever grows at the root and all leaves stay at the
/// same depth.
///
/// The index owns its root: when the root is full, insert grows the tree by placing a new empty
/// root above it and splitting the old root into it, so callers never have to.
#[derive(Clone, Debug)]
pub struct OrderedIndex<T> {
    root: Node<T>,
    config: IndexConfig,
    len: usize,
}

impl<T> Display for OrderedIndex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "btree(t={})", self.config.min_degree)
    }
}

impl<T: Ord> Default for OrderedIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> OrderedIndex<T> {
    /// Creates a new, empty index using the default minimum degree.
    pub fn new() -> Self {
        Self { root: Node::new(), config: IndexConfig::default(), len: 0 }
    }

    /// Creates a new, empty index with the given configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { root: Node::new(), config, len: 0 })
    }

    /// Creates a new, empty index with the given minimum degree.
    pub fn with_min_degree(min_degree: usize) -> Result<Self> {
        Self::with_config(IndexConfig::with_min_degree(min_degree)?)
    }

    /// Adopts an externally built node tree as the index root. Levels are renumbered from the
    /// root and the key count is recomputed. Trees where an internal node doesn't have one more
    /// child than keys are rejected, while key order and node occupancy are the caller's
    /// responsibility, see check().
    pub fn from_root(config: IndexConfig, mut root: Node<T>) -> Result<Self> {
        config.validate()?;
        root.relevel(1);
        root.check_shape()?;
        let len = root.count();
        Ok(Self { root, config, len })
    }

    /// Fetches the payload stored for a name, if any.
    pub fn search(&self, name: &T) -> Option<Payload> {
        self.root.search(name)
    }

    /// Returns true if the name is stored in the index.
    pub fn contains(&self, name: &T) -> bool {
        self.search(name).is_some()
    }

    /// Inserts a name with the given payload. If the name already exists, its payload is
    /// replaced and the previous payload is returned.
    pub fn insert(&mut self, name: T, value: Payload) -> Option<Payload> {
        let min_degree = self.config.min_degree;
        if self.root.size() == self.config.max_keys() {
            // Grow the tree: the full root becomes the only child of a new empty root, and is
            // then split into it. Every level below shifts down by one.
            let old_root = replace(&mut self.root, Node::new());
            self.root.children.push(old_root);
            self.root.split_child(0, min_degree);
            self.root.relevel(1);
            debug!("Grew {} to height {}", self, self.root.height());
        }

        let previous = self.root.insert_non_full(Key::new(name, value), min_degree);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Fetches the key with the smallest name, if any.
    pub fn first(&self) -> Option<&Key<T>> {
        self.root.get_first()
    }

    /// Fetches the key with the largest name, if any.
    pub fn last(&self) -> Option<&Key<T>> {
        self.root.get_last()
    }
}

impl<T> OrderedIndex<T> {
    /// Returns an in-order iterator over all keys.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }

    /// Returns the number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels in the tree, 1 for a lone root.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Returns the configured minimum degree.
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// Returns the index configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }
}

impl<'a, T> IntoIterator for &'a OrderedIndex<T> {
    type Item = &'a Key<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
