use crate::error::{Error, Result};
use crate::storage_engine::ordered_index::{Key, Payload};
use log::debug;
use std::mem::{replace, take};

/// A B-tree node. Leaf nodes have no children, while internal nodes always have exactly one more
/// child than keys, where the child at index i holds all keys between keys[i-1] and keys[i]:
///
/// Index  Keys  Children
/// 0      e     a,b,c               Keys:          e        k
/// 1      k     f,g,h               Children: a,b,c | f,g,h | m,n
/// 2            m,n
///
/// Every node except the root holds between t-1 and 2t-1 keys, where t is the tree's minimum
/// degree. Nodes exclusively own their children and have no parent links, since all operations
/// descend from the root.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<T> {
    pub keys: Vec<Key<T>>,
    pub children: Vec<Node<T>>,
    /// Depth of the node, 1 at the root. Only used for diagnostics.
    pub level: usize,
}

impl<T> Node<T> {
    /// Creates an empty leaf node, used as the root of a new tree.
    pub fn new() -> Self {
        Self::empty(1)
    }

    fn empty(level: usize) -> Self {
        Self { keys: Vec::new(), children: Vec::new(), level }
    }

    /// Creates a leaf node holding the given keys. The level is assigned once the node is
    /// attached to a tree.
    pub fn leaf(keys: Vec<Key<T>>) -> Self {
        Self { keys, children: Vec::new(), level: 1 }
    }

    /// Creates an internal node with the given keys and children.
    pub fn internal(keys: Vec<Key<T>>, children: Vec<Node<T>>) -> Self {
        Self { keys, children, level: 1 }
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of keys held by the node itself.
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of keys in the subtree rooted at this node.
    pub fn count(&self) -> usize {
        self.keys.len() + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Returns the number of levels in the subtree rooted at this node.
    pub fn height(&self) -> usize {
        match self.children.first() {
            Some(child) => 1 + child.height(),
            None => 1,
        }
    }

    /// Fetches the smallest key in the subtree, if any.
    pub fn get_first(&self) -> Option<&Key<T>> {
        match self.children.first() {
            Some(child) => child.get_first(),
            None => self.keys.first(),
        }
    }

    /// Fetches the largest key in the subtree, if any.
    pub fn get_last(&self) -> Option<&Key<T>> {
        match self.children.last() {
            Some(child) => child.get_last(),
            None => self.keys.last(),
        }
    }

    /// Assigns the given level to this node and recomputes all levels below it.
    pub fn relevel(&mut self, level: usize) {
        self.level = level;
        for child in self.children.iter_mut() {
            child.relevel(level + 1);
        }
    }

    /// Checks that every internal node in the subtree has exactly one more child than keys,
    /// which lookups and splits rely on when indexing into the children.
    pub fn check_shape(&self) -> Result<()> {
        if !self.is_leaf() && self.children.len() != self.keys.len() + 1 {
            return Err(Error::Internal(format!(
                "Node at level {} has {} keys but {} children",
                self.level,
                self.keys.len(),
                self.children.len()
            )));
        }
        self.children.iter().try_for_each(Node::check_shape)
    }

    /// Splits the full child at index i around its median key. Both halves keep t-1 keys, and
    /// the median is lifted into a single-key separator node that replaces the child and is then
    /// merged into this node. This node must not be full.
    pub fn split_child(&mut self, i: usize, min_degree: usize) {
        let child = &mut self.children[i];
        debug_assert_eq!(child.keys.len(), 2 * min_degree - 1, "splitting a non-full child");

        let level = child.level;
        let mut left_keys = take(&mut child.keys);
        let right_keys = left_keys.split_off(min_degree);
        let median = left_keys.remove(min_degree - 1);

        let mut left_children = take(&mut child.children);
        let right_children = if left_children.is_empty() {
            Vec::new()
        } else {
            left_children.split_off(min_degree)
        };

        let left = Node { keys: left_keys, children: left_children, level: level + 1 };
        let right = Node { keys: right_keys, children: right_children, level: level + 1 };
        debug!("Splitting child {} at level {} into two nodes of {} keys", i, level, left.size());

        self.children[i] = Node { keys: vec![median], children: vec![left, right], level };
        self.merge(i);
    }

    /// Folds the separator node at children[i] into this node, placing its key at keys[i] and
    /// its two children in place of the separator. The caller guarantees this node has room for
    /// one more key.
    pub fn merge(&mut self, i: usize) {
        let Node { keys: mut separator_keys, children: separator_children, .. } =
            replace(&mut self.children[i], Node::empty(self.level + 1));
        debug_assert_eq!(separator_keys.len(), 1, "separator must hold a single key");
        debug_assert_eq!(separator_children.len(), 2, "separator must have two children");
        let key = separator_keys.remove(0);

        match i {
            0 => {
                self.keys.insert(0, key);
                self.children.splice(0..1, separator_children);
            }
            i if i < self.keys.len() => {
                self.keys.insert(i, key);
                self.children.splice(i..=i, separator_children);
            }
            i => {
                self.keys.push(key);
                self.children.truncate(i);
                self.children.extend(separator_children);
            }
        }

        let level = self.level + 1;
        for child in self.children.iter_mut() {
            child.level = level;
        }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Node<T> {
    /// Finds the position of the first key not less than the given name, and whether that key
    /// matches the name exactly. Keys are scanned linearly due to the low cardinality.
    pub fn locate(&self, name: &T) -> (usize, bool) {
        let i = self.keys.iter().position(|k| k.name >= *name).unwrap_or(self.keys.len());
        (i, matches!(self.keys.get(i), Some(k) if k.name == *name))
    }

    /// Fetches the payload for a name, if it exists in the subtree.
    pub fn search(&self, name: &T) -> Option<Payload> {
        let (i, found) = self.locate(name);
        if found {
            return Some(self.keys[i].value);
        }
        if self.is_leaf() {
            return None;
        }
        self.children[i].search(name)
    }

    /// Inserts a key into the subtree rooted at this node, which must not be full. Full children
    /// are split before descending into them, so a split never has to propagate upwards. If the
    /// name already exists its payload is replaced and the previous payload returned.
    pub fn insert_non_full(&mut self, key: Key<T>, min_degree: usize) -> Option<Payload> {
        let (mut i, found) = self.locate(&key.name);
        if found {
            return Some(replace(&mut self.keys[i].value, key.value));
        }
        if self.is_leaf() {
            self.keys.insert(i, key);
            return None;
        }

        if self.children[i].size() == 2 * min_degree - 1 {
            self.split_child(i, min_degree);
            // The split lifted a new key into this node, so find the position again. The lifted
            // median may itself be the key we're inserting.
            let (j, found) = self.locate(&key.name);
            if found {
                return Some(replace(&mut self.keys[j].value, key.value));
            }
            i = j;
        }
        self.children[i].insert_non_full(key, min_degree)
    }
}
