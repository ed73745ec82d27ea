use crate::storage_engine::ordered_index::{Key, Node};

/// An in-order iterator over the keys of a tree. Keeps the path from the root to the current
/// key as a stack of nodes and the index of the next key to yield in each.
pub struct Iter<'a, T> {
    stack: Vec<(&'a Node<T>, usize)>,
}

impl<'a, T> Iter<'a, T> {
    /// Creates a new iterator positioned before the smallest key under the given node.
    pub fn new(root: &'a Node<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.descend(root);
        iter
    }

    // Pushes the leftmost path starting at the given node.
    fn descend(&mut self, mut node: &'a Node<T>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Key<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.stack.last_mut()?;
            let (node, i) = (entry.0, entry.1);
            if i < node.keys.len() {
                entry.1 += 1;
                // Everything in the child to the right of this key comes before the next key.
                if let Some(child) = node.children.get(i + 1) {
                    self.descend(child);
                }
                return Some(&node.keys[i]);
            }
            self.stack.pop();
        }
    }
}
