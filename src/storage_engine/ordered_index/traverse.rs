use crate::error::{Error, Result};
use crate::storage_engine::ordered_index::{Key, Node, OrderedIndex};
use log::{debug, log_enabled, Level};
use std::fmt::{Debug, Write};

impl<T> Node<T> {
    /// Visits the subtree depth-first in pre-order, passing each node's level and keys.
    pub fn traverse<F: FnMut(usize, &[Key<T>])>(&self, visitor: &mut F) {
        visitor(self.level, &self.keys);
        for child in self.children.iter() {
            child.traverse(visitor);
        }
    }
}

impl<T> OrderedIndex<T> {
    /// Visits every node of the tree depth-first in pre-order, passing its level and keys.
    pub fn traverse<F: FnMut(usize, &[Key<T>])>(&self, mut visitor: F) {
        self.root().traverse(&mut visitor)
    }
}

impl<T: Debug> OrderedIndex<T> {
    /// Renders the tree one node per line, in pre-order.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.traverse(|level, keys| {
            let keys: Vec<String> =
                keys.iter().map(|k| format!("{:?}={}", k.name, k.value)).collect();
            // Writing to a String can't fail.
            let _ = writeln!(out, "level = {}, keys = [{}]", level, keys.join(", "));
        });
        out
    }

    /// Logs the tree dump at debug level.
    pub fn log_tree(&self) {
        if log_enabled!(Level::Debug) {
            for line in self.dump().lines() {
                debug!("{}", line);
            }
        }
    }
}

impl<T: Ord + Debug> OrderedIndex<T> {
    /// Checks the structural invariants of the tree: node occupancy, child counts, key order
    /// within and across nodes, uniform leaf depth, level numbering and the key count. Returns
    /// an internal error describing the first violation found.
    pub fn check(&self) -> Result<()> {
        let mut leaf_depth = None;
        self.check_node(self.root(), true, None, None, 1, &mut leaf_depth)?;
        let count = self.root().count();
        if count != self.len() {
            return Err(Error::Internal(format!(
                "Tree holds {} keys but the index counts {}",
                count,
                self.len()
            )));
        }
        Ok(())
    }

    fn check_node(
        &self,
        node: &Node<T>,
        is_root: bool,
        lower: Option<&T>,
        upper: Option<&T>,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) -> Result<()> {
        if node.level != depth {
            return Err(Error::Internal(format!(
                "Node {:?} at depth {} has level {}",
                first_name(node),
                depth,
                node.level
            )));
        }

        let (min, max) = (self.config().min_keys(), self.config().max_keys());
        if node.size() > max || (!is_root && node.size() < min) {
            return Err(Error::Internal(format!(
                "Node at level {} has {} keys, expected between {} and {}",
                depth,
                node.size(),
                if is_root { 0 } else { min },
                max
            )));
        }

        if !node.is_leaf() && node.children.len() != node.size() + 1 {
            return Err(Error::Internal(format!(
                "Node at level {} has {} keys but {} children",
                depth,
                node.size(),
                node.children.len()
            )));
        }

        for pair in node.keys.windows(2) {
            if !pair[0].lt(&pair[1]) {
                return Err(Error::Internal(format!(
                    "Keys {:?} and {:?} at level {} are out of order",
                    pair[0].name, pair[1].name, depth
                )));
            }
        }

        for key in node.keys.iter() {
            let below = lower.is_some_and(|l| key.name <= *l);
            let above = upper.is_some_and(|u| key.name >= *u);
            if below || above {
                return Err(Error::Internal(format!(
                    "Key {:?} at level {} is outside its subtree range {:?}..{:?}",
                    key.name, depth, lower, upper
                )));
            }
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(d) if d != depth => {
                    return Err(Error::Internal(format!(
                        "Leaf at level {} but other leaves are at level {}",
                        depth, d
                    )))
                }
                Some(_) => {}
            }
            return Ok(());
        }

        for (i, child) in node.children.iter().enumerate() {
            let lower = if i == 0 { lower } else { Some(&node.keys[i - 1].name) };
            let upper = node.keys.get(i).map(|k| &k.name).or(upper);
            self.check_node(child, false, lower, upper, depth + 1, leaf_depth)?;
        }
        Ok(())
    }
}

fn first_name<T>(node: &Node<T>) -> Option<&T> {
    node.keys.first().map(|k| &k.name)
}
