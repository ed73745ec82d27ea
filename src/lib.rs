//! An in-memory B-tree index mapping ordered key names to 32-bit payloads.
//!
//! Nodes hold between t-1 and 2t-1 sorted keys, where t is the configured minimum degree. Full
//! nodes are split on the way down during insertion, and the split median is spliced into the
//! parent, so the tree grows only at the root.
//!
//! ```
//! use ordered_index::OrderedIndex;
//!
//! let mut index = OrderedIndex::with_min_degree(4)?;
//! index.insert("kitty", 15);
//! index.insert("food", 10);
//! assert_eq!(Some(10), index.search(&"food"));
//! assert_eq!(None, index.search(&"z"));
//! # Ok::<(), ordered_index::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod storage_engine;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use storage_engine::ordered_index::{Iter, Key, Node, OrderedIndex, Payload};
