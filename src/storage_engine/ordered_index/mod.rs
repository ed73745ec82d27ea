mod index;
mod iterator;
mod key;
mod node;
mod traverse;

pub use index::*;
pub use iterator::*;
pub use key::*;
pub use node::*;

#[cfg(test)]
mod ordered_index_tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::error::Result;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    fn leaf(keys: &[(&'static str, Payload)]) -> Node<&'static str> {
        Node::leaf(keys.iter().map(|(n, v)| Key::new(*n, *v)).collect())
    }

    fn names<T: Clone>(keys: &[Key<T>]) -> Vec<T> {
        keys.iter().map(|k| k.name.clone()).collect()
    }

    /// A t=4 tree (at most 7 keys per node) with three leaves. The first leaf holds "v", which
    /// sorts after the root's "e"; it is never looked up below.
    fn scenario() -> Result<OrderedIndex<&'static str>> {
        OrderedIndex::from_root(
            IndexConfig::with_min_degree(4)?,
            Node::internal(
                vec![Key::new("e", 0), Key::new("k", 30)],
                vec![
                    leaf(&[("a", 1), ("b", 2), ("v", 3)]),
                    leaf(&[("fd", 4), ("gd", 5), ("h2", 6)]),
                    leaf(&[("m1", 7), ("m2", 8), ("root", 9)]),
                ],
            ),
        )
    }

    #[test]
    fn scenario_insert() -> Result<()> {
        let mut index = scenario()?;
        index.log_tree();

        index.insert("food", 10);
        index.insert("godd", 11);
        index.insert("hi", 12);
        index.insert("internet", 13);
        index.insert("j", 14);
        index.insert("kitty", 15);
        index.insert("loop", 16);
        index.insert("moon", 17);
        index.insert("string", 18);
        index.log_tree();

        assert_eq!(3, index.root().keys.len());
        assert_eq!(4, index.root().children.len());
        assert_eq!(vec!["e", "godd", "k"], names(&index.root().keys));
        assert_eq!(
            vec![
                vec!["a", "b", "v"],
                vec!["fd", "food", "gd"],
                vec!["h2", "hi", "internet", "j"],
                vec!["kitty", "loop", "m1", "m2", "moon", "root", "string"],
            ],
            index.root().children.iter().map(|c| names(&c.keys)).collect::<Vec<_>>()
        );

        assert_eq!(Some(10), index.search(&"food"));
        assert_eq!(Some(15), index.search(&"kitty"));
        assert_eq!(Some(13), index.search(&"internet"));
        assert_eq!(Some(18), index.search(&"string"));
        assert_eq!(Some(16), index.search(&"loop"));
        assert_eq!(Some(12), index.search(&"hi"));
        assert_eq!(Some(11), index.search(&"godd"));
        assert_eq!(None, index.search(&"f"));
        assert_eq!(None, index.search(&"z"));
        // 11 keys in the fixture, plus the 9 inserted.
        assert_eq!(11 + 9, index.len());
        Ok(())
    }

    #[test]
    fn scenario_next_insert_grows() -> Result<()> {
        // The last leaf is full, so the next key destined for it splits it into the root.
        let mut index = scenario()?;
        for (name, value) in [
            ("food", 10),
            ("godd", 11),
            ("hi", 12),
            ("internet", 13),
            ("j", 14),
            ("kitty", 15),
            ("loop", 16),
            ("moon", 17),
            ("string", 18),
        ] {
            index.insert(name, value);
        }
        index.insert("tree", 19);
        assert_eq!(vec!["e", "godd", "k", "m2"], names(&index.root().keys));
        assert_eq!(
            vec!["moon", "root", "string", "tree"],
            names(&index.root().children[4].keys)
        );
        assert_eq!(Some(19), index.search(&"tree"));
        assert_eq!(Some(8), index.search(&"m2"));
        Ok(())
    }

    #[test]
    fn random_insert_search() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for t in [2, 3, 4, 7] {
            let mut names: Vec<u32> = (0..1000).map(|i| i * 2).collect();
            names.shuffle(&mut rng);

            let mut index = OrderedIndex::with_min_degree(t)?;
            for (i, name) in names.iter().enumerate() {
                assert_eq!(None, index.insert(*name, *name + 1));
                if i % 50 == 0 {
                    index.check()?;
                }
            }
            index.check()?;
            assert_eq!(1000, index.len());

            // Every inserted key is found, and none of the odd keys in between are.
            for name in names.iter() {
                assert_eq!(Some(name + 1), index.search(name));
                assert_eq!(None, index.search(&(name + 1)));
            }

            let sorted: Vec<u32> = index.iter().map(|k| k.name).collect();
            assert_eq!((0..1000).map(|i| i * 2).collect::<Vec<_>>(), sorted);
        }
        Ok(())
    }

    #[test]
    fn random_against_btreemap() -> Result<()> {
        // Random inserts with repeated names, compared against the standard library map.
        let mut rng = StdRng::seed_from_u64(42);
        let mut index = OrderedIndex::with_min_degree(3)?;
        let mut expect = BTreeMap::new();
        for _ in 0..2000 {
            let name: u16 = rng.gen_range(0..500);
            let value: Payload = rng.gen();
            assert_eq!(expect.insert(name, value), index.insert(name, value));
        }
        index.check()?;
        assert_eq!(expect.len(), index.len());
        assert_eq!(
            expect.into_iter().collect::<Vec<_>>(),
            index.iter().map(|k| (k.name, k.value)).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    fn occupancy_bounds() -> Result<()> {
        let mut index = OrderedIndex::with_min_degree(3)?;
        for i in 0..200u32 {
            index.insert(i, i);
        }
        let (min, max) = (index.config().min_keys(), index.config().max_keys());
        let mut non_root = Vec::new();
        index.traverse(|level, keys| {
            if level > 1 {
                non_root.push(keys.len());
            }
        });
        assert!(!non_root.is_empty());
        assert!(non_root.iter().all(|n| (min..=max).contains(n)));
        Ok(())
    }
}
