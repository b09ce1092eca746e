use proptest::prelude::*;
use rbtree::{NodeId, RbError, RbTree};

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    EraseNth(usize),
    RemoveKey(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i16..64).prop_map(Op::Insert),
        2 => any::<usize>().prop_map(Op::EraseNth),
        1 => (-64i16..64).prop_map(Op::RemoveKey),
    ]
}

/// Keys to insert, paired with a permutation of their positions to erase in.
fn keys_with_erase_order() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    prop::collection::vec(any::<u8>(), 1..150).prop_flat_map(|keys| {
        let order: Vec<usize> = (0..keys.len()).collect();
        (Just(keys), Just(order).prop_shuffle())
    })
}

fn height_bound(len: usize) -> f64 {
    2.0 * ((len + 1) as f64).log2()
}

fn check(tree: &RbTree<i16>, model: &[i16]) -> Result<(), TestCaseError> {
    if let Err(err) = tree.assert_valid() {
        return Err(TestCaseError::fail(err));
    }
    prop_assert_eq!(tree.len(), model.len());
    prop_assert!(tree.height() as f64 <= height_bound(tree.len()));
    prop_assert_eq!(tree.to_vec(), model.to_vec());
    Ok(())
}

proptest! {
    #[test]
    fn random_ops_keep_invariants(ops in prop::collection::vec(op(), 1..200)) {
        let mut tree = RbTree::new();
        let mut model: Vec<i16> = Vec::new();
        let mut live: Vec<(i16, NodeId)> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let before = tree.len();
                    let id = tree.insert(k).unwrap();
                    prop_assert_eq!(tree.len(), before + 1);
                    prop_assert_eq!(tree.key(id), Some(&k));
                    prop_assert!(tree.find(&k).is_some());
                    let at = model.partition_point(|x| *x <= k);
                    model.insert(at, k);
                    live.push((k, id));
                }
                Op::EraseNth(n) => {
                    if live.is_empty() {
                        continue;
                    }
                    let (k, id) = live.swap_remove(n % live.len());
                    let before = tree.len();
                    prop_assert_eq!(tree.erase(id), Ok(k));
                    prop_assert_eq!(tree.len(), before - 1);
                    prop_assert_eq!(tree.erase(id), Err(RbError::InvalidNodeReference));
                    let at = model.binary_search(&k).unwrap();
                    model.remove(at);
                    if !model.contains(&k) {
                        prop_assert_eq!(tree.find(&k), None);
                    }
                }
                Op::RemoveKey(k) => {
                    let result = tree.remove(&k);
                    match model.binary_search(&k) {
                        Ok(at) => {
                            prop_assert_eq!(result, Ok(k));
                            model.remove(at);
                            live.retain(|(_, id)| tree.contains_node(*id));
                        }
                        Err(_) => prop_assert_eq!(result, Err(RbError::NotFound)),
                    }
                }
            }
            check(&tree, &model)?;
            for (k, id) in &live {
                prop_assert_eq!(tree.key(*id), Some(k));
            }
        }
    }

    #[test]
    fn export_is_sorted_and_idempotent(keys in prop::collection::vec(any::<i32>(), 1..300)) {
        let mut tree = RbTree::new();
        for k in &keys {
            tree.insert(*k).unwrap();
        }

        let mut first = vec![0; keys.len()];
        let mut second = vec![0; keys.len()];
        prop_assert_eq!(tree.export_sorted(&mut first), Ok(keys.len()));
        prop_assert_eq!(tree.export_sorted(&mut second), Ok(keys.len()));
        prop_assert_eq!(&first, &second);
        prop_assert!(first.windows(2).all(|w| w[0] <= w[1]));

        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(first, sorted);
    }

    #[test]
    fn erase_in_any_order_empties_tree((keys, order) in keys_with_erase_order()) {
        let mut tree = RbTree::new();
        let ids: Vec<NodeId> = keys.iter().map(|k| tree.insert(*k).unwrap()).collect();

        for at in order {
            prop_assert_eq!(tree.erase(ids[at]), Ok(keys[at]));
            if let Err(err) = tree.assert_valid() {
                return Err(TestCaseError::fail(err));
            }
            prop_assert!(tree.height() as f64 <= height_bound(tree.len()));
        }
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.min(), Err(RbError::EmptyTree));
    }
}
