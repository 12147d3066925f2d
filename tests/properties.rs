use circular_list::{Error, List};
use proptest::prelude::*;
use std::iter::FromIterator;
use tracing_subscriber::EnvFilter;

/// Show the list's trace events with `RUST_LOG=circular_list=trace`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Debug)]
enum Op {
    InsertStart(i32),
    InsertEnd(i32),
    InsertAfter(i32, i32),
    InsertBefore(i32, i32),
    PopStart,
    PopEnd,
    RemoveData(i32),
    Sort,
    Reverse,
}

fn op() -> impl Strategy<Value = Op> {
    // small values, so anchors are often found
    let value = -5..5i32;
    prop_oneof![
        2 => value.clone().prop_map(Op::InsertStart),
        2 => value.clone().prop_map(Op::InsertEnd),
        1 => (value.clone(), value.clone()).prop_map(|(a, v)| Op::InsertAfter(a, v)),
        1 => (value.clone(), value.clone()).prop_map(|(a, v)| Op::InsertBefore(a, v)),
        1 => Just(Op::PopStart),
        1 => Just(Op::PopEnd),
        1 => value.prop_map(Op::RemoveData),
        1 => Just(Op::Sort),
        1 => Just(Op::Reverse),
    ]
}

/// Apply `op` to both the list and a `Vec` model.
fn apply(list: &mut List<i32>, model: &mut Vec<i32>, op: &Op) {
    match *op {
        Op::InsertStart(v) => {
            list.insert_start(v);
            model.insert(0, v);
        }
        Op::InsertEnd(v) => {
            list.insert_end(v);
            model.push(v);
        }
        Op::InsertAfter(anchor, v) => match model.iter().position(|&e| e == anchor) {
            Some(i) => {
                assert_eq!(list.insert_after(&anchor, v), Ok(()));
                model.insert(i + 1, v);
            }
            None => assert_eq!(list.insert_after(&anchor, v), Err(Error::DataNotFound)),
        },
        Op::InsertBefore(anchor, v) => match model.iter().position(|&e| e == anchor) {
            Some(i) => {
                assert_eq!(list.insert_before(&anchor, v), Ok(()));
                model.insert(i, v);
            }
            None => assert_eq!(list.insert_before(&anchor, v), Err(Error::DataNotFound)),
        },
        Op::PopStart => {
            let expected = if model.is_empty() {
                Err(Error::EmptyList)
            } else {
                Ok(model.remove(0))
            };
            assert_eq!(list.pop_start(), expected);
        }
        Op::PopEnd => {
            assert_eq!(list.pop_end(), model.pop().ok_or(Error::EmptyList));
        }
        Op::RemoveData(v) => {
            let expected = if model.is_empty() {
                Err(Error::EmptyList)
            } else if let Some(i) = model.iter().position(|&e| e == v) {
                model.remove(i);
                Ok(())
            } else {
                Err(Error::DataNotFound)
            };
            assert_eq!(list.remove_data(&v), expected);
        }
        Op::Sort => {
            list.sort();
            model.sort();
        }
        Op::Reverse => {
            list.reverse_list();
            model.reverse();
        }
    }
}

proptest! {
    #[test]
    fn operations_match_model(ops in prop::collection::vec(op(), 0..64)) {
        init_tracing();
        let mut list = List::new();
        let mut model = Vec::new();
        for op in &ops {
            apply(&mut list, &mut model, op);
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), list.len() == 0);
            prop_assert_eq!(&list.to_vec(), &model);
        }
    }

    #[test]
    fn sort_orders_ascending(input in prop::collection::vec(any::<i32>(), 0..128)) {
        init_tracing();
        let mut list = List::from_iter(input.iter().copied());
        list.sort();
        let sorted = list.to_vec();
        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        let mut expected = input;
        expected.sort();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn concat_moves_all_nodes(
        first in prop::collection::vec(any::<i32>(), 0..32),
        second in prop::collection::vec(any::<i32>(), 0..32),
    ) {
        let mut a = List::from_iter(first.iter().copied());
        let mut b = List::from_iter(second.iter().copied());
        a.concat_lists(&mut b);
        let expected: Vec<i32> = first.iter().chain(&second).copied().collect();
        prop_assert_eq!(a.to_vec(), expected);
        prop_assert!(b.is_empty());
    }

    #[test]
    fn add_leaves_inputs_untouched(
        first in prop::collection::vec(any::<i32>(), 0..32),
        second in prop::collection::vec(any::<i32>(), 0..32),
    ) {
        let a = List::from_iter(first.iter().copied());
        let b = List::from_iter(second.iter().copied());
        let added = List::add_lists(&a, &b);
        prop_assert_eq!(added.len(), a.len() + b.len());
        prop_assert_eq!(a.to_vec(), first);
        prop_assert_eq!(b.to_vec(), second);
    }

    #[test]
    fn merged_is_sorted_union(
        first in prop::collection::vec(any::<i32>(), 0..32),
        second in prop::collection::vec(any::<i32>(), 0..32),
    ) {
        let a = List::from_iter(first.iter().copied());
        let b = List::from_iter(second.iter().copied());
        let merged = List::get_merged_list(&a, &b);
        let mut expected: Vec<i32> = first.into_iter().chain(second).collect();
        expected.sort();
        prop_assert_eq!(merged.to_vec(), expected);
    }

    #[test]
    fn reverse_twice_is_identity(input in prop::collection::vec(any::<i32>(), 0..64)) {
        let mut list = List::from_iter(input.iter().copied());
        let reversed = list.get_reversed_list();
        list.reverse_list();
        prop_assert_eq!(&list, &reversed);
        list.reverse_list();
        prop_assert_eq!(list.to_vec(), input);
    }
}
