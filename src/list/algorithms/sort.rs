use crate::list::Node;
use crate::List;
use std::ptr::NonNull;

/// Sort `list` by splitting its elements into two new lists, sorting them
/// recursively, then merging them back into `list`.
///
/// Both halves are owned by this call and freed when it returns.
pub(crate) fn merge_sort<T>(list: &mut List<T>)
where
    T: Ord + Clone,
{
    let len = list.len();
    if len <= 1 {
        return;
    }
    tracing::trace!(len, "merge sort");

    let mut iter = list.iter().cloned();
    let mut front: List<T> = iter.by_ref().take(len / 2).collect();
    let mut back: List<T> = iter.collect();
    list.clear();

    merge_sort(&mut front);
    merge_sort(&mut back);
    merge(&front, &back, list);
}

/// Append the elements of two sorted lists to `out`, in sorted order.
///
/// On ties the element of `front` goes first, which keeps the sort stable.
fn merge<T>(front: &List<T>, back: &List<T>, out: &mut List<T>)
where
    T: Ord + Clone,
{
    let (mut front, mut back) = (front.iter().peekable(), back.iter().peekable());
    let mut tail = out.tail_node();
    loop {
        let next = match (front.peek(), back.peek()) {
            (Some(a), Some(b)) if b < a => back.next(),
            (Some(_), _) => front.next(),
            (None, Some(_)) => back.next(),
            (None, None) => break,
        };
        if let Some(element) = next {
            tail = append(out, tail, element.clone());
        }
    }
}

/// Link a new node holding `element` after `tail`, the last node of `out`,
/// and return it as the new tail.
fn append<T>(out: &mut List<T>, tail: NonNull<Node<T>>, element: T) -> NonNull<Node<T>> {
    // SAFETY: `tail` is the last node of `out`, followed by its ghost node.
    unsafe { out.insert_after_node(tail, element) }
}
