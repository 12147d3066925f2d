use crate::list::{next_of, List};
use std::hash::{Hash, Hasher};
use std::ptr;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns a new list holding copies of the elements of `first`, followed
    /// by copies of the elements of `second`. Both inputs are left untouched.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let first = List::from([1, 2]);
    /// let second = List::from([3]);
    /// let added = List::add_lists(&first, &second);
    /// assert_eq!(added.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(first.len() + second.len(), added.len());
    /// ```
    pub fn add_lists(first: &Self, second: &Self) -> Self
    where
        T: Clone,
    {
        tracing::trace!(first = first.len(), second = second.len(), "add lists");
        first.iter().chain(second).cloned().collect()
    }

    /// Moves all nodes of `other` to the end of the list.
    ///
    /// The nodes are relinked, not copied: the tail of `self` is linked to the
    /// first node of `other`, and the last node of `other` is linked back to the
    /// ghost node of `self`. After this operation, `other` is an empty ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time, as both tails are
    /// found by walking the rings.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list1 = List::from([1]);
    /// let mut list2 = List::from([2, 3]);
    ///
    /// list1.concat_lists(&mut list2);
    ///
    /// assert_eq!(list1.to_vec(), vec![1, 2, 3]);
    /// assert!(list2.is_empty());
    /// ```
    pub fn concat_lists(&mut self, other: &mut Self) {
        tracing::trace!(moved = other.len(), "concat lists");
        if let Some(detached) = other.detach_all_nodes() {
            let (tail, ghost) = (self.tail_node(), self.ghost_node());
            // `tail` and `ghost` are adjacent nodes of the list, so it is safe.
            unsafe { self.attach_nodes(tail, ghost, detached) }
        }
    }

    /// Returns a new sorted list holding copies of the elements of both lists.
    ///
    /// This concatenates copies of both lists and sorts the result; the inputs
    /// need not be sorted.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*((*n* + *m*) * log(*n* + *m*)) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let merged = List::get_merged_list(&List::from([5, 1]), &List::from([4, 2, 3]));
    /// assert_eq!(merged.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn get_merged_list(first: &Self, second: &Self) -> Self
    where
        T: Ord + Clone,
    {
        let mut merged = Self::add_lists(first, second);
        merged.sort();
        merged
    }

    /// Reverses the order of the nodes in place.
    ///
    /// The node after the ghost node is repeatedly moved to right after the
    /// original last node, until that last node becomes the first one. No
    /// element is moved or copied.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.reverse_list();
    /// assert_eq!(list.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn reverse_list(&mut self) {
        let ghost = self.ghost_node();
        // an empty or single element list is left as is
        if self.is_empty() || unsafe { next_of(self.front_node()) } == ghost {
            return;
        }
        let last = self.tail_node();
        tracing::trace!(len = self.len(), "reverse list");
        // SAFETY: the loop runs while the first node is not `last`, so the node
        // unlinked is always a data node in front of `last`.
        unsafe {
            while self.front_node() != last {
                let node = self.unlink_after(ghost);
                self.splice_insert(last, node, next_of(last));
            }
        }
    }

    /// Returns a new list holding the elements in reversed order. The list
    /// itself is left untouched.
    ///
    /// The copy keeps its nodes in place: the elements at positions `i` and
    /// `len - 1 - i` are swapped for each `i` in the first half.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*<sup>2</sup>) time, since each
    /// swap walks from the ghost node to the mirrored position.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let list = List::from([1, 2, 3, 4]);
    /// assert_eq!(list.get_reversed_list().to_vec(), vec![4, 3, 2, 1]);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn get_reversed_list(&self) -> Self
    where
        T: Clone,
    {
        let reversed = self.clone();
        let len = reversed.len();
        let ghost = reversed.ghost_node();
        let mut left = ghost;
        for i in 0..len / 2 {
            // SAFETY: `i < len / 2`, so both `left` and `right` are distinct data
            // nodes of `reversed`, which is exclusively owned here.
            unsafe {
                left = next_of(left);
                let mut right = ghost;
                for _ in 0..len - i {
                    right = next_of(right);
                }
                ptr::swap(
                    ptr::addr_of_mut!((*left.as_ptr()).element),
                    ptr::addr_of_mut!((*right.as_ptr()).element),
                );
            }
        }
        reversed
    }

    /// Sort the list in ascending order.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(*n*)
    /// memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a recursive merge sort over copies: the list is
    /// split into two new lists, both halves are sorted, then merged back into
    /// the emptied list.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    /// let mut list = List::from([5, 3, 1, 4, 2]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord + Clone,
    {
        sort::merge_sort(self);
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::iter::FromIterator;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn list_eq_and_hash() {
        let a = List::from([1, 2, 3]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, List::from([1, 2]));
        assert_ne!(a, List::from([1, 2, 4]));
    }

    #[test]
    fn list_add() {
        fn test_add(first: &[i32], second: &[i32]) {
            let a = List::from_iter(first.iter().copied());
            let b = List::from_iter(second.iter().copied());
            let added = List::add_lists(&a, &b);
            let expected: Vec<i32> = first.iter().chain(second).copied().collect();
            assert_eq!(added.to_vec(), expected);
            assert_eq!(added.len(), a.len() + b.len());
            assert_eq!(a.to_vec(), first);
            assert_eq!(b.to_vec(), second);
        }
        test_add(&[1, 2], &[3, 4]);
        test_add(&[], &[3, 4]);
        test_add(&[1, 2], &[]);
        test_add(&[], &[]);
    }

    #[test]
    fn list_concat() {
        fn test_concat(first: &[i32], second: &[i32]) {
            let mut a = List::from_iter(first.iter().copied());
            let mut b = List::from_iter(second.iter().copied());
            a.concat_lists(&mut b);
            let expected: Vec<i32> = first.iter().chain(second).copied().collect();
            assert_eq!(a.to_vec(), expected);
            assert_eq!(a.len(), expected.len());
            assert!(b.is_empty());
            assert_eq!(b.len(), 0);

            // both lists stay usable after the transfer
            a.insert_end(100);
            b.insert_end(200);
            assert_eq!(a.get_end(), Ok(&100));
            assert_eq!(b.to_vec(), vec![200]);
        }
        test_concat(&[1, 2], &[3, 4, 5]);
        test_concat(&[], &[3]);
        test_concat(&[1], &[]);
        test_concat(&[], &[]);
    }

    #[test]
    fn list_merged() {
        let a = List::from([9, 1, 5]);
        let b = List::from([2, 8, 1]);
        let merged = List::get_merged_list(&a, &b);
        assert_eq!(merged.to_vec(), vec![1, 1, 2, 5, 8, 9]);
        assert_eq!(a.to_vec(), vec![9, 1, 5]);
        assert_eq!(b.to_vec(), vec![2, 8, 1]);
        assert!(List::get_merged_list(&List::<i32>::new(), &List::new()).is_empty());
    }

    #[test]
    fn list_reverse() {
        fn test_reverse(input: &[i32]) {
            let mut list = List::from_iter(input.iter().copied());
            let expected: Vec<i32> = input.iter().rev().copied().collect();

            let reversed = list.get_reversed_list();
            assert_eq!(reversed.to_vec(), expected);
            assert_eq!(list.to_vec(), input);

            list.reverse_list();
            assert_eq!(list.to_vec(), expected);
            assert_eq!(list.len(), input.len());
            assert_eq!(list.get_end().ok(), input.first());

            list.reverse_list();
            assert_eq!(list.to_vec(), input);
        }
        test_reverse(&[]);
        test_reverse(&[1]);
        test_reverse(&[1, 2]);
        test_reverse(&[1, 2, 3]);
        test_reverse(&[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn list_reverse_keeps_nodes() {
        let mut list = List::from([1, 2, 3]);
        let before: Vec<*const i32> = list.iter().map(|e| e as *const i32).collect();
        list.reverse_list();
        let after: Vec<*const i32> = list.iter().map(|e| e as *const i32).collect();
        assert_eq!(after, before.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn list_sort() {
        fn test_sort(input: &[i32]) {
            let mut list = List::from_iter(input.iter().copied());
            let mut expected = input.to_vec();
            expected.sort();
            list.sort();
            assert_eq!(list.to_vec(), expected);
            assert_eq!(list.len(), input.len());
        }
        test_sort(&[5, 3, 1, 4, 2]);
        test_sort(&[]);
        test_sort(&[1]);
        test_sort(&[2, 1]);
        test_sort(&[3, 3, 1, 1, 2, 2]);
        test_sort(&[-4, 10, 0, -4, 7, 7, 100, -100, 3]);
        test_sort(&(0..100).rev().collect::<Vec<_>>());
    }
}
