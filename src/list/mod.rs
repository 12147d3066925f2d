use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::error::{Error, Result};
use crate::Iter;

pub mod iterator;

mod algorithms;

/// The `List` is a singly-linked circular list, anchored by an owned sentinel
/// ("ghost") node. Inserting or removing at the start takes constant time,
/// everything that needs the end of the list walks the ring in *O*(*n*) time.
///
/// The `List` contains:
/// - a pointer `ghost` that points to the ghost node;
/// - a length field `len` indicating the length of the list. It can be disabled by
///   disabling the `length` feature in your `Cargo.toml`, in which case
///   [`len`](List::len) counts the ring on each call:
/// ```text
/// [dependencies]
/// circular_list = { default-features = false }
/// ```
///
/// # Naming Conventions
///
/// - `before`, `after`: two adjacent nodes of the ring, `before.next == after`;
/// - `front..=back`: a closed chain of nodes, both inclusive;
/// - `tail`: the last data node, or the ghost node if the list is empty.
pub struct List<T> {
    ghost: NonNull<Node<T>>,
    #[cfg(feature = "length")]
    /// the length of the list
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// A node of the ring.
///
/// The ghost node shares this layout but its `element` is never
/// initialized, so it must never be read or dropped.
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// A chain of nodes detached from a list, used to move nodes from one list
/// to another without copying them.
///
/// When detached from a list, reading of `back.next` is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    #[cfg(feature = "length")]
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Link `prev` to `next`.
///
/// It is unsafe because `prev` must be a valid node. The node previously
/// following `prev` is not touched, so the caller is responsible for keeping
/// the ring closed.
#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
}

/// Read the successor of `node`.
///
/// It is unsafe because `node` must be a valid node (the ghost node
/// included, whose `next` is always initialized).
#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

// primitive tier
impl<T> List<T> {
    #[inline]
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost
    }

    #[inline]
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first
        // element in the list).
        unsafe { next_of(self.ghost) }
    }

    /// Walk the ring until the node whose `next` is the ghost node.
    ///
    /// Returns the ghost node itself if the list is empty.
    pub(crate) fn tail_node(&self) -> NonNull<Node<T>> {
        let ghost = self.ghost_node();
        let mut node = ghost;
        // SAFETY: every node reachable from the ghost node is valid.
        unsafe {
            while next_of(node) != ghost {
                node = next_of(node);
            }
        }
        node
    }

    /// Find the first data node holding `value`, or `None` if there is none.
    /// The ghost node is never returned.
    pub(crate) fn find_node(&self, value: &T) -> Option<NonNull<Node<T>>>
    where
        T: PartialEq,
    {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        while node != ghost {
            // SAFETY: `node` is a data node of the list, so `element` is initialized.
            unsafe {
                if (*node.as_ptr()).element == *value {
                    return Some(node);
                }
                node = next_of(node);
            }
        }
        None
    }

    /// Find the node right before the first data node holding `value`. The
    /// returned node may be the ghost node, when `value` is at the start.
    pub(crate) fn find_node_before(&self, value: &T) -> Option<NonNull<Node<T>>>
    where
        T: PartialEq,
    {
        let ghost = self.ghost_node();
        let mut prev = ghost;
        // SAFETY: `next_of(prev)` is a data node while it is not the ghost node.
        unsafe {
            while next_of(prev) != ghost {
                if (*next_of(prev).as_ptr()).element == *value {
                    return Some(prev);
                }
                prev = next_of(prev);
            }
        }
        None
    }

    /// Find the node whose `next` is `target`, scanning from the ghost node.
    fn find_predecessor(&self, target: NonNull<Node<T>>) -> Option<NonNull<Node<T>>> {
        let ghost = self.ghost_node();
        let mut prev = ghost;
        // SAFETY: every node reachable from the ghost node is valid.
        unsafe {
            loop {
                let next = next_of(prev);
                if next == target {
                    return Some(prev);
                }
                if next == ghost {
                    return None;
                }
                prev = next;
            }
        }
    }

    /// Attach a single node `node` to the list, between `before` and `after`.
    ///
    /// It is unsafe because it does not check whether `before` and `after`
    /// belong to the list, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    ///
    /// If `before` and `after` do not belong to the list, or they are not
    /// adjacent nodes, this function call will make the list ill-formed.
    pub(crate) unsafe fn splice_insert(
        &mut self,
        before: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
        after: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(before, after);
        connect(before, node);
        connect(node, after);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
    }

    /// Allocate a node holding `element` and attach it right after `at`,
    /// returning the new node.
    ///
    /// It is unsafe because `at` must be a node of the list (possibly the ghost
    /// node).
    pub(crate) unsafe fn insert_after_node(
        &mut self,
        at: NonNull<Node<T>>,
        element: T,
    ) -> NonNull<Node<T>> {
        let node = new_node(element);
        self.splice_insert(at, node, next_of(at));
        node
    }

    /// Unlink the node right after `prev` from the ring, without freeing it.
    ///
    /// It is unsafe because `prev.next` must be a data node of the list.
    pub(crate) unsafe fn unlink_after(&mut self, prev: NonNull<Node<T>>) -> NonNull<Node<T>> {
        let node = next_of(prev);
        debug_assert!(node != self.ghost_node(), "Cannot unlink the ghost node");
        connect(prev, next_of(node));
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        node
    }

    /// Detach the node right after `prev`, free it, and return its element.
    ///
    /// It is unsafe because `prev.next` must be a data node of the list.
    pub(crate) unsafe fn detach_after(&mut self, prev: NonNull<Node<T>>) -> T {
        let node = self.unlink_after(prev);
        Box::from_raw(node.as_ptr()).element
    }

    /// Delete `target` from the list and return its element.
    ///
    /// The predecessor of `target` is found by walking the ring from the ghost
    /// node. If `target` is the ghost node or is not reachable from it, nothing
    /// happens and `None` is returned.
    pub(crate) fn splice_delete(&mut self, target: NonNull<Node<T>>) -> Option<T> {
        if target == self.ghost_node() {
            return None;
        }
        let prev = self.find_predecessor(target);
        debug_assert!(prev.is_some(), "Cannot delete a node of another list");
        // SAFETY: `prev.next` is `target`, which is a data node of the list.
        prev.map(|prev| unsafe { self.detach_after(prev) })
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty.
    ///
    /// The list is left as an empty ring.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        let (front, back) = (self.front_node(), self.tail_node());
        #[cfg(feature = "length")]
        let len = std::mem::replace(&mut self.len, 0);
        let ghost = self.ghost_node();
        // SAFETY: resetting the ghost node to itself closes an empty ring, the
        // chain `front..=back` is now owned by the detached nodes.
        unsafe {
            connect(ghost, ghost);
            Some(DetachedNodes::new(
                front,
                back,
                #[cfg(feature = "length")]
                len,
            ))
        }
    }

    /// Attach a chain of detached nodes to the list, between `before` and `after`.
    ///
    /// It is unsafe because it does not check whether `before` and `after`
    /// belong to the list, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        before: NonNull<Node<T>>,
        after: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(before, after);
        connect(before, detached.front);
        connect(detached.back, after);
        #[cfg(feature = "length")]
        {
            self.len += detached.len;
        }
    }
}

// operation tier
impl<T> List<T> {
    /// Create an empty `List`, a ghost node whose `next` is itself.
    ///
    /// # Examples
    /// ```
    /// use circular_list::List;
    /// let list: List<i32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = new_ghost();
        #[cfg(feature = "length")]
        let len = 0;
        let _marker = PhantomData;
        Self {
            ghost,
            #[cfg(feature = "length")]
            len,
            _marker,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.insert_start(7);
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements in the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time with the `length` feature,
    /// and in *O*(*n*) time without it.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// list.insert_end(2);
    /// list.insert_start(1);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements in the `List`, counted by walking the ring.
    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `List`, freeing every data node. The list
    /// itself stays usable as an empty ring.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.clear();
    /// assert!(list.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        // SAFETY: the ring is closed before any node is freed, so the list never
        // observes a freed node even if dropping an element panics.
        unsafe { connect(ghost, ghost) };
        #[cfg(feature = "length")]
        {
            self.len = 0;
        }
        while node != ghost {
            // SAFETY: `node` is a data node allocated by `new_node`, and it is
            // visited exactly once.
            let boxed = unsafe { Box::from_raw(node.as_ptr()) };
            node = boxed.next;
            drop(boxed);
        }
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// list.insert_start(2);
    /// list.insert_start(1);
    /// assert_eq!(list.get_start(), Ok(&1));
    /// ```
    pub fn insert_start(&mut self, elt: T) {
        let ghost = self.ghost_node();
        // SAFETY: the ghost node belongs to the list.
        unsafe { self.insert_after_node(ghost, elt) };
    }

    /// Appends an element to the end of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, because the tail node
    /// is found by walking the ring.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// list.insert_end(1);
    /// list.insert_end(3);
    /// assert_eq!(list.get_end(), Ok(&3));
    /// ```
    pub fn insert_end(&mut self, elt: T) {
        let tail = self.tail_node();
        // SAFETY: `tail` belongs to the list, and `tail.next` is the ghost node.
        unsafe { self.insert_after_node(tail, elt) };
    }

    /// Inserts `elt` right after the first element equal to `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataNotFound`] if no element equals `anchor`; the list
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.insert_after(&2, 99), Ok(()));
    /// assert_eq!(list.to_vec(), vec![1, 2, 99, 3]);
    /// assert_eq!(list.insert_after(&42, 0), Err(Error::DataNotFound));
    /// ```
    pub fn insert_after(&mut self, anchor: &T, elt: T) -> Result<()>
    where
        T: PartialEq,
    {
        let at = self.find_node(anchor).ok_or(Error::DataNotFound)?;
        // SAFETY: `at` is a data node of the list.
        unsafe { self.insert_after_node(at, elt) };
        Ok(())
    }

    /// Inserts `elt` right before the first element equal to `anchor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataNotFound`] if no element equals `anchor`; the list
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.insert_before(&1, 0), Ok(()));
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// assert_eq!(list.insert_before(&42, 0), Err(Error::DataNotFound));
    /// ```
    pub fn insert_before(&mut self, anchor: &T, elt: T) -> Result<()>
    where
        T: PartialEq,
    {
        let prev = self.find_node_before(anchor).ok_or(Error::DataNotFound)?;
        // SAFETY: `prev` belongs to the list (possibly the ghost node).
        unsafe { self.insert_after_node(prev, elt) };
        Ok(())
    }

    /// Provides a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.get_start(), Err(Error::EmptyList));
    ///
    /// list.insert_start(1);
    /// assert_eq!(list.get_start(), Ok(&1));
    /// ```
    pub fn get_start(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyList);
        }
        // SAFETY: the list is not empty, so the front node is a data node.
        Ok(unsafe { &(*self.front_node().as_ptr()).element })
    }

    /// Provides a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.get_end(), Err(Error::EmptyList));
    ///
    /// list.insert_end(1);
    /// list.insert_end(2);
    /// assert_eq!(list.get_end(), Ok(&2));
    /// ```
    pub fn get_end(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyList);
        }
        // SAFETY: the list is not empty, so the tail node is a data node.
        Ok(unsafe { &(*self.tail_node().as_ptr()).element })
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_start(), Err(Error::EmptyList));
    ///
    /// list.insert_start(1);
    /// list.insert_start(3);
    /// assert_eq!(list.pop_start(), Ok(3));
    /// assert_eq!(list.pop_start(), Ok(1));
    /// ```
    pub fn pop_start(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyList);
        }
        let front = self.front_node();
        self.splice_delete(front).ok_or(Error::EmptyList)
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_end(), Err(Error::EmptyList));
    ///
    /// list.insert_end(1);
    /// list.insert_end(3);
    /// assert_eq!(list.pop_end(), Ok(3));
    /// ```
    pub fn pop_end(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyList);
        }
        let tail = self.tail_node();
        self.splice_delete(tail).ok_or(Error::EmptyList)
    }

    /// Removes the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty.
    pub fn remove_start(&mut self) -> Result<()> {
        self.pop_start().map(drop)
    }

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty.
    pub fn remove_end(&mut self) -> Result<()> {
        self.pop_end().map(drop)
    }

    /// Removes the first element equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyList`] if the list is empty, or
    /// [`Error::DataNotFound`] if no element equals `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::{Error, List};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 1]);
    /// assert_eq!(list.remove_data(&1), Ok(()));
    /// assert_eq!(list.to_vec(), vec![2, 1]);
    /// assert_eq!(list.remove_data(&5), Err(Error::DataNotFound));
    /// ```
    pub fn remove_data(&mut self, value: &T) -> Result<()>
    where
        T: PartialEq,
    {
        if self.is_empty() {
            return Err(Error::EmptyList);
        }
        let node = self.find_node(value).ok_or(Error::DataNotFound)?;
        self.splice_delete(node)
            .map(drop)
            .ok_or(Error::DataNotFound)
    }

    /// Returns `true` if the `List` contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    /// assert!(list.search_data(&0));
    /// assert!(!list.search_data(&10));
    /// ```
    pub fn search_data(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find_node(value).is_some()
    }

    /// Provides a forward iterator, from the first element to the last one.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_list::List;
    ///
    /// let mut list = List::new();
    /// list.insert_end(0);
    /// list.insert_end(1);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Copies the elements into a `Vec`, in list order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the ring from the ghost node back to the ghost node, e.g.
/// `[START]->[1]->[2]->[END]`.
impl<T: Display> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[START]->")?;
        for element in self {
            write!(f, "[{}]->", element)?;
        }
        f.write_str("[END]")
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DetachedNodes<T> {
    /// It is unsafe because it must be guaranteed that `front..=back` is
    /// a valid chain and its length must be equal to `len` (with
    /// `#[cfg(feature = "length")]`).
    unsafe fn new(
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        #[cfg(feature = "length")] len: usize,
    ) -> Self {
        let _marker = PhantomData;
        #[cfg(feature = "length")]
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            #[cfg(feature = "length")]
            len,
            _marker,
        }
    }
}

/// Allocate uninitialized memory for one node. Running out of memory is not
/// recoverable: the process is aborted.
fn allocate_node<T>() -> NonNull<Node<T>> {
    let layout = Layout::new::<Node<T>>();
    // SAFETY: `Node<T>` always holds a pointer, so `layout` is never zero-sized.
    let ptr = unsafe { alloc::alloc(layout) } as *mut Node<T>;
    match NonNull::new(ptr) {
        Some(ptr) => ptr,
        None => {
            tracing::error!(size = layout.size(), "failed to allocate a list node");
            alloc::handle_alloc_error(layout)
        }
    }
}

/// Create a detached data node with given element.
///
/// The node is allocated with the layout of `Node<T>` by the global allocator,
/// so it can be released by `Box::from_raw`.
fn new_node<T>(element: T) -> NonNull<Node<T>> {
    let node = allocate_node::<T>();
    // SAFETY: `node` is freshly allocated and properly aligned. `next` is
    // dangling until the node is spliced into a ring.
    unsafe {
        ptr::write(
            node.as_ptr(),
            Node {
                next: NonNull::dangling(),
                element,
            },
        );
    }
    node
}

fn new_ghost<T>() -> NonNull<Node<T>> {
    let ghost = allocate_node::<T>();
    // SAFETY:
    // - `ghost.next` is initialized immediately after allocating `ghost`;
    // - `ghost.element` is never read, so it is left uninitialized.
    unsafe { ptr::addr_of_mut!((*ghost.as_ptr()).next).write(ghost) };
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(before: NonNull<Node<T>>, after: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(next_of(before), after);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost node was allocated by `allocate_node` with the same
        // layout, and its element was never initialized, so it must not be dropped.
        unsafe { alloc::dealloc(self.ghost.as_ptr() as *mut u8, Layout::new::<Node<T>>()) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}
