//! This crate provides a singly-linked circular list with owned nodes, anchored
//! by a sentinel ("ghost") node.
//!
//! The [`List`] inserts and removes at the start in constant time. Everything
//! that needs the end of the list, or a given value, walks the ring in *O*(*n*)
//! time, since a node only knows its successor.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use circular_list::{Error, List};
//!
//! let mut list = List::new();
//! list.insert_end(1);
//! list.insert_end(2);
//! list.insert_end(3);
//!
//! list.insert_after(&2, 99)?;
//! assert_eq!(list.to_vec(), vec![1, 2, 99, 3]);
//!
//! list.remove_data(&1)?;
//! list.sort();
//! assert_eq!(list.to_vec(), vec![2, 3, 99]);
//!
//! assert_eq!(list.pop_start(), Ok(2));
//! assert_eq!(list.remove_data(&7), Err(Error::DataNotFound));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//!    ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//!    ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//!        Node 0                  Node 1                               ↑
//! ╔═══════════╗                                                       │
//! ║   ghost   ║ ──────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `ghost` that points to the ghost node;
//! - a length field `len` indicating the length of the list. It can be disabled by
//!   disabling the `length` feature in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! circular_list = { default-features = false }
//! ```
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the actual payload `T`, except the ghost node whose payload is never
//!   initialized.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` pointer
//! points to itself. As elements are inserted into the list, `ghost.next` points
//! to the first element, and the last element points back to the ghost node.
//!
//! Running out of memory while allocating a node aborts the process.
//!
//! # Errors
//!
//! Operations that need an element ([`get_start`], [`pop_end`], ...) return
//! [`Error::EmptyList`] on an empty list, and operations anchored on a value
//! ([`insert_after`], [`remove_data`], ...) return [`Error::DataNotFound`] when
//! the value is absent. The list is never modified when an error is returned.
//!
//! # Algorithms
//!
//! - [`add_lists`]: a new list with copies of two lists, one after the other;
//! - [`concat_lists`]: move all nodes of another list to the end, leaving it empty;
//! - [`get_merged_list`]: a new sorted list with copies of two lists;
//! - [`reverse_list`]: reverse the nodes in place;
//! - [`get_reversed_list`]: a reversed copy;
//! - [`sort`]: a stable merge sort.
//!
//! ```
//! use circular_list::List;
//!
//! let mut list1 = List::from([3, 1]);
//! let mut list2 = List::from([2]);
//!
//! list1.concat_lists(&mut list2);
//! assert!(list2.is_empty());
//!
//! list1.reverse_list();
//! assert_eq!(list1.to_vec(), vec![2, 1, 3]);
//!
//! list1.sort();
//! assert_eq!(list1.to_vec(), vec![1, 2, 3]);
//! ```
//!
//! # Logging
//!
//! The whole-list algorithms emit `trace` events through [`tracing`]; no
//! subscriber is installed by this crate.
//!
//! [`List`]: crate::List
//! [`get_start`]: crate::List::get_start
//! [`pop_end`]: crate::List::pop_end
//! [`insert_after`]: crate::List::insert_after
//! [`remove_data`]: crate::List::remove_data
//! [`add_lists`]: crate::List::add_lists
//! [`concat_lists`]: crate::List::concat_lists
//! [`get_merged_list`]: crate::List::get_merged_list
//! [`reverse_list`]: crate::List::reverse_list
//! [`get_reversed_list`]: crate::List::get_reversed_list
//! [`sort`]: crate::List::sort

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::List;

mod error;
pub mod list;
