//! An ordered map and an ordered set implemented with an AVL tree.
//!
//! [`OrderedTree`] keeps unique keys in sorted order and rebalances itself
//! after every insertion and removal, so lookup, insertion and removal stay
//! logarithmic. [`OrderedSet`] is the same structure with the values left
//! out.
//!
//! Positions inside the map are addressed with cursors. A cursor always
//! designates a real entry: the end of the map is its maximum entry rather
//! than a past-the-end sentinel, and stepping beyond either end reports
//! [`TreeError::OutOfRange`] instead of wrapping or going undefined.
//!
//! ```
//! use ordtree::OrderedTree;
//!
//! let mut map = OrderedTree::new();
//! map.insert(2, "two");
//! map.insert(1, "one");
//! map.insert(3, "three");
//!
//! let mut cursor = map.first()?;
//! assert_eq!(cursor.key(), &1);
//! cursor.move_next()?;
//! assert_eq!(cursor.key(), &2);
//!
//! let keys: Vec<i32> = map.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 2, 3]);
//! # Ok::<(), ordtree::TreeError>(())
//! ```

mod error;
pub mod set;
pub mod tree;

pub use error::TreeError;
pub use set::OrderedSet;
pub use tree::{Cursor, CursorMut, OrderedTree};
