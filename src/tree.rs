//! An ordered map implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::error::TreeError;

mod cursor;

pub use cursor::{Cursor, CursorMut, IntoIter, Iter, IterMut};

/// An ordered map implemented with an AVL tree.
///
/// Keys are unique and kept in sorted order. Lookup, insertion and removal
/// run in logarithmic time; iterators and cursors step through the node
/// links themselves, without an auxiliary stack.
///
/// ```
/// use ordtree::OrderedTree;
/// let mut map = OrderedTree::new();
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.get(&1), Some(&"one"));
/// map.remove(&1);
/// assert!(map.get(&1).is_none());
/// ```
pub struct OrderedTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    parent: Link<K, V>,
    height: usize,
}

type NodePtr<K, V> = NonNull<Node<K, V>>;
type Link<K, V> = Option<NodePtr<K, V>>;
type LinkPtr<K, V> = NonNull<Link<K, V>>;

/// Outcome of descending towards a key: either the node holding it, or the
/// empty slot where it belongs.
enum Probe<K, V> {
    Occupied(NodePtr<K, V>),
    Vacant {
        parent: Link<K, V>,
        slot: LinkPtr<K, V>,
    },
}

// Nodes are owned exclusively through the child links; the parent link is a
// back-reference that is never used to free memory.
unsafe impl<K: Send, V: Send> Send for OrderedTree<K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for OrderedTree<K, V> {}

impl<K: Ord, V> OrderedTree<K, V> {
    /// Creates an empty map.
    /// No memory is allocated until the first entry is inserted.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key
    /// type.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(key)?;
        Some(&unsafe { &*node_ptr.as_ptr() }.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(key)?;
        Some(unsafe { &mut (*node_ptr.as_ptr()).value })
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(key)?;
        let node = unsafe { &*node_ptr.as_ptr() };
        Some((&node.key, &node.value))
    }

    /// Returns true if the map contains the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Returns a cursor to the entry holding the key together with a flag
    /// telling whether the pair was actually inserted. If the key was
    /// already present nothing changes: the existing value is kept, the
    /// flag is `false` and the cursor designates the existing entry.
    ///
    /// ```
    /// use ordtree::OrderedTree;
    /// let mut map = OrderedTree::new();
    /// map.insert(0, "zero");
    /// let (cursor, inserted) = map.insert(0, "other");
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), &"zero");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V>, bool) {
        match self.probe(&key) {
            Probe::Occupied(node_ptr) => (Cursor::new(self, node_ptr), false),
            Probe::Vacant { parent, mut slot } => {
                let node_ptr = Node::create(parent, key, value);
                unsafe {
                    *slot.as_mut() = Some(node_ptr);
                }
                self.len += 1;
                self.rebalance_upward(parent);
                (Cursor::new(self, node_ptr), true)
            }
        }
    }

    /// Removes a key from the map, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key-value pair if
    /// the key was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(key)?;
        debug_assert!(self.len >= 1);
        self.detach_node(node_ptr);
        self.len -= 1;
        Some(unsafe { Node::reclaim(node_ptr) })
    }

    /// Returns a cursor to the entry holding the key.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(key)?;
        Some(Cursor::new(self, node_ptr))
    }

    /// Returns a mutable cursor to the entry holding the key.
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<CursorMut<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(key)?;
        Some(CursorMut::new(self, node_ptr))
    }

    /// Moves all entries from `other` into `self`, leaving `other` empty.
    ///
    /// On key collision the entry already in `self` is kept and the one
    /// from `other` is dropped.
    pub fn merge(&mut self, other: &mut Self) {
        for (key, value) in mem::take(other) {
            self.insert(key, value);
        }
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        match self.root {
            None => assert_eq!(self.len, 0),
            Some(root_ptr) => {
                unsafe {
                    assert!(root_ptr.as_ref().parent.is_none());
                }
                let count = unsafe { Self::verify_subtree(root_ptr) };
                assert_eq!(count, self.len);
            }
        }
    }

    fn find_node<Q>(&self, key: &Q) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match key.cmp(node_ptr.as_ref().key.borrow()) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            };
        }
        current
    }

    fn probe(&mut self, key: &K) -> Probe<K, V> {
        let mut parent: Link<K, V> = None;
        let mut slot: LinkPtr<K, V> = NonNull::from(&mut self.root);
        unsafe {
            while let Some(mut node_ptr) = *slot.as_ref() {
                match key.cmp(&node_ptr.as_ref().key) {
                    Ordering::Equal => return Probe::Occupied(node_ptr),
                    Ordering::Less => {
                        parent = Some(node_ptr);
                        slot = NonNull::from(&mut node_ptr.as_mut().left);
                    }
                    Ordering::Greater => {
                        parent = Some(node_ptr);
                        slot = NonNull::from(&mut node_ptr.as_mut().right);
                    }
                }
            }
        }
        Probe::Vacant { parent, slot }
    }

    // Checks order, heights, balance and parent links; returns the node
    // count of the subtree.
    #[cfg(any(test, feature = "consistency_check"))]
    unsafe fn verify_subtree(node_ptr: NodePtr<K, V>) -> usize {
        let node = node_ptr.as_ref();
        let mut count = 1;
        if let Some(left_ptr) = node.left {
            assert!(left_ptr.as_ref().parent == Some(node_ptr));
            assert!(left_ptr.as_ref().key < node.key);
            count += Self::verify_subtree(left_ptr);
        }
        if let Some(right_ptr) = node.right {
            assert!(right_ptr.as_ref().parent == Some(node_ptr));
            assert!(right_ptr.as_ref().key > node.key);
            count += Self::verify_subtree(right_ptr);
        }
        let left_height = Self::subtree_height(node.left);
        let right_height = Self::subtree_height(node.right);
        assert_eq!(node.height, 1 + cmp::max(left_height, right_height));
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);
        count
    }
}

impl<K, V> OrderedTree<K, V> {
    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of entries in the map.
    /// The count is maintained across mutations, so this is O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns a theoretical upper bound on the number of entries the map
    /// could ever hold, derived from the node footprint and the address
    /// space. It is not a tracked quantity.
    pub fn max_len(&self) -> usize {
        usize::MAX / mem::size_of::<Node<K, V>>() / 2
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        unsafe {
            Self::release_subtree(self.root);
        }
        self.root = None;
        self.len = 0;
    }

    /// Returns a cursor at the first (minimum) entry.
    ///
    /// Fails with [`TreeError::Empty`] if the map has no entries.
    pub fn first(&self) -> Result<Cursor<'_, K, V>, TreeError> {
        match self.root {
            None => Err(TreeError::Empty),
            Some(root_ptr) => Ok(Cursor::new(self, Self::min_node(root_ptr))),
        }
    }

    /// Returns a cursor at the last (maximum) entry.
    ///
    /// The last entry doubles as the end position of the map: it is a real,
    /// dereferenceable entry, not a past-the-end sentinel. Stepping a
    /// cursor beyond it fails with [`TreeError::OutOfRange`].
    ///
    /// Fails with [`TreeError::Empty`] if the map has no entries.
    pub fn last(&self) -> Result<Cursor<'_, K, V>, TreeError> {
        match self.root {
            None => Err(TreeError::Empty),
            Some(root_ptr) => Ok(Cursor::new(self, Self::max_node(root_ptr))),
        }
    }

    /// Returns a mutable cursor at the first (minimum) entry.
    ///
    /// Fails with [`TreeError::Empty`] if the map has no entries.
    pub fn first_mut(&mut self) -> Result<CursorMut<'_, K, V>, TreeError> {
        match self.root {
            None => Err(TreeError::Empty),
            Some(root_ptr) => {
                let node_ptr = Self::min_node(root_ptr);
                Ok(CursorMut::new(self, node_ptr))
            }
        }
    }

    /// Returns a mutable cursor at the last (maximum) entry.
    ///
    /// Removing through this cursor removes the maximum entry, since the
    /// end position is the maximum itself. See [`last`](Self::last).
    pub fn last_mut(&mut self) -> Result<CursorMut<'_, K, V>, TreeError> {
        match self.root {
            None => Err(TreeError::Empty),
            Some(root_ptr) => {
                let node_ptr = Self::max_node(root_ptr);
                Ok(CursorMut::new(self, node_ptr))
            }
        }
    }

    /// Removes and returns the first (minimum) entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node_ptr = Self::min_node(self.root?);
        self.detach_node(node_ptr);
        self.len -= 1;
        Some(unsafe { Node::reclaim(node_ptr) })
    }

    /// Removes and returns the last (maximum) entry.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node_ptr = Self::max_node(self.root?);
        self.detach_node(node_ptr);
        self.len -= 1;
        Some(unsafe { Node::reclaim(node_ptr) })
    }

    /// Exchanges the contents of two maps in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Gets an iterator over the entries of the map in sorted key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Gets an iterator over the entries of the map with mutable value
    /// references, in sorted key order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn height(&self) -> usize {
        Self::subtree_height(self.root)
    }

    fn subtree_height(link: Link<K, V>) -> usize {
        match link {
            None => 0,
            Some(node_ptr) => unsafe { node_ptr.as_ref().height },
        }
    }

    fn refresh_height(mut node_ptr: NodePtr<K, V>) {
        unsafe {
            node_ptr.as_mut().height = 1 + cmp::max(
                Self::subtree_height(node_ptr.as_ref().left),
                Self::subtree_height(node_ptr.as_ref().right),
            );
        }
    }

    fn balance_factor(node_ptr: NodePtr<K, V>) -> isize {
        unsafe {
            Self::subtree_height(node_ptr.as_ref().right) as isize
                - Self::subtree_height(node_ptr.as_ref().left) as isize
        }
    }

    fn min_node(mut node_ptr: NodePtr<K, V>) -> NodePtr<K, V> {
        unsafe {
            while let Some(left_ptr) = node_ptr.as_ref().left {
                node_ptr = left_ptr;
            }
        }
        node_ptr
    }

    fn max_node(mut node_ptr: NodePtr<K, V>) -> NodePtr<K, V> {
        unsafe {
            while let Some(right_ptr) = node_ptr.as_ref().right {
                node_ptr = right_ptr;
            }
        }
        node_ptr
    }

    // In-order successor: the minimum of the right subtree, otherwise the
    // first ancestor reached from a left child. None at the maximum.
    fn successor(node_ptr: NodePtr<K, V>) -> Link<K, V> {
        unsafe {
            if let Some(right_ptr) = node_ptr.as_ref().right {
                return Some(Self::min_node(right_ptr));
            }
            let mut child = node_ptr;
            let mut current = node_ptr.as_ref().parent;
            while let Some(parent_ptr) = current {
                if parent_ptr.as_ref().left == Some(child) {
                    return Some(parent_ptr);
                }
                child = parent_ptr;
                current = parent_ptr.as_ref().parent;
            }
            None
        }
    }

    fn predecessor(node_ptr: NodePtr<K, V>) -> Link<K, V> {
        unsafe {
            if let Some(left_ptr) = node_ptr.as_ref().left {
                return Some(Self::max_node(left_ptr));
            }
            let mut child = node_ptr;
            let mut current = node_ptr.as_ref().parent;
            while let Some(parent_ptr) = current {
                if parent_ptr.as_ref().right == Some(child) {
                    return Some(parent_ptr);
                }
                child = parent_ptr;
                current = parent_ptr.as_ref().parent;
            }
            None
        }
    }

    // Unhooks a node from the tree and restores the AVL condition. The node
    // itself is left untouched for the caller to reclaim.
    fn detach_node(&mut self, node_ptr: NodePtr<K, V>) {
        unsafe {
            if let Some(right_ptr) = node_ptr.as_ref().right {
                // The in-order successor takes the detached node's place.
                let mut succ_ptr = Self::min_node(right_ptr);
                let mut succ_parent_ptr = succ_ptr.as_ref().parent.unwrap();

                // Unhook the successor; it has no left child, so its right
                // child moves up into its slot.
                debug_assert!(succ_ptr.as_ref().left.is_none());
                if succ_parent_ptr.as_ref().left == Some(succ_ptr) {
                    succ_parent_ptr.as_mut().left = succ_ptr.as_ref().right;
                } else {
                    succ_parent_ptr.as_mut().right = succ_ptr.as_ref().right;
                }
                if let Some(mut right_child) = succ_ptr.as_ref().right {
                    right_child.as_mut().parent = succ_ptr.as_ref().parent;
                }

                // Transplant the successor into the node's position
                // (up to six links).
                succ_ptr.as_mut().left = node_ptr.as_ref().left;
                if let Some(mut left_child) = node_ptr.as_ref().left {
                    left_child.as_mut().parent = Some(succ_ptr);
                }

                succ_ptr.as_mut().right = node_ptr.as_ref().right;
                if let Some(mut right_child) = node_ptr.as_ref().right {
                    right_child.as_mut().parent = Some(succ_ptr);
                }

                succ_ptr.as_mut().parent = node_ptr.as_ref().parent;
                match node_ptr.as_ref().parent {
                    None => self.root = Some(succ_ptr),
                    Some(mut parent_ptr) => {
                        if parent_ptr.as_ref().left == Some(node_ptr) {
                            parent_ptr.as_mut().left = Some(succ_ptr);
                        } else {
                            parent_ptr.as_mut().right = Some(succ_ptr);
                        }
                    }
                }

                // Balance may be broken where the successor was unhooked;
                // if that spot was the detached node itself, the successor
                // now stands in it.
                let start = if succ_parent_ptr == node_ptr {
                    succ_ptr
                } else {
                    succ_parent_ptr
                };
                self.rebalance_upward(Some(start));
            } else {
                // No right subtree: the left child, if any, takes the
                // node's place.
                if let Some(mut left_ptr) = node_ptr.as_ref().left {
                    left_ptr.as_mut().parent = node_ptr.as_ref().parent;
                }
                match node_ptr.as_ref().parent {
                    None => self.root = node_ptr.as_ref().left,
                    Some(mut parent_ptr) => {
                        if parent_ptr.as_ref().left == Some(node_ptr) {
                            parent_ptr.as_mut().left = node_ptr.as_ref().left;
                        } else {
                            parent_ptr.as_mut().right = node_ptr.as_ref().left;
                        }
                        self.rebalance_upward(Some(parent_ptr));
                    }
                }
            }
        }
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<K, V>) {
        unsafe {
            let Some(mut pivot_ptr) = node_ptr.as_ref().right else {
                return;
            };
            node_ptr.as_mut().right = pivot_ptr.as_ref().left;
            if let Some(mut moved_ptr) = pivot_ptr.as_ref().left {
                moved_ptr.as_mut().parent = Some(node_ptr);
            }

            pivot_ptr.as_mut().parent = node_ptr.as_ref().parent;
            match node_ptr.as_ref().parent {
                None => self.root = Some(pivot_ptr),
                Some(mut parent_ptr) => {
                    if parent_ptr.as_ref().left == Some(node_ptr) {
                        parent_ptr.as_mut().left = Some(pivot_ptr);
                    } else {
                        parent_ptr.as_mut().right = Some(pivot_ptr);
                    }
                }
            }

            pivot_ptr.as_mut().left = Some(node_ptr);
            node_ptr.as_mut().parent = Some(pivot_ptr);

            Self::refresh_height(node_ptr);
            Self::refresh_height(pivot_ptr);
        }
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<K, V>) {
        unsafe {
            let Some(mut pivot_ptr) = node_ptr.as_ref().left else {
                return;
            };
            node_ptr.as_mut().left = pivot_ptr.as_ref().right;
            if let Some(mut moved_ptr) = pivot_ptr.as_ref().right {
                moved_ptr.as_mut().parent = Some(node_ptr);
            }

            pivot_ptr.as_mut().parent = node_ptr.as_ref().parent;
            match node_ptr.as_ref().parent {
                None => self.root = Some(pivot_ptr),
                Some(mut parent_ptr) => {
                    if parent_ptr.as_ref().left == Some(node_ptr) {
                        parent_ptr.as_mut().left = Some(pivot_ptr);
                    } else {
                        parent_ptr.as_mut().right = Some(pivot_ptr);
                    }
                }
            }

            pivot_ptr.as_mut().right = Some(node_ptr);
            node_ptr.as_mut().parent = Some(pivot_ptr);

            Self::refresh_height(node_ptr);
            Self::refresh_height(pivot_ptr);
        }
    }

    /// Rebalances every node from the given position up to the root:
    /// heights are refreshed and a rotation is applied wherever the balance
    /// factor reaches two.
    fn rebalance_upward(&mut self, start_from: Link<K, V>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            // The parent is captured first; a rotation re-parents the node.
            let parent = unsafe { node_ptr.as_ref().parent };
            self.rebalance_node(node_ptr);
            current = parent;
        }
    }

    /// Restores the AVL condition at one node if necessary and refreshes
    /// its height. The incoming balance factor never exceeds two in
    /// magnitude, which holds after a single structural update below.
    /// Returns whether a rotation was applied.
    fn rebalance_node(&mut self, node_ptr: NodePtr<K, V>) -> bool {
        let factor = Self::balance_factor(node_ptr);
        debug_assert!((-2..=2).contains(&factor));
        if factor == 2 {
            // Right-heavy; straighten a left-leaning right child first.
            let right_ptr = unsafe { node_ptr.as_ref().right.unwrap() };
            if Self::balance_factor(right_ptr) < 0 {
                self.rotate_right(right_ptr);
            }
            self.rotate_left(node_ptr);
            true
        } else if factor == -2 {
            // Left-heavy; straighten a right-leaning left child first.
            let left_ptr = unsafe { node_ptr.as_ref().left.unwrap() };
            if Self::balance_factor(left_ptr) > 0 {
                self.rotate_left(left_ptr);
            }
            self.rotate_right(node_ptr);
            true
        } else {
            Self::refresh_height(node_ptr);
            false
        }
    }

    // Iterative postorder teardown over the parent links. The subtree root
    // must have no parent, or the walk would escape into the rest of the
    // tree.
    unsafe fn release_subtree(root: Link<K, V>) {
        let mut current = root;
        while let Some(mut node_ptr) = current {
            if let Some(left_ptr) = node_ptr.as_ref().left {
                node_ptr.as_mut().left = None;
                current = Some(left_ptr);
            } else if let Some(right_ptr) = node_ptr.as_ref().right {
                node_ptr.as_mut().right = None;
                current = Some(right_ptr);
            } else {
                current = node_ptr.as_ref().parent;
                drop(Box::from_raw(node_ptr.as_ptr()));
            }
        }
    }
}

impl<K, V> Drop for OrderedTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> Default for OrderedTree<K, V> {
    /// Creates an empty map.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> Clone for OrderedTree<K, V> {
    /// Copies the map by re-inserting every entry in sorted order. The copy
    /// shares no structure with the original.
    fn clone(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedTree<K, V> {}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedTree<K, V> {
    /// Builds a map from a sequence of key-value pairs. On duplicate keys
    /// the first pair wins; later ones are ignored.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedTree<K, V> {
    /// Builds a map from an array of key-value pairs. On duplicate keys the
    /// first pair wins; later ones are ignored.
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedTree<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for OrderedTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<K, V> Node<K, V> {
    fn create(parent: Link<K, V>, key: K, value: V) -> NodePtr<K, V> {
        let boxed = Box::new(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
            height: 1,
        });
        NonNull::from(Box::leak(boxed))
    }

    // The pointer must come from `create` and already be unhooked from the
    // tree.
    unsafe fn reclaim(node_ptr: NodePtr<K, V>) -> (K, V) {
        let node = *Box::from_raw(node_ptr.as_ptr());
        (node.key, node.value)
    }
}
