use std::cmp::Ordering;

use crate::{
    arena::{Arena, NodeId},
    error::TreeError,
    iter::{IntoIter, Iter},
    node::{Branch, Node},
};

/// The result of a downward traversal for a value.
#[derive(Debug)]
enum Locate {
    /// The tree has no nodes.
    Empty,

    /// The node holding a value comparing equal to the probe.
    Found(NodeId),

    /// The value is absent; `parent` is the node a new leaf holding it would
    /// be attached to, on the `branch` side.
    Vacant { parent: NodeId, branch: Branch },
}

/// An ordered set of values backed by a self-balancing binary search tree.
///
/// The tree maintains the AVL height-balance invariant after every insertion
/// and removal, bounding lookups, insertions and removals to O(log n)
/// comparisons in the worst case.
///
/// The value ordering is defined by a comparator injected at construction
/// time ([`AvlTree::with_comparator()`]), defaulting to the [`Ord`]
/// implementation of `T` for trees built with [`AvlTree::new()`]. No two
/// values comparing equal can be stored at once.
#[derive(Debug, Clone)]
pub struct AvlTree<T, C = fn(&T, &T) -> Ordering> {
    pub(crate) arena: Arena<Node<T>>,
    pub(crate) root: Option<NodeId>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
}

impl<T> AvlTree<T>
where
    T: Ord,
{
    /// Initialise an empty tree ordered by the [`Ord`] implementation of `T`.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp as fn(&T, &T) -> Ordering)
    }
}

impl<T> Default for AvlTree<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Initialise an empty tree ordered by `cmp`.
    ///
    /// `cmp` must define a strict total order over `T`; it is injected once
    /// and used by every lookup-driven operation for the life of the tree.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            arena: Arena::default(),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Insert `value` into the tree, rebalancing if necessary.
    ///
    /// Returns [`TreeError::DuplicateItem`] without modifying the tree if a
    /// value comparing equal is already present.
    pub fn insert(&mut self, value: T) -> Result<(), TreeError> {
        let (parent, branch) = match self.locate(&value) {
            Locate::Found(_) => return Err(TreeError::DuplicateItem),
            Locate::Empty => {
                let id = self.arena.alloc(Node::new(value));
                self.root = Some(id);
                self.len += 1;
                return Ok(());
            }
            Locate::Vacant { parent, branch } => (parent, branch),
        };

        // Attach the new leaf.
        let id = self.arena.alloc(Node::new(value));
        self.arena[id].parent = Some(parent);
        *self.arena[parent].child_mut(branch) = Some(id);
        self.len += 1;

        // Ascend towards the root, recomputing heights until the first
        // balance-factor violation (if any) is found and repaired.
        //
        // A single (possibly double) rotation restores the rotated subtree to
        // its pre-insertion height, so every ancestor above the rotation
        // point already stores its correct height and the ascent stops there.
        let mut node = id;
        let mut path_child = None;
        let mut path_grandchild = None;

        while let Some(up) = self.arena[node].parent {
            path_grandchild = path_child;
            path_child = Some(node);
            node = up;

            self.update_height(node);
            if self.balance_factor(node).abs() > 1 {
                // A fresh leaf cannot unbalance its own parent, so the first
                // violation is at least two levels above it and both path
                // nodes below the violation exist.
                self.rebalance_after_insert(node, path_child.unwrap(), path_grandchild.unwrap());
                break;
            }
        }

        Ok(())
    }

    /// Remove the value comparing equal to `value`, returning it.
    ///
    /// Returns [`TreeError::ItemNotFound`] without modifying the tree if no
    /// such value is present.
    pub fn remove(&mut self, value: &T) -> Result<T, TreeError> {
        let mut target = match self.locate(value) {
            Locate::Found(v) => v,
            _ => return Err(TreeError::ItemNotFound),
        };

        if let (Some(left), Some(_)) = (self.arena[target].left, self.arena[target].right) {
            // Two children: swap values with the in-order predecessor (the
            // rightmost node of the left subtree) and splice that node out
            // instead - it has at most one child, reducing every removal to
            // the simple case. Node identities stay put; only the values
            // move.
            let mut pred = left;
            while let Some(r) = self.arena[pred].right {
                pred = r;
            }

            let (a, b) = self.arena.get2_mut(target, pred);
            std::mem::swap(&mut a.value, &mut b.value);
            target = pred;
        }

        // Splice the node out, attaching its sole child (if any) in its place
        // under the parent - or as the new root.
        let child = self.arena[target].left.or(self.arena[target].right);
        let parent = self.arena[target].parent;

        match parent {
            Some(p) => {
                let branch = if self.arena[p].right == Some(target) {
                    Branch::Right
                } else {
                    Branch::Left
                };
                *self.arena[p].child_mut(branch) = child;
            }
            None => self.root = child,
        }
        if let Some(c) = child {
            self.arena[c].parent = parent;
        }

        let node = self.arena.free(target);
        self.len -= 1;

        // Ascend from the splice point all the way to the root - unlike
        // insertion, a single removal can unbalance multiple ancestors, each
        // independently requiring its own rotation.
        let mut cur = parent;
        while let Some(id) = cur {
            self.rebalance_after_remove(id);
            cur = self.arena[id].parent;
        }

        Ok(node.value)
    }

    /// Return a reference to the stored value comparing equal to `value`, or
    /// [`TreeError::ItemNotFound`].
    pub fn get(&self, value: &T) -> Result<&T, TreeError> {
        match self.locate(value) {
            Locate::Found(id) => Ok(&self.arena[id].value),
            _ => Err(TreeError::ItemNotFound),
        }
    }

    /// Return true if a value comparing equal to `value` is stored in the
    /// tree.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_ok()
    }

    /// Return the stored height of the node holding `value`, or
    /// [`TreeError::ItemNotFound`].
    ///
    /// A leaf has a height of 1. An introspection aid for asserting the tree
    /// shape after a sequence of operations.
    pub fn height_of(&self, value: &T) -> Result<u8, TreeError> {
        match self.locate(value) {
            Locate::Found(id) => Ok(self.arena[id].height),
            _ => Err(TreeError::ItemNotFound),
        }
    }

    /// Descend from the root towards `value`, returning the holding node or
    /// the attachment point for it.
    fn locate(&self, value: &T) -> Locate {
        let mut cur = match self.root {
            Some(v) => v,
            None => return Locate::Empty,
        };

        loop {
            let branch = match (self.cmp)(value, &self.arena[cur].value) {
                Ordering::Equal => return Locate::Found(cur),
                Ordering::Less => Branch::Left,
                Ordering::Greater => Branch::Right,
            };

            match self.arena[cur].child(branch) {
                Some(next) => cur = next,
                None => return Locate::Vacant { parent: cur, branch },
            }
        }
    }
}

impl<T, C> AvlTree<T, C> {
    /// Return the number of values stored in the tree.
    ///
    /// A maintained counter; no traversal is performed.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every value, leaving the tree empty.
    ///
    /// All node slots are released in a single pass over the backing storage,
    /// regardless of the tree shape.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Invoke `visit` on every stored value in comparator order.
    pub fn in_order<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(visit);
    }

    /// Return an iterator yielding references to the stored values in
    /// comparator order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.root)
    }
}

impl<T, C> IntoIterator for AvlTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.arena, self.root)
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
