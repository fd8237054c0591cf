use crate::{arena::NodeId, tree::AvlTree};

impl<T, C> AvlTree<T, C> {
    /// Height of the subtree rooted at `id`, with a missing child
    /// contributing 0.
    pub(crate) fn child_height(&self, id: Option<NodeId>) -> u8 {
        id.map(|v| self.arena[v].height).unwrap_or_default()
    }

    /// Recompute the height of `id` from the current heights of its children.
    pub(crate) fn update_height(&mut self, id: NodeId) {
        let h = self
            .child_height(self.arena[id].left)
            .max(self.child_height(self.arena[id].right))
            + 1;
        self.arena[id].height = h;
    }

    /// Compute the "balance factor" of the subtree rooted at `id`.
    ///
    /// Returns the subtree height skew / magnitude, which is a positive
    /// number when right heavy, and a negative number when left heavy.
    pub(crate) fn balance_factor(&self, id: NodeId) -> i8 {
        let n = &self.arena[id];
        // Correctness: the height is a u8, the maximal value of which fits in
        // an i16 without truncation or sign inversion.
        (self.child_height(n.right) as i16 - self.child_height(n.left) as i16) as i8
    }

    /// Left rotate `x` upward past its parent `P`.
    ///
    /// ```text
    ///      P
    ///     / \                               x
    ///    1   x         Rotate Left        /   \
    ///       / \      --------------->    P     y
    ///      2   y                        / \
    ///                                  1   2
    /// ```
    ///
    /// `P` takes ownership of `x`'s left child in its vacated right slot, and
    /// `x` takes `P`'s place under the grandparent (or as the root). Heights
    /// are recomputed for the demoted `P` first, then `x` - `x`'s new height
    /// depends on `P`'s already-updated one.
    ///
    /// # Panics
    ///
    /// Panics if `x` is the root (there is no parent to rotate past).
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let parent = self.arena[x].parent.expect("rotation pivot must have a parent");
        debug_assert_eq!(self.arena[parent].right, Some(x));

        let x_left = self.arena[x].left;

        // Relink x into the parent's former slot in the grandparent, or make
        // it the new root.
        match self.arena[parent].parent {
            Some(grandparent) => {
                self.arena[x].parent = Some(grandparent);
                if self.arena[grandparent].left == Some(parent) {
                    self.arena[grandparent].left = Some(x);
                } else {
                    self.arena[grandparent].right = Some(x);
                }
            }
            None => {
                self.root = Some(x);
                self.arena[x].parent = None;
            }
        }

        // Hand x's inner child to the parent, and demote the parent.
        self.arena[parent].right = x_left;
        self.arena[x].left = Some(parent);
        self.arena[parent].parent = Some(x);
        if let Some(c) = x_left {
            self.arena[c].parent = Some(parent);
        }

        // Old parent first, then x.
        self.update_height(parent);
        self.update_height(x);
    }

    /// Right rotate `x` upward past its parent `P`.
    ///
    /// ```text
    ///        P
    ///       / \                             x
    ///      x   1       Rotate Right       /   \
    ///     / \        --------------->    y     P
    ///    y   2                                / \
    ///                                        2   1
    /// ```
    ///
    /// The mirror of [`AvlTree::rotate_left()`].
    ///
    /// # Panics
    ///
    /// Panics if `x` is the root (there is no parent to rotate past).
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let parent = self.arena[x].parent.expect("rotation pivot must have a parent");
        debug_assert_eq!(self.arena[parent].left, Some(x));

        let x_right = self.arena[x].right;

        match self.arena[parent].parent {
            Some(grandparent) => {
                self.arena[x].parent = Some(grandparent);
                if self.arena[grandparent].left == Some(parent) {
                    self.arena[grandparent].left = Some(x);
                } else {
                    self.arena[grandparent].right = Some(x);
                }
            }
            None => {
                self.root = Some(x);
                self.arena[x].parent = None;
            }
        }

        self.arena[parent].left = x_right;
        self.arena[x].right = Some(parent);
        self.arena[parent].parent = Some(x);
        if let Some(c) = x_right {
            self.arena[c].parent = Some(parent);
        }

        self.update_height(parent);
        self.update_height(x);
    }

    /// Restore the balance of `unbalanced` after an insertion, given the two
    /// nodes immediately below it on the insertion path.
    ///
    /// The shape of the imbalance selects one of the four classic cases:
    ///
    /// | heavy side | child's heavy side | action |
    /// |------------|--------------------|--------|
    /// | left | left | rotate right |
    /// | left | right | rotate left, then right |
    /// | right | left | rotate right, then left |
    /// | right | right | rotate left |
    pub(crate) fn rebalance_after_insert(
        &mut self,
        unbalanced: NodeId,
        path_child: NodeId,
        path_grandchild: NodeId,
    ) {
        let heavy_left = self.arena[unbalanced].left == Some(path_child);
        let child_heavy_left = self.arena[path_child].left == Some(path_grandchild);

        match (heavy_left, child_heavy_left) {
            // Left-left
            (true, true) => self.rotate_right(path_child),
            // Left-right
            (true, false) => {
                self.rotate_left(path_grandchild);
                self.rotate_right(path_grandchild);
            }
            // Right-left
            (false, true) => {
                self.rotate_right(path_grandchild);
                self.rotate_left(path_grandchild);
            }
            // Right-right
            (false, false) => self.rotate_left(path_child),
        }

        // Invariant: a single (possibly double) rotation restores the balance
        // of the subtree after one insertion.
        debug_assert!(self.balance_factor(unbalanced).abs() <= 1);
    }

    /// Recompute the height of `id` and restore its balance after a removal
    /// below it, if violated.
    ///
    /// Which subtree shrank is read off the sign of the balance factor, and
    /// the sibling subtree's own balance factor selects between a single and
    /// a double rotation.
    pub(crate) fn rebalance_after_remove(&mut self, id: NodeId) {
        self.update_height(id);

        match self.balance_factor(id) {
            2.. => {
                // The left subtree is shorter; promote from the right.
                //
                // A balance factor of +2 means the right subtree has a height
                // of at least 2, so the right child exists.
                let r = self.arena[id].right.unwrap();
                match self.balance_factor(r) {
                    0 | 1 => self.rotate_left(r),
                    _ => {
                        // -1: the inner grandchild is the taller; it exists.
                        let rl = self.arena[r].left.unwrap();
                        self.rotate_right(rl);
                        self.rotate_left(rl);
                    }
                }
            }
            ..=-2 => {
                // The right subtree is shorter; promote from the left.
                let l = self.arena[id].left.unwrap();
                match self.balance_factor(l) {
                    0 | -1 => self.rotate_right(l),
                    _ => {
                        let lr = self.arena[l].right.unwrap();
                        self.rotate_left(lr);
                        self.rotate_right(lr);
                    }
                }
            }
            _ => { /* balanced */ }
        }

        // Invariant: the absolute difference between subtree heights cannot
        // exceed 1 after rebalancing.
        debug_assert!(self.balance_factor(id).abs() <= 1);
    }
}
