use crate::arena::NodeId;

/// The side of a parent a child hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Branch {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,

    /// The node's AVL height.
    ///
    /// The height of the subtree rooted at this node: a leaf has a height of
    /// 1, and a missing child contributes 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    pub(crate) height: u8,

    /// Index of the parent node, [`None`] for the root.
    ///
    /// An upward index only - it never implies ownership of the referenced
    /// slot and is never used to free it.
    pub(crate) parent: Option<NodeId>,

    /// Child slot indexes, each exclusively owned by this node.
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<T> Node<T> {
    /// Initialise an unlinked leaf holding `value`.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            height: 1,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, branch: Branch) -> Option<NodeId> {
        match branch {
            Branch::Left => self.left,
            Branch::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, branch: Branch) -> &mut Option<NodeId> {
        match branch {
            Branch::Left => &mut self.left,
            Branch::Right => &mut self.right,
        }
    }
}
