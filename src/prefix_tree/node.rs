//! Node arena for the prefix tree.
//!
//! Nodes are addressed by [`NodeId`] into a `Vec`. A node owns its children
//! through their ids and points back at its parent the same way, so there are
//! no reference cycles and walking toward the root is O(1) per step. Detached
//! slots go on a free list and are reused by later inserts.

use smallvec::SmallVec;

/// Index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<S> {
    /// `None` only for the root.
    pub(crate) symbol: Option<S>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    /// A stored sequence ends here.
    pub(crate) terminal: bool,
}

impl<S> Node<S> {
    fn root() -> Self {
        Self {
            symbol: None,
            parent: None,
            children: SmallVec::new(),
            terminal: false,
        }
    }

    /// Childless and non-terminal.
    #[inline]
    pub(crate) fn is_dead(&self) -> bool {
        self.children.is_empty() && !self.terminal
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeArena<S> {
    nodes: Vec<Node<S>>,
    free: Vec<NodeId>,
}

impl<S> NodeArena<S> {
    /// An arena holding only the root.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            free: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.index()]
    }

    /// Nodes reachable from the root, root included.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Creates a child of `parent` labelled `symbol`.
    pub(crate) fn attach(&mut self, parent: NodeId, symbol: S) -> NodeId {
        let node = Node {
            symbol: Some(symbol),
            parent: Some(parent),
            children: SmallVec::new(),
            terminal: false,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                let id = NodeId(
                    u32::try_from(self.nodes.len()).expect("prefix tree node count exceeds u32::MAX"),
                );
                self.nodes.push(node);
                id
            }
        };
        self.get_mut(parent).children.push(id);
        id
    }

    /// Unlinks a leaf from its parent and recycles its slot. Returns the parent.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        debug_assert_ne!(id, NodeId::ROOT, "the root is never detached");
        let node = &mut self.nodes[id.index()];
        debug_assert!(node.children.is_empty());
        let parent = node.parent.take()?;
        node.symbol = None;
        let siblings = &mut self.nodes[parent.index()].children;
        if let Some(pos) = siblings.iter().position(|&c| c == id) {
            siblings.remove(pos);
        }
        self.free.push(id);
        Some(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_detach_reuses_slots() {
        let mut arena: NodeArena<char> = NodeArena::new();
        let a = arena.attach(NodeId::ROOT, 'a');
        let b = arena.attach(a, 'b');
        assert_eq!(arena.live(), 3);
        assert_eq!(arena.get(b).parent, Some(a));
        assert_eq!(arena.get(NodeId::ROOT).children.as_slice(), &[a]);

        assert_eq!(arena.detach(b), Some(a));
        assert!(arena.get(a).is_dead());
        assert_eq!(arena.live(), 2);

        let c = arena.attach(a, 'c');
        assert_eq!(c, b, "freed slot is reused");
        assert_eq!(arena.get(c).symbol, Some('c'));
    }
}
