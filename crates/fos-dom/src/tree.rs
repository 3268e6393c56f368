//! DOM Tree (arena-based allocation)
//!
//! Core node manipulation: appendChild, removeChild, insertBefore,
//! replaceChild. Nodes are never freed; a removed node keeps its ID and can
//! be reinserted.

use crate::{DomError, DomResult, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Allocate a detached node
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Get a node or fail with `NotFound`
    pub fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Mutable variant of [`DomTree::node`]
    pub fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is allocated up front
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling.to_option())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.first_child.to_option())
    }

    /// Children of a node in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Descendants of a node in tree order, the node itself excluded
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node.to_option();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Append `child` as last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference`, or at the end when `reference` is `None`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.ensure_insertable(parent, child)?;
        if let Some(reference) = reference {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild);
            }
            if reference == child {
                return Ok(());
            }
        }
        self.unlink(child);
        self.link_before(parent, child, reference.unwrap_or(NodeId::NONE));
        Ok(())
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.unlink(child);
        Ok(())
    }

    /// Put `new_child` where `old_child` is and detach `old_child`
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<()> {
        if self.node(old_child)?.parent != parent {
            return Err(DomError::NotAChild);
        }
        if new_child == old_child {
            return Ok(());
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.unlink(old_child);
        Ok(())
    }

    /// Detach every child of `parent`
    pub fn remove_all_children(&mut self, parent: NodeId) -> DomResult<()> {
        while let Some(child) = self.node(parent)?.first_child.to_option() {
            self.unlink(child);
        }
        Ok(())
    }

    fn ensure_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::HierarchyRequest);
        }
        self.node(child)?;
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    fn link_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let prev = if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling
        } else {
            self.nodes[parent.index()].last_child
        };

        let node = &mut self.nodes[child.index()];
        node.parent = parent;
        node.prev_sibling = prev;
        node.next_sibling = reference;

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
    }

    fn unlink(&mut self, child: NodeId) {
        let node = &self.nodes[child.index()];
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

/// Pre-order walk over a subtree following sibling and parent links
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Descendants<'_> {
    fn successor(&self, node: NodeId) -> NodeId {
        if let Some(child) = self.tree.first_child(node) {
            return child;
        }
        let mut current = node;
        while current != self.root {
            if let Some(sibling) = self.tree.next_sibling(current) {
                return sibling;
            }
            match self.tree.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        NodeId::NONE
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = self.successor(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_children(count: usize) -> (DomTree, NodeId, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let parent = tree.alloc(Node::element("div"));
        tree.append_child(tree.root(), parent).unwrap();
        let children = (0..count)
            .map(|i| {
                let child = tree.alloc(Node::text(format!("{i}")));
                tree.append_child(parent, child).unwrap();
                child
            })
            .collect();
        (tree, parent, children)
    }

    #[test]
    fn test_append_keeps_order() {
        let (tree, parent, children) = tree_with_children(3);
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), children);
    }

    #[test]
    fn test_insert_before_first() {
        let (mut tree, parent, children) = tree_with_children(2);
        let node = tree.alloc(Node::text("x"));
        tree.insert_before(parent, node, Some(children[0])).unwrap();

        assert_eq!(
            tree.children(parent).collect::<Vec<_>>(),
            vec![node, children[0], children[1]]
        );
    }

    #[test]
    fn test_move_within_parent() {
        let (mut tree, parent, c) = tree_with_children(3);
        tree.append_child(parent, c[0]).unwrap();
        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![c[1], c[2], c[0]]);
    }

    #[test]
    fn test_remove_child_unlinks() {
        let (mut tree, parent, c) = tree_with_children(3);
        tree.remove_child(parent, c[1]).unwrap();

        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![c[0], c[2]]);
        assert_eq!(tree.parent(c[1]), None);
        assert_eq!(tree.remove_child(parent, c[1]), Err(DomError::NotAChild));
    }

    #[test]
    fn test_replace_child() {
        let (mut tree, parent, c) = tree_with_children(3);
        let node = tree.alloc(Node::comment("new"));
        tree.replace_child(parent, node, c[1]).unwrap();

        assert_eq!(tree.children(parent).collect::<Vec<_>>(), vec![c[0], node, c[2]]);
        assert_eq!(tree.parent(c[1]), None);
    }

    #[test]
    fn test_cannot_insert_ancestor() {
        let (mut tree, parent, _) = tree_with_children(0);
        let inner = tree.alloc(Node::element("span"));
        tree.append_child(parent, inner).unwrap();

        assert_eq!(tree.append_child(inner, parent), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(inner, inner), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_descendants_in_tree_order() {
        let (mut tree, parent, _) = tree_with_children(0);
        let a = tree.alloc(Node::element("a"));
        let b = tree.alloc(Node::element("b"));
        let a1 = tree.alloc(Node::text("a1"));
        let a2 = tree.alloc(Node::text("a2"));
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();
        tree.append_child(a, a1).unwrap();
        tree.append_child(a, a2).unwrap();

        assert_eq!(tree.descendants(parent).collect::<Vec<_>>(), vec![a, a1, a2, b]);
        assert_eq!(tree.descendants(a).collect::<Vec<_>>(), vec![a1, a2]);
        assert_eq!(tree.descendants(a1).count(), 0);
    }

    #[test]
    fn test_text_cannot_have_children() {
        let (mut tree, _, c) = tree_with_children(1);
        let node = tree.alloc(Node::text("y"));
        assert_eq!(tree.append_child(c[0], node), Err(DomError::HierarchyRequest));
    }
}
