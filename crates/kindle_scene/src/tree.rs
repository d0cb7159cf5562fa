//! Node arena
//!
//! Owns every [`SceneTreeNode`]. Parent/child relations are plain handle
//! fields; a removed node's slot is returned to the arena and any stale
//! handle to it simply stops resolving.

use kindle_core::Entity;
use slotmap::SlotMap;

use crate::node::{NodeHandle, SceneTreeNode};

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: SlotMap<NodeHandle, SceneTreeNode>,
}

impl NodeArena {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocates a node for `entity`.
    ///
    /// `parent` is only recorded as the back-reference; the node is not
    /// appended to the parent's children until [`attach`](Self::attach) is
    /// called, so callers can choose root or child placement themselves.
    pub fn create_node(&mut self, entity: Entity, parent: Option<NodeHandle>) -> NodeHandle {
        self.nodes.insert(SceneTreeNode::new(entity, parent))
    }

    #[inline]
    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&SceneTreeNode> {
        self.nodes.get(handle)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links `child` under `parent`, detaching it from any previous parent.
    ///
    /// # Panics
    ///
    /// If either handle is stale, or `child == parent`.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle) {
        assert_ne!(parent, child, "Cannot attach a scene tree node to itself");
        assert!(
            self.nodes.contains_key(parent),
            "Parent node {parent:?} is not in the scene tree"
        );

        let Some(previous) = self.nodes.get(child).map(|n| n.parent) else {
            panic!("Child node {child:?} is not in the scene tree");
        };
        if let Some(old) = previous
            && old != parent
        {
            self.detach(child);
        }

        if let Some(p) = self.nodes.get_mut(parent)
            && !p.children.contains(&child)
        {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Removes `child` from its parent's child list and clears its parent.
    /// Returns the former parent, if it was still live.
    pub fn detach(&mut self, child: NodeHandle) -> Option<NodeHandle> {
        let parent = self.nodes.get_mut(child)?.parent.take()?;
        let p = self.nodes.get_mut(parent)?;
        if let Some(pos) = p.children.iter().position(|&x| x == child) {
            p.children.remove(pos);
        }
        Some(parent)
    }

    /// Frees the node's slot after unlinking it from its parent.
    ///
    /// Children still live are left without a parent; their handles stay
    /// valid.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<SceneTreeNode> {
        self.detach(handle);
        let node = self.nodes.remove(handle)?;
        for &child in &node.children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
        }
        Some(node)
    }

    /// Whether `ancestor` lies on the parent chain of `handle` (or is `handle`).
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: NodeHandle, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.nodes.get(h).and_then(|n| n.parent);
        }
        false
    }

    /// Handles of the subtree rooted at `root` in post-order: every child
    /// subtree (in child order) before its parent, `root` last.
    #[must_use]
    pub fn subtree_post_order(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut order = Vec::new();
        // (node, children already pushed)
        let mut stack: Vec<(NodeHandle, bool)> = vec![(root, false)];

        while let Some((handle, expanded)) = stack.pop() {
            if expanded {
                order.push(handle);
                continue;
            }
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            stack.push((handle, true));
            for &child in node.children.iter().rev() {
                stack.push((child, false));
            }
        }

        order
    }

    /// Applies `visitor` to every node of the subtree rooted at `root`,
    /// children before parents.
    pub fn for_each_in_subtree<F>(&self, root: NodeHandle, mut visitor: F)
    where
        F: FnMut(NodeHandle, &SceneTreeNode),
    {
        for handle in self.subtree_post_order(root) {
            if let Some(node) = self.nodes.get(handle) {
                visitor(handle, node);
            }
        }
    }
}
