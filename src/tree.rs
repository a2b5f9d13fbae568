//! In-memory view hierarchy implementing [`LayoutHost`].
//!
//! Views live in an [`indextree`] arena. Constraints are plain descriptors
//! with an `active` flag, so everything the installer does is observable.
//! Useful for headless layout descriptions and for tests.
//!
//! ```
//! use zenanchor::{Attribute, Registry, apply};
//! use zenanchor::tree::ViewTree;
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_view("root");
//! let child = tree.add_view("child");
//! tree.add_subview(root, child).unwrap();
//!
//! let mut registry = Registry::new();
//! apply(&mut tree, &mut registry, child, [Attribute::size(40), Attribute::center(0)]).unwrap();
//! assert_eq!(tree.active_count(), 4);
//! ```

use std::collections::BTreeMap;

use indextree::{Arena, NodeId};

use crate::host::{ConstraintDescriptor, LayoutHost};

/// Handle to a view in a [`ViewTree`]. Never reused after the view is
/// destroyed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u32);

/// Handle to a constraint created by a [`ViewTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(usize);

/// A constraint as stored by the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeConstraint {
    pub descriptor: ConstraintDescriptor<ViewId>,
    pub active: bool,
}

impl NativeConstraint {
    fn involves(&self, view: ViewId) -> bool {
        self.descriptor.first_view == view || self.descriptor.second_view == Some(view)
    }
}

/// Hierarchy edit error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("unknown view {0:?}")]
    UnknownView(ViewId),
    /// Adding `child` under `parent` would create a cycle.
    #[error("cannot add {child:?} as a subview of {parent:?}")]
    InvalidHierarchy { parent: ViewId, child: ViewId },
}

#[derive(Debug)]
struct ViewNode {
    id: ViewId,
    label: String,
}

#[derive(Debug, Default)]
pub struct ViewTree {
    arena: Arena<ViewNode>,
    nodes: BTreeMap<ViewId, NodeId>,
    next_id: u32,
    constraints: Vec<NativeConstraint>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view outside any hierarchy.
    pub fn add_view(&mut self, label: impl Into<String>) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        let node = self.arena.new_node(ViewNode {
            id,
            label: label.into(),
        });
        self.nodes.insert(id, node);
        id
    }

    /// Make `child` the last subview of `parent`, moving it if it already
    /// had a superview.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<(), TreeError> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        if child_node
            .descendants(&self.arena)
            .any(|n| n == parent_node)
        {
            return Err(TreeError::InvalidHierarchy { parent, child });
        }
        if child_node.parent(&self.arena).is_some() {
            self.remove_from_superview(child)?;
        }
        parent_node
            .checked_append(child_node, &mut self.arena)
            .map_err(|_| TreeError::InvalidHierarchy { parent, child })
    }

    /// Detach `view` (with its subtree) from its superview.
    ///
    /// Active constraints whose two views no longer share an ancestor are
    /// deactivated, as a platform would.
    pub fn remove_from_superview(&mut self, view: ViewId) -> Result<(), TreeError> {
        let node = self.node(view)?;
        node.detach(&mut self.arena);
        let broken: Vec<usize> = self
            .constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .filter(|(_, c)| {
                c.descriptor.second_view.is_some_and(|second| {
                    self.nearest_common_ancestor(c.descriptor.first_view, second)
                        .is_none()
                })
            })
            .map(|(i, _)| i)
            .collect();
        for i in broken {
            self.constraints[i].active = false;
        }
        Ok(())
    }

    /// Destroy `view` and its whole subtree.
    ///
    /// Returns the destroyed views so the caller can
    /// [`forget`](crate::Registry::forget) them.
    pub fn destroy(&mut self, view: ViewId) -> Result<Vec<ViewId>, TreeError> {
        let node = self.node(view)?;
        let gone: Vec<ViewId> = node
            .descendants(&self.arena)
            .map(|n| self.arena[n].get().id)
            .collect();
        node.remove_subtree(&mut self.arena);
        for id in &gone {
            self.nodes.remove(id);
        }
        for c in &mut self.constraints {
            if gone.iter().any(|&id| c.involves(id)) {
                c.active = false;
            }
        }
        Ok(gone)
    }

    pub fn label(&self, view: ViewId) -> Option<&str> {
        let node = self.nodes.get(&view)?;
        Some(self.arena[*node].get().label.as_str())
    }

    /// Direct subviews of `view`, in order.
    pub fn subviews(&self, view: ViewId) -> Result<Vec<ViewId>, TreeError> {
        let node = self.node(view)?;
        Ok(node
            .children(&self.arena)
            .map(|n| self.arena[n].get().id)
            .collect())
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&NativeConstraint> {
        self.constraints.get(id.0)
    }

    /// Active constraints, in creation order.
    pub fn active_constraints(&self) -> impl Iterator<Item = (ConstraintId, &NativeConstraint)> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.active)
            .map(|(i, c)| (ConstraintId(i), c))
    }

    /// Active constraints whose first item is `view`.
    pub fn active_on(&self, view: ViewId) -> Vec<&ConstraintDescriptor<ViewId>> {
        self.active_constraints()
            .map(|(_, c)| &c.descriptor)
            .filter(|d| d.first_view == view)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.active_constraints().count()
    }

    fn node(&self, view: ViewId) -> Result<NodeId, TreeError> {
        self.nodes
            .get(&view)
            .copied()
            .ok_or(TreeError::UnknownView(view))
    }
}

impl LayoutHost for ViewTree {
    type View = ViewId;
    type Constraint = ConstraintId;

    fn is_alive(&self, view: ViewId) -> bool {
        self.nodes.contains_key(&view)
    }

    fn superview(&self, view: ViewId) -> Option<ViewId> {
        let node = self.nodes.get(&view)?;
        let parent = node.parent(&self.arena)?;
        Some(self.arena[parent].get().id)
    }

    fn create(&mut self, descriptor: &ConstraintDescriptor<ViewId>) -> ConstraintId {
        self.constraints.push(NativeConstraint {
            descriptor: *descriptor,
            active: false,
        });
        ConstraintId(self.constraints.len() - 1)
    }

    fn activate(&mut self, constraints: &[ConstraintId]) {
        for id in constraints {
            if let Some(c) = self.constraints.get_mut(id.0) {
                c.active = true;
            }
        }
    }

    fn deactivate(&mut self, constraints: &[ConstraintId]) {
        for id in constraints {
            if let Some(c) = self.constraints.get_mut(id.0) {
                c.active = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_query_hierarchy() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        tree.add_subview(root, a).unwrap();
        tree.add_subview(a, b).unwrap();

        assert_eq!(tree.superview(b), Some(a));
        assert_eq!(tree.superview(root), None);
        assert_eq!(tree.ancestors(b), [b, a, root]);
        assert_eq!(tree.nearest_common_ancestor(b, root), Some(root));
        assert_eq!(tree.label(a), Some("a"));
        assert_eq!(tree.subviews(root).unwrap(), [a]);
    }

    #[test]
    fn siblings_meet_at_parent() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        tree.add_subview(root, a).unwrap();
        tree.add_subview(root, b).unwrap();
        assert_eq!(tree.nearest_common_ancestor(a, b), Some(root));

        let loner = tree.add_view("loner");
        assert_eq!(tree.nearest_common_ancestor(a, loner), None);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        tree.add_subview(a, b).unwrap();
        assert_eq!(
            tree.add_subview(b, a),
            Err(TreeError::InvalidHierarchy {
                parent: b,
                child: a
            })
        );
        assert_eq!(
            tree.add_subview(a, a),
            Err(TreeError::InvalidHierarchy {
                parent: a,
                child: a
            })
        );
    }

    #[test]
    fn reparenting_moves_the_view() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        let c = tree.add_view("c");
        tree.add_subview(a, c).unwrap();
        tree.add_subview(b, c).unwrap();
        assert_eq!(tree.superview(c), Some(b));
        assert!(tree.subviews(a).unwrap().is_empty());
    }

    #[test]
    fn destroy_removes_subtree() {
        let mut tree = ViewTree::new();
        let root = tree.add_view("root");
        let a = tree.add_view("a");
        let b = tree.add_view("b");
        tree.add_subview(root, a).unwrap();
        tree.add_subview(a, b).unwrap();

        let mut gone = tree.destroy(a).unwrap();
        gone.sort();
        assert_eq!(gone, [a, b]);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(tree.is_alive(root));
        assert_eq!(tree.destroy(a), Err(TreeError::UnknownView(a)));
        assert!(tree.subviews(root).unwrap().is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut tree = ViewTree::new();
        let a = tree.add_view("a");
        tree.destroy(a).unwrap();
        let b = tree.add_view("b");
        assert_ne!(a, b);
        assert!(!tree.is_alive(a));
    }
}
