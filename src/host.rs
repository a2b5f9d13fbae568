//! The platform seam: view hierarchy queries and native constraint objects.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::attribute::AttributeKind;
use crate::constant::{Priority, Relation};

/// Everything a platform needs to build one native constraint.
///
/// Reads as `first_view.first_kind <relation> second_view.second_kind *
/// multiplier + constant`. `second_view` and `second_kind` are both `None`
/// for a pure-constant (dimension) constraint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstraintDescriptor<V> {
    pub first_view: V,
    pub first_kind: AttributeKind,
    pub relation: Relation,
    pub second_view: Option<V>,
    pub second_kind: Option<AttributeKind>,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Priority,
}

/// A view hierarchy plus its constraint system.
///
/// Calls happen on the thread that owns the hierarchy. Implementations are
/// not required to be `Sync`.
pub trait LayoutHost {
    /// Non-owning view handle. Must stay comparable after the view is gone.
    type View: Copy + Ord + Debug;
    /// Handle to a created native constraint.
    type Constraint: Clone + Debug;

    /// Whether `view` still exists.
    fn is_alive(&self, view: Self::View) -> bool;

    /// Immediate parent of `view`, `None` for roots and detached views.
    fn superview(&self, view: Self::View) -> Option<Self::View>;

    /// Create an inactive native constraint.
    fn create(&mut self, descriptor: &ConstraintDescriptor<Self::View>) -> Self::Constraint;

    /// Activate a batch of constraints.
    fn activate(&mut self, constraints: &[Self::Constraint]);

    /// Deactivate a batch of constraints.
    fn deactivate(&mut self, constraints: &[Self::Constraint]);

    /// `view` followed by each of its ancestors up to the root.
    fn ancestors(&self, view: Self::View) -> Vec<Self::View> {
        let mut chain = Vec::new();
        let mut current = Some(view);
        while let Some(v) = current {
            // A cycle would be a host bug; stop rather than spin.
            if chain.contains(&v) {
                break;
            }
            chain.push(v);
            current = self.superview(v);
        }
        chain
    }

    /// Closest view that is `a` or an ancestor of `a` and also `b` or an
    /// ancestor of `b`.
    fn nearest_common_ancestor(&self, a: Self::View, b: Self::View) -> Option<Self::View> {
        let from_a = self.ancestors(a);
        self.ancestors(b).into_iter().find(|v| from_a.contains(v))
    }
}
