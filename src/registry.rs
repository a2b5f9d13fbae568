//! Bookkeeping of the constraints this crate installed, per view.
//!
//! The registry is what lets re-application replace instead of accumulate.
//! It stores view handles only; it never keeps a view alive. Hosts report
//! destruction through [`Registry::forget`] or by letting
//! [`Registry::prune`] ask them which views are gone.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::attribute::AttributeKind;
use crate::host::{ConstraintDescriptor, LayoutHost};

/// Replacement identity of an installed constraint.
///
/// Two constraints on the same view with the same kind but different
/// reference views coexist; the same kind against the same (or implicit)
/// reference replaces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity<V> {
    pub kind: AttributeKind,
    pub reference: Option<V>,
}

/// One installed constraint.
#[derive(Clone, Debug)]
pub struct Record<V, C> {
    pub identity: Identity<V>,
    pub descriptor: ConstraintDescriptor<V>,
    pub constraint: C,
}

/// Installed-constraint records keyed by owning view, in installation order.
#[derive(Clone, Debug)]
pub struct Registry<V, C> {
    views: BTreeMap<V, Vec<Record<V, C>>>,
}

impl<V, C> Default for Registry<V, C> {
    fn default() -> Self {
        Self {
            views: BTreeMap::new(),
        }
    }
}

impl<V: Copy + Ord, C> Registry<V, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for `view`, in installation order. Empty if none.
    pub fn installed(&self, view: V) -> &[Record<V, C>] {
        self.views.get(&view).map_or(&[], Vec::as_slice)
    }

    /// Views that currently have records.
    pub fn views(&self) -> impl Iterator<Item = V> + '_ {
        self.views.keys().copied()
    }

    /// Total number of records across all views.
    pub fn len(&self) -> usize {
        self.views.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Drop every record for `view` without touching the host.
    ///
    /// Call this when the host destroys the view; its constraints are already
    /// gone with it.
    pub fn forget(&mut self, view: V) -> Vec<Record<V, C>> {
        self.views.remove(&view).unwrap_or_default()
    }

    /// Drop records whose owning view or reference view the host reports
    /// dead. Returns how many records were dropped.
    pub fn prune<H>(&mut self, host: &H) -> usize
    where
        H: LayoutHost<View = V, Constraint = C>,
    {
        let before = self.len();
        self.views.retain(|&view, records| {
            if !host.is_alive(view) {
                return false;
            }
            records.retain(|r| r.descriptor.second_view.is_none_or(|s| host.is_alive(s)));
            !records.is_empty()
        });
        let dropped = before - self.len();
        if dropped > 0 {
            log::debug!("pruned {dropped} records of destroyed views");
        }
        dropped
    }

    pub(crate) fn records_mut(&mut self, view: V) -> &mut Vec<Record<V, C>> {
        self.views.entry(view).or_default()
    }

    pub(crate) fn take(&mut self, view: V) -> Vec<Record<V, C>> {
        self.forget(view)
    }
}
