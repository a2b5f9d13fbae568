//! Resolution and installation of attribute lists.
//!
//! [`Installer::apply`] is the one place attributes turn into active
//! constraints:
//!
//! 1. Compounds are flattened into leaves, order preserved.
//! 2. Each leaf's reference kind is checked against its own kind (see
//!    [`AttributeKind::can_relate_to`]), then its reference view is
//!    resolved: the explicit one, the superview by default, or none for a
//!    bare width/height.
//! 3. Each leaf becomes an `(identity, descriptor)` candidate. A later leaf
//!    with the same identity overrides an earlier one.
//! 4. Candidates replace the view's records with the same identity (the old
//!    constraint is deactivated) or are appended. Other records stay.
//! 5. Every constraint recorded for the view, new and kept alike, is
//!    activated in one batch and returned in record order. Kept records the
//!    host switched off in the meantime (a detach, say) come back this way.
//!
//! Steps 1-3 finish before the host or the registry is touched, so a
//! configuration error installs and removes nothing.
//!
//! Calls targeting the same view must be serialized by the caller.

use alloc::vec::Vec;

use crate::attribute::{Attribute, AttributeKind};
use crate::error::LayoutError;
use crate::host::{ConstraintDescriptor, LayoutHost};
use crate::registry::{Identity, Record, Registry};

/// Applies attribute lists to views of one host, recording what it installs
/// in an injected [`Registry`].
pub struct Installer<'a, H: LayoutHost> {
    host: &'a mut H,
    registry: &'a mut Registry<H::View, H::Constraint>,
}

impl<'a, H: LayoutHost> Installer<'a, H> {
    pub fn new(host: &'a mut H, registry: &'a mut Registry<H::View, H::Constraint>) -> Self {
        Self { host, registry }
    }

    /// Install `attributes` on `view`, replacing constraints this crate
    /// previously installed there with the same identity.
    ///
    /// Returns the view's full set of recorded constraints, all active, in
    /// record order.
    pub fn apply<I>(
        &mut self,
        view: H::View,
        attributes: I,
    ) -> Result<Vec<H::Constraint>, LayoutError<H::View>>
    where
        I: IntoIterator<Item = Attribute<H::View>>,
    {
        let candidates = resolve(&*self.host, view, attributes).inspect_err(|e| {
            log::warn!("not installing attributes on {view:?}: {e}");
        })?;
        let mut superseded = Vec::new();
        let mut created = 0;
        if !candidates.is_empty() {
            let records = self.registry.records_mut(view);
            for (identity, descriptor) in candidates {
                let record = Record {
                    identity,
                    constraint: self.host.create(&descriptor),
                    descriptor,
                };
                created += 1;
                match records.iter_mut().find(|r| r.identity == identity) {
                    Some(existing) => {
                        log::trace!("replacing {:?} on {view:?}", identity);
                        superseded.push(core::mem::replace(existing, record).constraint);
                    }
                    None => {
                        log::trace!("installing {:?} on {view:?}", identity);
                        records.push(record);
                    }
                }
            }
        }

        if !superseded.is_empty() {
            self.host.deactivate(&superseded);
        }
        let active: Vec<_> = self
            .registry
            .installed(view)
            .iter()
            .map(|r| r.constraint.clone())
            .collect();
        if !active.is_empty() {
            self.host.activate(&active);
        }
        log::debug!(
            "applied {created} constraints to {view:?} ({} replaced, {} active)",
            superseded.len(),
            active.len()
        );
        Ok(active)
    }

    /// Deactivate and forget every constraint this crate installed on `view`.
    ///
    /// Constraints created by anyone else are untouched. Returns how many
    /// were removed.
    pub fn clear(&mut self, view: H::View) -> usize {
        let constraints: Vec<_> = self
            .registry
            .take(view)
            .into_iter()
            .map(|r| r.constraint)
            .collect();
        if !constraints.is_empty() {
            self.host.deactivate(&constraints);
            log::debug!("cleared {} constraints from {view:?}", constraints.len());
        }
        constraints.len()
    }

    /// The registry this installer records into.
    pub fn registry(&self) -> &Registry<H::View, H::Constraint> {
        self.registry
    }
}

/// Shorthand for `Installer::new(host, registry).apply(view, attributes)`.
pub fn apply<H, I>(
    host: &mut H,
    registry: &mut Registry<H::View, H::Constraint>,
    view: H::View,
    attributes: I,
) -> Result<Vec<H::Constraint>, LayoutError<H::View>>
where
    H: LayoutHost,
    I: IntoIterator<Item = Attribute<H::View>>,
{
    Installer::new(host, registry).apply(view, attributes)
}

/// Shorthand for `Installer::new(host, registry).clear(view)`.
pub fn clear<H: LayoutHost>(
    host: &mut H,
    registry: &mut Registry<H::View, H::Constraint>,
    view: H::View,
) -> usize {
    Installer::new(host, registry).clear(view)
}

type Candidate<V> = (Identity<V>, ConstraintDescriptor<V>);

/// Flatten and resolve every attribute without side effects.
fn resolve<H, I>(
    host: &H,
    view: H::View,
    attributes: I,
) -> Result<Vec<Candidate<H::View>>, LayoutError<H::View>>
where
    H: LayoutHost,
    I: IntoIterator<Item = Attribute<H::View>>,
{
    if !host.is_alive(view) {
        return Err(LayoutError::ViewNotAlive { view });
    }

    let mut leaves = Vec::new();
    for attribute in attributes {
        attribute.flatten_into(&mut leaves);
    }

    let mut candidates: Vec<Candidate<H::View>> = Vec::with_capacity(leaves.len());
    for leaf in &leaves {
        let Some(kind) = leaf.kind() else {
            continue;
        };
        let second = resolve_reference(host, view, leaf, kind)?;
        let identity = Identity {
            kind,
            reference: second,
        };
        let descriptor = leaf.descriptor(kind, view, second);
        match candidates.iter_mut().find(|(id, _)| *id == identity) {
            Some(slot) => slot.1 = descriptor,
            None => candidates.push((identity, descriptor)),
        }
    }
    Ok(candidates)
}

/// The second view of `leaf`'s constraint, `None` for a pure constant.
fn resolve_reference<H: LayoutHost>(
    host: &H,
    view: H::View,
    leaf: &Attribute<H::View>,
    kind: AttributeKind,
) -> Result<Option<H::View>, LayoutError<H::View>> {
    if !leaf.needs_reference(kind) {
        return Ok(None);
    }
    if let Some(reference_kind) = leaf.reference_kind() {
        if !kind.can_relate_to(reference_kind) {
            return Err(LayoutError::IncompatibleReference {
                view,
                kind,
                reference_kind,
            });
        }
    }
    match leaf.reference() {
        Some(reference) => {
            if !host.is_alive(reference) {
                return Err(LayoutError::ReferenceNotAlive {
                    view,
                    kind,
                    reference,
                });
            }
            if host.nearest_common_ancestor(view, reference).is_none() {
                return Err(LayoutError::NoCommonAncestor {
                    view,
                    kind,
                    reference,
                });
            }
            Ok(Some(reference))
        }
        None => host
            .superview(view)
            .map(Some)
            .ok_or(LayoutError::NotInHierarchy { view, kind }),
    }
}
