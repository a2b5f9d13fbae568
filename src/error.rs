//! Configuration errors raised while resolving attributes.

use crate::attribute::AttributeKind;

/// Why an attribute list could not be installed.
///
/// Every variant is fatal to the one `apply` call that raised it and leaves
/// the view's constraints exactly as they were.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError<V> {
    /// The owning view no longer exists.
    #[error("view {view:?} is not alive")]
    ViewNotAlive { view: V },
    /// The attribute needs the superview as implicit reference, but the view
    /// has not been added to a hierarchy.
    #[error("{kind:?} on {view:?} needs a superview, but the view is not in a hierarchy")]
    NotInHierarchy { view: V, kind: AttributeKind },
    /// The explicit reference kind cannot be related to the attribute's
    /// kind: a position against a size, or positions on different axes.
    #[error("{kind:?} on {view:?} cannot be related to {reference_kind:?}")]
    IncompatibleReference {
        view: V,
        kind: AttributeKind,
        reference_kind: AttributeKind,
    },
    /// The explicit reference view no longer exists.
    #[error("{kind:?} on {view:?} refers to {reference:?}, which is not alive")]
    ReferenceNotAlive {
        view: V,
        kind: AttributeKind,
        reference: V,
    },
    /// The explicit reference view is in a different hierarchy.
    #[error("{kind:?} on {view:?} refers to {reference:?}, which shares no ancestor with it")]
    NoCommonAncestor {
        view: V,
        kind: AttributeKind,
        reference: V,
    },
}

impl<V: Copy> LayoutError<V> {
    /// The view the failing `apply` targeted.
    pub fn view(&self) -> V {
        match *self {
            Self::ViewNotAlive { view }
            | Self::NotInHierarchy { view, .. }
            | Self::IncompatibleReference { view, .. }
            | Self::ReferenceNotAlive { view, .. }
            | Self::NoCommonAncestor { view, .. } => view,
        }
    }
}
