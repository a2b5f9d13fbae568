//! Attribute expressions: one layout attribute kind plus its constant,
//! priority and optional reference.
//!
//! A leaf [`Attribute`] becomes exactly one constraint. A compound attribute
//! ([`CompoundKind`]) never becomes a constraint itself; it expands into its
//! children before resolution, and every fluent call on it is forwarded to
//! each child.
//!
//! # Far-edge insets
//!
//! Bottom, trailing and right (and their margin variants) measure *inward from
//! the far edge* when they relate to the same kind on the reference view.
//! `bottom(10)` therefore means "10 above the reference bottom", emitted as
//! `view.bottom == ref.bottom - 10`, and a `>=` inset becomes a `<=`
//! constraint. Relating a far edge to a different kind
//! (`bottom(8).to_attribute(other, AttributeKind::Top)`) emits the constant
//! as written.
//!
//! ```
//! use zenanchor::{Attribute, AttributeKind, CompoundKind, greater_or_equal};
//!
//! let size: Attribute<u32> = Attribute::size(40);
//! assert_eq!(size.compound_kind(), Some(CompoundKind::Size));
//! assert_eq!(size.children().len(), 2);
//!
//! let top: Attribute<u32> = Attribute::top(greater_or_equal(20)).to(7);
//! assert_eq!(top.kind(), Some(AttributeKind::Top));
//! assert_eq!(top.reference(), Some(7));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::constant::{Constant, Priority};
use crate::host::ConstraintDescriptor;

/// Layout axis an attribute constrains.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// x position or width.
    Horizontal,
    /// y position or height.
    Vertical,
}

/// A single geometric property of a view's alignment rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    Left,
    Right,
    Top,
    Bottom,
    Leading,
    Trailing,
    Width,
    Height,
    CenterX,
    CenterY,
    LastBaseline,
    FirstBaseline,
    LeftMargin,
    RightMargin,
    TopMargin,
    BottomMargin,
    LeadingMargin,
    TrailingMargin,
    CenterXWithinMargins,
    CenterYWithinMargins,
}

#[derive(Copy, Clone)]
struct KindTraits {
    axis: Axis,
    dimension: bool,
    far_edge: bool,
}

const fn traits(axis: Axis, dimension: bool, far_edge: bool) -> KindTraits {
    KindTraits {
        axis,
        dimension,
        far_edge,
    }
}

use Axis::{Horizontal as X, Vertical as Y};

/// Indexed by `AttributeKind as usize`; order must match the enum.
const KIND_TRAITS: [KindTraits; 20] = [
    traits(X, false, false), // Left
    traits(X, false, true),  // Right
    traits(Y, false, false), // Top
    traits(Y, false, true),  // Bottom
    traits(X, false, false), // Leading
    traits(X, false, true),  // Trailing
    traits(X, true, false),  // Width
    traits(Y, true, false),  // Height
    traits(X, false, false), // CenterX
    traits(Y, false, false), // CenterY
    traits(Y, false, false), // LastBaseline
    traits(Y, false, false), // FirstBaseline
    traits(X, false, false), // LeftMargin
    traits(X, false, true),  // RightMargin
    traits(Y, false, false), // TopMargin
    traits(Y, false, true),  // BottomMargin
    traits(X, false, false), // LeadingMargin
    traits(X, false, true),  // TrailingMargin
    traits(X, false, false), // CenterXWithinMargins
    traits(Y, false, false), // CenterYWithinMargins
];

impl AttributeKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Leading,
        Self::Trailing,
        Self::Width,
        Self::Height,
        Self::CenterX,
        Self::CenterY,
        Self::LastBaseline,
        Self::FirstBaseline,
        Self::LeftMargin,
        Self::RightMargin,
        Self::TopMargin,
        Self::BottomMargin,
        Self::LeadingMargin,
        Self::TrailingMargin,
        Self::CenterXWithinMargins,
        Self::CenterYWithinMargins,
    ];

    fn traits(self) -> KindTraits {
        KIND_TRAITS[self as usize]
    }

    /// Axis this kind constrains.
    pub fn axis(self) -> Axis {
        self.traits().axis
    }

    /// Width or height.
    pub fn is_dimension(self) -> bool {
        self.traits().dimension
    }

    /// Bottom, right, trailing and their margin variants.
    pub fn is_far_edge(self) -> bool {
        self.traits().far_edge
    }

    /// Whether a constraint may relate `self` on one view to `other` on
    /// another. Sizes relate to sizes on either axis (aspect ratios);
    /// positions relate to positions on the same axis only.
    pub fn can_relate_to(self, other: Self) -> bool {
        match (self.is_dimension(), other.is_dimension()) {
            (true, true) => true,
            (false, false) => self.axis() == other.axis(),
            _ => false,
        }
    }
}

/// Shorthand attributes that expand into several leaves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    /// Top, Leading, Bottom, Trailing.
    Edges,
    /// Width, Height.
    Size,
    /// CenterX, CenterY.
    Center,
    /// TopMargin, LeadingMargin, BottomMargin, TrailingMargin.
    Margins,
    /// CenterXWithinMargins, CenterYWithinMargins.
    CenterWithinMargins,
}

impl CompoundKind {
    /// Leaf kinds this compound expands into, in expansion order.
    pub fn leaves(self) -> &'static [AttributeKind] {
        use AttributeKind::*;
        match self {
            Self::Edges => &[Top, Leading, Bottom, Trailing],
            Self::Size => &[Width, Height],
            Self::Center => &[CenterX, CenterY],
            Self::Margins => &[TopMargin, LeadingMargin, BottomMargin, TrailingMargin],
            Self::CenterWithinMargins => &[CenterXWithinMargins, CenterYWithinMargins],
        }
    }
}

/// Per-edge inset values for [`Attribute::edges_insets`] and
/// [`Attribute::margins_insets`]. Positive values move inward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Insets {
    /// Inset below the reference top edge.
    pub top: f64,
    /// Inset after the reference leading edge.
    pub leading: f64,
    /// Inset above the reference bottom edge.
    pub bottom: f64,
    /// Inset before the reference trailing edge.
    pub trailing: f64,
}

impl Insets {
    /// Insets in edge order: top, leading, bottom, trailing.
    pub fn new(top: f64, leading: f64, bottom: f64, trailing: f64) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// Same inset on every edge.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    fn as_array(&self) -> [f64; 4] {
        [self.top, self.leading, self.bottom, self.trailing]
    }
}

/// What an attribute constrains.
#[derive(Clone, Debug, PartialEq)]
pub enum Target<V> {
    Leaf(AttributeKind),
    Compound {
        kind: CompoundKind,
        children: Vec<Attribute<V>>,
    },
}

/// A declarative layout attribute.
///
/// `V` is the host's view handle. The attribute only ever stores a copy of
/// the handle for its reference view; it never keeps that view alive, and
/// liveness is checked by the installer when the attribute is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute<V> {
    target: Target<V>,
    constant: Constant,
    priority: Priority,
    reference: Option<V>,
    reference_kind: Option<AttributeKind>,
}

macro_rules! leaf_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(constant: impl Into<Constant>) -> Self {
                Self::new(AttributeKind::$kind, constant)
            }
        )*
    };
}

macro_rules! compound_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(constant: impl Into<Constant>) -> Self {
                Self::compound(CompoundKind::$kind, constant)
            }
        )*
    };
}

impl<V> Attribute<V> {
    /// Leaf attribute of the given kind.
    pub fn new(kind: AttributeKind, constant: impl Into<Constant>) -> Self {
        Self {
            target: Target::Leaf(kind),
            constant: constant.into(),
            priority: Priority::REQUIRED,
            reference: None,
            reference_kind: None,
        }
    }

    /// Compound attribute whose children all share `constant`.
    pub fn compound(kind: CompoundKind, constant: impl Into<Constant>) -> Self {
        let constant = constant.into();
        let children = kind
            .leaves()
            .iter()
            .map(|&leaf| Self::new(leaf, constant))
            .collect();
        Self::from_children(kind, children)
    }

    fn from_children(kind: CompoundKind, children: Vec<Self>) -> Self {
        Self {
            target: Target::Compound { kind, children },
            constant: Constant::default(),
            priority: Priority::REQUIRED,
            reference: None,
            reference_kind: None,
        }
    }

    leaf_constructors! {
        /// Left edge.
        left => Left;
        /// Right edge, as an inset from the reference right edge.
        right => Right;
        /// Top edge.
        top => Top;
        /// Bottom edge, as an inset from the reference bottom edge.
        bottom => Bottom;
        /// Leading edge.
        leading => Leading;
        /// Trailing edge, as an inset from the reference trailing edge.
        trailing => Trailing;
        /// Width. A pure constant unless a reference is given.
        width => Width;
        /// Height. A pure constant unless a reference is given.
        height => Height;
        /// Horizontal center.
        center_x => CenterX;
        /// Vertical center.
        center_y => CenterY;
        /// Baseline of the last line of text.
        last_baseline => LastBaseline;
        /// Baseline of the first line of text.
        first_baseline => FirstBaseline;
        /// Left layout margin.
        left_margin => LeftMargin;
        /// Right layout margin, as an inset from the reference right margin.
        right_margin => RightMargin;
        /// Top layout margin.
        top_margin => TopMargin;
        /// Bottom layout margin, as an inset from the reference bottom margin.
        bottom_margin => BottomMargin;
        /// Leading layout margin.
        leading_margin => LeadingMargin;
        /// Trailing layout margin, as an inset from the reference trailing
        /// margin.
        trailing_margin => TrailingMargin;
        /// Horizontal center between the left and right margins.
        center_x_within_margins => CenterXWithinMargins;
        /// Vertical center between the top and bottom margins.
        center_y_within_margins => CenterYWithinMargins;
    }

    compound_constructors! {
        /// Top, leading, bottom and trailing, all inset by the same constant.
        edges => Edges;
        /// Width and height sharing one constant.
        size => Size;
        /// Center x and center y.
        center => Center;
        /// The four margin edges.
        margins => Margins;
        /// Center x and center y, both within margins.
        center_within_margins => CenterWithinMargins;
    }

    /// Width and height with separate values.
    pub fn size_of(width: impl Into<Constant>, height: impl Into<Constant>) -> Self {
        Self::from_children(
            CompoundKind::Size,
            vec![Self::width(width), Self::height(height)],
        )
    }

    /// Edges with a separate inset per side.
    pub fn edges_insets(insets: Insets) -> Self {
        Self::insets(CompoundKind::Edges, insets)
    }

    /// Margins with a separate inset per side.
    pub fn margins_insets(insets: Insets) -> Self {
        Self::insets(CompoundKind::Margins, insets)
    }

    fn insets(kind: CompoundKind, insets: Insets) -> Self {
        let children = kind
            .leaves()
            .iter()
            .zip(insets.as_array())
            .map(|(&leaf, value)| Self::new(leaf, value))
            .collect();
        Self::from_children(kind, children)
    }

    /// Leaf kind, or `None` for a compound.
    pub fn kind(&self) -> Option<AttributeKind> {
        match self.target {
            Target::Leaf(kind) => Some(kind),
            Target::Compound { .. } => None,
        }
    }

    /// Compound kind, or `None` for a leaf.
    pub fn compound_kind(&self) -> Option<CompoundKind> {
        match self.target {
            Target::Leaf(_) => None,
            Target::Compound { kind, .. } => Some(kind),
        }
    }

    /// Children of a compound; empty for a leaf.
    pub fn children(&self) -> &[Self] {
        match &self.target {
            Target::Leaf(_) => &[],
            Target::Compound { children, .. } => children,
        }
    }

    /// The leaf kind or compound (with its children) this attribute sets.
    pub fn target(&self) -> &Target<V> {
        &self.target
    }

    /// Constant of a leaf. Compounds keep theirs on the children, so this
    /// is the zero default for them.
    pub fn constant(&self) -> Constant {
        self.constant
    }

    /// Priority of the resulting constraint; required unless changed.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Reference attribute kind if one was set explicitly.
    pub fn reference_kind(&self) -> Option<AttributeKind> {
        self.reference_kind
    }

    /// Set the priority. On a compound, every child gets it.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self.for_each_child(|child| child.with_priority(priority))
    }

    /// Relate to a different attribute kind of the default reference view
    /// (the superview), e.g. `top(0).against(AttributeKind::TopMargin)`.
    pub fn against(mut self, kind: AttributeKind) -> Self {
        self.reference_kind = Some(kind);
        self.for_each_child(|child| child.against(kind))
    }

    fn for_each_child(mut self, f: impl Fn(Self) -> Self) -> Self {
        if let Target::Compound { children, .. } = &mut self.target {
            *children = core::mem::take(children).into_iter().map(f).collect();
        }
        self
    }

    /// Recursively expand compounds into `out`, preserving order.
    pub(crate) fn flatten_into(self, out: &mut Vec<Self>) {
        match self.target {
            Target::Leaf(_) => out.push(self),
            Target::Compound { children, .. } => {
                for child in children {
                    child.flatten_into(out);
                }
            }
        }
    }
}

impl<V: Copy> Attribute<V> {
    /// Explicit reference view, if any.
    pub fn reference(&self) -> Option<V> {
        self.reference
    }

    /// Relate to the same kind on `view`.
    pub fn to(mut self, view: V) -> Self {
        self.reference = Some(view);
        self.for_each_child(|child| child.to(view))
    }

    /// Relate to `kind` on `view`.
    pub fn to_attribute(mut self, view: V, kind: AttributeKind) -> Self {
        self.reference = Some(view);
        self.reference_kind = Some(kind);
        self.for_each_child(|child| child.to_attribute(view, kind))
    }

    /// Whether resolving this leaf needs a second view at all.
    pub(crate) fn needs_reference(&self, kind: AttributeKind) -> bool {
        self.reference.is_some() || self.reference_kind.is_some() || !kind.is_dimension()
    }

    /// Build the descriptor for this leaf once its reference view is known.
    ///
    /// `second` is `None` only for pure-constant dimension constraints.
    pub(crate) fn descriptor(
        &self,
        kind: AttributeKind,
        view: V,
        second: Option<V>,
    ) -> ConstraintDescriptor<V> {
        let second_kind = second.map(|_| self.reference_kind.unwrap_or(kind));
        let mut relation = self.constant.relation();
        let mut constant = self.constant.layout_value();
        if kind.is_far_edge() && second_kind == Some(kind) {
            relation = relation.inverse();
            constant = -constant;
        }
        ConstraintDescriptor {
            first_view: view,
            first_kind: kind,
            relation,
            second_view: second,
            second_kind,
            multiplier: self.constant.layout_multiplier(),
            constant,
            priority: self.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{Relation, greater_or_equal, less_or_equal, times};

    type Attr = Attribute<u32>;

    fn flatten(attr: Attr) -> Vec<Attr> {
        let mut out = Vec::new();
        attr.flatten_into(&mut out);
        out
    }

    fn kinds(attrs: &[Attr]) -> Vec<AttributeKind> {
        attrs.iter().filter_map(|a| a.kind()).collect()
    }

    // ── Kind table ──────────────────────────────────────────────────────

    #[test]
    fn kind_table_matches_declaration_order() {
        for (i, kind) in AttributeKind::ALL.iter().enumerate() {
            assert_eq!(*kind as usize, i);
        }
    }

    #[test]
    fn only_width_and_height_are_dimensions() {
        let dims: Vec<_> = AttributeKind::ALL
            .iter()
            .copied()
            .filter(|k| k.is_dimension())
            .collect();
        assert_eq!(dims, [AttributeKind::Width, AttributeKind::Height]);
    }

    #[test]
    fn far_edges() {
        use AttributeKind::*;
        for kind in [Right, Bottom, Trailing, RightMargin, BottomMargin, TrailingMargin] {
            assert!(kind.is_far_edge(), "{kind:?}");
        }
        for kind in [Left, Top, Leading, Width, CenterX, FirstBaseline] {
            assert!(!kind.is_far_edge(), "{kind:?}");
        }
    }

    #[test]
    fn axes() {
        assert_eq!(AttributeKind::Width.axis(), Axis::Horizontal);
        assert_eq!(AttributeKind::LastBaseline.axis(), Axis::Vertical);
        assert_eq!(AttributeKind::CenterYWithinMargins.axis(), Axis::Vertical);
        assert_eq!(AttributeKind::TrailingMargin.axis(), Axis::Horizontal);
    }

    #[test]
    fn positions_relate_within_one_axis() {
        use AttributeKind::*;
        assert!(Top.can_relate_to(Bottom));
        assert!(Top.can_relate_to(LastBaseline));
        assert!(Leading.can_relate_to(CenterXWithinMargins));
        assert!(!Top.can_relate_to(Leading));
        assert!(!CenterX.can_relate_to(CenterY));
    }

    #[test]
    fn sizes_relate_across_axes_but_not_to_positions() {
        use AttributeKind::*;
        assert!(Width.can_relate_to(Height));
        assert!(Height.can_relate_to(Height));
        assert!(!Width.can_relate_to(Left));
        assert!(!Top.can_relate_to(Height));
    }

    // ── Compounds ───────────────────────────────────────────────────────

    #[test]
    fn size_expands_to_width_then_height() {
        let leaves = flatten(Attr::size(40));
        assert_eq!(kinds(&leaves), [AttributeKind::Width, AttributeKind::Height]);
        for leaf in &leaves {
            assert_eq!(leaf.constant(), Constant::new(40));
        }
    }

    #[test]
    fn edges_expand_in_order() {
        use AttributeKind::*;
        assert_eq!(
            kinds(&flatten(Attr::edges(0))),
            [Top, Leading, Bottom, Trailing]
        );
        assert_eq!(kinds(&flatten(Attr::center(0))), [CenterX, CenterY]);
        assert_eq!(
            kinds(&flatten(Attr::margins(0))),
            [TopMargin, LeadingMargin, BottomMargin, TrailingMargin]
        );
    }

    #[test]
    fn compound_forwards_constant_and_multiplier() {
        let leaves = flatten(Attr::size((less_or_equal(10), times(2))));
        for leaf in &leaves {
            assert_eq!(leaf.constant().relation(), Relation::LessOrEqual);
            assert_eq!(leaf.constant().layout_multiplier(), 2.0);
        }
    }

    #[test]
    fn size_of_uses_separate_values() {
        let leaves = flatten(Attr::size_of(30, 60));
        assert_eq!(leaves[0].constant().layout_value(), 30.0);
        assert_eq!(leaves[1].constant().layout_value(), 60.0);
    }

    #[test]
    fn edges_insets_use_separate_values() {
        let leaves = flatten(Attr::edges_insets(Insets::new(1.0, 2.0, 3.0, 4.0)));
        let values: Vec<f64> = leaves.iter().map(|l| l.constant().layout_value()).collect();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn margins_insets_use_separate_values() {
        use AttributeKind::*;
        let leaves = flatten(Attr::margins_insets(Insets::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(
            kinds(&leaves),
            [TopMargin, LeadingMargin, BottomMargin, TrailingMargin]
        );
        let values: Vec<f64> = leaves.iter().map(|l| l.constant().layout_value()).collect();
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn center_within_margins_expands_to_both_axes() {
        let attr = Attr::center_within_margins(greater_or_equal(5));
        assert_eq!(attr.compound_kind(), Some(CompoundKind::CenterWithinMargins));
        let leaves = flatten(attr);
        assert_eq!(
            kinds(&leaves),
            [
                AttributeKind::CenterXWithinMargins,
                AttributeKind::CenterYWithinMargins
            ]
        );
        for leaf in &leaves {
            assert_eq!(leaf.constant(), greater_or_equal(5));
        }
    }

    #[test]
    fn uniform_insets() {
        assert_eq!(Insets::uniform(6.0), Insets::new(6.0, 6.0, 6.0, 6.0));
    }

    #[test]
    fn fluent_calls_reach_every_child() {
        let attr = Attr::edges(8).to(3).with_priority(Priority::LOW);
        for leaf in flatten(attr) {
            assert_eq!(leaf.reference(), Some(3));
            assert_eq!(leaf.priority(), Priority::LOW);
        }
    }

    #[test]
    fn nested_compounds_flatten_recursively() {
        let nested = Attr::from_children(
            CompoundKind::Size,
            vec![Attr::size(1), Attr::width(2)],
        );
        let leaves = flatten(nested);
        assert_eq!(
            kinds(&leaves),
            [AttributeKind::Width, AttributeKind::Height, AttributeKind::Width]
        );
    }

    #[test]
    fn compound_has_no_kind() {
        let size = Attr::size(1);
        assert_eq!(size.kind(), None);
        assert!(Attr::width(1).children().is_empty());
    }

    // ── Descriptors ─────────────────────────────────────────────────────

    #[test]
    fn width_without_reference_is_pure_constant() {
        let attr = Attr::width(100);
        assert!(!attr.needs_reference(AttributeKind::Width));
        let d = attr.descriptor(AttributeKind::Width, 1, None);
        assert_eq!(d.second_view, None);
        assert_eq!(d.second_kind, None);
        assert_eq!(d.constant, 100.0);
        assert_eq!(d.multiplier, 1.0);
    }

    #[test]
    fn width_with_reference_relates_to_width() {
        let attr = Attr::width(times(0.5)).to(2);
        let d = attr.descriptor(AttributeKind::Width, 1, Some(2));
        assert_eq!(d.second_kind, Some(AttributeKind::Width));
        assert_eq!(d.multiplier, 0.5);
    }

    #[test]
    fn explicit_reference_kind_wins() {
        let attr = Attr::width(0).to_attribute(1, AttributeKind::Height);
        let d = attr.descriptor(AttributeKind::Width, 1, Some(1));
        assert_eq!(d.second_kind, Some(AttributeKind::Height));
    }

    #[test]
    fn edges_default_to_same_kind() {
        let d = Attr::top(20).descriptor(AttributeKind::Top, 1, Some(0));
        assert_eq!(d.second_kind, Some(AttributeKind::Top));
        assert_eq!(d.constant, 20.0);
    }

    #[test]
    fn far_edge_inset_is_negated_and_inverted() {
        let d = Attr::bottom(greater_or_equal(10)).descriptor(AttributeKind::Bottom, 1, Some(0));
        assert_eq!(d.constant, -10.0);
        assert_eq!(d.relation, Relation::LessOrEqual);
    }

    #[test]
    fn far_edge_against_other_kind_is_literal() {
        let attr = Attr::bottom(8).to_attribute(5, AttributeKind::Top);
        let d = attr.descriptor(AttributeKind::Bottom, 1, Some(5));
        assert_eq!(d.constant, 8.0);
        assert_eq!(d.relation, Relation::Equal);
    }

    #[test]
    fn priority_reaches_descriptor() {
        let attr = Attr::height(3).with_priority(Priority::custom(600.0));
        let d = attr.descriptor(AttributeKind::Height, 1, None);
        assert_eq!(d.priority.value(), 600.0);
    }
}
