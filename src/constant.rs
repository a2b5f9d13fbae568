//! Constant, multiplier, relation and priority value objects.
//!
//! These are the semantic payload of every attribute expression. Numbers turn
//! into equal-relation constants, [`greater_or_equal`] and [`less_or_equal`]
//! qualify the relation, and [`times`] produces a [`Multiplier`].
//!
//! ```
//! use zenanchor::{Constant, Relation, greater_or_equal, times};
//!
//! let c = greater_or_equal(350);
//! assert_eq!(c.layout_value(), 350.0);
//! assert_eq!(c.relation(), Relation::GreaterOrEqual);
//!
//! let scaled = Constant::from((10.0, times(2)));
//! assert_eq!(scaled.layout_multiplier(), 2.0);
//! ```

use num_traits::AsPrimitive;

/// Scaling factor applied to the second item of a constraint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Multiplier(f64);

impl Multiplier {
    /// The identity multiplier.
    pub const ONE: Self = Self(1.0);

    /// Create a multiplier from any primitive number.
    pub fn new<T: AsPrimitive<f64>>(value: T) -> Self {
        Self(value.as_())
    }

    /// Multiplier value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

/// Relation between the two sides of a constraint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `first == second * m + c`
    #[default]
    Equal,
    /// `first >= second * m + c`
    GreaterOrEqual,
    /// `first <= second * m + c`
    LessOrEqual,
}

impl Relation {
    /// Swap the inequalities; `Equal` stays `Equal`.
    pub fn inverse(self) -> Self {
        match self {
            Self::Equal => Self::Equal,
            Self::GreaterOrEqual => Self::LessOrEqual,
            Self::LessOrEqual => Self::GreaterOrEqual,
        }
    }
}

/// Relation, value and multiplier of a constraint to be created.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Constant {
    value: f64,
    relation: Relation,
    multiplier: Multiplier,
}

impl Constant {
    /// Equal-relation constant with multiplier 1.
    pub fn new<T: AsPrimitive<f64>>(value: T) -> Self {
        Self {
            value: value.as_(),
            relation: Relation::Equal,
            multiplier: Multiplier::ONE,
        }
    }

    /// Constant with every component given explicitly.
    pub fn with_relation<T: AsPrimitive<f64>>(
        value: T,
        relation: Relation,
        multiplier: Multiplier,
    ) -> Self {
        Self {
            value: value.as_(),
            relation,
            multiplier,
        }
    }

    /// Replace the multiplier, keeping value and relation.
    pub fn times(mut self, multiplier: Multiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Relation applied to the value.
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Value of the constant as handed to the constraint.
    pub fn layout_value(&self) -> f64 {
        self.value
    }

    /// Multiplier value as handed to the constraint.
    pub fn layout_multiplier(&self) -> f64 {
        self.multiplier.value()
    }

    /// The [`Multiplier`] itself.
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// `>= value`
pub fn greater_or_equal<T: AsPrimitive<f64>>(value: T) -> Constant {
    Constant::with_relation(value, Relation::GreaterOrEqual, Multiplier::ONE)
}

/// `<= value`
pub fn less_or_equal<T: AsPrimitive<f64>>(value: T) -> Constant {
    Constant::with_relation(value, Relation::LessOrEqual, Multiplier::ONE)
}

/// `* value`
pub fn times<T: AsPrimitive<f64>>(value: T) -> Multiplier {
    Multiplier::new(value)
}

macro_rules! impl_from_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Constant {
                fn from(value: $t) -> Self {
                    Self::new(value)
                }
            }

            impl From<($t, Multiplier)> for Constant {
                fn from((value, multiplier): ($t, Multiplier)) -> Self {
                    Self::new(value).times(multiplier)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Multiplier> for Constant {
    fn from(multiplier: Multiplier) -> Self {
        Self::new(0.0).times(multiplier)
    }
}

impl From<(Constant, Multiplier)> for Constant {
    fn from((constant, multiplier): (Constant, Multiplier)) -> Self {
        constant.times(multiplier)
    }
}

/// Layout priority, `0.0..=1000.0`.
///
/// Anything below [`Priority::REQUIRED`] is optional: the solver may break
/// it to satisfy higher priorities.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    /// Must be satisfied (1000).
    pub const REQUIRED: Self = Self(1000.0);
    /// 750
    pub const HIGH: Self = Self(750.0);
    /// 500
    pub const MEDIUM: Self = Self(500.0);
    /// 250
    pub const LOW: Self = Self(250.0);

    /// Custom priority. Clamped into `0.0..=1000.0`; NaN becomes required.
    pub fn custom(value: f32) -> Self {
        if value.is_nan() {
            return Self::REQUIRED;
        }
        Self(value.clamp(0.0, 1000.0))
    }

    /// Numeric level.
    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether this is [`Priority::REQUIRED`].
    pub fn is_required(self) -> bool {
        self.0 >= 1000.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}
