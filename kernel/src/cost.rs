//! Path cost values.
//!
//! A cost is a commutative monoid under addition with a total order. The
//! engine only ever produces new costs by adding an edge cost to a parent
//! cost, so addition is the single place where overflow can corrupt the
//! comparisons that drive pruning. Every implementation therefore uses checked
//! arithmetic and reports [`CostOverflow`] instead of wrapping.

use std::cmp::Ordering;
use std::fmt;

/// Cost arithmetic left the representable range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cost overflow: {lhs} + {rhs} is not representable")]
pub struct CostOverflow {
    /// Left operand, rendered with `Debug`.
    pub lhs: String,
    /// Right operand, rendered with `Debug`.
    pub rhs: String,
}

impl CostOverflow {
    fn of<C: fmt::Debug>(lhs: &C, rhs: &C) -> Self {
        Self {
            lhs: format!("{lhs:?}"),
            rhs: format!("{rhs:?}"),
        }
    }
}

/// Accumulated path cost.
///
/// Laws (caller obligation for custom impls):
/// - `zero()` is the identity of `checked_add`.
/// - `checked_add` is associative and commutative wherever it succeeds.
/// - `Ord` is a total order consistent with addition of non-negative edges.
pub trait Cost: Clone + Ord + fmt::Debug {
    /// The additive identity.
    fn zero() -> Self;

    /// Add two costs, producing a new value.
    ///
    /// # Errors
    ///
    /// Returns [`CostOverflow`] if the sum is not representable.
    fn checked_add(&self, other: &Self) -> Result<Self, CostOverflow>;

    /// Sum an iterator of costs starting from [`Cost::zero`].
    ///
    /// # Errors
    ///
    /// Returns [`CostOverflow`] on the first unrepresentable partial sum.
    fn sum<'a, I>(costs: I) -> Result<Self, CostOverflow>
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        costs
            .into_iter()
            .try_fold(Self::zero(), |acc, c| acc.checked_add(c))
    }
}

macro_rules! integer_cost {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                fn zero() -> Self {
                    0
                }

                fn checked_add(&self, other: &Self) -> Result<Self, CostOverflow> {
                    <$t>::checked_add(*self, *other).ok_or_else(|| CostOverflow::of(self, other))
                }
            }
        )*
    };
}

integer_cost!(u8, u16, u32, u64, usize, i32, i64);

/// A finite `f64` cost with a total order.
///
/// Non-finite values cannot be constructed; an addition that produces one is
/// reported as [`CostOverflow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatCost(f64);

impl FloatCost {
    /// Wrap a finite value.
    ///
    /// # Errors
    ///
    /// Returns [`CostOverflow`] for NaN or infinities.
    pub fn new(value: f64) -> Result<Self, CostOverflow> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CostOverflow {
                lhs: format!("{value:?}"),
                rhs: "0.0".into(),
            })
        }
    }

    /// The wrapped value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Eq for FloatCost {}

impl PartialOrd for FloatCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for FloatCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Cost for FloatCost {
    fn zero() -> Self {
        Self(0.0)
    }

    fn checked_add(&self, other: &Self) -> Result<Self, CostOverflow> {
        let sum = self.0 + other.0;
        if sum.is_finite() {
            Ok(Self(sum))
        } else {
            Err(CostOverflow::of(self, other))
        }
    }
}
