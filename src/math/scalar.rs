use std::fmt::{Debug, Display};

use num_traits::{Num, NumCast};

/// Element type accepted by [`Array1`](crate::math::Array1) and
/// [`Matrix`](crate::math::Matrix).
///
/// Any signed, unsigned or floating primitive qualifies. Division follows the
/// type's own rules, so means and LU multipliers truncate for integers. LU
/// factorization and regression additionally require `num_traits::Signed`.
pub trait Scalar: Num + NumCast + Copy + PartialOrd + Debug + Display {
    /// Magnitude used for pivot comparison. Unsigned values are their own
    /// magnitude.
    fn magnitude(self) -> Self {
        if self < Self::zero() {
            Self::zero() - self
        } else {
            self
        }
    }
}

impl<T> Scalar for T where T: Num + NumCast + Copy + PartialOrd + Debug + Display {}
