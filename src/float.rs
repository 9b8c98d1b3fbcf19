use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, FloatConst, FromPrimitive, ToPrimitive};

/// Marker trait for the real scalar types used for times, step sizes,
/// tolerances and norms.
///
/// Bundles the numeric and utility traits needed throughout jetstep.
/// Coefficient types (complex, nested polynomials) do not implement this;
/// they expose their associated real line through [`Coeff::Real`].
///
/// [`Coeff::Real`]: crate::scalar::Coeff::Real
pub trait Real:
    NumFloat
    + FloatConst
    + FromPrimitive
    + ToPrimitive
    + Copy
    + Send
    + Sync
    + Default
    + Debug
    + Display
    + 'static
{
}

impl Real for f32 {}
impl Real for f64 {}
