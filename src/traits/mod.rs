//! `std::ops` implementations for the crate's value types.

mod poly_std_ops;
mod tangent_std_ops;
