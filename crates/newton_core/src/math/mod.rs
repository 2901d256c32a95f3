//! Numerical building blocks.
//!
//! - `linalg`: the [`Point`](linalg::Point) abstraction over scalars and vectors
//! - `jacobian`: finite-difference Jacobian approximation
//! - `solvers`: the Newton-Raphson root finder

pub mod jacobian;
pub mod linalg;
pub mod solvers;
