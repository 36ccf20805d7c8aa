//! Dense linear algebra: immutable `f64` vectors and row-major matrices with
//! the operations needed to evaluate and train the feedforward networks.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
