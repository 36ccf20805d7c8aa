use crate::algebra::Vector;

/// Rectified linear unit, `max(0, x)` per component. NaN passes through.
pub fn relu(input: &Vector) -> Vector {
    input.map(|x| if x > 0.0 || x.is_nan() { x } else { 0.0 })
}

/// Step derivative of [`relu`]: 1 where `x > 0`, otherwise 0.
pub fn relu_prime(input: &Vector) -> Vector {
    input.map(|x| if x > 0.0 { 1.0 } else { 0.0 })
}
