use crate::error::{AlgebraError, Shape};

/// Fixed-length vector of `f64` components.
///
/// Every operation returns a new vector; the operands are never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    components: Vec<f64>,
}

impl Vector {
    /// Build a vector of `len` components by evaluating `f` at each index.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> f64) -> Self {
        Vector {
            components: (0..len).map(f).collect(),
        }
    }

    pub fn zeros(len: usize) -> Self {
        Vector {
            components: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[f64] {
        &self.components
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.components.get(index).copied()
    }

    pub fn shape(&self) -> Shape {
        Shape::Vector(self.len())
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Vector) -> Result<Vector, AlgebraError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Elementwise difference `self - other`.
    pub fn subtract(&self, other: &Vector) -> Result<Vector, AlgebraError> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn multiply(&self, other: &Vector) -> Result<Vector, AlgebraError> {
        self.zip_with(other, "multiply", |a, b| a * b)
    }

    pub fn scale(&self, scalar: f64) -> Vector {
        self.map(|x| x * scalar)
    }

    /// Apply `f` to every component.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Vector {
        Vector {
            components: self.components.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn sum(&self) -> f64 {
        self.components.iter().sum()
    }

    /// `exp(v_i) / sum_k exp(v_k)` for every component.
    ///
    /// No max-subtraction is applied, so large inputs overflow to `inf` and
    /// the result contains NaN.
    pub fn softmax(&self) -> Vector {
        let exps: Vec<f64> = self.components.iter().map(|x| x.exp()).collect();
        let total: f64 = exps.iter().sum();
        Vector {
            components: exps.into_iter().map(|e| e / total).collect(),
        }
    }

    fn zip_with(
        &self,
        other: &Vector,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Vector, AlgebraError> {
        if self.len() != other.len() {
            return Err(AlgebraError::DimensionMismatch {
                op,
                expected: self.shape(),
                found: other.shape(),
            });
        }
        Ok(Vector {
            components: self
                .components
                .iter()
                .zip(&other.components)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl From<Vec<f64>> for Vector {
    fn from(components: Vec<f64>) -> Self {
        Vector { components }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(values: &[f64]) -> Vector {
        Vector::from(values.to_vec())
    }

    #[test]
    fn test_from_fn_uses_index() {
        let vec = Vector::from_fn(4, |i| i as f64 * 2.0);
        assert_eq!(vec.components(), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(vec.get(3), Some(6.0));
        assert_eq!(vec.get(4), None);
    }

    #[test]
    fn test_add_is_commutative() {
        let a = v(&[1.5, -2.0, 0.25]);
        let b = v(&[0.5, 4.0, -3.0]);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        assert_eq!(a.add(&b).unwrap().components(), &[2.0, 2.0, -2.75]);
    }

    #[test]
    fn test_subtract_self_is_zero() {
        let a = v(&[3.0, -7.5, 1e10]);
        let diff = a.subtract(&a).unwrap();
        assert!(diff.components().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_scale_by_one_is_identity() {
        let a = v(&[0.1, 0.2, -0.3]);
        assert_eq!(a.scale(1.0), a);
    }

    #[test]
    fn test_multiply_elementwise() {
        let a = v(&[1.0, 2.0, 3.0]);
        let b = v(&[4.0, 0.5, -1.0]);
        assert_eq!(a.multiply(&b).unwrap().components(), &[4.0, 1.0, -3.0]);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let a = v(&[1.0, 2.0]);
        let b = v(&[1.0, 2.0, 3.0]);
        let err = a.add(&b).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::DimensionMismatch {
                op: "add",
                expected: Shape::Vector(2),
                found: Shape::Vector(3),
            }
        );
        assert!(a.subtract(&b).is_err());
        assert!(a.multiply(&b).is_err());
    }

    #[test]
    fn test_softmax_sums_to_one() {
        for values in [
            vec![0.0, 0.0],
            vec![1.0, 2.0, 3.0],
            vec![-5.0, 0.3, 12.0, 7.7],
            vec![42.0],
        ] {
            let probs = v(&values).softmax();
            assert!((probs.sum() - 1.0).abs() < 1e-12);
            assert!(probs.components().iter().all(|&p| p > 0.0 && p <= 1.0));
        }
    }

    #[test]
    fn test_softmax_equal_inputs_are_uniform() {
        let probs = v(&[0.0, 0.0]).softmax();
        assert_eq!(probs.components(), &[0.5, 0.5]);
    }

    #[test]
    fn test_softmax_overflow_yields_nan() {
        let probs = v(&[1000.0, 1000.0]).softmax();
        assert!(probs.components().iter().all(|p| p.is_nan()));
    }

    #[test]
    fn test_clone_does_not_alias() {
        let a = v(&[1.0, 2.0]);
        let b = a.clone();
        let c = b.add(&v(&[1.0, 1.0])).unwrap();
        assert_eq!(a.components(), &[1.0, 2.0]);
        assert_eq!(b.components(), &[1.0, 2.0]);
        assert_eq!(c.components(), &[2.0, 3.0]);
    }
}
