use crate::error::{AlgebraError, Shape};

use super::Vector;

/// Row-major `rows x columns` matrix of `f64` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    columns: usize,
    entries: Vec<f64>,
}

impl Matrix {
    /// Build a matrix by evaluating `f(row, col)` for every entry, row by row.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut entries = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for col in 0..columns {
                entries.push(f(row, col));
            }
        }
        Matrix {
            rows,
            columns,
            entries,
        }
    }

    pub fn zeros(rows: usize, columns: usize) -> Self {
        Matrix {
            rows,
            columns,
            entries: vec![0.0; rows * columns],
        }
    }

    /// Outer product: `result[i][j] = column[i] * row[j]`.
    pub fn outer(column: &Vector, row: &Vector) -> Self {
        let (a, b) = (column.components(), row.components());
        Matrix::from_fn(a.len(), b.len(), |i, j| a[i] * b[j])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn shape(&self) -> Shape {
        Shape::Matrix(self.rows, self.columns)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.columns {
            Some(self.entries[row * self.columns + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.entries[row * self.columns..(row + 1) * self.columns])
        } else {
            None
        }
    }

    /// All entries in row-major order.
    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, AlgebraError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, AlgebraError> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, AlgebraError> {
        self.zip_with(other, "multiply", |a, b| a * b)
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            entries: self.entries.iter().map(|&x| x * scalar).collect(),
        }
    }

    /// Matrix-vector product. The input length must equal `columns`; the
    /// result has `rows` components.
    pub fn transform(&self, input: &Vector) -> Result<Vector, AlgebraError> {
        if input.len() != self.columns {
            return Err(AlgebraError::DimensionMismatch {
                op: "transform",
                expected: Shape::Vector(self.columns),
                found: input.shape(),
            });
        }
        let x = input.components();
        Ok(Vector::from_fn(self.rows, |i| {
            let mut sum = 0.0;
            let row = &self.entries[i * self.columns..(i + 1) * self.columns];
            for (w, v) in row.iter().zip(x) {
                sum += w * v;
            }
            sum
        }))
    }

    pub fn transpose(&self) -> Matrix {
        Matrix::from_fn(self.columns, self.rows, |row, col| {
            self.entries[col * self.columns + row]
        })
    }

    fn zip_with(
        &self,
        other: &Matrix,
        op: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix, AlgebraError> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(AlgebraError::DimensionMismatch {
                op,
                expected: self.shape(),
                found: other.shape(),
            });
        }
        Ok(Matrix {
            rows: self.rows,
            columns: self.columns,
            entries: self
                .entries
                .iter()
                .zip(&other.entries)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}
