//! Variable-size dense matrix.
//!
//! [`Matrix`] stores `rows * cols` elements in one contiguous `Vec`, row-major.
//! Use it for arbitrary shapes; the rendering hot path uses the fixed
//! [`Mat4`](super::mat4::Mat4) instead.
//!
//! # Dimension mismatches
//!
//! The checked operations ([`Matrix::try_mul`], [`Matrix::try_add`],
//! [`Matrix::try_sub`]) return [`MatrixError::DimensionMismatch`]. The operator
//! impls on references (`&a * &b`, `&a + &b`, `&a - &b`) instead return an
//! empty `0x0` matrix, so callers using operators must check
//! [`Matrix::is_empty`] before indexing into the result.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use super::mat4::Mat4;

pub type FMat = Matrix<f32>;
pub type IMat = Matrix<i32>;

/// Element type usable in a [`Matrix`].
///
/// `From<u8>` provides the zero and one used by constructors.
pub trait Scalar:
    Copy + PartialEq + fmt::Debug + From<u8> + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
}

impl<T> Scalar for T where
    T: Copy
        + PartialEq
        + fmt::Debug
        + From<u8>
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
{
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixOp {
    Add,
    Sub,
    Mul,
}

impl fmt::Display for MatrixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixOp::Add => write!(f, "add"),
            MatrixOp::Sub => write!(f, "subtract"),
            MatrixOp::Mul => write!(f, "multiply"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the operation. Shapes are `(rows, cols)`.
    DimensionMismatch {
        op: MatrixOp,
        left: (usize, usize),
        right: (usize, usize),
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::DimensionMismatch { op, left, right } => write!(
                f,
                "cannot {} {}x{} and {}x{} matrices",
                op, left.0, left.1, right.0, right.1
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::from(0); rows * cols],
        }
    }

    /// The `0x0` matrix produced by operator impls on a shape mismatch.
    pub fn empty() -> Self {
        Self::zeros(0, 0)
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m[(i, i)] = T::from(1);
        }
        m
    }

    /// Builds a matrix from row-major data.
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    pub fn try_mul(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch(MatrixOp::Mul, rhs));
        }

        let mut result = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = T::from(0);
                for k in 0..self.cols {
                    acc = acc + self[(i, k)] * rhs[(k, j)];
                }
                result[(i, j)] = acc;
            }
        }
        Ok(result)
    }

    pub fn try_add(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        self.zip_with(rhs, MatrixOp::Add, |a, b| a + b)
    }

    pub fn try_sub(&self, rhs: &Matrix<T>) -> Result<Matrix<T>, MatrixError> {
        self.zip_with(rhs, MatrixOp::Sub, |a, b| a - b)
    }

    pub fn scale(&self, scalar: T) -> Matrix<T> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| v * scalar).collect(),
        }
    }

    fn zip_with(
        &self,
        rhs: &Matrix<T>,
        op: MatrixOp,
        f: impl Fn(T, T) -> T,
    ) -> Result<Matrix<T>, MatrixError> {
        if self.shape() != rhs.shape() {
            return Err(self.mismatch(op, rhs));
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    fn mismatch(&self, op: MatrixOp, rhs: &Matrix<T>) -> MatrixError {
        MatrixError::DimensionMismatch {
            op,
            left: self.shape(),
            right: rhs.shape(),
        }
    }
}

/// Element access by `(row, col)`. Panics when out of range.
impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        &mut self.data[row * self.cols + col]
    }
}

/// Matrix product. Yields a `0x0` matrix when `self.cols != rhs.rows`.
impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.try_mul(rhs).unwrap_or_else(|_| Matrix::empty())
    }
}

/// Element-wise sum. Yields a `0x0` matrix when shapes differ.
impl<T: Scalar> Add<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.try_add(rhs).unwrap_or_else(|_| Matrix::empty())
    }
}

/// Element-wise difference. Yields a `0x0` matrix when shapes differ.
impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        self.try_sub(rhs).unwrap_or_else(|_| Matrix::empty())
    }
}

impl From<Mat4> for FMat {
    fn from(m: Mat4) -> Self {
        Matrix {
            rows: 4,
            cols: 4,
            data: m.to_rows().into_iter().flatten().collect(),
        }
    }
}
