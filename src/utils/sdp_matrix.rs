use crate::math::Real;
use na::{Matrix3, RealField, Vector3};
use std::ops::{Add, Mul};

/// A 3x3 symmetric-definite-positive matrix.
///
/// Used to represent angular inertia tensors and their inverses: symmetry
/// halves the storage and keeps products symmetric by construction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SdpMatrix3<N> {
    /// The component at the first row and first column of this matrix.
    pub m11: N,
    /// The component at the first row and second column of this matrix.
    pub m12: N,
    /// The component at the first row and third column of this matrix.
    pub m13: N,
    /// The component at the second row and second column of this matrix.
    pub m22: N,
    /// The component at the second row and third column of this matrix.
    pub m23: N,
    /// The component at the third row and third column of this matrix.
    pub m33: N,
}

impl<N: RealField + Copy> SdpMatrix3<N> {
    /// A new SDP 3x3 matrix with the given components.
    ///
    /// Because the matrix is symmetric, only the lower off-diagonal components are required.
    pub fn new(m11: N, m12: N, m13: N, m22: N, m23: N, m33: N) -> Self {
        Self {
            m11,
            m12,
            m13,
            m22,
            m23,
            m33,
        }
    }

    /// Build an `SdpMatrix3` structure from a plain matrix, assuming it is SDP.
    ///
    /// No check is performed to ensure `mat` is actually SDP.
    pub fn from_sdp_matrix(mat: Matrix3<N>) -> Self {
        Self {
            m11: mat.m11,
            m12: mat.m12,
            m13: mat.m13,
            m22: mat.m22,
            m23: mat.m23,
            m33: mat.m33,
        }
    }

    /// Create a new SDP matrix filled with zeros.
    pub fn zero() -> Self {
        Self {
            m11: N::zero(),
            m12: N::zero(),
            m13: N::zero(),
            m22: N::zero(),
            m23: N::zero(),
            m33: N::zero(),
        }
    }

    /// Create a new SDP matrix with its diagonal filled with `val`, and its off-diagonal elements set to zero.
    pub fn diagonal(val: N) -> Self {
        Self {
            m11: val,
            m12: N::zero(),
            m13: N::zero(),
            m22: val,
            m23: N::zero(),
            m33: val,
        }
    }

    /// Are all components of this matrix equal to zero?
    pub fn is_zero(&self) -> bool {
        self.m11.is_zero()
            && self.m12.is_zero()
            && self.m13.is_zero()
            && self.m22.is_zero()
            && self.m23.is_zero()
            && self.m33.is_zero()
    }

    /// Compute the inverse of this SDP matrix without performing any inversibility check.
    pub fn inverse_unchecked(&self) -> Self {
        let minor_m12_m23 = self.m22 * self.m33 - self.m23 * self.m23;
        let minor_m11_m23 = self.m12 * self.m33 - self.m13 * self.m23;
        let minor_m11_m22 = self.m12 * self.m23 - self.m13 * self.m22;

        let determinant =
            self.m11 * minor_m12_m23 - self.m12 * minor_m11_m23 + self.m13 * minor_m11_m22;
        let inv_det = N::one() / determinant;

        SdpMatrix3 {
            m11: minor_m12_m23 * inv_det,
            m12: -minor_m11_m23 * inv_det,
            m13: minor_m11_m22 * inv_det,
            m22: (self.m11 * self.m33 - self.m13 * self.m13) * inv_det,
            m23: (self.m13 * self.m12 - self.m23 * self.m11) * inv_det,
            m33: (self.m11 * self.m22 - self.m12 * self.m12) * inv_det,
        }
    }

    /// Compute the quadratic form `m * self * m.transpose()`.
    pub fn quadform(&self, m: &Matrix3<N>) -> Self {
        let x0 = self.m11 * m.m11 + self.m12 * m.m12 + self.m13 * m.m13;
        let y0 = self.m12 * m.m11 + self.m22 * m.m12 + self.m23 * m.m13;
        let z0 = self.m13 * m.m11 + self.m23 * m.m12 + self.m33 * m.m13;

        let x1 = self.m11 * m.m21 + self.m12 * m.m22 + self.m13 * m.m23;
        let y1 = self.m12 * m.m21 + self.m22 * m.m22 + self.m23 * m.m23;
        let z1 = self.m13 * m.m21 + self.m23 * m.m22 + self.m33 * m.m23;

        let x2 = self.m11 * m.m31 + self.m12 * m.m32 + self.m13 * m.m33;
        let y2 = self.m12 * m.m31 + self.m22 * m.m32 + self.m23 * m.m33;
        let z2 = self.m13 * m.m31 + self.m23 * m.m32 + self.m33 * m.m33;

        let m11 = m.m11 * x0 + m.m12 * y0 + m.m13 * z0;
        let m12 = m.m11 * x1 + m.m12 * y1 + m.m13 * z1;
        let m13 = m.m11 * x2 + m.m12 * y2 + m.m13 * z2;

        let m22 = m.m21 * x1 + m.m22 * y1 + m.m23 * z1;
        let m23 = m.m21 * x2 + m.m22 * y2 + m.m23 * z2;
        let m33 = m.m31 * x2 + m.m32 * y2 + m.m33 * z2;

        Self {
            m11,
            m12,
            m13,
            m22,
            m23,
            m33,
        }
    }

    /// Convert this SDP matrix to a regular matrix representation.
    pub fn into_matrix(self) -> Matrix3<N> {
        Matrix3::new(
            self.m11, self.m12, self.m13, self.m12, self.m22, self.m23, self.m13, self.m23,
            self.m33,
        )
    }
}

impl<N: RealField + Copy> Add<SdpMatrix3<N>> for SdpMatrix3<N> {
    type Output = Self;

    fn add(self, rhs: SdpMatrix3<N>) -> Self {
        Self {
            m11: self.m11 + rhs.m11,
            m12: self.m12 + rhs.m12,
            m13: self.m13 + rhs.m13,
            m22: self.m22 + rhs.m22,
            m23: self.m23 + rhs.m23,
            m33: self.m33 + rhs.m33,
        }
    }
}

impl<N: RealField + Copy> Mul<Vector3<N>> for SdpMatrix3<N> {
    type Output = Vector3<N>;

    fn mul(self, rhs: Vector3<N>) -> Self::Output {
        Vector3::new(
            self.m11 * rhs.x + self.m12 * rhs.y + self.m13 * rhs.z,
            self.m12 * rhs.x + self.m22 * rhs.y + self.m23 * rhs.z,
            self.m13 * rhs.x + self.m23 * rhs.y + self.m33 * rhs.z,
        )
    }
}

impl Mul<Real> for SdpMatrix3<Real> {
    type Output = SdpMatrix3<Real>;

    fn mul(self, rhs: Real) -> Self::Output {
        SdpMatrix3::new(
            self.m11 * rhs,
            self.m12 * rhs,
            self.m13 * rhs,
            self.m22 * rhs,
            self.m23 * rhs,
            self.m33 * rhs,
        )
    }
}
