use crate::math::{Real, UnitVector, Vector};

/// Computes a unit vector orthogonal to the nonzero vector `v`.
///
/// The coordinate axis with the smallest absolute component of `v` is crossed
/// with `v` and the result renormalised. Selecting the smallest component
/// keeps the cross product far from zero even when `v` is nearly parallel to
/// one of the coordinate axes.
pub fn one_orthogonal(v: &Vector<Real>) -> UnitVector<Real> {
    let ax = v.x.abs();
    let ay = v.y.abs();
    let az = v.z.abs();

    let axis = if ax <= ay && ax <= az {
        Vector::x()
    } else if ay <= az {
        Vector::y()
    } else {
        Vector::z()
    };

    UnitVector::new_normalize(axis.cross(v))
}

#[cfg(test)]
mod test {
    use super::one_orthogonal;
    use crate::math::Vector;

    #[test]
    fn orthogonal_to_axis_aligned_vectors() {
        for v in [Vector::x(), Vector::y(), Vector::z()] {
            let t = one_orthogonal(&v);
            assert_relative_eq!(t.norm(), 1.0);
            assert_abs_diff_eq!(t.dot(&v), 0.0, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn orthogonal_to_nearly_axis_aligned_vector() {
        // A naive "cross with the X axis" would collapse here.
        let v = Vector::new(1.0, 1.0e-12, -1.0e-12).normalize();
        let t = one_orthogonal(&v);
        assert_relative_eq!(t.norm(), 1.0);
        assert_abs_diff_eq!(t.dot(&v), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn orthogonal_to_unnormalized_vector() {
        let v = Vector::new(-3.0, 7.0, 2.5);
        let t = one_orthogonal(&v);
        assert_relative_eq!(t.norm(), 1.0);
        assert_abs_diff_eq!(t.dot(&v.normalize()), 0.0, epsilon = 1.0e-12);
    }
}
