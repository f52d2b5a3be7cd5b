use crate::dynamics::{BodyHandle, BodySet, Constraint, JacobianRow};
use crate::geometry::ContactInfo;
use crate::math::{Point, Real, UnitVector, Vector};
use crate::utils;

/// A single contact point between two rigid bodies.
///
/// A contact carries three scalar constraint rows for the solver: row 0 is
/// the non-penetration constraint along the contact normal, rows 1 and 2 are
/// friction constraints along the two tangent vectors spanning the plane
/// orthogonal to the normal.
///
/// The normal and the local anchor points are frozen at construction: the
/// persistent manifold refreshes the world anchors and the penetration depth
/// every step, and a point whose frozen geometry no longer describes the
/// touch is discarded by the manifold rather than recomputed.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    body1: BodyHandle,
    body2: BodyHandle,
    normal: UnitVector<Real>,
    penetration: Real,
    local_p1: Point<Real>,
    local_p2: Point<Real>,
    world_p1: Point<Real>,
    world_p2: Point<Real>,
    friction_vectors: [Vector<Real>; 2],
    friction_limit: Real,
}

impl Contact {
    /// Builds a contact from a narrow-phase description.
    ///
    /// The friction basis is derived from the normal so that
    /// `friction_vectors[0] × friction_vectors[1] == normal`. The world
    /// anchors are placeholders until the owning manifold's first refresh.
    pub fn new(info: &ContactInfo) -> Self {
        debug_assert!(info.penetration >= 0.0);

        let t1 = utils::one_orthogonal(&info.normal).into_inner();
        let t2 = info.normal.cross(&t1);

        Self {
            body1: info.body1,
            body2: info.body2,
            normal: info.normal,
            penetration: info.penetration,
            local_p1: info.local_p1,
            local_p2: info.local_p2,
            world_p1: info.local_p1,
            world_p2: info.local_p2,
            friction_vectors: [t1, t2],
            friction_limit: Real::INFINITY,
        }
    }

    /// The contact normal, in world space, pointing from the first body
    /// toward the second.
    pub fn normal(&self) -> UnitVector<Real> {
        self.normal
    }

    /// The current penetration depth along the normal.
    ///
    /// Non-negative right after construction and right after a manifold
    /// refresh; the refresh discards points whose depth became non-positive.
    pub fn penetration(&self) -> Real {
        self.penetration
    }

    /// Sets the penetration depth.
    pub fn set_penetration(&mut self, penetration: Real) {
        self.penetration = penetration;
    }

    /// The anchor point in the local frame of the first body.
    pub fn local_p1(&self) -> Point<Real> {
        self.local_p1
    }

    /// The anchor point in the local frame of the second body.
    pub fn local_p2(&self) -> Point<Real> {
        self.local_p2
    }

    /// The anchor point on the first body, in world space.
    pub fn world_p1(&self) -> Point<Real> {
        self.world_p1
    }

    /// The anchor point on the second body, in world space.
    pub fn world_p2(&self) -> Point<Real> {
        self.world_p2
    }

    /// Sets the world-space anchor on the first body.
    pub fn set_world_p1(&mut self, world_p1: Point<Real>) {
        self.world_p1 = world_p1;
    }

    /// Sets the world-space anchor on the second body.
    pub fn set_world_p2(&mut self, world_p2: Point<Real>) {
        self.world_p2 = world_p2;
    }

    /// The two unit tangent vectors spanning the friction plane.
    ///
    /// Together with the normal they form a right-handed orthonormal frame.
    pub fn friction_vectors(&self) -> &[Vector<Real>; 2] {
        &self.friction_vectors
    }

    /// The magnitude bound applied to both friction rows.
    ///
    /// Infinite on a freshly built contact; an iterative solver tightens it
    /// every iteration from the accumulated normal impulse and the friction
    /// coefficient.
    pub fn friction_limit(&self) -> Real {
        self.friction_limit
    }

    /// Sets the magnitude bound applied to both friction rows.
    pub fn set_friction_limit(&mut self, friction_limit: Real) {
        debug_assert!(friction_limit >= 0.0);
        self.friction_limit = friction_limit;
    }

    // Constraint row 0 acts along the normal, rows 1 and 2 along the tangents.
    fn row_direction(&self, constraint_index: usize) -> Vector<Real> {
        assert!(constraint_index < 3);
        if constraint_index == 0 {
            self.normal.into_inner()
        } else {
            self.friction_vectors[constraint_index - 1]
        }
    }
}

impl Constraint for Contact {
    fn body1(&self) -> BodyHandle {
        self.body1
    }

    fn body2(&self) -> BodyHandle {
        self.body2
    }

    fn nb_constraints(&self) -> usize {
        3
    }

    fn compute_jacobian(&self, bodies: &BodySet, constraint_index: usize) -> JacobianRow {
        let dir = self.row_direction(constraint_index);
        let r1 = self.world_p1 - bodies[self.body1].center_of_mass();
        let r2 = self.world_p2 - bodies[self.body2].center_of_mass();

        JacobianRow::from_parts(-dir, -r1.cross(&dir), dir, r2.cross(&dir))
    }

    fn compute_lower_bound(&self, constraint_index: usize) -> Real {
        assert!(constraint_index < 3);
        if constraint_index == 0 {
            0.0
        } else {
            -self.friction_limit
        }
    }

    fn compute_upper_bound(&self, constraint_index: usize) -> Real {
        assert!(constraint_index < 3);
        if constraint_index == 0 {
            Real::INFINITY
        } else {
            self.friction_limit
        }
    }

    fn compute_error_value(&self, constraint_index: usize) -> Real {
        assert!(constraint_index < 3);
        if constraint_index == 0 {
            self.penetration
        } else {
            0.0
        }
    }
}
