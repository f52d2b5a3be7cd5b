use crate::math::{AngularInertia, Isometry, Point, Real, Vector};
use num::Zero;

/// A rigid body of the simulation world.
///
/// The contact pipeline only reads a body: its world transform drives the
/// per-step manifold refresh, and its inverse mass and world-space inverse
/// inertia feed the constraint solver. Integration, forces and sleeping are
/// the world's responsibility.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBody {
    position: Isometry<Real>,
    linvel: Vector<Real>,
    angvel: Vector<Real>,
    inv_mass: Real,
    local_inv_inertia: AngularInertia<Real>,
    restitution: Real,
}

impl RigidBody {
    /// Creates a dynamic rigid body with the given pose, mass, and local-space
    /// angular inertia tensor.
    ///
    /// A zero `mass` creates a fixed body: its inverse mass and inverse
    /// inertia are both zero and the solver will never move it.
    pub fn new(position: Isometry<Real>, mass: Real, local_inertia: AngularInertia<Real>) -> Self {
        let (inv_mass, local_inv_inertia) = if mass.is_zero() || local_inertia.is_zero() {
            (0.0, AngularInertia::zero())
        } else {
            (1.0 / mass, local_inertia.inverse_unchecked())
        };

        Self {
            position,
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
            inv_mass,
            local_inv_inertia,
            restitution: 1.0,
        }
    }

    /// Creates a fixed (non-dynamic) rigid body with the given pose.
    pub fn fixed(position: Isometry<Real>) -> Self {
        Self::new(position, 0.0, AngularInertia::zero())
    }

    /// Is this body affected by constraint impulses?
    pub fn is_dynamic(&self) -> bool {
        !self.inv_mass.is_zero()
    }

    /// The world-space pose of this body.
    pub fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    /// Sets the world-space pose of this body.
    pub fn set_position(&mut self, position: Isometry<Real>) {
        self.position = position;
    }

    /// The world-space centre of mass of this body.
    ///
    /// The centre of mass coincides with the origin of the body's local frame.
    pub fn center_of_mass(&self) -> Point<Real> {
        self.position.translation.vector.into()
    }

    /// The linear velocity of this body.
    pub fn linvel(&self) -> &Vector<Real> {
        &self.linvel
    }

    /// Sets the linear velocity of this body.
    pub fn set_linvel(&mut self, linvel: Vector<Real>) {
        self.linvel = linvel;
    }

    /// The angular velocity of this body.
    pub fn angvel(&self) -> &Vector<Real> {
        &self.angvel
    }

    /// Sets the angular velocity of this body.
    pub fn set_angvel(&mut self, angvel: Vector<Real>) {
        self.angvel = angvel;
    }

    /// The inverse mass of this body (zero for fixed bodies).
    pub fn inv_mass(&self) -> Real {
        self.inv_mass
    }

    /// The world-space inverse angular inertia tensor of this body.
    pub fn world_inv_inertia(&self) -> AngularInertia<Real> {
        let rot = self.position.rotation.to_rotation_matrix();
        self.local_inv_inertia.quadform(rot.matrix())
    }

    /// The restitution coefficient of this body.
    pub fn restitution(&self) -> Real {
        self.restitution
    }

    /// Sets the restitution coefficient of this body.
    pub fn set_restitution(&mut self, restitution: Real) {
        debug_assert!((0.0..=1.0).contains(&restitution));
        self.restitution = restitution;
    }
}

#[cfg(test)]
mod test {
    use super::RigidBody;
    use crate::math::{AngularInertia, Isometry, Real, Vector};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn fixed_body_has_zero_inverse_mass_and_inertia() {
        let body = RigidBody::fixed(Isometry::identity());
        assert!(!body.is_dynamic());
        assert_eq!(body.inv_mass(), 0.0);
        assert!(body.world_inv_inertia().is_zero());
    }

    #[test]
    fn world_inv_inertia_follows_rotation() {
        let inertia = AngularInertia::new(2.0, 0.0, 0.0, 4.0, 0.0, 8.0);
        let mut body = RigidBody::new(Isometry::identity(), 1.0, inertia);
        // Rotating the body by 90° around Z swaps the X and Y principal axes.
        body.set_position(Isometry::rotation(Vector::z() * FRAC_PI_2 as Real));
        let inv = body.world_inv_inertia();
        assert_relative_eq!(inv.m11, 1.0 / 4.0, epsilon = 1.0e-10);
        assert_relative_eq!(inv.m22, 1.0 / 2.0, epsilon = 1.0e-10);
        assert_relative_eq!(inv.m33, 1.0 / 8.0, epsilon = 1.0e-10);
    }
}
