use crate::dynamics::{BodyHandle, BodySet};
use crate::math::{Real, SpatialVector, Vector};
use downcast_rs::{impl_downcast, Downcast};

/// One row of a two-body constraint Jacobian.
///
/// Each body block is a 1×6 spatial row: the linear part occupies components
/// `0..3` and the angular part components `3..6`, matching the layout of a
/// body's spatial velocity `(linvel, angvel)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct JacobianRow {
    /// The block multiplying the first body's spatial velocity.
    pub body1: SpatialVector<Real>,
    /// The block multiplying the second body's spatial velocity.
    pub body2: SpatialVector<Real>,
}

impl JacobianRow {
    /// Assembles a row from the linear and angular parts of both body blocks.
    pub fn from_parts(
        linear1: Vector<Real>,
        angular1: Vector<Real>,
        linear2: Vector<Real>,
        angular2: Vector<Real>,
    ) -> Self {
        Self {
            body1: SpatialVector::new(
                linear1.x, linear1.y, linear1.z, angular1.x, angular1.y, angular1.z,
            ),
            body2: SpatialVector::new(
                linear2.x, linear2.y, linear2.z, angular2.x, angular2.y, angular2.z,
            ),
        }
    }

    /// The linear part of the first body block.
    pub fn linear1(&self) -> Vector<Real> {
        self.body1.fixed_rows::<3>(0).into_owned()
    }

    /// The angular part of the first body block.
    pub fn angular1(&self) -> Vector<Real> {
        self.body1.fixed_rows::<3>(3).into_owned()
    }

    /// The linear part of the second body block.
    pub fn linear2(&self) -> Vector<Real> {
        self.body2.fixed_rows::<3>(0).into_owned()
    }

    /// The angular part of the second body block.
    pub fn angular2(&self) -> Vector<Real> {
        self.body2.fixed_rows::<3>(3).into_owned()
    }

    /// Applies this row to a pair of spatial velocities, yielding `J · v`.
    pub fn apply(&self, v1: &SpatialVector<Real>, v2: &SpatialVector<Real>) -> Real {
        self.body1.dot(v1) + self.body2.dot(v2)
    }
}

/// The capability set a constraint exposes to the iterative solver.
///
/// A constraint couples two bodies through one or more scalar rows. For each
/// row the solver reads a Jacobian, an impulse interval, and a positional
/// error term. Contacts are the only implementor in this crate; joint types
/// plug in through the same trait.
pub trait Constraint: Downcast {
    /// The first body coupled by this constraint.
    fn body1(&self) -> BodyHandle;

    /// The second body coupled by this constraint.
    fn body2(&self) -> BodyHandle;

    /// The number of scalar constraint rows this constraint generates.
    fn nb_constraints(&self) -> usize;

    /// Computes the Jacobian row of the given constraint index.
    fn compute_jacobian(&self, bodies: &BodySet, constraint_index: usize) -> JacobianRow;

    /// The lower impulse bound of the given constraint index.
    fn compute_lower_bound(&self, constraint_index: usize) -> Real;

    /// The upper impulse bound of the given constraint index.
    fn compute_upper_bound(&self, constraint_index: usize) -> Real;

    /// The positional error of the given constraint index.
    fn compute_error_value(&self, constraint_index: usize) -> Real;
}

impl_downcast!(Constraint);
