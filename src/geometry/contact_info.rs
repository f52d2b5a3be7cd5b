use crate::dynamics::BodyHandle;
use crate::math::{Point, Real, UnitVector};

/// The immutable description of a new contact point, as produced by
/// narrow-phase collision detection.
///
/// The normal is a unit vector pointing from the first body toward the
/// second, in world space. The anchor points are expressed in each body's
/// local frame so that they stay meaningful while the bodies move. The
/// penetration depth must be non-negative: narrow phase only reports points
/// where the bodies actually overlap.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactInfo {
    /// The contact normal, in world space, pointing from `body1` toward `body2`.
    pub normal: UnitVector<Real>,
    /// The penetration depth along `normal`.
    pub penetration: Real,
    /// The anchor point in the local frame of `body1`.
    pub local_p1: Point<Real>,
    /// The anchor point in the local frame of `body2`.
    pub local_p2: Point<Real>,
    /// The first body involved in the contact.
    pub body1: BodyHandle,
    /// The second body involved in the contact.
    pub body2: BodyHandle,
}

impl ContactInfo {
    /// Creates a new contact description.
    pub fn new(
        normal: UnitVector<Real>,
        penetration: Real,
        local_p1: Point<Real>,
        local_p2: Point<Real>,
        body1: BodyHandle,
        body2: BodyHandle,
    ) -> Self {
        debug_assert!(penetration >= 0.0);
        Self {
            normal,
            penetration,
            local_p1,
            local_p2,
            body1,
            body2,
        }
    }
}
