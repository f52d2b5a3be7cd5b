//! Rigid bodies and the constraints coupling them.

pub use self::body_set::{BodyHandle, BodySet};
pub use self::constraint::{Constraint, JacobianRow};
pub use self::contact::Contact;
pub use self::rigid_body::RigidBody;

mod body_set;
mod constraint;
mod contact;
mod rigid_body;
