//! Contact geometry: narrow-phase snapshots and persistent contact manifolds.

pub use self::contact_info::ContactInfo;
pub use self::contact_manifold::{
    PersistentContactManifold, CONTACT_MATCH_SQ_TOLERANCE, MAX_CONTACTS_IN_CACHE,
    PERSISTENT_CONTACT_DIST_THRESHOLD,
};
pub use self::manifold_set::ManifoldSet;

mod contact_info;
mod contact_manifold;
mod manifold_set;
