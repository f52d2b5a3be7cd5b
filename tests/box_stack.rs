use approx::{assert_abs_diff_eq, assert_relative_eq};
use cling3d::data::ContactPool;
use cling3d::na;
use cling3d::dynamics::{BodyHandle, BodySet, RigidBody};
use cling3d::geometry::{ContactInfo, PersistentContactManifold};
use cling3d::math::{AngularInertia, Isometry, Point, Real, UnitVector, Vector};

// Two unit boxes, the upper one resting on the lower one with a slight
// interpenetration of the shared face.
const PENETRATION: Real = 5.0e-4;

struct Stack {
    bodies: BodySet,
    lower: BodyHandle,
    upper: BodyHandle,
    pool: ContactPool,
    manifold: PersistentContactManifold,
}

fn stacked_boxes() -> Stack {
    let mut bodies = BodySet::new();
    let lower = bodies.insert(RigidBody::fixed(Isometry::identity()));
    let upper = bodies.insert(RigidBody::new(
        Isometry::translation(0.0, 1.0 - PENETRATION, 0.0),
        1.0,
        AngularInertia::diagonal(1.0 / 6.0),
    ));

    let mut pool = ContactPool::new();
    let mut manifold = PersistentContactManifold::new(lower, upper);

    // One contact per corner of the shared face.
    for (x, z) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
        let info = ContactInfo::new(
            UnitVector::new_normalize(Vector::y()),
            PENETRATION,
            Point::new(x, 0.5, z),
            Point::new(x, -0.5, z),
            lower,
            upper,
        );
        let handle = pool.construct(&info);
        manifold.add(handle, &mut pool);
    }

    Stack {
        bodies,
        lower,
        upper,
        pool,
        manifold,
    }
}

fn refresh(stack: &mut Stack) {
    let t1 = *stack.bodies[stack.lower].position();
    let t2 = *stack.bodies[stack.upper].position();
    stack.manifold.update(&mut stack.pool, &t1, &t2);
}

#[test]
fn resting_stack_keeps_four_corner_contacts() {
    let mut stack = stacked_boxes();
    refresh(&mut stack);

    assert_eq!(stack.manifold.nb_contacts(), 4);

    for i in 0..4 {
        let contact = stack.manifold.contact(&stack.pool, i);

        assert_relative_eq!(contact.penetration(), PENETRATION, epsilon = 1.0e-12);

        // World anchors are the transformed local anchors.
        let t1 = stack.bodies[stack.lower].position();
        let t2 = stack.bodies[stack.upper].position();
        assert_relative_eq!(contact.world_p1(), t1 * contact.local_p1(), epsilon = 1.0e-12);
        assert_relative_eq!(contact.world_p2(), t2 * contact.local_p2(), epsilon = 1.0e-12);

        // The friction basis stays a right-handed orthonormal frame.
        let [t_1, t_2] = *contact.friction_vectors();
        let n = contact.normal().into_inner();
        assert_relative_eq!(t_1.norm(), 1.0, epsilon = 1.0e-10);
        assert_relative_eq!(t_2.norm(), 1.0, epsilon = 1.0e-10);
        assert_relative_eq!(t_1.cross(&t_2), n, epsilon = 1.0e-10);
    }
}

#[test]
fn tangential_slide_beyond_the_threshold_drops_every_contact() {
    let mut stack = stacked_boxes();
    refresh(&mut stack);
    assert_eq!(stack.manifold.nb_contacts(), 4);

    // Slide the upper box by 0.03 in the tangent plane: more than the 0.02
    // drift threshold, so none of the cached points survives.
    let upper = &mut stack.bodies[stack.upper];
    let slid = Isometry::translation(0.0, 1.0 - PENETRATION, 0.03);
    upper.set_position(slid);
    refresh(&mut stack);

    assert_eq!(stack.manifold.nb_contacts(), 0);
    assert!(stack.pool.is_empty());
}

#[test]
fn separating_the_boxes_drops_every_contact() {
    let mut stack = stacked_boxes();
    refresh(&mut stack);
    assert_eq!(stack.manifold.nb_contacts(), 4);

    // Lift the upper box along the normal by more than the interpenetration:
    // every depth turns negative.
    let lifted = Isometry::translation(0.0, 1.0 - PENETRATION + 1.0e-3, 0.0);
    stack.bodies[stack.upper].set_position(lifted);
    refresh(&mut stack);

    assert_eq!(stack.manifold.nb_contacts(), 0);
    assert!(stack.pool.is_empty());
}

#[test]
fn small_twist_about_the_normal_keeps_the_contacts() {
    let mut stack = stacked_boxes();
    refresh(&mut stack);

    // A 0.01 rad twist moves each corner anchor by about 0.007 in the
    // tangent plane, below the drift threshold.
    let twisted = Isometry::from_parts(
        na::Translation3::new(0.0, 1.0 - PENETRATION, 0.0),
        na::UnitQuaternion::from_axis_angle(&Vector::y_axis(), 0.01),
    );
    stack.bodies[stack.upper].set_position(twisted);
    refresh(&mut stack);

    assert_eq!(stack.manifold.nb_contacts(), 4);

    let t2 = *stack.bodies[stack.upper].position();
    for i in 0..4 {
        let contact = stack.manifold.contact(&stack.pool, i);

        // Local anchors are frozen; world anchors follow the rotation.
        assert_abs_diff_eq!(contact.local_p2().y, -0.5, epsilon = 1.0e-12);
        assert_relative_eq!(contact.world_p2(), t2 * contact.local_p2(), epsilon = 1.0e-12);
        assert_relative_eq!(contact.penetration(), PENETRATION, epsilon = 1.0e-10);
    }
}

#[test]
fn quarter_turn_about_the_normal_drops_every_contact() {
    let mut stack = stacked_boxes();
    refresh(&mut stack);

    // After a 90° twist each anchor pair is a full edge length apart in the
    // tangent plane.
    let twisted = Isometry::from_parts(
        na::Translation3::new(0.0, 1.0 - PENETRATION, 0.0),
        na::UnitQuaternion::from_axis_angle(&Vector::y_axis(), std::f64::consts::FRAC_PI_2 as Real),
    );
    stack.bodies[stack.upper].set_position(twisted);
    refresh(&mut stack);

    assert_eq!(stack.manifold.nb_contacts(), 0);
    assert!(stack.pool.is_empty());
}
