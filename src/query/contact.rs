use na::Unit;

use crate::body::CollisionBody;
use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::epa::Polyhedron;
use crate::query::gjk::{GjkStatus, Simplex, SupportPoint, SupportPointPool};
use crate::query::MARGIN;

/// Geometric and material description of a single contact point between two
/// convex bodies.
///
/// By convention the normal points from the first body toward the second.
/// The identity of the pair is not recorded; it stays with the caller that
/// passed the two bodies to [`test_collision`](crate::query::test_collision).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactDetails {
    /// The world-space contact point, halfway between the two witness points.
    pub contact_point: Point<Real>,
    /// The contact point in the first body's local frame.
    pub contact_point_in_a: Point<Real>,
    /// The contact point in the second body's local frame.
    pub contact_point_in_b: Point<Real>,
    /// The unit contact normal, pointing from the first body toward the second.
    pub contact_normal: Unit<Vector<Real>>,
    /// How deep the bodies interpenetrate, including the contact margin.
    pub penetration_depth: Real,
    /// The restitution coefficient of the pair (mean of the bodies').
    pub restitution: Real,
    /// The friction coefficient of the pair (mean of the bodies').
    pub friction: Real,
}

/// Assembles the contact for a pair separated by less than the margin.
///
/// `closest` is the point of the CSO feature nearest to the origin and
/// `weights` its barycentric coordinates with respect to `supports`.
pub(crate) fn assemble_shallow_contact<A, B>(
    a: &A,
    b: &B,
    supports: &[SupportPoint],
    weights: &[Real],
    closest: &Vector<Real>,
) -> Option<ContactDetails>
where
    A: ?Sized + CollisionBody,
    B: ?Sized + CollisionBody,
{
    assemble_contact(a, b, supports, weights, closest, true)
}

/// Assembles the contact for an interpenetrating pair from the closest face
/// found by EPA.
pub(crate) fn assemble_penetration_contact<A, B>(
    a: &A,
    b: &B,
    supports: &[SupportPoint],
    weights: &[Real],
    closest: &Vector<Real>,
) -> Option<ContactDetails>
where
    A: ?Sized + CollisionBody,
    B: ?Sized + CollisionBody,
{
    assemble_contact(a, b, supports, weights, closest, false)
}

fn assemble_contact<A, B>(
    body_a: &A,
    body_b: &B,
    supports: &[SupportPoint],
    weights: &[Real],
    closest: &Vector<Real>,
    shallow: bool,
) -> Option<ContactDetails>
where
    A: ?Sized + CollisionBody,
    B: ?Sized + CollisionBody,
{
    if weights.iter().any(|w| !w.is_finite()) {
        // Degenerate closest feature (zero-area triangle); better a missed
        // contact than a made-up one.
        log::debug!("Contact assembly hit degenerate barycentric coordinates.");
        return None;
    }

    // A zero `closest` means the origin lies on the CSO feature: the bodies
    // touch exactly. The center separation stands in as the normal direction,
    // then an arbitrary axis when even that is zero.
    let mut contact_normal = Unit::try_new(*closest, 0.0)
        .or_else(|| Unit::try_new(body_b.position() - body_a.position(), DEFAULT_EPSILON))
        .unwrap_or_else(Vector::y_axis);

    let penetration_depth = if shallow {
        contact_normal = -contact_normal;
        MARGIN - closest.norm()
    } else {
        closest.norm() + MARGIN
    };

    let mut witness_a = Vector::zeros();
    for (support, weight) in supports.iter().zip(weights) {
        witness_a += support.witness_a.coords * *weight;
    }
    let point_in_a = Point::from(witness_a);

    let point_in_b = if shallow {
        point_in_a + contact_normal.into_inner() * -penetration_depth
    } else {
        let mut witness_b = Vector::zeros();
        for (support, weight) in supports.iter().zip(weights) {
            witness_b += support.witness_b.coords * *weight;
        }
        Point::from(witness_b)
    };

    Some(ContactDetails {
        contact_point: na::center(&point_in_a, &point_in_b),
        contact_point_in_a: body_a.inverse_transform_point(&point_in_a),
        contact_point_in_b: body_b.inverse_transform_point(&point_in_b),
        contact_normal,
        penetration_depth,
        restitution: (body_a.restitution() + body_b.restitution()) / 2.0,
        friction: (body_a.friction() + body_b.friction()) / 2.0,
    })
}

/// A reusable collision-detection context.
///
/// The detector owns the support-point pool, so repeated queries recycle
/// their allocations. Keep one detector per thread; a query borrows it
/// mutably for its whole duration.
#[derive(Default)]
pub struct CollisionDetector {
    pool: SupportPointPool,
}

impl CollisionDetector {
    /// Creates a detector with an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests a pair of bodies for contact.
    ///
    /// Returns the contact point when the bodies overlap or approach each
    /// other within [`MARGIN`](crate::query::MARGIN), `None` otherwise.
    /// Queries that degenerate numerically also report `None`: a missed
    /// contact for one step is recoverable, a fabricated one is not.
    pub fn test_collision<A, B>(&mut self, a: &A, b: &B) -> Option<ContactDetails>
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        let mut simplex = Simplex::new(a, b);

        loop {
            match simplex.add_point(a, b, &mut self.pool) {
                GjkStatus::Continue => {}
                GjkStatus::NoOverlap => {
                    simplex.release(&mut self.pool);
                    return None;
                }
                GjkStatus::ShallowContact(details) => {
                    simplex.release(&mut self.pool);
                    return Some(details);
                }
                GjkStatus::EnclosesOrigin => break,
            }
        }

        // The polyhedron takes over the simplex points and frees them with
        // its own, deduplicating handles shared between faces.
        let mut polyhedron = Polyhedron::from_simplex(&simplex, &self.pool);
        let result = polyhedron.expand(a, b, &mut self.pool);
        polyhedron.release(&mut self.pool);
        result
    }

    /// Tests whether two bodies overlap or touch within the margin, without
    /// assembling contact information.
    pub fn intersection_test<A, B>(&mut self, a: &A, b: &B) -> bool
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        let mut simplex = Simplex::new(a, b);

        let result = loop {
            match simplex.add_point(a, b, &mut self.pool) {
                GjkStatus::Continue => {}
                GjkStatus::NoOverlap => break false,
                GjkStatus::ShallowContact(_) => break true,
                GjkStatus::EnclosesOrigin => break true,
            }
        };

        simplex.release(&mut self.pool);
        result
    }
}

/// Tests a pair of bodies for contact using a throwaway detector.
///
/// Prefer keeping a [`CollisionDetector`] around when testing many pairs.
pub fn test_collision<A, B>(a: &A, b: &B) -> Option<ContactDetails>
where
    A: ?Sized + CollisionBody,
    B: ?Sized + CollisionBody,
{
    CollisionDetector::new().test_collision(a, b)
}

/// Tests whether two bodies overlap or touch within the margin, using a
/// throwaway detector.
pub fn intersection_test<A, B>(a: &A, b: &B) -> bool
where
    A: ?Sized + CollisionBody,
    B: ?Sized + CollisionBody,
{
    CollisionDetector::new().intersection_test(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Collidable;
    use crate::math::Isometry;
    use crate::shape::{Ball, Cuboid};

    fn ball_at(x: Real) -> Collidable<Ball> {
        Collidable::new(Ball::new(1.0), Isometry::translation(x, 0.0, 0.0))
    }

    #[test]
    fn pool_is_balanced_after_every_query_kind() {
        let mut detector = CollisionDetector::new();

        // Miss, shallow hit, deep hit.
        for x in [3.5, 2.02, 1.5] {
            let _ = detector.test_collision(&ball_at(0.0), &ball_at(x));
            assert_eq!(detector.pool.live_count(), 0);
        }

        // Boxes go through the tetrahedron and EPA paths.
        let cube = Collidable::new(Cuboid::new(Vector::repeat(0.5)), Isometry::identity());
        let other = Collidable::new(
            Cuboid::new(Vector::repeat(0.5)),
            Isometry::translation(0.5, 0.0, 0.0),
        );
        let _ = detector.test_collision(&cube, &other);
        assert_eq!(detector.pool.live_count(), 0);

        let _ = detector.intersection_test(&cube, &other);
        assert_eq!(detector.pool.live_count(), 0);
    }

    #[test]
    fn detector_can_be_reused_across_queries() {
        let mut detector = CollisionDetector::new();

        let first = detector.test_collision(&ball_at(0.0), &ball_at(1.5)).unwrap();
        let second = detector.test_collision(&ball_at(0.0), &ball_at(1.5)).unwrap();

        assert_eq!(first, second);
    }
}
