//! The facet of a rigid body visible to the collision queries.

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;

/// Minimal view of a rigid body required by the collision queries.
///
/// A collision query only needs a world-space support function, the body
/// position, the inverse of the body transform, and the two contact material
/// coefficients. Anything providing these can be tested for contacts; the
/// rest of the rigid-body state (velocities, mass, inertia) never enters the
/// narrow phase.
pub trait CollisionBody {
    /// The world-space point of this body that is furthest in the direction `dir`.
    ///
    /// `dir` does not need to be normalized, but must not be zero.
    fn support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// The world-space position of this body.
    fn position(&self) -> Point<Real>;

    /// Transforms a world-space point into this body's local frame.
    fn inverse_transform_point(&self, point: &Point<Real>) -> Point<Real>;

    /// The restitution coefficient of this body.
    fn restitution(&self) -> Real;

    /// The friction coefficient of this body.
    fn friction(&self) -> Real;
}

/// A convex shape positioned in world space, together with its contact
/// material.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Collidable<S> {
    /// The convex shape of this body.
    pub shape: S,
    /// The world-space pose of this body.
    pub position: Isometry<Real>,
    /// The restitution coefficient of this body.
    pub restitution: Real,
    /// The friction coefficient of this body.
    pub friction: Real,
}

impl<S: SupportMap> Collidable<S> {
    /// Creates a body from a shape and a pose, with default material
    /// coefficients (no restitution, friction 0.5).
    pub fn new(shape: S, position: Isometry<Real>) -> Self {
        Collidable {
            shape,
            position,
            restitution: 0.0,
            friction: 0.5,
        }
    }
}

impl<S: SupportMap> CollisionBody for Collidable<S> {
    #[inline]
    fn support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.shape.support_point(&self.position, dir)
    }

    #[inline]
    fn position(&self) -> Point<Real> {
        Point::from(self.position.translation.vector)
    }

    #[inline]
    fn inverse_transform_point(&self, point: &Point<Real>) -> Point<Real> {
        self.position.inverse_transform_point(point)
    }

    #[inline]
    fn restitution(&self) -> Real {
        self.restitution
    }

    #[inline]
    fn friction(&self) -> Real {
        self.friction
    }
}
