//! Traits for support mapping based shapes.

use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;

/// Trait implemented by convex shapes representable by a support mapping function.
///
/// The support function of a convex shape returns the point of that shape that
/// is furthest in a given direction. It is the only thing GJK and EPA need to
/// know about a shape: no vertices, faces, or any other explicit geometry are
/// ever queried.
///
/// Implementors only need to provide [`SupportMap::local_support_point`]; the
/// other methods have default implementations handling transformations and
/// pre-normalized directions.
pub trait SupportMap {
    /// Evaluates the support function of this shape in its local space.
    ///
    /// `dir` does not need to be normalized, but must not be zero.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Same as [`SupportMap::local_support_point`] except that `dir` is normalized.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    /// Evaluates the support function of this shape transformed by `transform`.
    ///
    /// Both `dir` and the result are expressed in the space `transform` maps to.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point(&local_dir)
    }

    /// Same as [`SupportMap::support_point`] except that `dir` is normalized.
    fn support_point_toward(
        &self,
        transform: &Isometry<Real>,
        dir: &Unit<Vector<Real>>,
    ) -> Point<Real> {
        let local_dir = Unit::new_unchecked(transform.inverse_transform_vector(dir));
        transform * self.local_support_point_toward(&local_dir)
    }
}
