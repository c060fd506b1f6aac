use std::collections::HashSet;

use crate::body::CollisionBody;
use crate::math::{Point, Real, Vector};

/// A point of the configuration-space obstacle (CSO).
///
/// The CSO of two bodies is their Minkowski difference: each of its points is
/// the difference of two world-space points, one on each body. Both witnesses
/// are kept alongside the difference so contact locations on the bodies can be
/// recovered once the closest CSO feature is known.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SupportPoint {
    /// The point on the CSO. Always equal to `witness_a - witness_b`.
    pub point: Point<Real>,
    /// The point of body A furthest in the sampled direction.
    pub witness_a: Point<Real>,
    /// The point of body B furthest in the opposite direction.
    pub witness_b: Point<Real>,
}

impl SupportPoint {
    /// Initializes a CSO point from its two witnesses.
    pub fn new(witness_a: Point<Real>, witness_b: Point<Real>) -> Self {
        SupportPoint {
            point: Point::from(witness_a - witness_b),
            witness_a,
            witness_b,
        }
    }
}

/// Samples the support point of the CSO of `a` and `b` toward `dir`.
///
/// `dir` does not need to be normalized, but must not be zero.
pub fn find_support<A, B>(a: &A, b: &B, dir: &Vector<Real>) -> SupportPoint
where
    A: ?Sized + CollisionBody,
    B: ?Sized + CollisionBody,
{
    let witness_a = a.support_point(dir);
    let witness_b = b.support_point(&-*dir);
    SupportPoint::new(witness_a, witness_b)
}

/// Handle of a [`SupportPoint`] stored in a [`SupportPointPool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SupportPointId(pub(crate) u32);

/// A pooled arena of support points.
///
/// Simplices and polyhedra refer to their support points through
/// [`SupportPointId`] handles; the backing slots are recycled across queries
/// so steady-state collision testing does not allocate. Handing out more
/// points than the pool ever held simply grows it.
#[derive(Default)]
pub struct SupportPointPool {
    slots: Vec<SupportPoint>,
    free: Vec<u32>,
}

impl SupportPointPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `point` into a recycled slot, or a fresh one if none is free.
    pub fn insert(&mut self, point: SupportPoint) -> SupportPointId {
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = point;
            SupportPointId(slot)
        } else {
            self.slots.push(point);
            SupportPointId(self.slots.len() as u32 - 1)
        }
    }

    /// Returns the slot of `id` to the pool.
    ///
    /// The handle must not be dereferenced nor freed again afterwards.
    pub fn free(&mut self, id: SupportPointId) {
        self.free.push(id.0);
    }

    /// Returns each distinct handle yielded by `ids` to the pool exactly once.
    ///
    /// A support point shared by several polyhedron faces is reachable through
    /// each of them; the membership set makes the release idempotent.
    pub fn free_distinct(&mut self, ids: impl IntoIterator<Item = SupportPointId>) {
        let mut seen = HashSet::new();
        for id in ids {
            if seen.insert(id) {
                self.free(id);
            }
        }
    }

    /// The number of support points currently handed out.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl std::ops::Index<SupportPointId> for SupportPointPool {
    type Output = SupportPoint;

    #[inline]
    fn index(&self, id: SupportPointId) -> &SupportPoint {
        &self.slots[id.0 as usize]
    }
}
