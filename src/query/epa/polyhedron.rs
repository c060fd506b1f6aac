use num::Bounded;

use crate::body::CollisionBody;
use crate::math::{Point, Real, Vector};
use crate::query::contact::{assemble_penetration_contact, ContactDetails};
use crate::query::epa::EPA_TOLERANCE;
use crate::query::gjk::{eps_tol, find_support, Simplex, SupportPointId, SupportPointPool};
use crate::query::MAX_ITERATIONS;
use crate::utils;

/// A triangular face of the expanding polytope.
///
/// `adj[0]` is the neighbor across the edge `ab`, `adj[1]` across `bc`,
/// `adj[2]` across `ca`. Deleted faces keep their storage and are skipped by
/// every traversal.
struct Face {
    pts: [SupportPointId; 3],
    adj: [usize; 3],
    normal: Vector<Real>,
    deleted: bool,
}

impl Face {
    fn new(pool: &SupportPointPool, pts: [SupportPointId; 3], adj: [usize; 3]) -> Self {
        // Degenerate triangles get a zero normal. The visibility test then
        // reports them as not visible, which keeps them on the silhouette
        // side instead of corrupting the carve.
        let normal = utils::ccw_face_normal([
            &pool[pts[0]].point,
            &pool[pts[1]].point,
            &pool[pts[2]].point,
        ])
        .map(|n| n.into_inner())
        .unwrap_or_else(Vector::zeros);

        Face {
            pts,
            adj,
            normal,
            deleted: false,
        }
    }

    fn edge(&self, slot: usize) -> (SupportPointId, SupportPointId) {
        (self.pts[slot], self.pts[(slot + 1) % 3])
    }
}

/// One silhouette edge: a retained face, the slot of that face that pointed
/// into the carved region, and the edge vertices in the retained face's
/// winding.
struct SilhouetteEdge {
    face: usize,
    slot: usize,
    start: SupportPointId,
    end: SupportPointId,
}

/// The expanding polytope: a face-adjacency mesh over pooled CSO points,
/// grown toward the CSO surface until the face closest to the origin
/// approximates the contact plane.
pub struct Polyhedron {
    faces: Vec<Face>,
    silhouette: Vec<SilhouetteEdge>,
    closest_face: usize,
    closest_distance: Real,
    closest_point: Point<Real>,
}

impl Polyhedron {
    /// Builds the initial tetrahedron from a simplex enclosing the origin.
    ///
    /// The polyhedron takes over the simplex's support points; they are freed
    /// by [`Polyhedron::release`], not by the simplex. The vertex order
    /// produced by the tetrahedron branch of GJK is trusted to make all four
    /// normals point outward.
    pub fn from_simplex(simplex: &Simplex, pool: &SupportPointPool) -> Self {
        let p = simplex.points();
        debug_assert_eq!(p.len(), 4);

        let faces = vec![
            Face::new(pool, [p[2], p[1], p[0]], [1, 2, 3]),
            Face::new(pool, [p[3], p[1], p[2]], [2, 0, 3]),
            Face::new(pool, [p[1], p[3], p[0]], [1, 3, 0]),
            Face::new(pool, [p[0], p[3], p[2]], [2, 1, 0]),
        ];

        Polyhedron {
            faces,
            silhouette: Vec::new(),
            closest_face: 0,
            closest_distance: Real::max_value(),
            closest_point: Point::origin(),
        }
    }

    /// Returns every support point referenced by the polytope to the pool.
    ///
    /// Support points are shared between faces; each distinct handle is freed
    /// exactly once.
    pub fn release(&mut self, pool: &mut SupportPointPool) {
        pool.free_distinct(self.faces.iter().flat_map(|face| face.pts));
        self.faces.clear();
    }

    /// Expands the polytope toward the CSO surface and assembles the contact
    /// from the face that ends up closest to the origin.
    pub fn expand<A, B>(
        &mut self,
        a: &A,
        b: &B,
        pool: &mut SupportPointPool,
    ) -> Option<ContactDetails>
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        let mut iterations = 0;

        loop {
            iterations += 1;
            self.find_face_closest_to_origin(pool);

            if self.closest_distance == Real::max_value() {
                log::debug!("EPA ran out of active faces.");
                return None;
            }

            // A face passing through the origin cannot provide a search
            // direction through its closest point; its normal can.
            let dir = if self.closest_distance < eps_tol() {
                self.faces[self.closest_face].normal
            } else {
                self.closest_point.coords
            };

            if dir == Vector::zeros() {
                // Degenerate closest face right on the origin; the best-known
                // feature is all we have.
                return self.assemble(a, b, pool);
            }

            let support = find_support(a, b, &dir);
            let gap = (support.point - self.closest_point).norm_squared();

            if iterations == MAX_ITERATIONS
                || (gap < EPA_TOLERANCE && self.closest_distance > eps_tol())
            {
                if iterations == MAX_ITERATIONS {
                    log::debug!("EPA iteration budget exhausted, using the best face so far.");
                }
                return self.assemble(a, b, pool);
            }

            let id = pool.insert(support);
            if !self.add_vertex(id, pool) {
                pool.free(id);
                return None;
            }
        }
    }

    /// Finds the non-deleted face whose closest point to the origin is
    /// nearest, recording the face index, the squared distance, and the
    /// closest point itself.
    fn find_face_closest_to_origin(&mut self, pool: &SupportPointPool) {
        let origin = Point::origin();
        self.closest_distance = Real::max_value();

        for (i, face) in self.faces.iter().enumerate() {
            if face.deleted {
                continue;
            }

            let q = utils::closest_point_in_triangle(
                &origin,
                &pool[face.pts[0]].point,
                &pool[face.pts[1]].point,
                &pool[face.pts[2]].point,
            );
            let dist = q.coords.norm_squared();

            if dist < self.closest_distance {
                self.closest_distance = dist;
                self.closest_face = i;
                self.closest_point = q;
            }
        }
    }

    fn assemble<A, B>(&self, a: &A, b: &B, pool: &SupportPointPool) -> Option<ContactDetails>
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        let face = &self.faces[self.closest_face];
        let pa = pool[face.pts[0]];
        let pb = pool[face.pts[1]];
        let pc = pool[face.pts[2]];

        let weights =
            utils::barycentric_coordinates(&self.closest_point, &pa.point, &pb.point, &pc.point);
        assemble_penetration_contact(a, b, &[pa, pb, pc], &weights, &self.closest_point.coords)
    }

    /// Carves every face visible from `vertex` out of the polytope and
    /// stitches the resulting hole to the new vertex with a fan of fresh
    /// faces.
    ///
    /// Returns `false` when the silhouette cannot be extracted, which only
    /// happens on numerically broken topologies.
    fn add_vertex(&mut self, vertex: SupportPointId, pool: &SupportPointPool) -> bool {
        let vpoint = pool[vertex].point;

        self.silhouette.clear();
        self.faces[self.closest_face].deleted = true;
        let adj = self.faces[self.closest_face].adj;
        for neighbor in adj {
            self.carve(pool, &vpoint, neighbor, self.closest_face);
        }

        if self.silhouette.is_empty() {
            log::debug!("EPA silhouette extraction failed.");
            return false;
        }
        if !self.order_silhouette() {
            log::debug!("EPA silhouette does not close into a ring.");
            return false;
        }

        let base = self.faces.len();
        let count = self.silhouette.len();
        for i in 0..count {
            let edge = &self.silhouette[i];
            // The new face shares its `ca` edge with the retained face and is
            // fanned to its ring neighbors across the edges touching `vertex`.
            let face = Face::new(
                pool,
                [edge.start, vertex, edge.end],
                [
                    base + (i + 1) % count,
                    base + (i + count - 1) % count,
                    edge.face,
                ],
            );
            self.faces[edge.face].adj[edge.slot] = base + i;
            self.faces.push(face);
        }

        true
    }

    /// Depth-first walk of the faces visible from `vertex`, deleting them and
    /// recording one silhouette edge each time a retained face is reached
    /// from a deleted one.
    fn carve(&mut self, pool: &SupportPointPool, vertex: &Point<Real>, face_id: usize, source: usize) {
        if self.faces[face_id].deleted {
            return;
        }

        let visible = {
            let face = &self.faces[face_id];
            let anchor = pool[face.pts[0]].point;
            face.normal.dot(&(vertex - anchor)) > 0.0
        };

        if visible {
            self.faces[face_id].deleted = true;
            let adj = self.faces[face_id].adj;
            for neighbor in adj {
                self.carve(pool, vertex, neighbor, face_id);
            }
        } else {
            let face = &self.faces[face_id];
            if let Some(slot) = face.adj.iter().position(|&n| n == source) {
                let (start, end) = face.edge(slot);
                self.silhouette.push(SilhouetteEdge {
                    face: face_id,
                    slot,
                    start,
                    end,
                });
            }
        }
    }

    /// Re-orders the silhouette so that each edge's start vertex is the next
    /// edge's end vertex, forming a closed ring around the carved region.
    fn order_silhouette(&mut self) -> bool {
        let n = self.silhouette.len();
        for i in 0..n - 1 {
            let tail = self.silhouette[i].start;
            match (i + 1..n).find(|&j| self.silhouette[j].end == tail) {
                Some(j) => self.silhouette.swap(i + 1, j),
                None => return false,
            }
        }

        self.silhouette[n - 1].start == self.silhouette[0].end
    }

    /// Validates the adjacency invariants of the polytope.
    #[allow(dead_code)]
    fn check_topology(&self, pool: &SupportPointPool) {
        for i in 0..self.faces.len() {
            let face = &self.faces[i];
            if face.deleted {
                continue;
            }

            assert!(face.pts[0] != face.pts[1]);
            assert!(face.pts[0] != face.pts[2]);
            assert!(face.pts[1] != face.pts[2]);
            assert!(face.normal.norm_squared() > 0.0);

            for slot in 0..3 {
                let neighbor = &self.faces[face.adj[slot]];
                assert!(!neighbor.deleted);

                let (start, end) = face.edge(slot);
                assert!(neighbor.pts.contains(&start));
                assert!(neighbor.pts.contains(&end));

                // Each neighbor must list this face in exactly one slot.
                assert_eq!(neighbor.adj.iter().filter(|&&n| n == i).count(), 1);

                // Outwardness of this face as seen from the neighbors'
                // vertices (convexity of the polytope).
                for pt in neighbor.pts {
                    let offset = pool[pt].point - pool[face.pts[0]].point;
                    assert!(face.normal.dot(&offset) < eps_tol());
                }
            }
        }
    }
}
