use crate::body::CollisionBody;
use crate::math::{Point, Real, Vector};
use crate::query::contact::{assemble_shallow_contact, ContactDetails};
use crate::query::gjk::{eps_tol, find_support, SupportPointId, SupportPointPool};
use crate::query::{MARGIN, MAX_ITERATIONS};
use crate::utils;

/// Outcome of one GJK iteration.
#[derive(Clone, Debug)]
pub enum GjkStatus {
    /// The simplex was refined; keep iterating.
    Continue,
    /// The bodies neither overlap nor touch within the margin.
    NoOverlap,
    /// The bodies are separated by less than the contact margin.
    ShallowContact(ContactDetails),
    /// The simplex is a tetrahedron enclosing the origin; the bodies overlap
    /// and EPA can compute the penetration.
    EnclosesOrigin,
}

/// A simplex of the CSO: one to four support points progressively built to
/// enclose the origin, plus the direction along which the next support point
/// will be sampled.
pub struct Simplex {
    points: [SupportPointId; 4],
    len: usize,
    next_direction: Vector<Real>,
    iterations: usize,
}

impl Simplex {
    /// Creates an empty simplex for the pair `(a, b)`.
    ///
    /// The initial search direction joins the body positions; a canonical axis
    /// stands in when both coincide so the first sample is always well-defined.
    pub fn new<A, B>(a: &A, b: &B) -> Self
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        let mut next_direction = b.position() - a.position();
        if relative_eq!(next_direction, Vector::zeros()) {
            next_direction = Vector::x();
        }

        Simplex {
            points: [SupportPointId(u32::MAX); 4],
            len: 0,
            next_direction,
            iterations: 0,
        }
    }

    /// The simplex points, oldest first.
    pub fn points(&self) -> &[SupportPointId] {
        &self.points[..self.len]
    }

    /// Returns every point of the simplex to the pool.
    pub fn release(&mut self, pool: &mut SupportPointPool) {
        for id in &self.points[..self.len] {
            pool.free(*id);
        }
        self.len = 0;
    }

    fn push(&mut self, id: SupportPointId) {
        self.points[self.len] = id;
        self.len += 1;
    }

    /// Runs one GJK iteration: samples the support point along the current
    /// search direction, appends it, and refines the simplex.
    pub fn add_point<A, B>(&mut self, a: &A, b: &B, pool: &mut SupportPointPool) -> GjkStatus
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        self.iterations += 1;
        if self.iterations == MAX_ITERATIONS {
            log::debug!("GJK iteration budget exhausted, reporting a conservative miss.");
            return GjkStatus::NoOverlap;
        }

        let support = find_support(a, b, &self.next_direction);
        self.push(pool.insert(support));

        if support.point.coords.dot(&self.next_direction) < 0.0 && self.len > 1 {
            // The newest sample did not pass the origin, so the CSO cannot
            // contain it: the bodies are separated. Near-misses within the
            // margin skin are still reported as shallow contacts.
            if let Some(details) = self.margin_contact(a, b, pool) {
                return GjkStatus::ShallowContact(details);
            }
            return GjkStatus::NoOverlap;
        }

        self.update_direction(pool)
    }

    /// Tests the current simplex feature against the contact margin.
    ///
    /// The triangle `(points[0], points[1], points[2])` is tested when three
    /// points are available, the segment `(points[0], points[1])` otherwise:
    /// sphere-like pairs separate while the simplex is still a segment and
    /// would never reach the triangle test.
    fn margin_contact<A, B>(
        &self,
        a: &A,
        b: &B,
        pool: &SupportPointPool,
    ) -> Option<ContactDetails>
    where
        A: ?Sized + CollisionBody,
        B: ?Sized + CollisionBody,
    {
        let origin = Point::origin();

        if self.len >= 3 {
            let pa = pool[self.points[0]];
            let pb = pool[self.points[1]];
            let pc = pool[self.points[2]];

            let q = utils::closest_point_in_triangle(&origin, &pa.point, &pb.point, &pc.point);
            if q.coords.norm_squared() <= MARGIN * MARGIN {
                let weights =
                    utils::barycentric_coordinates(&q, &pa.point, &pb.point, &pc.point);
                return assemble_shallow_contact(a, b, &[pa, pb, pc], &weights, &q.coords);
            }
        } else {
            let pa = pool[self.points[0]];
            let pb = pool[self.points[1]];

            let q = utils::closest_point_on_segment(&origin, &pa.point, &pb.point);
            if q.coords.norm_squared() <= MARGIN * MARGIN {
                let weights = utils::segment_barycentric_coordinates(&q, &pa.point, &pb.point);
                return assemble_shallow_contact(a, b, &[pa, pb], &weights, &q.coords);
            }
        }

        None
    }

    /// Recomputes the search direction from the current simplex arity,
    /// discarding the points that cannot help enclosing the origin.
    pub fn update_direction(&mut self, pool: &mut SupportPointPool) -> GjkStatus {
        match self.len {
            1 => {
                let a = pool[self.points[0]].point;
                self.next_direction = -a.coords;
                if relative_eq!(self.next_direction, Vector::zeros()) {
                    // The sample hit the origin exactly; any direction works.
                    self.next_direction = Vector::x();
                }
                GjkStatus::Continue
            }
            2 => self.update_direction_segment(pool),
            3 => self.update_direction_triangle(pool),
            4 => self.update_direction_tetrahedron(pool),
            _ => unreachable!(),
        }
    }

    fn update_direction_segment(&mut self, pool: &mut SupportPointPool) -> GjkStatus {
        let (idb, ida) = (self.points[0], self.points[1]);
        let a = pool[ida].point;
        let b = pool[idb].point;

        let ab = b - a;
        let ao = -a.coords;

        if ab.dot(&ao) < 0.0 {
            // The origin is behind `a`; `b` cannot contribute anymore.
            pool.free(idb);
            self.points[0] = ida;
            self.len = 1;
            self.next_direction = ao;
        } else {
            self.next_direction = ab.cross(&ao).cross(&ab);
            if self.next_direction == Vector::zeros() {
                // The origin lies on the segment's line; any direction
                // perpendicular-ish to the segment does.
                self.next_direction = match ab.try_normalize(0.0) {
                    Some(n) => Vector::new(1.0 - n.x.abs(), 1.0 - n.y.abs(), 1.0 - n.z.abs()),
                    None => Vector::x(),
                };
            }
        }

        GjkStatus::Continue
    }

    fn update_direction_triangle(&mut self, pool: &mut SupportPointPool) -> GjkStatus {
        let (idc, idb, ida) = (self.points[0], self.points[1], self.points[2]);
        let a = pool[ida].point;
        let b = pool[idb].point;
        let c = pool[idc].point;

        let ab = b - a;
        let ac = c - a;
        let ao = -a.coords;
        let n = ab.cross(&ac);
        let edge_ab = ab.cross(&n);
        let edge_ac = n.cross(&ac);

        if edge_ac.dot(&ao) >= 0.0 {
            if ac.dot(&ao) >= 0.0 {
                pool.free(idb);
                self.points[0] = idc;
                self.points[1] = ida;
                self.len = 2;
                self.next_direction = ac.cross(&ao).cross(&ac);
            } else if ab.dot(&ao) >= 0.0 {
                pool.free(idc);
                self.points[0] = idb;
                self.points[1] = ida;
                self.len = 2;
                self.next_direction = ab.cross(&ao).cross(&ab);
            } else {
                self.reduce_to_point(ida, idb, idc, pool);
            }
        } else if edge_ab.dot(&ao) >= 0.0 {
            if ab.dot(&ao) >= 0.0 {
                pool.free(idc);
                self.points[0] = idb;
                self.points[1] = ida;
                self.len = 2;
                self.next_direction = ab.cross(&ao).cross(&ab);
            } else {
                self.reduce_to_point(ida, idb, idc, pool);
            }
        } else if n.dot(&ao) >= 0.0 {
            // The origin is on the triangle's front side: keep all three
            // points, reordered so the next sample closes a correctly wound
            // tetrahedron.
            self.points[0] = ida;
            self.points[1] = idb;
            self.points[2] = idc;
            self.next_direction = n;
        } else {
            // Back side: same triangle, opposite direction, order untouched.
            self.next_direction = -n;
        }

        GjkStatus::Continue
    }

    fn reduce_to_point(
        &mut self,
        keep: SupportPointId,
        drop1: SupportPointId,
        drop2: SupportPointId,
        pool: &mut SupportPointPool,
    ) {
        pool.free(drop1);
        pool.free(drop2);
        self.points[0] = keep;
        self.len = 1;
        self.next_direction = -pool[keep].point.coords;
    }

    fn update_direction_tetrahedron(&mut self, pool: &mut SupportPointPool) -> GjkStatus {
        let (idd, idc, idb, ida) =
            (self.points[0], self.points[1], self.points[2], self.points[3]);

        // The four candidate faces, each with the point it would discard.
        // Evaluation order breaks ties: the first best face wins.
        let faces = [
            [idb, idc, idd, ida],
            [ida, idc, idb, idd],
            [idc, ida, idd, idb],
            [idd, ida, idb, idc],
        ];

        let mut best: Option<([SupportPointId; 3], SupportPointId, Vector<Real>)> = None;
        let mut best_dot = eps_tol();

        for [f0, f1, f2, dropped] in faces {
            let p0 = pool[f0].point;
            let p1 = pool[f1].point;
            let p2 = pool[f2].point;

            let normal = match (p1 - p0).cross(&(p2 - p0)).try_normalize(0.0) {
                Some(normal) => normal,
                None => continue,
            };
            let toward_origin =
                match (-(p0.coords + p1.coords + p2.coords)).try_normalize(0.0) {
                    Some(toward_origin) => toward_origin,
                    None => continue,
                };

            let dot = normal.dot(&toward_origin);
            if dot > best_dot {
                best_dot = dot;
                best = Some(([f0, f1, f2], dropped, normal));
            }
        }

        match best {
            Some((pts, dropped, normal)) => {
                // The origin is outside through that face: reduce to it and
                // search along its normal.
                pool.free(dropped);
                self.points[0] = pts[0];
                self.points[1] = pts[1];
                self.points[2] = pts[2];
                self.len = 3;
                self.next_direction = normal;
                GjkStatus::Continue
            }
            None => GjkStatus::EnclosesOrigin,
        }
    }
}
