use crate::math::{Point, Real, DEFAULT_EPSILON};

/// Projects `pt` onto the triangle `(a, b, c)`.
///
/// Walks the Voronoi regions of the triangle: the result is the vertex, edge
/// point, or interior point of the triangle nearest to `pt`.
pub fn closest_point_in_triangle(
    pt: &Point<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> Point<Real> {
    let ab = b - a;
    let ac = c - a;
    let ap = pt - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = pt - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = pt - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Projects `pt` onto the segment `(a, b)`.
///
/// A degenerate segment collapses to its first endpoint.
pub fn closest_point_on_segment(pt: &Point<Real>, a: &Point<Real>, b: &Point<Real>) -> Point<Real> {
    let ab = b - a;
    let sq_len = ab.norm_squared();
    if sq_len <= DEFAULT_EPSILON {
        return *a;
    }

    let t = ((pt - a).dot(&ab) / sq_len).clamp(0.0, 1.0);
    a + ab * t
}

/// Computes the barycentric coordinates of `pt` with respect to the triangle
/// `(a, b, c)`.
///
/// The returned weights sum to one. For a degenerate triangle the components
/// are not finite; callers must check before using them.
pub fn barycentric_coordinates(
    pt: &Point<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
) -> [Real; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = pt - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    [1.0 - v - w, v, w]
}

/// Computes the barycentric coordinates of `pt` with respect to the segment
/// `(a, b)`.
///
/// A degenerate segment attributes the full weight to its first endpoint.
pub fn segment_barycentric_coordinates(
    pt: &Point<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
) -> [Real; 2] {
    let ab = b - a;
    let sq_len = ab.norm_squared();
    if sq_len <= DEFAULT_EPSILON {
        return [1.0, 0.0];
    }

    let t = (pt - a).dot(&ab) / sq_len;
    [1.0 - t, t]
}
