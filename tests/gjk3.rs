use approx::assert_relative_eq;
use touche3d::body::{Collidable, CollisionBody};
use touche3d::math::{Isometry, Point, Real, Vector};
use touche3d::query::gjk::find_support;
use touche3d::query::{self, MARGIN};
use touche3d::shape::{Ball, Cuboid};

fn ball_at(x: Real, y: Real, z: Real) -> Collidable<Ball> {
    Collidable::new(Ball::new(1.0), Isometry::translation(x, y, z))
}

fn unit_cube_at(x: Real, y: Real, z: Real) -> Collidable<Cuboid> {
    Collidable::new(
        Cuboid::new(Vector::repeat(0.5)),
        Isometry::translation(x, y, z),
    )
}

#[test]
fn support_points_match_their_witnesses() {
    let a = ball_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(2.0, 1.0, -0.5);

    for dir in [
        Vector::new(1.0, 0.0, 0.0),
        Vector::new(-0.3, 2.0, 0.7),
        Vector::new(0.0, -1.0, 1.0),
        Vector::new(-4.2, -0.1, -0.4),
    ] {
        let support = find_support(&a, &b, &dir);
        assert_eq!(
            support.point,
            Point::from(support.witness_a - support.witness_b)
        );
    }
}

#[test]
fn supports_work_under_rotation() {
    let cube = Collidable::new(
        Cuboid::new(Vector::repeat(1.0)),
        Isometry::new(Vector::zeros(), Vector::z() * (45.0 as Real).to_radians()),
    );

    // The furthest point along +x of the rotated cube is a rotated corner.
    let support = cube.support_point(&Vector::x());
    assert_relative_eq!(support.x, (2.0 as Real).sqrt(), epsilon = 1.0e-5);
}

#[test]
fn separated_spheres_do_not_intersect() {
    assert!(!query::intersection_test(
        &ball_at(0.0, 0.0, 0.0),
        &ball_at(3.5, 0.0, 0.0)
    ));
}

#[test]
fn overlapping_spheres_intersect() {
    assert!(query::intersection_test(
        &ball_at(0.0, 0.0, 0.0),
        &ball_at(1.5, 0.0, 0.0)
    ));
}

#[test]
fn near_touching_spheres_intersect_through_the_margin() {
    // 0.01 of clearance, less than the margin skin.
    assert!(query::intersection_test(
        &ball_at(0.0, 0.0, 0.0),
        &ball_at(2.01, 0.0, 0.0)
    ));

    // Clearance beyond the margin skin.
    assert!(!query::intersection_test(
        &ball_at(0.0, 0.0, 0.0),
        &ball_at(2.0 + MARGIN + 0.02, 0.0, 0.0)
    ));
}

#[test]
fn coincident_spheres_intersect() {
    assert!(query::intersection_test(
        &ball_at(0.0, 0.0, 0.0),
        &ball_at(0.0, 0.0, 0.0)
    ));
}

#[test]
fn separated_cuboids_do_not_intersect() {
    assert!(!query::intersection_test(
        &unit_cube_at(0.0, 0.0, 0.0),
        &unit_cube_at(2.0, 0.0, 0.0)
    ));
}

#[test]
fn overlapping_cuboids_intersect() {
    assert!(query::intersection_test(
        &unit_cube_at(0.0, 0.0, 0.0),
        &unit_cube_at(0.5, 0.0, 0.0)
    ));
}

#[test]
fn rotated_cuboids_intersect() {
    // A long thin slab crossed over another one.
    let slab = Cuboid::new(Vector::new(3.0, 0.25, 0.25));
    let a = Collidable::new(slab, Isometry::identity());
    let b = Collidable::new(
        slab,
        Isometry::new(
            Vector::new(0.0, 0.3, 0.0),
            Vector::z() * (90.0 as Real).to_radians(),
        ),
    );

    assert!(query::intersection_test(&a, &b));
}

#[test]
fn rotated_cuboids_do_not_intersect_when_apart() {
    let slab = Cuboid::new(Vector::new(2.0, 1.0, 0.5));
    let a = Collidable::new(slab, Isometry::identity());
    let b = Collidable::new(
        slab,
        Isometry::new(
            Vector::new(6.0, 0.0, 0.0),
            Vector::z() * (45.0 as Real).to_radians(),
        ),
    );

    assert!(!query::intersection_test(&a, &b));
}

#[test]
fn box_against_sphere_above() {
    let cube = unit_cube_at(0.0, 0.0, 0.0);

    // 0.2 of clearance.
    let apart = Collidable::new(Ball::new(0.5), Isometry::translation(0.0, 1.2, 0.0));
    assert!(!query::intersection_test(&cube, &apart));

    let closer = Collidable::new(Ball::new(0.5), Isometry::translation(0.0, 0.9, 0.0));
    assert!(query::intersection_test(&cube, &closer));
}

#[test]
fn queries_terminate_on_far_apart_pairs() {
    // Distances spanning several orders of magnitude all resolve within the
    // iteration budget.
    for exp in 0..7 {
        let offset = (10.0 as Real).powi(exp) + 3.0;
        assert!(!query::intersection_test(
            &ball_at(0.0, 0.0, 0.0),
            &ball_at(offset, offset * 0.5, -offset)
        ));
    }
}
