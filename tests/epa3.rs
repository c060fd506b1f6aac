use approx::assert_relative_eq;
use touche3d::body::Collidable;
use touche3d::math::{Isometry, Real, Vector};
use touche3d::query::{self, MARGIN};
use touche3d::shape::{Ball, Cuboid};

fn ball_at(x: Real, y: Real, z: Real) -> Collidable<Ball> {
    Collidable::new(Ball::new(1.0), Isometry::translation(x, y, z))
}

#[test]
#[allow(non_snake_case)]
fn cuboid_cuboid_EPA() {
    let c = Cuboid::new(Vector::new(2.0, 1.0, 1.0));

    let a = Collidable::new(c, Isometry::translation(3.5, 0.0, 0.0));
    let b = Collidable::new(c, Isometry::identity());
    let res = query::test_collision(&a, &b).expect("Penetration not found.");
    assert_relative_eq!(res.penetration_depth, 0.5 + MARGIN, epsilon = 1.0e-4);
    assert_relative_eq!(*res.contact_normal, -Vector::x(), epsilon = 1.0e-4);

    let a = Collidable::new(c, Isometry::translation(0.0, 0.2, 0.0));
    let res = query::test_collision(&a, &b).expect("Penetration not found.");
    assert_relative_eq!(res.penetration_depth, 1.8 + MARGIN, epsilon = 1.0e-4);
    assert_relative_eq!(*res.contact_normal, -Vector::y(), epsilon = 1.0e-4);
}

#[test]
fn overlapping_unit_cubes() {
    let cube = Cuboid::new(Vector::repeat(0.5));
    let a = Collidable::new(cube, Isometry::identity());
    let b = Collidable::new(cube, Isometry::translation(0.5, 0.0, 0.0));

    let res = query::test_collision(&a, &b).expect("Penetration not found.");
    assert_relative_eq!(res.penetration_depth, 0.5 + MARGIN, epsilon = 1.0e-4);
    assert_relative_eq!(res.contact_normal.x, 1.0, epsilon = 1.0e-4);

    // The contact point lies inside the overlap region.
    assert!(res.contact_point.x >= 0.0 && res.contact_point.x <= 0.5);
}

#[test]
fn overlapping_spheres() {
    let a = ball_at(0.0, 0.0, 0.0);
    let b = ball_at(1.5, 0.0, 0.0);

    let res = query::test_collision(&a, &b).expect("Penetration not found.");

    // Spheres overlap by 0.5; the smooth surface makes EPA converge
    // approximately rather than exactly.
    assert_relative_eq!(res.penetration_depth, 0.5 + MARGIN, epsilon = 0.05);
    assert!(res.contact_normal.x > 0.95);
    assert_relative_eq!(res.contact_normal.norm(), 1.0, epsilon = 1.0e-5);
}

#[test]
fn overlapping_spheres_along_an_arbitrary_axis() {
    let a = ball_at(0.0, 0.0, 0.0);
    let b = ball_at(0.9, 0.9, 0.9);

    let res = query::test_collision(&a, &b).expect("Penetration not found.");

    let axis = Vector::repeat(1.0 as Real / (3.0 as Real).sqrt());
    assert!(res.contact_normal.dot(&axis) > 0.95);
    let expected = 2.0 - (0.9 as Real * 0.9 * 3.0).sqrt() + MARGIN;
    assert_relative_eq!(res.penetration_depth, expected, epsilon = 0.05);
}

#[test]
fn coincident_spheres_report_a_finite_contact() {
    let a = ball_at(0.0, 0.0, 0.0);
    let b = ball_at(0.0, 0.0, 0.0);

    let res = query::test_collision(&a, &b).expect("Penetration not found.");

    assert!(res.penetration_depth > 0.0);
    assert!(res.penetration_depth.is_finite());
    assert_relative_eq!(res.contact_normal.norm(), 1.0, epsilon = 1.0e-5);
    assert!(res.contact_point.coords.iter().all(|x| x.is_finite()));
}

#[test]
fn sphere_inside_large_box() {
    let ball = Collidable::new(Ball::new(0.5), Isometry::translation(0.0, 1.5, 0.0));
    let cube = Collidable::new(Cuboid::new(Vector::repeat(2.0)), Isometry::identity());

    let res = query::test_collision(&cube, &ball).expect("Penetration not found.");

    // The sphere pokes out through the +y face of the box.
    assert!(res.contact_normal.y > 0.9);
    assert!(res.penetration_depth > 0.0);
}
