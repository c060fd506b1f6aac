/*!
touche3d
========

**touche3d** is a narrow-phase collision detector for convex 3D rigid
bodies written with the rust programming language.

Given two convex bodies it decides whether they intersect and, when they
do, produces a single contact point: the world-space contact location, its
coordinates in each body's local frame, a unit contact normal, the
penetration depth, and the pair's combined restitution and friction
coefficients. Overlap is decided by GJK on the configuration-space
obstacle (the Minkowski difference of the two bodies); penetration depth
and normal come from EPA seeded with GJK's final simplex. Near-misses
within a small margin around each body are reported as shallow contacts,
which keeps resting contacts stable for a downstream constraint solver.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod body;
pub mod math;
pub mod query;
pub mod shape;
pub mod utils;
