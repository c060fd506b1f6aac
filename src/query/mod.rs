//! Non-persistent collision queries on pairs of convex rigid bodies.
//!
//! The entry points are:
//!
//! * [`test_collision()`] to compute one contact point between two bodies,
//!   including penetrating and margin (near-touching) contacts.
//! * [`intersection_test()`] to determine whether two bodies overlap, without
//!   assembling contact information.
//! * [`CollisionDetector`] to run either of the above while reusing internal
//!   allocations across queries.

pub use self::contact::{intersection_test, test_collision, CollisionDetector, ContactDetails};

pub mod epa;
pub mod gjk;

mod contact;

use crate::math::Real;

/// The thickness of the virtual contact skin around each body.
///
/// Bodies separated by less than this margin are reported as (shallow)
/// contacts, which keeps resting stacks stable for a downstream constraint
/// solver. The margin is also folded into reported penetration depths.
pub const MARGIN: Real = 0.03;

/// The iteration budget of the GJK and EPA loops.
///
/// Reaching it means the query degenerated: GJK reports a conservative miss,
/// EPA falls back to its best face so far.
pub const MAX_ITERATIONS: usize = 20;
