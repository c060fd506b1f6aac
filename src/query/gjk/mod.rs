//! The Gilbert-Johnson-Keerthi overlap test.

pub use self::simplex::{GjkStatus, Simplex};
pub use self::support_point::{find_support, SupportPoint, SupportPointId, SupportPointPool};

mod simplex;
mod support_point;

use crate::math::{Real, DEFAULT_EPSILON};

/// The absolute tolerance below which a geometric quantity is treated as zero
/// by the GJK and EPA algorithms.
pub fn eps_tol() -> Real {
    DEFAULT_EPSILON * 100.0
}
