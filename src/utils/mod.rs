//! Various unsorted geometrical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::closest_point::{
    barycentric_coordinates, closest_point_in_triangle, closest_point_on_segment,
    segment_barycentric_coordinates,
};

mod ccw_face_normal;
mod closest_point;
