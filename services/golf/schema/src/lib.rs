//! sea-orm entities owned by the golf service.

pub mod courses;
pub mod hole_scores;
pub mod rounds;
