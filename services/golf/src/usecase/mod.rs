pub mod course;
pub mod hole;
pub mod round;
