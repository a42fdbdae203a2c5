pub mod course;
pub mod round;
