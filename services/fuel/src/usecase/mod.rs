pub mod fill_up;
pub mod report;
pub mod vehicle;
