pub mod goal;
pub mod intake;
pub mod reminder;
pub mod summary;
