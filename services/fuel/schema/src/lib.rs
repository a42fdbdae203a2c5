//! sea-orm entities owned by the fuel service.

pub mod efficiency_reports;
pub mod fill_ups;
pub mod vehicles;
