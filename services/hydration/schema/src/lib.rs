//! sea-orm entities owned by the hydration service.

pub mod goals;
pub mod intakes;
pub mod reminders;
