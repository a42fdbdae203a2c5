//! sea-orm entities owned by the giving service.

pub mod donations;
pub mod organizations;
pub mod tax_reports;
