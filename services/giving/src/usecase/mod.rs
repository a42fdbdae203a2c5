pub mod donation;
pub mod organization;
pub mod tax_report;
