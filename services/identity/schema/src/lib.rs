//! sea-orm entities owned by the identity service.

pub mod roles;
pub mod user_roles;
pub mod users;
