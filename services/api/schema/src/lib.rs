//! sea-orm entities for the palisade API service.

pub mod categories;
pub mod employees;
pub mod user_category_permissions;
pub mod user_logins;
pub mod users;
