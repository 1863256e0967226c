pub mod auth;
pub mod category;
pub mod employee;
pub mod permission;
pub mod user;

/// Empty string fields on update payloads mean "leave unchanged".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
