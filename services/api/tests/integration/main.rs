
mod auth_test;
mod category_test;
mod employee_test;
