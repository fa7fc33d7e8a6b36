mod employee;
mod employee_filter;
mod organization;
mod user;

pub use employee::*;
pub use employee_filter::*;
pub use organization::*;
pub use user::*;
