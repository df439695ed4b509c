pub mod schools;
pub mod users;
