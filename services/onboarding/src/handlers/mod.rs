pub mod health;
pub mod school;
pub mod staff;
