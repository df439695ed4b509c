pub mod identity;
pub mod serde;
pub mod tracing;
