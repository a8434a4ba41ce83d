pub mod config;
pub mod touch;
pub mod transform;
