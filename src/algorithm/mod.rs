pub mod arbiter;
pub mod controller;
pub mod geometry;
pub mod pan;
pub mod pinch;
pub mod snap;
