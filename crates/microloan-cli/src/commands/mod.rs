pub mod applications;
pub mod lending;
