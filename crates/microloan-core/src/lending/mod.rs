pub mod format;
pub mod product;
pub mod quote;
pub mod schedule;
