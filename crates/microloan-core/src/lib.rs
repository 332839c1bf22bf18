pub mod error;
pub mod types;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "applications")]
pub mod applications;

pub use error::MicroloanError;
pub use types::*;

/// Standard result type for all microloan operations
pub type MicroloanResult<T> = Result<T, MicroloanError>;
