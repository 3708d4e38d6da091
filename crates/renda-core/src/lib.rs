pub mod error;
pub mod instrument;
pub mod rates;
pub mod tax;
pub mod types;

pub use error::RendaFixaError;
pub use types::*;

/// Standard result type for all renda-core operations
pub type RendaFixaResult<T> = Result<T, RendaFixaError>;
