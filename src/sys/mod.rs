//! System Definitions (ABI).
//!
//! Tipos e códigos de erro fundamentais compartilhados pelos subsistemas.

pub mod error;
pub mod types;

pub use error::Errno;
pub use types::Tid;
