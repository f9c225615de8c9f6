pub mod accounts;
pub mod entities;
pub mod error;

// Re-export tracing for use in this crate
pub use tracing;

pub use accounts::{normalize_email, ExtraFields, UserManager, MAX_PASSWORD_BYTES};
pub use error::AccountError;
