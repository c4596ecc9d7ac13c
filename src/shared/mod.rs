// Shared kernel: cross-cutting error types and utilities

pub mod errors; // Shared error types
pub mod utils; // Shared utilities (logging)

// Re-exports for convenience
pub use errors::{AppError, AppResult};
