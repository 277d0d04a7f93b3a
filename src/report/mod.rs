//! Report module - scored output and terminal summaries

pub mod predictions;
pub mod summary;

pub use predictions::*;
pub use summary::*;
